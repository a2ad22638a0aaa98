// Public modules
pub mod api;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod token_store;
pub mod types;
pub mod utils;
pub mod widget;

// Re-exports
pub use api::ChatApi;
pub use client::Helpdesk;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use token_store::{MemoryTokenStore, Role, TokenStore};
pub use types::*;
