use serde::{Deserialize, Serialize};

/// The return window for a product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnWindow {
    /// The product category the window applies to.
    pub category: String,

    /// Length of the window in days.
    pub days: u32,

    /// Policy note shown alongside the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}
