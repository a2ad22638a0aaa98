//! Credential storage for the role-based support portals.
//!
//! Each portal (customer, agent, supervisor, vendor) authenticates with its
//! own bearer token, stored under a role-namespaced key. The store is an
//! injectable dependency rather than ambient global state so the 401 path
//! can be exercised deterministically in tests.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Prefix shared by all credential storage keys.
const STORAGE_KEY_PREFIX: &str = "support_portal_token";

/// The portal role a credential belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Customer portal.
    Customer,

    /// Support agent portal.
    Agent,

    /// Supervisor portal.
    Supervisor,

    /// Vendor portal.
    Vendor,
}

impl Role {
    /// All roles, in a fixed order.
    ///
    /// A 401 on any client clears the credential for every role, so code
    /// iterating this slice must not assume a particular role triggered it.
    pub const ALL: [Role; 4] = [Role::Customer, Role::Agent, Role::Supervisor, Role::Vendor];

    /// Returns the lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Agent => "agent",
            Role::Supervisor => "supervisor",
            Role::Vendor => "vendor",
        }
    }

    /// Returns the role-namespaced storage key for this role's token.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", STORAGE_KEY_PREFIX, self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "agent" => Ok(Role::Agent),
            "supervisor" => Ok(Role::Supervisor),
            "vendor" => Ok(Role::Vendor),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Storage for per-role bearer credentials.
///
/// Implementations back this with whatever the host provides (browser local
/// storage, a keychain, an in-memory map for tests). Clients only read
/// tokens, except for the unconditional clear-on-401 side effect, which is
/// safe under races because it always moves toward the same terminal
/// logged-out state.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token for the given role, if any.
    fn get(&self, role: Role) -> Option<String>;

    /// Stores a token for the given role.
    fn set(&self, role: Role, token: String);

    /// Removes every role's stored token.
    fn clear_all(&self);

    /// Requests navigation to the login entry point.
    fn redirect_to_login(&self);
}

/// An in-memory token store.
///
/// Used by tests and by the CLI host, where "redirect to login" amounts to
/// remembering that re-authentication is required.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, String>>,
    redirect_requested: AtomicBool,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single token for the given role.
    pub fn with_token(role: Role, token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(role, token.into());
        store
    }

    /// Returns true if a login redirect has been requested.
    pub fn redirect_requested(&self) -> bool {
        self.redirect_requested.load(Ordering::SeqCst)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, role: Role) -> Option<String> {
        let tokens = self.tokens.lock().unwrap();
        tokens.get(&role.storage_key()).cloned()
    }

    fn set(&self, role: Role, token: String) {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.insert(role.storage_key(), token);
    }

    fn clear_all(&self) {
        let mut tokens = self.tokens.lock().unwrap();
        for role in Role::ALL {
            tokens.remove(&role.storage_key());
        }
    }

    fn redirect_to_login(&self) {
        self.redirect_requested.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_role_namespaced() {
        assert_eq!(
            Role::Customer.storage_key(),
            "support_portal_token_customer"
        );
        assert_eq!(Role::Agent.storage_key(), "support_portal_token_agent");
        assert_eq!(
            Role::Supervisor.storage_key(),
            "support_portal_token_supervisor"
        );
        assert_eq!(Role::Vendor.storage_key(), "support_portal_token_vendor");
    }

    #[test]
    fn role_from_str() {
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!("AGENT".parse::<Role>().unwrap(), Role::Agent);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn clear_all_removes_every_role() {
        let store = MemoryTokenStore::new();
        for (i, role) in Role::ALL.iter().enumerate() {
            store.set(*role, format!("token-{i}"));
        }
        assert_eq!(store.get(Role::Supervisor).as_deref(), Some("token-2"));

        store.clear_all();
        for role in Role::ALL {
            assert!(store.get(role).is_none());
        }
    }

    #[test]
    fn redirect_flag_latches() {
        let store = MemoryTokenStore::new();
        assert!(!store.redirect_requested());
        store.redirect_to_login();
        store.redirect_to_login();
        assert!(store.redirect_requested());
    }
}
