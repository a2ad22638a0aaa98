//! Configuration types for the chat widget host.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling widget behavior.

use arrrg_derive::CommandLine;

use crate::api::DEFAULT_HISTORY_LIMIT;
use crate::token_store::Role;

/// Command-line arguments for the helpdesk-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct WidgetArgs {
    /// Base URL of the support API.
    #[arrrg(optional, "Base URL of the support API (default: $HELPDESK_API_URL)", "URL")]
    pub base_url: Option<String>,

    /// Portal role to authenticate as.
    #[arrrg(optional, "Role to authenticate as (default: customer)", "ROLE")]
    pub role: Option<String>,

    /// Bearer token for the selected role.
    #[arrrg(optional, "Bearer token for the selected role", "TOKEN")]
    pub token: Option<String>,

    /// Knowledge-base category restriction for retrieval.
    #[arrrg(optional, "Restrict retrieval to a knowledge-base category", "CATEGORY")]
    pub category: Option<String>,

    /// Messages fetched per history read.
    #[arrrg(optional, "Messages fetched per history read (default: 50)", "N")]
    pub history_limit: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a widget session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// The portal role the session authenticates as.
    pub role: Role,

    /// Optional knowledge-base category restriction applied to every send.
    pub category_filter: Option<String>,

    /// Messages fetched per history read.
    pub history_limit: u32,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl WidgetConfig {
    /// Creates a new WidgetConfig with default values.
    ///
    /// Defaults:
    /// - Role: customer
    /// - Category filter: none
    /// - History limit: 50
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            role: Role::Customer,
            category_filter: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            use_color: true,
        }
    }

    /// Sets the portal role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the category filter.
    pub fn with_category_filter(mut self, category: impl Into<String>) -> Self {
        self.category_filter = Some(category.into());
        self
    }

    /// Sets the history limit.
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&WidgetArgs> for WidgetConfig {
    fn from(args: &WidgetArgs) -> Self {
        let role = args
            .role
            .as_deref()
            .and_then(|s| s.parse::<Role>().ok())
            .unwrap_or(Role::Customer);

        WidgetConfig {
            role,
            category_filter: args.category.clone(),
            history_limit: args.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WidgetConfig::new();
        assert_eq!(config.role, Role::Customer);
        assert!(config.category_filter.is_none());
        assert_eq!(config.history_limit, 50);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = WidgetArgs::default();
        let config = WidgetConfig::from(&args);
        assert_eq!(config.role, Role::Customer);
        assert_eq!(config.history_limit, 50);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = WidgetArgs {
            base_url: Some("https://support.example.com/api/".to_string()),
            role: Some("agent".to_string()),
            token: Some("tok".to_string()),
            category: Some("returns".to_string()),
            history_limit: Some(10),
            no_color: true,
        };
        let config = WidgetConfig::from(&args);
        assert_eq!(config.role, Role::Agent);
        assert_eq!(config.category_filter.as_deref(), Some("returns"));
        assert_eq!(config.history_limit, 10);
        assert!(!config.use_color);
    }

    #[test]
    fn unknown_role_falls_back_to_customer() {
        let args = WidgetArgs {
            role: Some("admin".to_string()),
            ..WidgetArgs::default()
        };
        let config = WidgetConfig::from(&args);
        assert_eq!(config.role, Role::Customer);
    }

    #[test]
    fn config_builder_pattern() {
        let config = WidgetConfig::new()
            .with_role(Role::Supervisor)
            .with_category_filter("shipping")
            .with_history_limit(25)
            .without_color();

        assert_eq!(config.role, Role::Supervisor);
        assert_eq!(config.category_filter.as_deref(), Some("shipping"));
        assert_eq!(config.history_limit, 25);
        assert!(!config.use_color);
    }
}
