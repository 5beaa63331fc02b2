//! Errors raised while loading or checking settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or the merged value did not fit the schema.
    #[error("Failed to load annotation settings: {0}")]
    Load(#[from] figment::Error),

    /// A rule table every run needs has no path.
    #[error("No '{key}' set in [{section}]; the run needs this rule table")]
    MissingRuleTable { section: String, key: String },

    #[error("Setting '{field}' is unusable: {reason}")]
    InvalidValue { field: String, reason: String },
}
