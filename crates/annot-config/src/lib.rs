//! # annot-config
//!
//! Layered configuration loading for annotation reconciliation using figment.
//!
//! Later layers override earlier ones:
//! 1. built-in defaults
//! 2. `~/.config/annot/config.toml`
//! 3. `.annot/config.toml` in the working directory
//! 4. `ANNOT_*` environment variables, `__` separating section and key
//!
//! Figment maps `ANNOT_VOCAB__THESAURUS_PATH` -> `vocab.thesaurus_path`,
//! `ANNOT_CONDUCTANCE__SPECIES` -> `conductance.species`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use annot_config::AnnotConfig;
//!
//! let config = AnnotConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if let Some(path) = &config.vocab.thesaurus_path {
//!     println!("Thesaurus: {}", path.display());
//! }
//! ```

mod conductance;
mod error;
mod stoich;
mod vocab;

pub use conductance::ConductanceConfig;
pub use error::ConfigError;
pub use stoich::{DEFAULT_DROP_TERMS, StoichConfig};
pub use vocab::VocabConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnnotConfig {
    #[serde(default)]
    pub vocab: VocabConfig,
    #[serde(default)]
    pub stoich: StoichConfig,
    #[serde(default)]
    pub conductance: ConductanceConfig,
}

impl AnnotConfig {
    /// Defaults, then TOML files, then `ANNOT_*` variables.
    ///
    /// `.env` files are not read here; see [`Self::load_with_dotenv`].
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Like [`Self::load`], after exporting `.annot/.env` (or the nearest
    /// `.env`) into the process environment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let project_env = PathBuf::from(".annot/.env");
        if project_env.exists() {
            let _ = dotenvy::from_path(&project_env);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load()
    }

    /// The provider stack behind [`Self::load`], open for extra layers.
    pub fn figment() -> Figment {
        let user_file = dirs::config_dir()
            .map(|dir| dir.join("annot").join("config.toml"))
            .filter(|path| path.exists());
        let project_file = PathBuf::from(".annot/config.toml");

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = user_file {
            figment = figment.merge(Toml::file(path));
        }
        if project_file.exists() {
            figment = figment.merge(Toml::file(project_file));
        }
        figment.merge(Env::prefixed("ANNOT_").split("__"))
    }

    /// Reject values the reconciliation crates cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.vocab.explode_delimiter.is_empty() {
            return Err(invalid("vocab.explode_delimiter", "must not be empty"));
        }
        if self.vocab.target_column.is_empty() {
            return Err(invalid("vocab.target_column", "must not be empty"));
        }
        if self.conductance.species.is_empty() {
            return Err(invalid("conductance.species", "at least one species tag is required"));
        }
        Ok(())
    }

    /// Path of the thesaurus CSV, which every run needs.
    pub fn require_thesaurus_path(&self) -> Result<&PathBuf, ConfigError> {
        self.vocab
            .thesaurus_path
            .as_ref()
            .ok_or_else(|| ConfigError::MissingRuleTable {
                section: "vocab".into(),
                key: "thesaurus_path".into(),
            })
    }
}
