//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use std::path::PathBuf;

use annot_config::AnnotConfig;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[vocab]
thesaurus_path = "data/thesaurus.csv"
explode_delimiter = "|"

[stoich]
overrides_path = "data/overrides.toml"
drop_terms = ["?", "Uncertain"]

[conductance]
species = ["1", "2", "3"]
ensembl_database_id = "15"
"#,
        )?;

        let config: AnnotConfig = Figment::from(Serialized::defaults(AnnotConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.vocab.thesaurus_path,
            Some(PathBuf::from("data/thesaurus.csv"))
        );
        assert_eq!(config.vocab.explode_delimiter, "|");
        assert_eq!(config.vocab.target_column, "carried_solute");
        assert_eq!(
            config.stoich.overrides_path,
            Some(PathBuf::from("data/overrides.toml"))
        );
        assert_eq!(config.stoich.drop_terms, vec!["?", "Uncertain"]);
        assert_eq!(config.conductance.species, vec!["1", "2", "3"]);
        assert_eq!(config.conductance.ensembl_species, "1");
        Ok(())
    });
}

#[test]
fn empty_file_yields_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "")?;

        let config: AnnotConfig = Figment::from(Serialized::defaults(AnnotConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.vocab.thesaurus_path.is_none());
        assert_eq!(config.conductance.channel_target_types, vec!["lgic", "vgic", "other_ic"]);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[vocab]
target_column = "carried_solute"
"#,
        )?;
        jail.set_env("ANNOT_VOCAB__TARGET_COLUMN", "ion");
        jail.set_env("ANNOT_CONDUCTANCE__ENSEMBL_DATABASE_ID", "16");

        let config: AnnotConfig = Figment::from(Serialized::defaults(AnnotConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ANNOT_").split("__"))
            .extract()?;

        assert_eq!(config.vocab.target_column, "ion");
        assert_eq!(config.conductance.ensembl_database_id, "16");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".annot")?;
        jail.create_file(
            ".annot/config.toml",
            r#"
[vocab]
thesaurus_path = "local.csv"
"#,
        )?;

        let config = AnnotConfig::load().expect("config loads");
        assert_eq!(config.vocab.thesaurus_path, Some(PathBuf::from("local.csv")));
        Ok(())
    });
}

#[test]
fn invalid_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[vocab\nthesaurus_path = ")?;

        let result: Result<AnnotConfig, _> =
            Figment::from(Serialized::defaults(AnnotConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();

        assert!(result.is_err());
        Ok(())
    });
}
