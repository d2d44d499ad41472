use crate::programs::ProgramKind;
use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents options provided to the tool. Options can come from a toml
/// file (`--config`); command line flags override whatever the file sets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Which program to compile.
    pub program: ProgramKind,
    /// TEAL version to target. Each program has its own default.
    pub version: Option<u8>,
    /// Where to write the TEAL. Printed to stdout when unset.
    pub output_path: Option<PathBuf>,
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            program: ProgramKind::default(),
            version: None,
            output_path: None,
            verbosity_level: LevelFilter::Info,
        }
    }
}

impl Options {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid options file {}", path.display()))
    }

    /// Version to compile at: the configured one, else the program's default
    pub fn target_version(&self) -> u8 {
        self.version.unwrap_or_else(|| self.program.default_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let options = Options::from_toml("").unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.target_version(), 3);
    }

    #[test]
    fn parses_all_fields() {
        let options = Options::from_toml(
            r#"
            program = "gold-transfer"
            version = 4
            output_path = "out.teal"
            verbosity_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(options.program, ProgramKind::GoldTransfer);
        assert_eq!(options.target_version(), 4);
        assert_eq!(options.output_path, Some(PathBuf::from("out.teal")));
        assert_eq!(options.verbosity_level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Options::from_toml("mode = \"application\"").is_err());
    }

    #[test]
    fn gold_transfer_defaults_to_version_two() {
        let options = Options {
            program: ProgramKind::GoldTransfer,
            ..Options::default()
        };
        assert_eq!(options.target_version(), 2);
    }
}
