//! Layered configuration for wrench.
//!
//! Settings are merged in order, later sources winning:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a configuration file (TOML, YAML or JSON, chosen by extension),
//! 3. `WRENCH_`-prefixed environment variables, with `__` separating nested
//!    keys (`WRENCH_REPORT__SEARCH_LIMIT=5`).
//!
//! Command-line flags are applied on top by the binary.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "WRENCH_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the code database
    pub database: PathBuf,
    pub extract: ExtractConfig,
    pub report: ReportConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("database/obd-codes.json"),
            extract: ExtractConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Also accept `P-0301` and `P 0301`
    pub lenient: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub preview_bytes: usize,
    pub search_limit: usize,
    pub listing_limit: usize,
}
impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_bytes: 400,
            search_limit: 10,
            listing_limit: 20,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from [`default_path`] when none is
    /// given. An explicit path must exist; the default one is optional.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Self::extract(Some(path)),
            None => Self::extract(default_path().filter(|path| path.is_file()).as_deref()),
        }
    }

    fn extract(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading configuration file");
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(file)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(file)),
                Some("json") => figment.merge(Json::file_exact(file)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(file.to_path_buf())),
            };
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .or_raise(|| ErrorKind::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every report or lookup useless.
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid { field: "database", reason: "must not be empty" });
        }
        let limits = [
            ("report.preview_bytes", self.report.preview_bytes),
            ("report.search_limit", self.report.search_limit),
            ("report.listing_limit", self.report.listing_limit),
        ];
        for (field, value) in limits {
            if value == 0 {
                exn::bail!(ErrorKind::Invalid { field, reason: "must be greater than zero" });
            }
        }
        Ok(())
    }
}

/// `config.toml` in the platform's configuration directory for wrench, if
/// the platform has one.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "wrench").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config = Config::extract(None).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.database, Path::new("database/obd-codes.json"));
            assert!(!config.extract.lenient);
            assert_eq!(config.report.preview_bytes, 400);
            Ok(())
        });
    }

    #[rstest]
    #[case("wrench.toml", "database = \"codes.json\"\n[report]\nsearch_limit = 3\n")]
    #[case("wrench.yaml", "database: codes.json\nreport:\n  search_limit: 3\n")]
    #[case("wrench.yml", "database: codes.json\nreport:\n  search_limit: 3\n")]
    #[case("wrench.json", r#"{"database": "codes.json", "report": {"search_limit": 3}}"#)]
    fn test_file_formats(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let config = Config::load(Some(Path::new(name))).unwrap();
            assert_eq!(config.database, Path::new("codes.json"));
            assert_eq!(config.report.search_limit, 3);
            // Untouched settings keep their defaults.
            assert_eq!(config.report.listing_limit, 20);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("wrench.toml", "[extract]\nlenient = false\n[report]\nlisting_limit = 5\n")?;
            jail.set_env("WRENCH_EXTRACT__LENIENT", "true");
            jail.set_env("WRENCH_REPORT__LISTING_LIMIT", "7");
            jail.set_env("WRENCH_DATABASE", "/srv/codes.json");
            let config = Config::load(Some(Path::new("wrench.toml"))).unwrap();
            assert!(config.extract.lenient);
            assert_eq!(config.report.listing_limit, 7);
            assert_eq!(config.database, Path::new("/srv/codes.json"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_| {
            let err = Config::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("nope.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("wrench.ini", "database = codes.json")?;
            let err = Config::load(Some(Path::new("wrench.ini"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
            Ok(())
        });
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        Jail::expect_with(|jail| {
            jail.set_env("WRENCH_REPORT__SEARCH_LIMIT", "plenty");
            let err = Config::extract(None).unwrap_err();
            assert_eq!(*err, ErrorKind::Parse);
            Ok(())
        });
    }

    #[rstest]
    #[case("WRENCH_REPORT__PREVIEW_BYTES", "0", "report.preview_bytes")]
    #[case("WRENCH_REPORT__SEARCH_LIMIT", "0", "report.search_limit")]
    #[case("WRENCH_REPORT__LISTING_LIMIT", "0", "report.listing_limit")]
    #[case("WRENCH_DATABASE", "", "database")]
    fn test_validation(#[case] var: &str, #[case] value: &str, #[case] field: &str) {
        Jail::expect_with(|jail| {
            jail.set_env(var, value);
            let err = Config::extract(None).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid { field: f, .. } if *f == field));
            Ok(())
        });
    }

    #[test]
    fn test_default_path_is_config_toml() {
        if let Some(path) = default_path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }
}
