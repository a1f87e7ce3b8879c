use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the base directory when no configuration path is given
pub const CONFIG_FILE_NAME: &str = "aspm.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of vulnerability categories kept by the top-categories ranking
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Text contained in the name of the performance indicator carrying the security rating
    #[serde(default = "default_rating_indicator")]
    pub rating_indicator: String,

    /// `scanStatus` value marking an issue as not yet reviewed
    #[serde(default = "default_unreviewed_status")]
    pub unreviewed_status: String,

    /// Issue field holding the time an issue was first detected
    #[serde(default = "default_remediation_start_field")]
    pub remediation_start_field: String,

    /// Issue field holding the time an issue was no longer detected
    #[serde(default = "default_remediation_end_field")]
    pub remediation_end_field: String,
}

const fn default_top_categories() -> usize {
    10
}

fn default_rating_indicator() -> String {
    "FortifySecurityRating".to_string()
}

fn default_unreviewed_status() -> String {
    "UNREVIEWED".to_string()
}

fn default_remediation_start_field() -> String {
    "foundDate".to_string()
}

fn default_remediation_end_field() -> String {
    "removedDate".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `aspm.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path: Utf8PathBuf = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is empty or out of range
    pub fn validate(&self) -> Result<()> {
        if self.top_categories == 0 {
            return Err(app_err!("top_categories must be at least 1"));
        }

        let names = [
            ("rating_indicator", &self.rating_indicator),
            ("unreviewed_status", &self.unreviewed_status),
            ("remediation_start_field", &self.remediation_start_field),
            ("remediation_end_field", &self.remediation_end_field),
        ];

        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(app_err!("{key} must not be empty"));
            }
        }

        if self.remediation_start_field == self.remediation_end_field {
            return Err(app_err!(
                "remediation_start_field and remediation_end_field must differ, both are '{}'",
                self.remediation_start_field
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.top_categories, 10);
        assert_eq!(config.rating_indicator, "FortifySecurityRating");
        assert_eq!(config.unreviewed_status, "UNREVIEWED");
        assert_eq!(config.remediation_start_field, "foundDate");
        assert_eq!(config.remediation_end_field, "removedDate");
    }

    #[test]
    fn test_empty_toml_uses_field_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("top_categoriez = 3").is_err());
    }

    #[test]
    fn test_validate_zero_top_categories() {
        let config = Config { top_categories: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_names() {
        let config = Config { rating_indicator: String::new(), ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { unreviewed_status: "  ".to_string(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_same_remediation_fields() {
        let config = Config { remediation_end_field: "foundDate".to_string(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let output_path = base_dir.join(CONFIG_FILE_NAME);
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load(&base_dir, Some(output_path.as_path())).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_finds_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base_dir.join(CONFIG_FILE_NAME), "top_categories = 3\n").unwrap();

        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.top_categories, 3);
        assert_eq!(config.unreviewed_status, "UNREVIEWED");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_values_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "top_categories = 0\n").unwrap();

        assert!(Config::load(Utf8Path::new("."), Some(path.as_path())).is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        assert!(Config::load(Utf8Path::new("."), Some(Utf8Path::new("no/such/aspm.toml"))).is_err());
    }

    #[test]
    fn test_default_config_toml_is_not_empty() {
        assert!(!DEFAULT_CONFIG_TOML.is_empty());
    }
}
