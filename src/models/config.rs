//! Configuration types for the job board.
//!
//! This module contains configuration structures for the job source, the
//! listing controller (page size, debounce window), the simulated session and
//! display settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Role;

/// Board configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    pub source: SourceConfig,

    pub listing: ListingConfig,

    pub session: SessionConfig,

    pub display: DisplayConfig,
}

/// Where job data comes from
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the JSON catalog file.
    /// If not set, `<data dir>/hirrd/catalog.json` is used
    pub catalog: Option<PathBuf>,

    /// Artificial latency added to every request, in milliseconds
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Job cards per page
    pub items_per_page: usize,

    /// Quiet period before search input is applied, in milliseconds
    pub debounce_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: 6,
            debounce_ms: 500,
        }
    }
}

/// Minimum and maximum page size
const MIN_ITEMS_PER_PAGE: usize = 1;
const MAX_ITEMS_PER_PAGE: usize = 60;

/// Minimum debounce window in milliseconds (anything lower stops coalescing keystrokes)
const MIN_DEBOUNCE_MS: u64 = 10;

/// Strict-mode configuration failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("listing.{field} {reason}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value '{value}' for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ListingConfig {
    /// Validate listing values.
    /// Returns warnings for invalid values that were corrected to defaults.
    /// If `strict` is true, returns Err instead of correcting values.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        if !(MIN_ITEMS_PER_PAGE..=MAX_ITEMS_PER_PAGE).contains(&self.items_per_page) {
            let err = ConfigError::OutOfRange {
                field: "items_per_page",
                value: self.items_per_page.to_string(),
                reason: format!("must be between {MIN_ITEMS_PER_PAGE} and {MAX_ITEMS_PER_PAGE}"),
            };
            if strict {
                return Err(err);
            }
            warnings.push(format!("{err} - using default ({})", defaults.items_per_page));
            self.items_per_page = defaults.items_per_page;
        }

        if self.debounce_ms < MIN_DEBOUNCE_MS {
            let err = ConfigError::OutOfRange {
                field: "debounce_ms",
                value: self.debounce_ms.to_string(),
                reason: format!("must be at least {MIN_DEBOUNCE_MS}ms"),
            };
            if strict {
                return Err(err);
            }
            warnings.push(format!("{err} - using default ({})", defaults.debounce_ms));
            self.debounce_ms = defaults.debounce_ms;
        }

        Ok(warnings)
    }
}

/// Simulated identity provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub signed_in: bool,

    pub role: Option<Role>,

    /// Delay before the session reports ready, in milliseconds
    pub ready_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            signed_in: true,
            role: Some(Role::Candidate),
            ready_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name
    pub theme: String,

    /// Location filter options (empty = built-in list)
    pub locations: Vec<String>,

    /// Maximum length for job titles on cards before truncation
    pub title_max_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            locations: Vec::new(),
            title_max_length: 32,
        }
    }
}

impl BoardConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/hirrd/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/hirrd/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/hirrd/config.toml
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("hirrd/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config/hirrd/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("hirrd/config.toml"))
    }

    /// Catalog path to read, falling back to the platform data directory
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.source.catalog.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hirrd/catalog.json")
        })
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> Result<(Self, Vec<String>), ConfigError> {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(&mut config, Path::new("/etc/hirrd/config.toml"), strict, &mut warnings)?;

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut config, &user_path, strict, &mut warnings)?;
        }

        config.apply_env_overrides(strict, &mut warnings)?;

        warnings.extend(config.listing.validate(strict)?);

        Ok((config, warnings))
    }

    /// Check if strict config mode is enabled via HIRRD_STRICT_CONFIG
    fn is_strict_mode() -> bool {
        std::env::var("HIRRD_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Load a config file, collecting warnings on parse errors but not on missing files.
    fn load_config_file(
        config: &mut Self,
        path: &Path,
        strict: bool,
        warnings: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        let display_path = path.to_string_lossy().to_string();

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(parsed) => config.merge(parsed),
                Err(e) => {
                    let err = ConfigError::Parse {
                        path: display_path,
                        message: e.to_string(),
                    };
                    if strict {
                        return Err(err);
                    }
                    warnings.push(err.to_string());
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let err = ConfigError::Read {
                    path: display_path,
                    source: e,
                };
                if strict {
                    return Err(err);
                }
                warnings.push(err.to_string());
            }
        }
        Ok(())
    }

    /// Parse a TOML document into a config
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn merge(&mut self, other: BoardConfig) {
        // A later file without a catalog keeps the earlier one
        self.source.catalog = other.source.catalog.or(self.source.catalog.take());
        self.source.latency_ms = other.source.latency_ms;
        self.listing = other.listing;
        self.session = other.session;
        self.display = other.display;
    }

    fn apply_env_overrides(
        &mut self,
        strict: bool,
        warnings: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("HIRRD_CATALOG")
            && !val.is_empty()
        {
            self.source.catalog = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("HIRRD_ITEMS_PER_PAGE") {
            match val.parse::<usize>() {
                Ok(n) => self.listing.items_per_page = n,
                Err(_) => Self::report_env_error(
                    strict,
                    warnings,
                    "HIRRD_ITEMS_PER_PAGE",
                    &val,
                    "expected a positive integer",
                )?,
            }
        }

        if let Ok(val) = std::env::var("HIRRD_DEBOUNCE_MS") {
            match val.parse::<u64>() {
                Ok(ms) => self.listing.debounce_ms = ms,
                Err(_) => Self::report_env_error(
                    strict,
                    warnings,
                    "HIRRD_DEBOUNCE_MS",
                    &val,
                    "expected a positive integer (milliseconds)",
                )?,
            }
        }

        if let Ok(val) = std::env::var("HIRRD_ROLE") {
            match val.parse::<Role>() {
                Ok(role) => self.session.role = Some(role),
                Err(reason) => {
                    Self::report_env_error(strict, warnings, "HIRRD_ROLE", &val, &reason)?
                }
            }
        }

        if let Ok(val) = std::env::var("HIRRD_THEME") {
            self.display.theme = val;
        }

        Ok(())
    }

    /// Report an environment variable error, failing if strict mode is enabled
    fn report_env_error(
        strict: bool,
        warnings: &mut Vec<String>,
        var: &'static str,
        value: &str,
        reason: &str,
    ) -> Result<(), ConfigError> {
        let err = ConfigError::Env {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        };
        if strict {
            return Err(err);
        }
        warnings.push(format!("{err} - using default"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_config_defaults_are_valid() {
        let mut config = ListingConfig::default();
        let warnings = config.validate(false).unwrap();
        assert!(warnings.is_empty(), "No warnings expected for defaults");
        assert_eq!(config.items_per_page, 6);
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_listing_config_zero_items_per_page_corrected() {
        let mut config = ListingConfig {
            items_per_page: 0,
            debounce_ms: 500,
        };

        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("items_per_page"));
        assert_eq!(config.items_per_page, ListingConfig::default().items_per_page);
    }

    #[test]
    fn test_listing_config_tiny_debounce_corrected() {
        let mut config = ListingConfig {
            items_per_page: 6,
            debounce_ms: 1,
        };

        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("debounce_ms"));
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_listing_config_strict_mode_error() {
        let mut config = ListingConfig {
            items_per_page: 500,
            debounce_ms: 500,
        };

        let err = config.validate(true).unwrap_err();
        assert!(err.to_string().contains("items_per_page"));
        assert!(err.to_string().contains("between 1 and 60"));
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = BoardConfig::parse(
            r#"
            [listing]
            items_per_page = 9

            [session]
            role = "recruiter"
            "#,
        )
        .unwrap();

        assert_eq!(config.listing.items_per_page, 9);
        assert_eq!(config.listing.debounce_ms, 500);
        assert_eq!(config.session.role, Some(Role::Recruiter));
        assert!(config.session.signed_in);
        assert_eq!(config.display.theme, "dark");
    }

    #[test]
    fn test_merge_keeps_earlier_catalog() {
        let mut config = BoardConfig::default();
        config.source.catalog = Some(PathBuf::from("/srv/jobs.json"));

        let later = BoardConfig::parse("[listing]\nitems_per_page = 3\n").unwrap();
        config.merge(later);

        assert_eq!(config.source.catalog, Some(PathBuf::from("/srv/jobs.json")));
        assert_eq!(config.listing.items_per_page, 3);
    }

    #[test]
    fn test_catalog_path_prefers_configured() {
        let mut config = BoardConfig::default();
        config.source.catalog = Some(PathBuf::from("demos/catalog.json"));
        assert_eq!(config.catalog_path(), PathBuf::from("demos/catalog.json"));
    }
}
