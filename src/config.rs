//! Site configuration.
//!
//! Loaded from a single `config.toml`. The file is sparse: whatever it sets is
//! merged on top of the stock defaults, everything else keeps its default.
//! A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! url = "https://cabbages.info"   # Permalink base for "View on ..." links
//! name = "cabbages.info"          # Footer link label
//!
//! [theme]
//! highlight = "#FFEB3B"           # Title background for `release` entries
//! font_stylesheet = "https://fonts.googleapis.com/css2?family=IBM+Plex+Mono:wght@400;700&display=swap"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public site identity, used for permalinks.
    pub site: SiteSection,
    /// Colors and fonts of the rendered document.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.site.url).map_err(|err| {
            ConfigError::Validation(format!("site.url `{}` is not a URL: {err}", self.site.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(
                "site.url must be an http or https URL".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.theme.highlight.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.highlight must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Base URL; entry permalinks are `{url}/#{id}`.
    pub url: String,
    /// Label of the footer link.
    pub name: String,
}

impl SiteSection {
    /// Canonical link to an entry on the site.
    pub fn permalink(&self, entry_id: &str) -> String {
        format!("{}/#{}", self.url.trim_end_matches('/'), entry_id)
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "https://cabbages.info".to_string(),
            name: "cabbages.info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Background behind the title of entries tagged `release`.
    pub highlight: String,
    /// Web font stylesheet linked from the document head.
    pub font_stylesheet: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            highlight: "#FFEB3B".to_string(),
            font_stylesheet:
                "https://fonts.googleapis.com/css2?family=IBM+Plex+Mono:wght@400;700&display=swap"
                    .to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the config file at `path`.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# cabbages configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Base URL of the public site. Each email links back to {url}/#{entry id}.
url = "https://cabbages.info"

# Label of the footer link: "View on {name}".
name = "cabbages.info"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Background behind the title of entries tagged `release`.
highlight = "#FFEB3B"

# Web font stylesheet linked from the email head. Clients that block remote
# fonts fall back to Courier New.
font_stylesheet = "https://fonts.googleapis.com/css2?family=IBM+Plex+Mono:wght@400;700&display=swap"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.url, "https://cabbages.info");
        assert_eq!(config.site.name, "cabbages.info");
        assert_eq!(config.theme.highlight, "#FFEB3B");
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn permalink_joins_url_and_id() {
        let site = SiteSection::default();
        assert_eq!(site.permalink("abc"), "https://cabbages.info/#abc");
    }

    #[test]
    fn permalink_ignores_trailing_slash() {
        let site = SiteSection {
            url: "https://example.org/log/".to_string(),
            name: "log".to_string(),
        };
        assert_eq!(site.permalink("abc"), "https://example.org/log/#abc");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[theme]
highlight = "#00ff00"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.highlight, "#00ff00");
        // Defaults preserved
        assert_eq!(config.site.url, "https://cabbages.info");
        assert!(config.theme.font_stylesheet.contains("IBM+Plex+Mono"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[site]\nurls = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn merge_overlay_keeps_base_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[site]\nname = \"other\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["site"]["name"].as_str(), Some("other"));
        assert_eq!(merged["site"]["url"].as_str(), Some("https://cabbages.info"));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.url, defaults.site.url);
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.theme.highlight, defaults.theme.highlight);
        assert_eq!(config.theme.font_stylesheet, defaults.theme.font_stylesheet);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.site.url, "https://cabbages.info");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[site]
url = "https://staging.cabbages.info"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.url, "https://staging.cabbages.info");
        assert_eq!(config.site.name, "cabbages.info");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_relative_url() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site]\nurl = \"cabbages.info\"\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let mut config = SiteConfig::default();
        config.site.url = "ftp://cabbages.info".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
