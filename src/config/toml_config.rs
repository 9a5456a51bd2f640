use crate::utils::error::{DisplayError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display configuration, read once at startup and immutable thereafter.
/// Every section has defaults, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub cycle: CycleConfig,
    pub catalog: CatalogSourceConfig,
    pub layout: LayoutConfig,
    pub ambient: Option<AmbientConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Batch size: how many products share the screen per cycle.
    pub products_per_cycle: usize,
    /// Seconds to hold products on screen.
    pub cycle_duration_secs: f64,
    /// Entrance/exit speed in seconds.
    pub transition_duration_secs: f64,
    /// How long to wait before re-attempting a load while the catalog is empty.
    pub reload_interval_secs: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            products_per_cycle: 3,
            cycle_duration_secs: 6.0,
            transition_duration_secs: 2.5,
            reload_interval_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSourceConfig {
    /// "http" or "file".
    pub source: String,
    /// Catalog JSON endpoint, used when `source` is "http".
    pub endpoint: String,
    /// Catalog JSON path, used when `source` is "file".
    pub path: String,
    pub timeout_seconds: u64,
}

impl Default for CatalogSourceConfig {
    fn default() -> Self {
        Self {
            source: "file".to_string(),
            endpoint: String::new(),
            path: "./products.json".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub card_width: u32,
    pub card_gap: u32,
    /// Vertical resting position of the card row.
    pub shelf_y: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            card_width: 380,
            card_gap: 60,
            shelf_y: 280,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub enabled: bool,
    pub decor_count: usize,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            decor_count: 4,
        }
    }
}

impl DisplayConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DisplayConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number(
            "cycle.products_per_cycle",
            self.cycle.products_per_cycle,
            1,
        )?;
        validation::validate_range(
            "cycle.cycle_duration_secs",
            self.cycle.cycle_duration_secs,
            0.1,
            3600.0,
        )?;
        validation::validate_range(
            "cycle.transition_duration_secs",
            self.cycle.transition_duration_secs,
            0.1,
            60.0,
        )?;
        validation::validate_range(
            "cycle.reload_interval_secs",
            self.cycle.reload_interval_secs,
            0.1,
            3600.0,
        )?;

        match self.catalog.source.as_str() {
            "http" => validation::validate_url("catalog.endpoint", &self.catalog.endpoint)?,
            "file" => validation::validate_path("catalog.path", &self.catalog.path)?,
            other => {
                return Err(DisplayError::InvalidConfigValue {
                    field: "catalog.source".to_string(),
                    value: other.to_string(),
                    reason: "expected 'http' or 'file'".to_string(),
                })
            }
        }

        validation::validate_positive_number(
            "layout.screen_width",
            self.layout.screen_width as usize,
            1,
        )?;
        validation::validate_positive_number(
            "layout.card_width",
            self.layout.card_width as usize,
            1,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_design_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.cycle.products_per_cycle, 3);
        assert_eq!(config.cycle.cycle_duration_secs, 6.0);
        assert_eq!(config.cycle.transition_duration_secs, 2.5);
        assert_eq!(config.layout.screen_width, 1920);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_valid() {
        let config: DisplayConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.source, "file");
    }

    #[test]
    fn test_parse_sections() {
        let toml = r#"
            [cycle]
            products_per_cycle = 4
            cycle_duration_secs = 8.0

            [catalog]
            source = "http"
            endpoint = "https://menu.example.com/products.json"

            [ambient]
            enabled = false
        "#;
        let config: DisplayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.cycle.products_per_cycle, 4);
        assert_eq!(config.cycle.cycle_duration_secs, 8.0);
        // unspecified keys keep their defaults
        assert_eq!(config.cycle.transition_duration_secs, 2.5);
        assert_eq!(config.catalog.source, "http");
        assert!(!config.ambient.unwrap().enabled);
        let reparsed: DisplayConfig = toml::from_str(toml).unwrap();
        assert!(reparsed.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let mut config = DisplayConfig::default();
        config.cycle.products_per_cycle = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_http_source_requires_valid_endpoint() {
        let mut config = DisplayConfig::default();
        config.catalog.source = "http".to_string();
        config.catalog.endpoint = String::new();
        assert!(config.validate().is_err());

        config.catalog.endpoint = "https://menu.example.com/products.json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let mut config = DisplayConfig::default();
        config.catalog.source = "ftp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        let mut config = DisplayConfig::default();
        config.cycle.transition_duration_secs = 0.0;
        assert!(config.validate().is_err());
    }
}
