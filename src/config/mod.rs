pub mod toml_config;

pub use toml_config::DisplayConfig;

#[cfg(feature = "cli")]
use crate::config::toml_config::AmbientConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::Path;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "riverboard")]
#[command(about = "Unattended looping product display board")]
pub struct CliConfig {
    /// Path to a TOML display configuration
    #[arg(long)]
    pub config: Option<String>,

    /// Catalog JSON endpoint (overrides the config file)
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Local catalog JSON file (overrides the config file)
    #[arg(long)]
    pub catalog_file: Option<String>,

    /// Stop after this many cycles, 0 runs forever
    #[arg(long, default_value = "0")]
    pub max_cycles: u64,

    /// Disable the ambient background scene
    #[arg(long)]
    pub no_ambient: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Effective display config: the TOML file (when given) with CLI
    /// overrides applied on top.
    pub fn resolve(&self) -> Result<DisplayConfig> {
        let mut config = match &self.config {
            Some(path) => DisplayConfig::from_file(Path::new(path))?,
            None => DisplayConfig::default(),
        };

        if let Some(url) = &self.catalog_url {
            config.catalog.source = "http".to_string();
            config.catalog.endpoint = url.clone();
        }
        if let Some(path) = &self.catalog_file {
            config.catalog.source = "file".to_string();
            config.catalog.path = path.clone();
        }
        if self.no_ambient {
            let mut ambient = config.ambient.clone().unwrap_or_default();
            ambient.enabled = false;
            config.ambient = Some(ambient);
        }

        Ok(config)
    }
}
