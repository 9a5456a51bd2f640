use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to render product '{product}': {reason}")]
    Render { product: String, reason: String },

    #[error("Animation task failed: {message}")]
    Motion { message: String },
}

pub type Result<T> = std::result::Result<T, DisplayError>;
