//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::PortalConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse a TOML file into a config without validating it.
pub fn read_config(path: &Path) -> Result<PortalConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PortalConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Override the base URL if one is given. Blank values are ignored.
pub fn apply_base_url_override(config: &mut PortalConfig, base_url: Option<&str>) {
    if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
        tracing::debug!(base_url = %url, "Overriding api.base_url");
        config.api.base_url = url.to_string();
    }
}

/// Resolve the startup configuration.
///
/// Order of precedence, lowest first: built-in defaults, the optional TOML
/// file, `API_BASE_URL` from the environment, then `cli_base_url`. The
/// result is validated once all layers are applied.
pub fn resolve_config(
    path: Option<&Path>,
    cli_base_url: Option<&str>,
) -> Result<PortalConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => PortalConfig::default(),
    };

    let env_base_url = std::env::var(BASE_URL_ENV).ok();
    apply_base_url_override(&mut config, env_base_url.as_deref());
    apply_base_url_override(&mut config, cli_base_url);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
