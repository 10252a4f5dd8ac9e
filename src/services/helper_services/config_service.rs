use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::models::{config_models::Config, error_models::ConfigError};

pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "ANALIZADOR_CONFIG";

impl Config {
    /// Loads `$ANALIZADOR_CONFIG`, else `config.toml`. A missing default file
    /// falls back to built-in settings; a missing explicit file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Config::from_file(&path),
            Err(_) => match Config::from_file(CONFIG_FILE) {
                Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    warn!("{} not found, using built-in defaults", CONFIG_FILE);
                    Ok(Config::default())
                }
                other => other,
            },
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = Config::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: shown.clone(),
                source,
            },
            other => other,
        })?;
        info!("Loaded config from {}", shown);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.execution.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "execution.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.cors.allowed_origin.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "cors.allowed_origin must not be empty".to_string(),
            ));
        }
        for (language, tool) in &self.tools {
            if tool.program.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "tools.\"{}\".program must not be empty",
                    language
                )));
            }
        }
        Ok(())
    }

    pub fn socket_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.build.host, self.build.port)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid(format!("bad listen address: {}", e)))
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.execution.timeout_secs)
    }
}
