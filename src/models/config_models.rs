use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Build {
    pub host: String,
    pub port: u16,
    pub service_name: String,
}

impl Default for Build {
    fn default() -> Self {
        Build {
            host: "0.0.0.0".to_string(),
            port: 8000,
            service_name: "analizador-codigo".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origin: "http://localhost:8100".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Wall-clock bound for one external tool run.
    pub timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig { timeout_secs: 5 }
    }
}

/// Replaces the built-in command for one language.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ToolOverride {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub build: Build,
    pub cors: CorsConfig,
    pub execution: ExecutionConfig,
    /// Keyed by normalised language tag (`"c++"`, `"typescript"`, ...).
    pub tools: HashMap<String, ToolOverride>,
}
