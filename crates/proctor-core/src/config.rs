use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (proctor.toml + PROCTOR_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProctorConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Operator-supplied schedule entries, merged over the built-in exam grid
/// at startup. A config entry with the same normalized class time as a
/// built-in one replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LookupConfig {
    #[serde(default)]
    pub entries: Vec<LookupEntry>,
}

/// One (class time → exam window) pair from proctor.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEntry {
    pub class_time: String,
    pub exam_time: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.proctor/proctor.db", home)
}

impl ProctorConfig {
    /// Load config from a TOML file with PROCTOR_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.proctor/proctor.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: ProctorConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PROCTOR_").split("_"))
            .extract()
            .map_err(|e| crate::error::ProctorError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.proctor/proctor.toml", home)
}
