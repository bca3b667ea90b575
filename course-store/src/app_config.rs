use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    #[serde(default)]
    pub seed: bool,
}

fn default_backend() -> StorageBackend { StorageBackend::Memory }
fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }
fn default_true() -> bool { true }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load with the config files looked up in `dir`
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| config::File::from(dir.join(name));

        let s = config::Config::builder()
            .add_source(file("default"))
            // Per-environment overrides, optional
            .add_source(file(&run_mode).required(false))
            // Local overrides, never checked in
            .add_source(file("local").required(false))
            // Eg.. `COURSE__SERVER__PORT=9000` sets `server.port`
            .add_source(config::Environment::with_prefix("COURSE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build from an inline TOML document, without files or environment
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

impl DatabaseConfig {
    pub fn postgres_url(&self) -> Result<&str, config::ConfigError> {
        self.url
            .as_deref()
            .ok_or_else(|| config::ConfigError::NotFound("database.url".into()))
    }
}
