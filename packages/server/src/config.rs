use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
    /// Directory served for `/` and other static paths.
    pub public_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Connection URL. When absent, case studies are kept in the file store only.
    pub url: Option<String>,
    pub connect_timeout_secs: u64,
    pub health_check_interval_secs: u64,
    pub reconnect_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON snapshot used when the database is unavailable.
    pub data_file: PathBuf,
    /// Directory uploaded images are written to and served from.
    pub uploads_dir: PathBuf,
    /// Maximum accepted image size in bytes.
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("server.public_dir", "public")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.connect_timeout_secs", 8)?
            .set_default("database.health_check_interval_secs", 10)?
            .set_default("database.reconnect_interval_secs", 5)?
            .set_default("storage.data_file", "data/casestudies.json")?
            .set_default("storage.uploads_dir", "uploads")?
            .set_default("storage.max_upload_size", 5 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SHOWCASE__DATABASE__URL)
            .add_source(
                Environment::with_prefix("SHOWCASE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
