//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const CATALOG_FILE: &str = "furniture.json";
pub const BACKGROUNDS_FILE: &str = "backgrounds.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Static assets: the page, the wasm bundle, catalog images.
    pub public_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub backgrounds_path: PathBuf,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_DIR`: default `public`
    /// - `CATALOG_PATH`: default `<PUBLIC_DIR>/furniture.json`
    /// - `BACKGROUNDS_PATH`: default `<PUBLIC_DIR>/backgrounds.json`
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidPort`] if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidPort`] if `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let public_dir = lookup("PUBLIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from);
        let catalog_path = lookup("CATALOG_PATH").map_or_else(|| public_dir.join(CATALOG_FILE), PathBuf::from);
        let backgrounds_path =
            lookup("BACKGROUNDS_PATH").map_or_else(|| public_dir.join(BACKGROUNDS_FILE), PathBuf::from);

        Ok(Self { port, public_dir, catalog_path, backgrounds_path })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
