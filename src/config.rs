//! Server configuration loaded from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the web front-end
    pub static_dir: PathBuf,
    /// Fixed seed for turn order shuffles (None = OS entropy)
    pub shuffle_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            shuffle_seed: None,
        }
    }
}

/// Read and parse an env var, warning and falling back on garbage
fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables
    /// VETODASH_HOST, VETODASH_PORT, VETODASH_STATIC_DIR, VETODASH_SHUFFLE_SEED
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = parse_var("VETODASH_HOST").unwrap_or(defaults.host);
        let port = parse_var("VETODASH_PORT").unwrap_or(defaults.port);
        let static_dir = std::env::var("VETODASH_STATIC_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let shuffle_seed = parse_var("VETODASH_SHUFFLE_SEED");

        if shuffle_seed.is_some() {
            tracing::warn!("Shuffle seed fixed - turn order is predictable");
        }

        tracing::info!(
            %host,
            port,
            static_dir = %static_dir.display(),
            "Server config loaded"
        );

        Self {
            host,
            port,
            static_dir,
            shuffle_seed,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
