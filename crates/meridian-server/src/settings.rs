//! Configuracion del proceso, leida del entorno al iniciar.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheSettings;

const DEFAULT_MAX_CACHE_WEIGHT_BYTES: u64 = 52_428_800;
const DEFAULT_WRITE_TTL_MINUTES: u64 = 30;
const DEFAULT_RELEASE_TOPIC: &str = "meridian-release";

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Peso total maximo del cache de payloads.
    pub max_cache_weight_bytes: u64,
    /// TTL desde la escritura, en minutos.
    pub write_ttl_minutes: u64,
    /// Topico del bus donde llegan los mensajes de release.
    pub release_topic: String,
    /// Seed JSON opcional para los backends en memoria.
    pub seed_file: Option<PathBuf>,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let host = std::env::var("MERIDIAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("MERIDIAN_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("MERIDIAN_PORT must be a valid port number");

        let max_cache_weight_bytes = std::env::var("MERIDIAN_MAX_CACHE_WEIGHT_BYTES")
            .ok()
            .map(|raw| {
                raw.parse::<u64>()
                    .expect("MERIDIAN_MAX_CACHE_WEIGHT_BYTES must be a number")
            })
            .unwrap_or(DEFAULT_MAX_CACHE_WEIGHT_BYTES);

        let write_ttl_minutes = std::env::var("MERIDIAN_WRITE_TTL_MINUTES")
            .ok()
            .map(|raw| {
                raw.parse::<u64>()
                    .expect("MERIDIAN_WRITE_TTL_MINUTES must be a number")
            })
            .unwrap_or(DEFAULT_WRITE_TTL_MINUTES);

        let release_topic = std::env::var("MERIDIAN_RELEASE_TOPIC")
            .unwrap_or_else(|_| DEFAULT_RELEASE_TOPIC.to_string());

        let seed_file = std::env::var("MERIDIAN_SEED_FILE").ok().map(PathBuf::from);

        Self {
            host,
            port,
            max_cache_weight_bytes,
            write_ttl_minutes,
            release_topic,
            seed_file,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid listen address")
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            max_weight_bytes: self.max_cache_weight_bytes,
            write_ttl: Duration::from_secs(self.write_ttl_minutes * 60),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_cache_weight_bytes: DEFAULT_MAX_CACHE_WEIGHT_BYTES,
            write_ttl_minutes: DEFAULT_WRITE_TTL_MINUTES,
            release_topic: DEFAULT_RELEASE_TOPIC.to_string(),
            seed_file: None,
        }
    }
}
