use std::env;
use std::path::PathBuf;

/// Runtime settings sourced from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub domain: String,
    pub database_url: String,
    /// Directory uploaded product images are written to.
    pub media_root: PathBuf,
    /// Cookie signing key material. Generated per process when unset.
    pub secret: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);
        Self {
            address: env::var("ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            domain: env::var("DOMAIN").unwrap_or_else(|_| "localhost".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "mobistore.db".to_string()),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
            secret: env::var("SECRET_KEY").ok(),
        }
    }
}
