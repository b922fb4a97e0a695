use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_DB_URL: &str = "sqlite://prep.sqlite3";

/// Process configuration read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub db_url: String,
    pub log_level: String,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let db_url = std::env::var("PREP_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            host,
            port,
            db_url,
            log_level,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
