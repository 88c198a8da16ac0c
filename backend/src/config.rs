use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// The dashboard origin; the only origin CORS accepts.
    pub frontend_origin: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost:5432/servicetracker".to_string());

        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let bind_addr_raw = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid BIND_ADDR value: {}", bind_addr_raw))?;

        Ok(Config {
            database_url,
            frontend_origin,
            bind_addr,
        })
    }
}
