use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

const INSECURE_DEFAULT_TOKEN: &str = "changeme";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_token: String,
    pub static_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_token = lookup("PLANNER_ADMIN_TOKEN").context("PLANNER_ADMIN_TOKEN must be set")?;
        anyhow::ensure!(
            !admin_token.is_empty(),
            "PLANNER_ADMIN_TOKEN must not be empty"
        );
        if admin_token == INSECURE_DEFAULT_TOKEN {
            warn!("PLANNER_ADMIN_TOKEN is the well-known default; set a real secret");
        }

        let port = match lookup("APP_PORT").or_else(|| lookup("PORT")) {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid port {v:?}"))?,
            None => 8000,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://planner.db".into()),
            admin_token,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))?;
        Ok(addr)
    }
}
