use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub image_dir: PathBuf,
    pub recent_limit: u32,
}

impl Config {
    /// Reads `GALLERY_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = var("GALLERY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        // PORT is what most hosting platforms inject
        let port = var("GALLERY_PORT")
            .or_else(|| var("PORT"))
            .unwrap_or_else(|| "8000".into())
            .parse::<u16>()
            .context("GALLERY_PORT must be a port number")?;
        let db_path = var("GALLERY_DB_PATH")
            .unwrap_or_else(|| "gallery.db".into())
            .into();
        let image_dir = var("GALLERY_IMG_PATH")
            .unwrap_or_else(|| "./images".into())
            .into();
        let recent_limit = var("GALLERY_RECENT_LIMIT")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("GALLERY_RECENT_LIMIT must be a positive number")?
            .unwrap_or(20);

        Ok(Self {
            host,
            port,
            db_path,
            image_dir,
            recent_limit,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
