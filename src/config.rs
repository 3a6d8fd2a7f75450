use std::{env, path::PathBuf};

use anyhow::Context;
use chrono::FixedOffset;

use crate::domain::dates::utc_offset_from_minutes;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Offset used to turn "now" into the property's calendar date.
    pub utc_offset: FixedOffset,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    /// Currency for folios opened at check-in.
    pub default_currency: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(p) => p.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 3000,
        };
        let offset_minutes = match env::var("HOTEL_UTC_OFFSET_MINUTES") {
            Ok(m) => m
                .parse::<i32>()
                .context("HOTEL_UTC_OFFSET_MINUTES must be an integer")?,
            Err(_) => 0,
        };
        let utc_offset = utc_offset_from_minutes(offset_minutes)
            .context("HOTEL_UTC_OFFSET_MINUTES is out of range")?;
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{host}:{port}/uploads"));
        let default_currency = env::var("DEFAULT_CURRENCY")
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|_| "USD".to_string());

        Ok(Self {
            port,
            database_url,
            host,
            utc_offset,
            upload_dir,
            public_base_url,
            default_currency,
        })
    }
}
