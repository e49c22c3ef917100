//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser (comma-separated).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    // === Data ===
    /// Load the sample candidates at start-up.
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(), // React dev server
        "http://localhost:5173".to_string(), // Vite
    ]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            seed_sample_data: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.bind_address.trim().is_empty() {
            return Err(AppError::InvalidConfig("BIND_ADDRESS is required".to_string()));
        }

        self.socket_addr()?;

        if self.port == 0 {
            return Err(AppError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if self.cors_origins.is_empty() {
            return Err(AppError::InvalidConfig(
                "CORS_ORIGINS must list at least one origin".to_string(),
            ));
        }

        for origin in &self.cors_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(AppError::InvalidConfig(format!(
                    "CORS origin must start with http:// or https://: {}",
                    origin
                )));
            }
            if HeaderValue::from_str(origin).is_err() {
                return Err(AppError::InvalidConfig(format!(
                    "CORS origin is not a valid header value: {}",
                    origin
                )));
            }
        }

        Ok(())
    }

    /// Socket address to bind, once validated.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| AppError::BindAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Parsed CORS origins.
    pub fn cors_header_values(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}
