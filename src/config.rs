// src/config.rs

use std::{env, fmt, net::SocketAddr};

use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone)]
pub struct Config {
    /// May be empty; requests will then be refused by the service.
    pub gemini_api_key: String,
    pub gemini_api_base: Url,
    pub gemini_model: String,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub log_dir: String,
    pub rust_log: String,
}

/// An environment variable holds a value that cannot be used.
#[derive(Debug)]
pub struct ConfigError {
    pub var_name: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}='{}': {}", self.var_name, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

        let api_base = env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());
        let gemini_api_base = Url::parse(&api_base).map_err(|e| ConfigError {
            var_name: "GEMINI_API_BASE",
            value: api_base.clone(),
            reason: e.to_string(),
        })?;

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let bind = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            var_name: "BIND_ADDR",
            value: bind.clone(),
            reason: e.to_string(),
        })?;

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            gemini_api_key,
            gemini_api_base,
            gemini_model,
            bind_addr,
            static_dir,
            log_dir,
            rust_log,
        })
    }
}
