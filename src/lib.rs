//! Shopmap: a product-listing discovery crawler
//!
//! This crate implements a crawler that walks category and pagination links
//! from an e-commerce domain's root, classifies discovered URLs by role, and
//! collects the set of product-page URLs per domain.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shopmap operations
#[derive(Debug, Error)]
pub enum ShopmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {kind} pattern `{pattern}`: {message}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        message: String,
    },
}

/// Result type alias for Shopmap operations
pub type Result<T> = std::result::Result<T, ShopmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{Classification, UrlClassifier};
pub use config::Config;
pub use crawler::Crawler;
pub use state::{CrawlReport, DomainContext, DomainReport};
pub use crate::url::Seed;
