//! Configuration module for Shopmap
//!
//! Handles loading, parsing, and validating TOML configuration files.
//! Every option has a sensible default, so a config file only needs to
//! list the domains to crawl.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, PatternConfig};
pub use validation::validate;
