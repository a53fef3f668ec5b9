//! URL role classification
//!
//! Maps an absolute URL to three independent role predicates — product,
//! category, pagination — by matching ordered regex pattern lists against
//! the full URL string, case-insensitively. Pure and stateless: the same URL
//! always yields the same classification.

use crate::config::PatternConfig;
use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Role predicates for a single URL
///
/// The predicates are independent, not mutually exclusive: a listing URL
/// like `/collections/shoes?page=2` is both category and pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_product: bool,
    pub is_category: bool,
    pub is_pagination: bool,
}

impl Classification {
    /// True if no pattern set matched the URL
    pub fn is_unclassified(&self) -> bool {
        !self.is_product && !self.is_category && !self.is_pagination
    }
}

/// Compiled URL role classifier
///
/// Patterns are compiled once at construction; classification is then a
/// single pass over the three pattern lists per URL.
#[derive(Debug)]
pub struct UrlClassifier {
    product: Vec<Regex>,
    category: Vec<Regex>,
    pagination: Vec<Regex>,
}

impl UrlClassifier {
    /// Compiles a classifier from the configured pattern lists
    ///
    /// Fails with the offending pattern and list name if any regex does not
    /// compile.
    pub fn new(patterns: &PatternConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            product: compile_patterns("product", &patterns.product)?,
            category: compile_patterns("category", &patterns.category)?,
            pagination: compile_patterns("pagination", &patterns.pagination)?,
        })
    }

    /// Classifies a URL against all three pattern sets
    pub fn classify(&self, url: &str) -> Classification {
        Classification {
            is_product: matches_any(&self.product, url),
            is_category: matches_any(&self.category, url),
            is_pagination: matches_any(&self.pagination, url),
        }
    }
}

fn compile_patterns(kind: &'static str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                    kind,
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
        })
        .collect()
}

fn matches_any(patterns: &[Regex], url: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(url))
}
