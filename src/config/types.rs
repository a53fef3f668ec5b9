use serde::Deserialize;

/// Main configuration structure for Shopmap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub patterns: PatternConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Seed domains to crawl (bare hostnames or full URLs)
    #[serde(default)]
    pub domains: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            patterns: PatternConfig::default(),
            output: OutputConfig::default(),
            domains: Vec::new(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Soft cap on pages visited per domain, enforced when subcategory
    /// recursion is scheduled (pagination expansion is exempt)
    #[serde(rename = "max-pages-per-domain", default = "default_max_pages_per_domain")]
    pub max_pages_per_domain: usize,

    /// Maximum number of in-flight HTTP requests across all domains
    #[serde(
        rename = "max-concurrent-requests",
        default = "default_max_concurrent_requests"
    )]
    pub max_concurrent_requests: usize,

    /// Connection pool cap per destination host
    #[serde(
        rename = "max-connections-per-host",
        default = "default_max_connections_per_host"
    )]
    pub max_connections_per_host: usize,

    /// Number of root-level category URLs crawled per sequential batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Flat delay applied before each request, in seconds
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: f64,

    /// Total per-request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Number of retries after the initial attempt before giving up on a URL
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum subcategory recursion depth from a domain's root
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Per-page diagnostic logging of discovered link counts
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_domain: default_max_pages_per_domain(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_connections_per_host: default_max_connections_per_host(),
            batch_size: default_batch_size(),
            request_delay: default_request_delay(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            max_depth: default_max_depth(),
            verbose: default_verbose(),
        }
    }
}

fn default_max_pages_per_domain() -> usize {
    50
}

fn default_max_concurrent_requests() -> usize {
    10
}

fn default_max_connections_per_host() -> usize {
    10
}

fn default_batch_size() -> usize {
    50
}

fn default_request_delay() -> f64 {
    0.5
}

fn default_timeout() -> f64 {
    5.0
}

fn default_max_retries() -> u32 {
    2
}

fn default_max_depth() -> u32 {
    3
}

fn default_verbose() -> bool {
    true
}

/// URL role patterns, matched case-insensitively against the full URL
///
/// The defaults approximate common e-commerce URL conventions. Patterns are
/// configuration, not logic: swapping them retargets the crawler without
/// touching the traversal.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    /// Patterns identifying product pages
    #[serde(default = "default_product_patterns")]
    pub product: Vec<String>,

    /// Patterns identifying category listing pages
    #[serde(default = "default_category_patterns")]
    pub category: Vec<String>,

    /// Patterns identifying pagination links within a listing
    #[serde(default = "default_pagination_patterns")]
    pub pagination: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            product: default_product_patterns(),
            category: default_category_patterns(),
            pagination: default_pagination_patterns(),
        }
    }
}

fn default_product_patterns() -> Vec<String> {
    [
        r"/product[s]?/",
        r"/item/",
        r"/p/",
        r"/dp/",
        r"-p-\d+",
        r"/[^/]+/[^/]+/[^/]+-\d+/buy$",
        r"/\d+/buy$",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_category_patterns() -> Vec<String> {
    [
        r"/category/",
        r"/c/",
        r"/collections?/",
        r"/shop/",
        r"/[^/]+/[^/]+$",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_pagination_patterns() -> Vec<String> {
    [
        r"page=(\d+)",
        r"p=(\d+)",
        r"/page/(\d+)",
        r"/p/(\d+)",
        r"offset=(\d+)",
        r"[\?&]page=(\d+)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the JSON results file is written to after the crawl
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
        }
    }
}

fn default_results_path() -> String {
    "./products.json".to_string()
}
