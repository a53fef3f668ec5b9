use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Mutex;

/// Crawl state for a single domain
///
/// Mutated concurrently by every traversal branch of the domain, so both
/// sets live behind mutexes. The critical sections are single set
/// operations; contention is bounded by the fetch concurrency limit.
#[derive(Debug)]
pub struct DomainContext {
    domain: String,

    /// URLs already claimed for fetching; grows monotonically for the run
    visited: Mutex<HashSet<String>>,

    /// URLs classified as product pages
    products: Mutex<HashSet<String>>,
}

impl DomainContext {
    /// Creates an empty context for a normalized domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            visited: Mutex::new(HashSet::new()),
            products: Mutex::new(HashSet::new()),
        }
    }

    /// The normalized hostname this context belongs to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Atomically claims a URL for fetching
    ///
    /// Returns true if the URL was not yet visited and is now marked, false
    /// if some branch already claimed it. Check and mark are a single locked
    /// insert, so two concurrent branches can never both claim the same URL.
    pub fn try_visit(&self, url: &str) -> bool {
        let mut visited = self.visited.lock().expect("visited set poisoned");
        visited.insert(url.to_string())
    }

    /// Whether a URL has already been claimed for fetching
    pub fn is_visited(&self, url: &str) -> bool {
        let visited = self.visited.lock().expect("visited set poisoned");
        visited.contains(url)
    }

    /// Number of URLs claimed for fetching so far
    pub fn visited_count(&self) -> usize {
        let visited = self.visited.lock().expect("visited set poisoned");
        visited.len()
    }

    /// Pages left under the per-domain budget
    ///
    /// The budget is soft: it truncates subcategory scheduling only, so the
    /// visited count can still drift past it through pagination expansion.
    pub fn remaining_budget(&self, max_pages_per_domain: usize) -> usize {
        max_pages_per_domain.saturating_sub(self.visited_count())
    }

    /// Adds product URLs to the domain's result set (set union, idempotent)
    pub fn add_products<I>(&self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut products = self.products.lock().expect("product set poisoned");
        products.extend(urls);
    }

    /// Number of distinct product URLs discovered so far
    pub fn product_count(&self) -> usize {
        let products = self.products.lock().expect("product set poisoned");
        products.len()
    }

    /// Snapshots this domain's results for reporting
    ///
    /// Only called after the domain's traversal has fully joined, so the
    /// sets are no longer being written.
    pub fn snapshot(&self) -> DomainReport {
        let mut product_urls: Vec<String> = {
            let products = self.products.lock().expect("product set poisoned");
            products.iter().cloned().collect()
        };
        product_urls.sort();

        let mut visited_urls: Vec<String> = {
            let visited = self.visited.lock().expect("visited set poisoned");
            visited.iter().cloned().collect()
        };
        visited_urls.sort();

        DomainReport {
            domain: self.domain.clone(),
            product_urls,
            visited_urls,
        }
    }
}

/// Immutable post-crawl results for one domain
#[derive(Debug, Clone)]
pub struct DomainReport {
    pub domain: String,

    /// Discovered product URLs, sorted
    pub product_urls: Vec<String>,

    /// Every URL fetched (or claimed for fetching) during the crawl, sorted
    pub visited_urls: Vec<String>,
}

impl DomainReport {
    pub fn product_count(&self) -> usize {
        self.product_urls.len()
    }

    pub fn pages_visited(&self) -> usize {
        self.visited_urls.len()
    }
}

/// Results of a whole crawl run across domains
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub domains: Vec<DomainReport>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn new(domains: Vec<DomainReport>) -> Self {
        Self {
            domains,
            finished_at: Utc::now(),
        }
    }

    /// Total product URLs across all domains
    pub fn total_products(&self) -> usize {
        self.domains.iter().map(|d| d.product_count()).sum()
    }
}
