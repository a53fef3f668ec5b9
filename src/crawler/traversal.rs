//! Recursive crawl traversal engine
//!
//! Walks each domain's category tree from the root. A category page expands
//! into product URLs (collected), subcategory links (recursed depth-first,
//! depth-bounded and budget-truncated), and pagination links (recursed at
//! the same depth, bounded only by deduplication). All fan-out is
//! structured: a node's expansion completes only after every child branch
//! joins, and the whole traversal for a domain completes when the root's
//! expansion does.

use crate::classify::UrlClassifier;
use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_links;
use crate::state::{CrawlReport, DomainContext};
use crate::url::parse_seed;
use futures::future::{join_all, BoxFuture};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Product-listing crawler over one or more domains
///
/// Owns the shared fetch client and compiled classifier; all per-domain
/// state lives in the [`DomainContext`] each crawl creates.
pub struct Crawler {
    config: Config,
    fetcher: Fetcher,
    classifier: UrlClassifier,
}

impl Crawler {
    /// Builds a crawler from a validated configuration
    pub fn new(config: Config) -> crate::Result<Self> {
        let fetcher = Fetcher::new(&config.crawler)?;
        let classifier = UrlClassifier::new(&config.patterns)?;

        Ok(Self {
            config,
            fetcher,
            classifier,
        })
    }

    /// Crawls every given domain concurrently and snapshots the results
    ///
    /// Domain crawls share the fetch semaphore and connection pool but
    /// nothing else; reports are taken only after all domains join.
    pub async fn crawl_domains(&self, domains: &[String]) -> CrawlReport {
        let contexts = join_all(domains.iter().map(|domain| self.crawl_domain(domain))).await;

        CrawlReport::new(contexts.iter().map(|ctx| ctx.snapshot()).collect())
    }

    /// Crawls a single domain from its root page
    ///
    /// The root is fetched once and only its category-classified links are
    /// followed; product links on the root itself are ignored by design.
    /// Category URLs are chunked into `batch_size` groups that run
    /// sequentially, with URLs inside a batch crawling in parallel. The
    /// batches throttle the peak fan-out of category-tree expansions per
    /// domain, independent of the global fetch concurrency bound.
    pub async fn crawl_domain(&self, seed: &str) -> Arc<DomainContext> {
        let seed = parse_seed(seed);
        tracing::info!("Starting crawl of domain: {}", seed.domain);

        let ctx = Arc::new(DomainContext::new(seed.domain.clone()));

        // The root counts as dequeued-for-fetching like any other page
        if !ctx.try_visit(&seed.root) {
            return ctx;
        }

        let body = match self.fetcher.fetch(&seed.root).await {
            Some(body) => body,
            None => {
                tracing::warn!("Could not fetch root page of {}", seed.domain);
                return ctx;
            }
        };

        let root_url = match Url::parse(&seed.root) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Seed {} is not a valid URL: {}", seed.root, e);
                return ctx;
            }
        };

        let links = extract_links(body, root_url).await;

        let mut category_urls = HashSet::new();
        for link in links {
            if self.classifier.classify(link.as_str()).is_category {
                category_urls.insert(link.to_string());
            }
        }

        tracing::debug!(
            "Root of {} yielded {} category links",
            seed.domain,
            category_urls.len()
        );

        let category_urls: Vec<String> = category_urls.into_iter().collect();
        for batch in category_urls.chunks(self.config.crawler.batch_size) {
            let tasks: Vec<_> = batch
                .iter()
                .filter(|url| !ctx.is_visited(url))
                .map(|url| self.crawl_page(ctx.clone(), url.clone(), 0))
                .collect();

            if !tasks.is_empty() {
                join_all(tasks).await;
            }
        }

        tracing::info!(
            "Finished {}: {} product URLs across {} visited pages",
            seed.domain,
            ctx.product_count(),
            ctx.visited_count()
        );

        ctx
    }

    /// Expands one category or pagination page
    ///
    /// Boxed because the expansion recurses through itself for both
    /// subcategory and pagination children.
    fn crawl_page(&self, ctx: Arc<DomainContext>, url: String, depth: u32) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let crawler_config = &self.config.crawler;

            // Depth guard applies to the subcategory dimension; pagination
            // re-enters at the same depth and never trips it on its own
            if depth > crawler_config.max_depth {
                return;
            }

            // The atomic claim doubles as the cycle barrier: two branches
            // racing on one URL resolve here, before either fetches
            if !ctx.try_visit(&url) {
                return;
            }

            let body = match self.fetcher.fetch(&url).await {
                Some(body) => body,
                // Fetch failure is silent and local; the branch just ends
                None => return,
            };

            let page_url = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(_) => return,
            };

            let links = extract_links(body, page_url).await;

            let mut products = HashSet::new();
            let mut subcategories = HashSet::new();
            let mut pagination_links = HashSet::new();

            for link in links {
                let link_str = link.to_string();
                let roles = self.classifier.classify(&link_str);

                if roles.is_product {
                    products.insert(link_str.clone());
                } else if roles.is_category && !ctx.is_visited(&link_str) {
                    subcategories.insert(link_str.clone());
                }

                // Pagination candidacy is independent of the product/category
                // split: the same link can appear in both expansions
                if roles.is_pagination {
                    pagination_links.insert(link_str);
                }
            }

            if crawler_config.verbose {
                tracing::info!(
                    "{}: {} products, {} subcategories, {} pagination links",
                    url,
                    products.len(),
                    subcategories.len(),
                    pagination_links.len()
                );
            }

            ctx.add_products(products);

            let subcategory_join = async {
                if depth < crawler_config.max_depth && !subcategories.is_empty() {
                    // Truncate to the remaining page budget; candidates past
                    // it are dropped, not deferred
                    let remaining = ctx.remaining_budget(crawler_config.max_pages_per_domain);

                    let tasks: Vec<_> = subcategories
                        .iter()
                        .take(remaining)
                        .filter(|candidate| !ctx.is_visited(candidate))
                        .map(|candidate| self.crawl_page(ctx.clone(), candidate.clone(), depth + 1))
                        .collect();

                    if !tasks.is_empty() {
                        join_all(tasks).await;
                    }
                }
            };

            // Pagination pages are peers, not children: same depth, and the
            // page budget is not applied here. The asymmetry with the
            // subcategory branch is intentional and can push the visited
            // count past max_pages_per_domain on long pagination chains.
            let pagination_join = async {
                let tasks: Vec<_> = pagination_links
                    .iter()
                    .filter(|candidate| !ctx.is_visited(candidate))
                    .map(|candidate| self.crawl_page(ctx.clone(), candidate.clone(), depth))
                    .collect();

                if !tasks.is_empty() {
                    join_all(tasks).await;
                }
            };

            tokio::join!(subcategory_join, pagination_join);
        })
    }
}

/// Builds a crawler from the configuration and crawls its domain list
pub async fn crawl(config: Config) -> crate::Result<CrawlReport> {
    let domains = config.domains.clone();
    let crawler = Crawler::new(config)?;
    Ok(crawler.crawl_domains(&domains).await)
}
