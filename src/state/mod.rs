//! Per-domain crawl state
//!
//! Each domain under crawl owns a [`DomainContext`]: its visited-URL set
//! (dedup filter and page-budget counter) and its discovered product-URL
//! set. Contexts are shared by `Arc` into every traversal branch and
//! snapshotted into reports once the crawl joins.

mod domain_state;

pub use domain_state::{CrawlReport, DomainContext, DomainReport};
