//! Output module for crawl results
//!
//! Renders a finished [`CrawlReport`](crate::state::CrawlReport) as a
//! tabular stdout summary and persists it as JSON (a mapping from domain to
//! its discovered product URLs).

mod json;
mod table;

pub use json::{results_to_json, save_results};
pub use table::print_summary;
