//! JSON persistence of crawl results
//!
//! The on-disk format is a plain object mapping each domain to its sorted
//! array of product URLs, pretty-printed.

use crate::state::CrawlReport;
use crate::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Serializes the report as a JSON mapping domain → product URLs
pub fn results_to_json(report: &CrawlReport) -> Result<String> {
    let mapping: BTreeMap<&str, &Vec<String>> = report
        .domains
        .iter()
        .map(|domain| (domain.domain.as_str(), &domain.product_urls))
        .collect();

    Ok(serde_json::to_string_pretty(&mapping)?)
}

/// Writes the crawl results to the given path
pub fn save_results(report: &CrawlReport, path: &Path) -> Result<()> {
    let json = results_to_json(report)?;
    std::fs::write(path, json)?;

    tracing::info!("Results saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DomainReport;
    use tempfile::tempdir;

    fn sample_report() -> CrawlReport {
        CrawlReport::new(vec![
            DomainReport {
                domain: "b-shop.example.com".to_string(),
                product_urls: vec![
                    "https://b-shop.example.com/p/1".to_string(),
                    "https://b-shop.example.com/p/2".to_string(),
                ],
                visited_urls: vec![],
            },
            DomainReport {
                domain: "a-shop.example.com".to_string(),
                product_urls: vec![],
                visited_urls: vec![],
            },
        ])
    }

    #[test]
    fn test_json_is_domain_to_url_mapping() {
        let json = results_to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(
            value["b-shop.example.com"],
            serde_json::json!([
                "https://b-shop.example.com/p/1",
                "https://b-shop.example.com/p/2"
            ])
        );
        assert_eq!(value["a-shop.example.com"], serde_json::json!([]));
    }

    #[test]
    fn test_save_results_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.json");

        save_results(&sample_report(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(value.get("a-shop.example.com").is_some());
    }

    #[test]
    fn test_save_results_bad_path_errors() {
        let result = save_results(&sample_report(), Path::new("/nonexistent/dir/products.json"));
        assert!(result.is_err());
    }
}
