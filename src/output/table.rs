//! Tabular stdout summary of crawl results

use crate::state::CrawlReport;

/// Prints the discovered product URLs per domain as a summary table
pub fn print_summary(report: &CrawlReport) {
    println!("=== Discovered Product URLs ===\n");

    if report.domains.is_empty() {
        println!("No domains were crawled.");
        return;
    }

    let domain_width = report
        .domains
        .iter()
        .map(|d| d.domain.len())
        .max()
        .unwrap_or(0)
        .max("Domain".len());

    println!("{:<width$}  {:>8}  {:>8}", "Domain", "Products", "Pages", width = domain_width);
    println!("{}", "-".repeat(domain_width + 20));

    for domain in &report.domains {
        println!(
            "{:<width$}  {:>8}  {:>8}",
            domain.domain,
            domain.product_count(),
            domain.pages_visited(),
            width = domain_width
        );

        for url in &domain.product_urls {
            println!("    {}", url);
        }
    }

    println!();
    println!(
        "Total: {} product URLs across {} domains",
        report.total_products(),
        report.domains.len()
    );
    println!("Finished at: {}", report.finished_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DomainReport;

    #[test]
    fn test_print_summary_does_not_panic() {
        let report = CrawlReport::new(vec![DomainReport {
            domain: "shop.example.com".to_string(),
            product_urls: vec!["https://shop.example.com/p/1".to_string()],
            visited_urls: vec![
                "https://shop.example.com".to_string(),
                "https://shop.example.com/c/shoes".to_string(),
            ],
        }]);

        print_summary(&report);
    }

    #[test]
    fn test_print_empty_report_does_not_panic() {
        print_summary(&CrawlReport::new(Vec::new()));
    }
}
