//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up mock e-commerce sites and exercise
//! the full crawl cycle end-to-end: root expansion, category recursion,
//! pagination chasing, budget truncation, and retry behavior.

use shopmap::config::{Config, PatternConfig};
use shopmap::crawler::{crawl, Crawler, Fetcher};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at a mock server
///
/// The patterns are deliberately narrow (`/p/<digits>`, `/c/`,
/// `page=<digits>`) so each test controls exactly which role every link
/// gets.
fn create_test_config(seed: &str) -> Config {
    let mut config = Config::default();

    config.domains = vec![seed.to_string()];
    config.crawler.request_delay = 0.0;
    config.crawler.timeout = 2.0;
    config.crawler.max_retries = 0;
    config.crawler.verbose = false;
    config.patterns = PatternConfig {
        product: vec![r"/p/\d+".to_string()],
        category: vec![r"/c/".to_string()],
        pagination: vec![r"page=\d+".to_string()],
    };

    config
}

fn html_page(body_links: &str) -> String {
    format!(
        "<html><head><title>Shop</title></head><body>{}</body></html>",
        body_links
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body_links: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(body_links)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_discovers_products() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Root links to one category; the category lists a product, a pagination
    // link, and a cycle back to itself via the second listing page
    mount_page(&mock_server, "/", r#"<a href="/c/shoes">Shoes</a>"#).await;
    mount_page(
        &mock_server,
        "/c/shoes",
        r#"<a href="/p/42">A shoe</a> <a href="/c/shoes?page=2">Next</a>"#,
    )
    .await;

    let config = create_test_config(&base_url);
    let crawler = Crawler::new(config).expect("Failed to build crawler");

    let ctx = crawler.crawl_domain(&base_url).await;
    let report = ctx.snapshot();

    // Exactly the one product, and it was collected without being fetched
    assert_eq!(report.product_urls, vec![format!("{}/p/42", base_url)]);
    assert!(!ctx.is_visited(&format!("{}/p/42", base_url)));

    // Visited: the root, the category page, and its second listing page
    let mut expected = vec![
        base_url.clone(),
        format!("{}/c/shoes", base_url),
        format!("{}/c/shoes?page=2", base_url),
    ];
    expected.sort();
    assert_eq!(report.visited_urls, expected);
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // /c/a and /c/b link to each other; the visited set must break the cycle
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            r#"<a href="/c/a">A</a> <a href="/c/b">B</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            r#"<a href="/c/b">B</a> <a href="/p/1">One</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            r#"<a href="/c/a">A</a> <a href="/p/2">Two</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;

    assert_eq!(ctx.product_count(), 2);
    // Mock expectations (each page exactly once) are verified on drop
}

#[tokio::test]
async fn test_budget_truncates_subcategory_expansion() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let sub_links: String = (0..10)
        .map(|i| format!(r#"<a href="/c/sub{}">S{}</a> "#, i, i))
        .collect();

    mount_page(&mock_server, "/", r#"<a href="/c/main">Main</a>"#).await;
    mount_page(&mock_server, "/c/main", &sub_links).await;
    for i in 0..10 {
        mount_page(&mock_server, &format!("/c/sub{}", i), "").await;
    }

    let mut config = create_test_config(&base_url);
    config.crawler.max_pages_per_domain = 5;

    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;

    // Root + /c/main are visited before subcategories are scheduled, so the
    // remaining budget admits exactly 3 of the 10 candidates; the rest are
    // dropped, not deferred
    assert_eq!(ctx.visited_count(), 5);

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 5);
}

#[tokio::test]
async fn test_pagination_exempt_from_depth_bound() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // At max_depth = 0 the subcategory /c/deeper may not be entered, but the
    // pagination chain at the same depth keeps going
    mount_page(&mock_server, "/", r#"<a href="/c/list">List</a>"#).await;
    mount_page(
        &mock_server,
        "/c/list",
        r#"<a href="/c/deeper">Deeper</a> <a href="/c/list?page=2">Next</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/c/deeper",
        r#"<a href="/p/99">Hidden</a>"#,
    )
    .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_depth = 0;

    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;

    assert!(ctx.is_visited(&format!("{}/c/list?page=2", base_url)));
    assert!(!ctx.is_visited(&format!("{}/c/deeper", base_url)));
    assert_eq!(ctx.product_count(), 0);
}

#[tokio::test]
async fn test_pagination_chain_can_exceed_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Budget of 3 is exhausted by root + /c/list + one page, yet the
    // pagination chain continues: pagination scheduling skips the budget.
    // The path matcher ignores queries, so the paged responses need
    // query_param matchers, mounted before the bare /c/list mock.
    mount_page(&mock_server, "/", r#"<a href="/c/list">List</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/c/list"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(r#"<a href="/c/list?page=3">3</a>"#)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c/list"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("")))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/c/list",
        r#"<a href="/c/list?page=2">2</a>"#,
    )
    .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_pages_per_domain = 3;

    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;

    assert!(ctx.visited_count() > 3);
    assert!(ctx.is_visited(&format!("{}/c/list?page=3", base_url)));
}

#[tokio::test]
async fn test_root_product_links_are_ignored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Products linked straight from the root are not collected; only
    // category links are expanded from there
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/p/1">Direct product</a> <a href="/c/shoes">Shoes</a>"#,
    )
    .await;
    mount_page(&mock_server, "/c/shoes", r#"<a href="/p/2">A shoe</a>"#).await;

    let config = create_test_config(&base_url);
    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;
    let report = ctx.snapshot();

    assert_eq!(report.product_urls, vec![format!("{}/p/2", base_url)]);
}

#[tokio::test]
async fn test_failed_page_is_silent_and_local() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // /c/broken always 500s; the sibling category still yields its product
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/c/broken">Broken</a> <a href="/c/ok">Ok</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/c/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/c/ok", r#"<a href="/p/7">Seven</a>"#).await;

    let config = create_test_config(&base_url);
    let crawler = Crawler::new(config).expect("Failed to build crawler");
    let ctx = crawler.crawl_domain(&base_url).await;

    assert_eq!(ctx.snapshot().product_urls, vec![format!("{}/p/7", base_url)]);
    // The broken page was still claimed before its fetch failed
    assert!(ctx.is_visited(&format!("{}/c/broken", base_url)));
}

#[tokio::test]
async fn test_retry_backoff_on_429() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_retries = 2;

    let fetcher = Fetcher::new(&config.crawler).expect("Failed to build fetcher");

    let start = Instant::now();
    let body = fetcher.fetch(&format!("{}/limited", base_url)).await;
    let elapsed = start.elapsed();

    // Initial attempt plus exactly 2 retries, backing off 1s then 2s
    assert!(body.is_none());
    assert!(
        elapsed >= Duration::from_secs(3),
        "expected >= 3s of backoff, got {:?}",
        elapsed
    );

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_non_200_shares_retry_policy() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // 404 is retried like any other failure, then degrades to absent
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_retries = 1;

    let fetcher = Fetcher::new(&config.crawler).expect("Failed to build fetcher");
    let body = fetcher.fetch(&format!("{}/missing", base_url)).await;

    assert!(body.is_none());
}

#[tokio::test]
async fn test_fetch_returns_body_on_200() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/page", r#"<a href="/p/1">One</a>"#).await;

    let config = create_test_config(&base_url);
    let fetcher = Fetcher::new(&config.crawler).expect("Failed to build fetcher");

    let body = fetcher.fetch(&format!("{}/page", base_url)).await;
    assert!(body.expect("body present").contains("/p/1"));
}

#[tokio::test]
async fn test_crawl_reports_configured_domains() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/c/shoes">Shoes</a>"#).await;
    mount_page(
        &mock_server,
        "/c/shoes",
        r#"<a href="/p/10">Ten</a> <a href="/p/11">Eleven</a>"#,
    )
    .await;

    let config = create_test_config(&base_url);
    let report = crawl(config).await.expect("crawl failed");

    assert_eq!(report.domains.len(), 1);
    let domain_report = &report.domains[0];
    assert_eq!(
        domain_report.product_urls,
        vec![format!("{}/p/10", base_url), format!("{}/p/11", base_url)]
    );
    assert_eq!(domain_report.product_count(), 2);
}
