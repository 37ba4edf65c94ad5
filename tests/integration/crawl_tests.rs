//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end: reqwest fetching, robots.txt, link extraction,
//! graph construction and classification.

use website_graph::config::Config;
use website_graph::crawler::{crawl_with_cancellation, Coordinator};
use website_graph::graph::GraphLabel;
use website_graph::output::CrawlReport;
use website_graph::{crawl, CrawlError, StopReason};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no pacing delay
fn create_test_config(max_pages: usize, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.max_depth = max_depth;
    config.crawler.inter_request_delay = 0.0;
    config.crawler.fetch_timeout = 5.0;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();
    let body = format!(
        "<html><head><title>Test</title></head><body>\n{}</body></html>",
        anchors
    );
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(links))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"),
    )
    .await;
    mount_page(&server, "/", &["/page1", "page2"]).await;
    mount_page(&server, "/page1", &["/", "/page2"]).await;
    mount_page(&server, "/page2", &["https://external.test/elsewhere"]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    let graph = &outcome.graph;
    let page1 = format!("{}/page1", base);
    let page2 = format!("{}/page2", base);

    assert_eq!(outcome.seed.as_str(), base);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.contains_edge(&base, &page1));
    assert!(graph.contains_edge(&base, &page2));
    assert!(graph.contains_edge(&page1, &base));
    assert!(graph.contains_edge(&page1, &page2));
    assert!(!graph.contains_node("https://external.test/elsewhere"));

    assert_eq!(outcome.pages_crawled, 3);
    assert_eq!(outcome.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(outcome.label, GraphLabel::WeaklyConnectedDirected);
    assert!((outcome.stats.average_degree - 8.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(
        &server,
        ResponseTemplate::new(200)
            .set_body_string("User-agent: *\nDisallow: /private\n\nUser-agent: OtherBot\nDisallow: /"),
    )
    .await;
    mount_page(&server, "/", &["/private", "/public"]).await;
    mount_page(&server, "/public", &[]).await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(html_page(&["/secret"]))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    let private = format!("{}/private", base);

    // Linked from the seed, so still a node, but never fetched
    assert!(outcome.graph.contains_node(&private));
    assert!(!outcome.graph.is_crawled(&private));
    assert!(outcome.graph.is_crawled(&format!("{}/public", base)));
    assert!(!outcome.graph.contains_node(&format!("{}/secret", base)));
    assert_eq!(outcome.pages_crawled, 2);
}

#[tokio::test]
async fn test_robots_disallowing_seed_yields_empty_graph() {
    let server = MockServer::start().await;

    mount_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: TestBot\nDisallow: /"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/a"]))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = crawl(&server.uri(), create_test_config(10, 3)).await.unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.label, GraphLabel::Empty);
    assert_eq!(outcome.stats.average_degree, 0.0);
}

#[tokio::test]
async fn test_robots_server_error_fails_open() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, ResponseTemplate::new(503)).await;
    mount_page(&server, "/", &["/a"]).await;
    mount_page(&server, "/a", &[]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 2);
    assert!(outcome.graph.contains_edge(&base, &format!("{}/a", base)));
}

#[tokio::test]
async fn test_missing_robots_allows_all() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No robots.txt mock: wiremock answers 404
    mount_page(&server, "/", &["/a"]).await;
    mount_page(&server, "/a", &[]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    assert_eq!(outcome.pages_crawled, 2);
}

#[tokio::test]
async fn test_failed_and_non_html_pages_are_leaves() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/missing", "/data.json", "/broken", "/ok"]).await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"html": "<a href=\"/hidden\">x</a>"}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", &[]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    let graph = &outcome.graph;

    for leaf in ["/missing", "/data.json", "/broken"] {
        let url = format!("{}{}", base, leaf);
        assert!(graph.is_crawled(&url), "{} should be crawled", url);
        assert_eq!(graph.out_degree(&url), 0);
    }
    assert!(!graph.contains_node(&format!("{}/hidden", base)));
    assert_eq!(outcome.pages_crawled, 5);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/old"]).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .mount(&server)
        .await;
    mount_page(&server, "/new/", &["child"]).await;

    let outcome = crawl(&base, create_test_config(10, 1)).await.unwrap();

    // The page is recorded under the URL that was requested
    let old = format!("{}/old", base);
    assert!(outcome.graph.is_crawled(&old));
    assert!(outcome
        .graph
        .contains_edge(&old, &format!("{}/new/child", base)));
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/level1"]).await;
    mount_page(&server, "/level1", &["/level2"]).await;
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page(&["/level3"]))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = crawl(&base, create_test_config(10, 1)).await.unwrap();
    let level2 = format!("{}/level2", base);

    assert!(outcome
        .graph
        .contains_edge(&format!("{}/level1", base), &level2));
    assert!(!outcome.graph.is_crawled(&level2));
    assert!(!outcome.graph.contains_node(&format!("{}/level3", base)));
}

#[tokio::test]
async fn test_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: Vec<String> = (0..8).map(|i| format!("/p{}", i)).collect();
    let links: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_page(&server, "/", &links).await;
    for link in &links {
        mount_page(&server, link, &["/"]).await;
    }

    let outcome = crawl(&base, create_test_config(4, 3)).await.unwrap();

    assert_eq!(outcome.pages_crawled, 4);
    assert_eq!(outcome.stop_reason, StopReason::BudgetExhausted);
    // Unfetched link targets are still nodes
    assert_eq!(outcome.graph.node_count(), 9);
}

#[tokio::test]
async fn test_user_agent_header() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html_page(&["/a"]))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&base, create_test_config(1, 1)).await.unwrap();
    assert_eq!(outcome.graph.edge_count(), 1);
}

#[tokio::test]
async fn test_concurrent_crawl_matches_sequential() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/a", "/b", "/c"]).await;
    mount_page(&server, "/a", &["/b", "/d"]).await;
    mount_page(&server, "/b", &["/"]).await;
    mount_page(&server, "/c", &["/c", "/e"]).await;
    mount_page(&server, "/d", &[]).await;
    mount_page(&server, "/e", &["/a"]).await;

    let sequential = crawl(&base, create_test_config(20, 3)).await.unwrap();

    let mut config = create_test_config(20, 3);
    config.crawler.concurrency = 4;
    let parallel = crawl(&base, config).await.unwrap();

    let edges = |outcome: &website_graph::CrawlOutcome| -> Vec<(String, String)> {
        outcome
            .graph
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    };
    assert_eq!(edges(&sequential), edges(&parallel));
    assert_eq!(sequential.label, parallel.label);
    assert_eq!(sequential.stats, parallel.stats);
}

#[tokio::test]
async fn test_invalid_seed() {
    let result = crawl("mailto:someone@example.com", create_test_config(10, 2)).await;
    assert!(matches!(result, Err(CrawlError::InvalidSeed { .. })));

    let coordinator = Coordinator::new(create_test_config(10, 2)).unwrap();
    let result = coordinator.run("not a url").await;
    assert!(matches!(result, Err(CrawlError::InvalidSeed { .. })));
}

#[tokio::test]
async fn test_unreachable_seed_yields_single_node() {
    // Nothing listens on port 9 of the loopback
    let outcome = crawl("http://127.0.0.1:9/", create_test_config(10, 2))
        .await
        .unwrap();

    assert_eq!(outcome.graph.node_count(), 1);
    assert_eq!(outcome.graph.edge_count(), 0);
    assert_eq!(outcome.label, GraphLabel::StronglyConnectedDirected);
}

#[tokio::test]
async fn test_cancelled_crawl_returns_partial_report() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/a"]).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = crawl_with_cancellation(&server.uri(), create_test_config(10, 2), cancel)
        .await
        .unwrap();
    assert_eq!(outcome.stop_reason, StopReason::Cancelled);

    let report = CrawlReport::from_outcome(&outcome);
    assert!(report.is_empty());
    assert!(report.to_json().unwrap().contains("\"cancelled\""));
}

#[tokio::test]
async fn test_robots_fetched_once_per_origin() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 1\nAllow: /"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/a", &["/b"]).await;
    mount_page(&server, "/b", &[]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    assert_eq!(outcome.pages_crawled, 3);
}

#[tokio::test]
async fn test_forbidden_robots_allows_all() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, ResponseTemplate::new(403)).await;
    mount_page(&server, "/", &["/a"]).await;
    mount_page(&server, "/a", &[]).await;

    let outcome = crawl(&base, create_test_config(10, 3)).await.unwrap();
    assert_eq!(outcome.pages_crawled, 2);
}
