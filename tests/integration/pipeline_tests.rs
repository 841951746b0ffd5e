//! Integration tests for the discovery → batching → export pipeline
//!
//! These tests use wiremock to serve sitemap documents and act as an object
//! gateway, exercising the real HTTP fetcher end-to-end.

use sitemap_batcher::config::{parse_config, validate, Config, UserAgentConfig};
use sitemap_batcher::crawler::{Crawler, HttpFetcher, SelectionPattern};
use sitemap_batcher::output::ExportArtifact;
use sitemap_batcher::pipeline::{run_pipeline, Pipeline};
use sitemap_batcher::storage::{DirectoryStore, HttpStore, ObjectStore, StorageError};
use sitemap_batcher::{BatcherError, FetchError, Fetcher, PipelineStage};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "product-batches";

/// Builds a sitemap index document listing `locations`
fn sitemap_index(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

/// Builds a leaf sitemap document listing `urls`
fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

fn product_urls(base: &str, prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}/{}/item-{}", base, prefix, i))
        .collect()
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn create_test_config(root_url: &str, store_root: &str) -> Config {
    let config = parse_config(&format!(
        r#"
[discovery]
root-url = "{}"
fetch-timeout-secs = 5

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"

[storage]
backend = "directory"
bucket = "{}"
path = "{}"
"#,
        root_url, BUCKET, store_root
    ))
    .expect("Failed to parse config");
    validate(&config).expect("Config should be valid");
    config
}

fn http_fetcher() -> Arc<dyn Fetcher> {
    let timeout = Duration::from_secs(5);
    let fetcher = HttpFetcher::from_config(&UserAgentConfig::default(), timeout);
    Arc::new(fetcher.expect("Failed to build fetcher"))
}

fn stored_objects(dir: &TempDir) -> Vec<String> {
    match std::fs::read_dir(dir.path().join(BUCKET)) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn test_full_pipeline_to_directory_store() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let children = vec![
        format!("{}/sitemaps/product-1.xml", base),
        format!("{}/sitemaps/category-1.xml", base),
        format!("{}/sitemaps/product-2.xml", base),
    ];
    mount_xml(&mock_server, "/sitemap.xml", sitemap_index(&children)).await;
    mount_xml(
        &mock_server,
        "/sitemaps/product-1.xml",
        urlset(&product_urls(&base, "a", 30)),
    )
    .await;
    mount_xml(
        &mock_server,
        "/sitemaps/product-2.xml",
        urlset(&product_urls(&base, "b", 21)),
    )
    .await;

    // Filtered out by keyword, must never be fetched
    Mock::given(method("GET"))
        .and(path("/sitemaps/category-1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", base),
        &dir.path().display().to_string(),
    );

    let report = run_pipeline(&config).await.expect("Pipeline failed");

    assert_eq!(report.bucket_name, BUCKET);
    assert_eq!(report.batch_count, 3);
    assert!(report.object_key.starts_with("batches_"));
    assert!(report.object_key.ends_with(".json"));

    let store = DirectoryStore::new(dir.path());
    let body = store
        .get(BUCKET, &report.object_key)
        .await
        .unwrap()
        .expect("Artifact should exist");
    let artifact = ExportArtifact::from_json(&body).unwrap();

    let sizes: Vec<usize> = artifact.batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![25, 25, 1]);

    let mut expected = product_urls(&base, "a", 30);
    expected.extend(product_urls(&base, "b", 21));
    assert_eq!(artifact.batches.concat(), expected);
}

#[tokio::test]
async fn test_failing_child_is_skipped() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let children = vec![
        format!("{}/sitemaps/product-1.xml", base),
        format!("{}/sitemaps/product-2.xml", base),
        format!("{}/sitemaps/product-3.xml", base),
    ];
    mount_xml(&mock_server, "/sitemap.xml", sitemap_index(&children)).await;
    mount_xml(
        &mock_server,
        "/sitemaps/product-1.xml",
        urlset(&product_urls(&base, "a", 3)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/sitemaps/product-2.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_xml(
        &mock_server,
        "/sitemaps/product-3.xml",
        "<urlset><url><loc>broken</url></urlset>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", base),
        &dir.path().display().to_string(),
    );
    let store: Arc<dyn ObjectStore> = Arc::new(DirectoryStore::new(dir.path()));

    let mut pipeline = Pipeline::new(&config, http_fetcher(), store.clone()).unwrap();
    let report = pipeline.run().await.expect("Pipeline failed");

    assert_eq!(pipeline.stage(), PipelineStage::Done);
    assert_eq!(report.batch_count, 1);

    let body = store.get(BUCKET, &report.object_key).await.unwrap();
    let body = body.expect("Artifact should exist");
    let artifact = ExportArtifact::from_json(&body).unwrap();
    assert_eq!(artifact.batches, vec![product_urls(&base, "a", 3)]);
}

#[tokio::test]
async fn test_truncated_child_is_a_failed_sitemap() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let complete = format!("{}/sitemaps/product-1.xml", base);
    let truncated = format!("{}/sitemaps/product-2.xml", base);
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&[complete, truncated.clone()]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/sitemaps/product-1.xml",
        urlset(&product_urls(&base, "a", 2)),
    )
    .await;

    // Body cut off mid-document after one complete entry
    let full = urlset(&product_urls(&base, "b", 3));
    let cut = full[..full.find("item-1").unwrap()].to_string();
    mount_xml(&mock_server, "/sitemaps/product-2.xml", cut).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", base),
        &dir.path().display().to_string(),
    );

    let crawler = Crawler::new(http_fetcher(), &config.discovery).unwrap();
    let discovered = crawler.discover().await.expect("Discovery failed");

    assert_eq!(discovered.sitemaps_fetched, 1);
    assert_eq!(discovered.failed_sitemaps, vec![truncated]);
    assert_eq!(discovered.into_urls(), product_urls(&base, "a", 2));
}

#[tokio::test]
async fn test_root_failure_writes_nothing() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", base),
        &dir.path().display().to_string(),
    );

    let result = run_pipeline(&config).await;

    match result {
        Err(BatcherError::DiscoveryRoot {
            source: FetchError::Status { status, .. },
            ..
        }) => assert_eq!(status, 404),
        other => panic!("Expected DiscoveryRoot error, got {:?}", other),
    }
    assert!(stored_objects(&dir).is_empty());
}

#[tokio::test]
async fn test_fetcher_reports_parse_errors() {
    let mock_server = MockServer::start().await;
    let body = "<urlset><url><loc>x</url>".to_string();
    mount_xml(&mock_server, "/bad.xml", body).await;

    let pattern = SelectionPattern::parse("//url/loc").unwrap();
    let result = http_fetcher()
        .fetch(&format!("{}/bad.xml", mock_server.uri()), &pattern)
        .await;

    assert!(matches!(result, Err(FetchError::Parse { .. })));
}

#[tokio::test]
async fn test_fetcher_times_out_hung_sitemap() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(urlset(&[]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let timeout = Duration::from_millis(300);
    let fetcher = HttpFetcher::from_config(&UserAgentConfig::default(), timeout).unwrap();
    let pattern = SelectionPattern::parse("//url/loc").unwrap();
    let result = fetcher
        .fetch(&format!("{}/slow.xml", mock_server.uri()), &pattern)
        .await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_export_through_http_gateway() {
    let sitemaps = MockServer::start().await;
    let base = sitemaps.uri();
    mount_xml(
        &sitemaps,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/sitemaps/product-1.xml", base)]),
    )
    .await;
    mount_xml(
        &sitemaps,
        "/sitemaps/product-1.xml",
        urlset(&product_urls(&base, "a", 2)),
    )
    .await;

    let gateway = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&gateway)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", base),
        &dir.path().display().to_string(),
    );
    let store = Arc::new(HttpStore::new(
        reqwest::Client::new(),
        &gateway.uri(),
        Some("secret-token".to_string()),
    ));

    let mut pipeline = Pipeline::new(&config, http_fetcher(), store).unwrap();
    let report = pipeline.run().await.expect("Pipeline failed");

    let requests = gateway.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.path(),
        format!("/{}/{}", BUCKET, report.object_key)
    );
    let artifact = ExportArtifact::from_json(&requests[0].body).unwrap();
    assert_eq!(artifact.batches, vec![product_urls(&base, "a", 2)]);
}

#[tokio::test]
async fn test_gateway_rejection_is_storage_error() {
    let sitemaps = MockServer::start().await;
    mount_xml(&sitemaps, "/sitemap.xml", sitemap_index(&[])).await;

    let gateway = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&gateway)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/sitemap.xml", sitemaps.uri()),
        &dir.path().display().to_string(),
    );
    let store = Arc::new(HttpStore::new(reqwest::Client::new(), &gateway.uri(), None));

    let mut pipeline = Pipeline::new(&config, http_fetcher(), store).unwrap();
    let result = pipeline.run().await;

    assert!(matches!(
        result,
        Err(BatcherError::Storage(StorageError::Status { status: 403, .. }))
    ));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
}
