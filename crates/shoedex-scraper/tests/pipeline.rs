//! Integration tests for `ExtractionPipeline::run_batch`.
//!
//! Each test stands up a `wiremock` server serving product detail pages so
//! ordering and failure isolation are exercised over real HTTP.

use std::time::Duration;

use shoedex_core::Strictness;
use shoedex_scraper::{
    BatchReport, ClientOptions, ExtractionPipeline, PageClient, PipelineOptions, ScraperError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> PageClient {
    PageClient::new(&ClientOptions {
        timeout_secs: 5,
        user_agent: "shoedex-test/0.1".to_owned(),
        headers: Vec::new(),
        max_retries: 0,
        backoff_base_secs: 0,
    })
    .expect("failed to build test PageClient")
}

fn pipeline(strictness: Strictness, max_concurrency: Option<usize>) -> ExtractionPipeline {
    ExtractionPipeline::new(
        test_client(),
        PipelineOptions {
            strictness,
            request_delay: Duration::ZERO,
            max_concurrency,
        },
    )
}

fn product_page(title: &str, price: &str) -> String {
    format!(
        r#"<html><body>
             <h1 id="pdp_product_title">{title}</h1>
             <h1 id="pdp_product_subtitle">Men's Shoes</h1>
             <div id="price-container">{price}</div>
             <div id="hero-image"><img src="https://static.nike.com/{title}/600x600_1728_600.jpg"></div>
           </body></html>"#
    )
}

async fn mount_product(server: &MockServer, route: &str, title: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page(title, "2,929,000₫"))
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_batch_returns_no_outcomes() {
    let outcomes = pipeline(Strictness::Lenient, None).run_batch(&[]).await;
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn outcomes_follow_input_order_despite_slow_first_page() {
    let server = MockServer::start().await;
    mount_product(&server, "/t/slow", "Slow", 400).await;
    mount_product(&server, "/t/medium", "Medium", 150).await;
    mount_product(&server, "/t/fast", "Fast", 0).await;

    let urls: Vec<String> = ["/t/slow", "/t/medium", "/t/fast"]
        .iter()
        .map(|p| format!("{}{p}", server.uri()))
        .collect();

    let outcomes = pipeline(Strictness::Strict, None).run_batch(&urls).await;

    assert_eq!(outcomes.len(), 3);
    let titles: Vec<&str> = outcomes
        .iter()
        .map(|o| o.result.as_ref().expect("all pages valid").title.as_str())
        .collect();
    assert_eq!(titles, vec!["Slow", "Medium", "Fast"]);
    for (outcome, url) in outcomes.iter().zip(&urls) {
        assert_eq!(&outcome.url, url);
        assert_eq!(&outcome.result.as_ref().unwrap().source_url, url);
    }
}

#[tokio::test]
async fn a_404_only_fails_its_own_slot() {
    let server = MockServer::start().await;
    mount_product(&server, "/t/a", "Air Max 90", 0).await;
    mount_product(&server, "/t/c", "Pegasus 41", 0).await;
    mount_product(&server, "/t/d", "Dunk Low", 0).await;
    Mock::given(method("GET"))
        .and(path("/t/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let urls: Vec<String> = ["/t/a", "/t/missing", "/t/c", "/t/d"]
        .iter()
        .map(|p| format!("{}{p}", server.uri()))
        .collect();

    let outcomes = pipeline(Strictness::Lenient, None).run_batch(&urls).await;

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[1].url, urls[1]);
    let err = outcomes[1].result.as_ref().unwrap_err();
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }),
        "expected 404, got: {err:?}"
    );
    assert_eq!(err.status(), Some(404));

    let a = outcomes[0].result.as_ref().unwrap();
    assert_eq!(a.title, "Air Max 90");
    assert_eq!(a.price, 2_929_000);
    assert_eq!(outcomes[2].result.as_ref().unwrap().title, "Pegasus 41");
    assert_eq!(outcomes[3].result.as_ref().unwrap().title, "Dunk Low");

    let report = BatchReport::from_outcomes(&outcomes);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn strict_malformed_price_does_not_affect_siblings() {
    let server = MockServer::start().await;
    mount_product(&server, "/t/good", "Vomero 18", 0).await;
    Mock::given(method("GET"))
        .and(path("/t/coming-soon"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(product_page("Mystery", "Sắp ra mắt")),
        )
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/t/coming-soon", server.uri()),
        format!("{}/t/good", server.uri()),
    ];
    let outcomes = pipeline(Strictness::Strict, None).run_batch(&urls).await;

    assert!(matches!(
        outcomes[0].result,
        Err(ScraperError::MalformedPrice { .. })
    ));
    assert_eq!(outcomes[1].result.as_ref().unwrap().title, "Vomero 18");
}

#[tokio::test]
async fn duplicate_urls_are_extracted_per_occurrence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/twice"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page("Twice", "1.234")))
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/t/twice", server.uri());
    let outcomes = pipeline(Strictness::Lenient, None)
        .run_batch(&[url.clone(), url])
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.as_ref().unwrap().price == 1234));
}

#[tokio::test]
async fn concurrency_cap_still_preserves_order() {
    let server = MockServer::start().await;
    for (i, delay) in [300u64, 0, 200, 0, 100].iter().enumerate() {
        mount_product(&server, &format!("/t/{i}"), &format!("Shoe {i}"), *delay).await;
    }
    let urls: Vec<String> = (0..5).map(|i| format!("{}/t/{i}", server.uri())).collect();

    let outcomes = pipeline(Strictness::Lenient, Some(2)).run_batch(&urls).await;

    let titles: Vec<String> = outcomes
        .into_iter()
        .map(|o| o.result.unwrap().title)
        .collect();
    assert_eq!(titles, vec!["Shoe 0", "Shoe 1", "Shoe 2", "Shoe 3", "Shoe 4"]);
}

#[tokio::test]
async fn hero_image_fallback_survives_the_http_path() {
    let server = MockServer::start().await;
    mount_product(&server, "/t/hero", "Hero", 0).await;
    let url = format!("{}/t/hero", server.uri());

    let outcomes = pipeline(Strictness::Lenient, None).run_batch(&[url]).await;

    let record = outcomes[0].result.as_ref().unwrap();
    assert_eq!(
        record.images_by_color.get("Default").map(String::as_str),
        Some("https://static.nike.com/Hero/600x600_144_600.jpg")
    );
}
