use std::time::Duration;

use shoedex_scraper::{BatchReport, PipelineOptions};

use super::*;

fn base_config() -> AppConfig {
    AppConfig {
        listing_url: "https://www.nike.com/vn/w/mens-shoes-nik1zy7ok".to_string(),
        user_agent: "shoedex-test".to_string(),
        request_headers: Vec::new(),
        request_timeout_secs: 30,
        request_delay_ms: 1000,
        max_concurrency: None,
        max_retries: 0,
        retry_backoff_base_secs: 1,
        strictness: Strictness::Lenient,
        output_path: PathBuf::from("nike_products.json"),
        log_level: "info".to_string(),
        log_file: None,
        webdriver_url: None,
        scroll: shoedex_core::ScrollPolicy::UntilStable,
        scroll_pause_ms: 2000,
    }
}

#[test]
fn no_flags_leave_config_untouched() {
    let cli = Cli::try_parse_from(["shoedex"]).expect("expected valid cli args");
    let mut config = base_config();
    cli.apply_to(&mut config);
    assert_eq!(config.listing_url, base_config().listing_url);
    assert_eq!(config.output_path, PathBuf::from("nike_products.json"));
    assert_eq!(config.max_concurrency, None);
    assert_eq!(config.strictness, Strictness::Lenient);
    assert!(cli.urls.is_empty());
    assert!(!cli.dry_run);
}

#[test]
fn flags_override_config() {
    let cli = Cli::try_parse_from([
        "shoedex",
        "--listing-url",
        "https://www.nike.com/vn/w/womens-shoes-5e1x6zy7ok",
        "-o",
        "out/women.json",
        "--max-concurrency",
        "4",
        "--delay-ms",
        "250",
        "--strict",
    ])
    .unwrap();
    let mut config = base_config();
    cli.apply_to(&mut config);

    assert_eq!(
        config.listing_url,
        "https://www.nike.com/vn/w/womens-shoes-5e1x6zy7ok"
    );
    assert_eq!(config.output_path, PathBuf::from("out/women.json"));
    assert_eq!(config.max_concurrency, Some(4));
    assert_eq!(config.request_delay_ms, 250);
    assert_eq!(config.strictness, Strictness::Strict);

    let options = PipelineOptions::from_app_config(&config);
    assert_eq!(options.request_delay, Duration::from_millis(250));
    assert_eq!(options.max_concurrency, Some(4));
}

#[test]
fn zero_concurrency_flag_means_unbounded() {
    let cli = Cli::try_parse_from(["shoedex", "--max-concurrency", "0"]).unwrap();
    let mut config = base_config();
    config.max_concurrency = Some(8);
    cli.apply_to(&mut config);
    assert_eq!(config.max_concurrency, None);
}

#[test]
fn repeated_url_flags_are_collected_in_order() {
    let cli = Cli::try_parse_from([
        "shoedex",
        "--url",
        "https://www.nike.com/vn/t/a/1",
        "--url",
        "https://www.nike.com/vn/t/b/2",
        "--dry-run",
    ])
    .unwrap();
    assert_eq!(
        cli.urls,
        vec!["https://www.nike.com/vn/t/a/1", "https://www.nike.com/vn/t/b/2"]
    );
    assert!(cli.dry_run);
}

#[test]
fn summary_mentions_skipped_cards_and_output() {
    let summary = run::RunSummary {
        listing_skipped: 2,
        report: BatchReport {
            total: 5,
            succeeded: 4,
            failed: 1,
            degraded: 0,
        },
        output_path: PathBuf::from("nike_products.json"),
    };
    assert_eq!(
        summary.to_string(),
        "5 products: 4 succeeded (0 degraded), 1 failed; 2 listing cards skipped\ndata saved to nike_products.json"
    );
}
