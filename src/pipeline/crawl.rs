// src/pipeline/crawl.rs

//! Product crawling pipeline.

use crate::error::Result;
use crate::models::{Config, CrawlReport};
use crate::services::ListingCrawler;
use crate::storage::{ProductSink, open_feed};
use crate::utils::{PageFetcher, log};

/// Run the crawler and write the configured output feed.
pub async fn run_crawler(config: &Config, fetcher: impl PageFetcher) -> Result<CrawlReport> {
    config.validate()?;

    log::header("Product crawler starting");
    log::sub_item(&format!("Start URL: {}", config.crawler.start_url));
    log::sub_item(&format!("Output: {}", config.output.path.display()));

    let mut sink = open_feed(&config.output)?;
    let report = crawl_into(config, fetcher, sink.as_mut()).await?;
    sink.flush()?;

    log::separator();
    report_summary(&report);

    Ok(report)
}

/// Crawl into an already opened sink.
pub async fn crawl_into(
    config: &Config,
    fetcher: impl PageFetcher,
    sink: &mut dyn ProductSink,
) -> Result<CrawlReport> {
    let crawler = ListingCrawler::from_config(fetcher, config)?;
    crawler.crawl(sink).await
}

fn report_summary(report: &CrawlReport) {
    let elapsed = report.finished_at - report.started_at;
    log::summary(
        "Crawl complete",
        &[
            ("Pages fetched", report.pages_fetched.to_string()),
            ("Products found", report.products_found.to_string()),
            ("Records written", report.records_emitted.to_string()),
            ("Duplicates skipped", report.duplicates_skipped.to_string()),
            ("Incomplete skipped", report.incomplete_skipped.to_string()),
            ("Stopped", report.stop_reason.to_string()),
            (
                "Elapsed",
                format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0),
            ),
        ],
    );

    if !report.stop_reason.is_clean() {
        ::log::warn!("Crawl ended on a fetch failure; output may be incomplete");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::{OutputFormat, StopReason};
    use crate::utils::PageRequest;

    struct StaticSite(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for StaticSite {
        async fn fetch(&self, request: &PageRequest) -> Result<String> {
            self.0.get(&request.url).cloned().ok_or_else(|| AppError::Status {
                url: request.url.clone(),
                status: 404,
            })
        }
    }

    fn site() -> StaticSite {
        let product = |name: &str, price: &str| {
            format!(
                r#"<div class="wd-product"><h3 class="wd-entities-title"><a>{name}</a></h3><span class="woocommerce-Price-amount"><bdi>{price}</bdi></span></div>"#
            )
        };
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com/shop/".to_string(),
            format!("{}{}", product("Chair, oak", "$120"), product("Lamp", "$30")),
        );
        pages.insert(
            "https://example.com/shop/page/2/".to_string(),
            format!("{}{}", product("Lamp", "$30"), product("Rug", "$80")),
        );
        pages.insert(
            "https://example.com/shop/page/3/".to_string(),
            "<p>No products were found.</p>".to_string(),
        );
        StaticSite(pages)
    }

    #[tokio::test]
    async fn test_run_crawler_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.path = dir.path().join("products.csv");

        let report = run_crawler(&config, site()).await.unwrap();

        assert_eq!(report.stop_reason, StopReason::Exhausted);
        assert_eq!(report.records_emitted, 3);
        let content = fs::read_to_string(&config.output.path).unwrap();
        assert_eq!(
            content,
            "name,price\n\"Chair, oak\",$120\nLamp,$30\nRug,$80\n"
        );
    }

    #[tokio::test]
    async fn test_run_crawler_writes_jsonlines() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.path = dir.path().join("products.jsonl");
        config.output.format = OutputFormat::JsonLines;

        run_crawler(&config, site()).await.unwrap();

        let content = fs::read_to_string(&config.output.path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("{\"name\":\"Chair, oak\",\"price\":\"$120\"}"));
    }

    #[tokio::test]
    async fn test_run_crawler_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.path = dir.path().join("products.csv");
        config.selectors.product = "div[[".to_string();

        assert!(run_crawler(&config, site()).await.is_err());
        assert!(!config.output.path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_site_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.path = dir.path().join("products.csv");

        let report = run_crawler(&config, StaticSite(HashMap::new())).await.unwrap();

        assert!(!report.stop_reason.is_clean());
        let content = fs::read_to_string(&config.output.path).unwrap();
        assert_eq!(content, "name,price\n");
    }
}
