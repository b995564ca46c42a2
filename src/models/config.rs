//! Application configuration structures.
//!
//! Every field has a compiled-in default, so the crawler runs with no
//! configuration file at all. A TOML file may override any subset.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Field, ProductSelectors, SelectorConfig};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// CSS selectors for product extraction
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Next-page URL construction and stop conditions
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Output feed settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| AppError::config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using configuration file {}", path.as_ref().display());
                config
            }
            Err(e) => {
                log::warn!("{e}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Also compiles every selector, so a typo is reported before the first
    /// request goes out.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }

        let start = Url::parse(&self.crawler.start_url).map_err(|e| {
            AppError::validation(format!(
                "crawler.start_url '{}' is not a valid URL: {e}",
                self.crawler.start_url
            ))
        })?;
        if !matches!(start.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "crawler.start_url must be http(s), got '{}'",
                start.scheme()
            )));
        }

        if !self.pagination.page_url_template.contains("{n}") {
            return Err(AppError::validation(
                "pagination.page_url_template must contain {n}",
            ));
        }
        if self.pagination.max_pages == Some(0) {
            return Err(AppError::validation("pagination.max_pages must be > 0"));
        }

        if self.output.fields.is_empty() {
            return Err(AppError::validation("output.fields is empty"));
        }
        let mut seen = HashSet::new();
        for field in &self.output.fields {
            if !seen.insert(field) {
                return Err(AppError::validation(format!(
                    "output.fields lists '{}' twice",
                    field.as_str()
                )));
            }
        }

        ProductSelectors::compile(
            &self.selectors,
            self.pagination.load_more_selector.as_deref(),
        )?;

        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// First listing page; later pages are derived from it
    #[serde(default = "defaults::start_url")]
    pub start_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between page requests in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: defaults::start_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: 0,
        }
    }
}

/// Pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Template for page 2 onward. `{base}` is the start URL without its
    /// trailing slash, `{n}` the page number.
    #[serde(default = "defaults::page_url_template")]
    pub page_url_template: String,

    /// When set, only advance while this selector matches on the current page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_more_selector: Option<String>,

    /// Hard cap on the number of pages requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_url_template: defaults::page_url_template(),
            load_more_selector: None,
            max_pages: None,
        }
    }
}

/// Output feed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    JsonLines,
}

/// Output feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file, relative to the working directory
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// Columns to write, in order
    #[serde(default = "defaults::fields")]
    pub fields: Vec<Field>,

    /// Prefix the file with a UTF-8 byte order mark
    #[serde(default)]
    pub bom: bool,

    /// Truncate an existing file instead of appending to it
    #[serde(default = "defaults::overwrite")]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            format: OutputFormat::default(),
            fields: defaults::fields(),
            bom: false,
            overwrite: defaults::overwrite(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::Field;

    pub fn start_url() -> String {
        "https://example.com/shop/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn page_url_template() -> String {
        "{base}/page/{n}/".into()
    }

    pub fn output_path() -> PathBuf {
        PathBuf::from("products.csv")
    }
    pub fn fields() -> Vec<Field> {
        vec![Field::Name, Field::Price]
    }
    pub fn overwrite() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_start_url() {
        let mut config = Config::default();
        config.crawler.start_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.crawler.start_url = "ftp://example.com/shop/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_page_number() {
        let mut config = Config::default();
        config.pagination.page_url_template = "{base}/page/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_pages() {
        let mut config = Config::default();
        config.pagination.max_pages = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_field_lists() {
        let mut config = Config::default();
        config.output.fields.clear();
        assert!(config.validate().is_err());

        config.output.fields = vec![Field::Name, Field::Name];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_selector() {
        let mut config = Config::default();
        config.selectors.price = "[[invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pagination.load_more_selector = Some("a[[".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            start_url = "https://shop.test/catalog/"

            [pagination]
            max_pages = 3

            [output]
            format = "jsonlines"
            fields = ["price"]
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.start_url, "https://shop.test/catalog/");
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.selectors.product, "div.wd-product");
        assert_eq!(config.pagination.page_url_template, "{base}/page/{n}/");
        assert_eq!(config.pagination.max_pages, Some(3));
        assert_eq!(config.output.format, OutputFormat::JsonLines);
        assert_eq!(config.output.fields, vec![Field::Price]);
        assert_eq!(config.output.path, PathBuf::from("products.csv"));
        assert!(config.output.overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_rejects_unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[selectors]\nproduct = 42\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_reads_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawler.toml");
        fs::write(&path, "[pagination]\nmax_pages = 4\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pagination.max_pages, Some(4));
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/definitely/not/here.toml");
        assert_eq!(config.crawler.start_url, "https://example.com/shop/");
    }
}
