// src/pipeline/validate.rs

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Load a configuration file strictly and validate it.
///
/// Unlike a crawl, a file that cannot be read or parsed is an error here
/// rather than a fallback to defaults.
pub fn run_validate_file(path: &Path) -> Result<()> {
    let config = Config::load(path).inspect_err(|e| ::log::error!("{e}"))?;
    ::log::info!("Using configuration file {}", path.display());
    run_validate(&config)
}

/// Validate configuration and compile selectors, logging what will be used.
pub fn run_validate(config: &Config) -> Result<()> {
    log::header("Validating configuration");

    if let Err(e) = config.validate() {
        ::log::error!("Config validation failed: {e}");
        return Err(e);
    }

    log::sub_item(&format!("Start URL: {}", config.crawler.start_url));
    log::sub_item(&format!("User agent: {}", config.crawler.user_agent));
    log::sub_item(&format!("Timeout: {}s", config.crawler.timeout_secs));
    log::sub_item(&format!("Product selector: {}", config.selectors.product));
    log::sub_item(&format!("Name selector: {}", config.selectors.name));
    log::sub_item(&format!("Price selector: {}", config.selectors.price));
    log::sub_item(&format!(
        "Page URL template: {}",
        config.pagination.page_url_template
    ));
    if let Some(load_more) = &config.pagination.load_more_selector {
        log::sub_item(&format!("Load-more selector: {load_more}"));
    }
    if let Some(max) = config.pagination.max_pages {
        log::sub_item(&format!("Max pages: {max}"));
    }
    log::sub_item(&format!(
        "Output: {} ({:?}, fields: {})",
        config.output.path.display(),
        config.output.format,
        config
            .output
            .fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    ));

    ::log::info!("✓ Config OK");
    Ok(())
}
