// src/utils/log.rs

//! Formatted log output for run banners and summaries.
//!
//! Thin helpers over the `log` facade, so whatever logger the binary
//! installs decides where and whether these lines appear.

/// Width of banner and separator lines.
const RULE_WIDTH: usize = 60;

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(RULE_WIDTH);
    log::info!("{border}");
    log::info!("  {title}");
    log::info!("{border}");
}

/// Log a separator line
pub fn separator() {
    log::info!("{}", "─".repeat(RULE_WIDTH));
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("{}", indent(message));
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {title}");
    for line in summary_lines(items) {
        log::info!("{line}");
    }
}

fn indent(message: &str) -> String {
    format!("    {message}")
}

fn summary_lines(items: &[(&str, String)]) -> Vec<String> {
    items
        .iter()
        .map(|(key, value)| indent(&format!("{key}: {value}")))
        .collect()
}
