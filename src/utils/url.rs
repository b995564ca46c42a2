// src/utils/url.rs

//! Pagination URL construction.

use ::url::Url;

/// The `{base}` value of a start URL: no query, no fragment, no trailing slash.
///
/// # Examples
/// ```
/// use product_crawler::utils::url::base_of;
///
/// assert_eq!(base_of("https://example.com/shop/"), "https://example.com/shop");
/// assert_eq!(
///     base_of("https://example.com/shop/?orderby=price"),
///     "https://example.com/shop"
/// );
/// ```
pub fn base_of(start_url: &str) -> String {
    match Url::parse(start_url) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.as_str().trim_end_matches('/').to_string()
        }
        Err(_) => start_url.trim_end_matches('/').to_string(),
    }
}

/// Build the URL for a page number.
///
/// Page 1 is the start URL itself; every later page is the template with
/// `{base}` and `{n}` substituted. A query on the start URL is carried over
/// to every page.
///
/// # Examples
/// ```
/// use product_crawler::utils::url::page_url;
///
/// assert_eq!(
///     page_url("https://example.com/shop/", "{base}/page/{n}/", 2),
///     "https://example.com/shop/page/2/"
/// );
/// ```
pub fn page_url(start_url: &str, template: &str, page: u32) -> String {
    if page <= 1 {
        return start_url.to_string();
    }

    let mut next = template
        .replace("{base}", &base_of(start_url))
        .replace("{n}", &page.to_string());

    let query = Url::parse(start_url)
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .filter(|q| !q.is_empty());
    if let Some(query) = query {
        next.push(if next.contains('?') { '&' } else { '?' });
        next.push_str(&query);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "{base}/page/{n}/";

    #[test]
    fn test_first_page_is_start_url() {
        assert_eq!(
            page_url("https://example.com/shop/", TEMPLATE, 1),
            "https://example.com/shop/"
        );
        assert_eq!(
            page_url("https://example.com/shop/?orderby=price", TEMPLATE, 1),
            "https://example.com/shop/?orderby=price"
        );
    }

    #[test]
    fn test_second_page() {
        assert_eq!(
            page_url("https://example.com/shop/", TEMPLATE, 2),
            "https://example.com/shop/page/2/"
        );
    }

    #[test]
    fn test_start_url_without_trailing_slash() {
        assert_eq!(
            page_url("https://example.com/shop", TEMPLATE, 7),
            "https://example.com/shop/page/7/"
        );
    }

    #[test]
    fn test_query_moves_after_page_path() {
        assert_eq!(
            page_url("https://example.com/shop/?orderby=price", TEMPLATE, 2),
            "https://example.com/shop/page/2/?orderby=price"
        );
    }

    #[test]
    fn test_fragment_is_dropped() {
        assert_eq!(
            page_url("https://example.com/shop/#main", TEMPLATE, 3),
            "https://example.com/shop/page/3/"
        );
    }

    #[test]
    fn test_query_style_template() {
        assert_eq!(
            page_url("https://example.com/shop/", "{base}/?paged={n}", 3),
            "https://example.com/shop/?paged=3"
        );
        assert_eq!(
            page_url("https://example.com/shop/?orderby=price", "{base}/?paged={n}", 3),
            "https://example.com/shop/?paged=3&orderby=price"
        );
    }
}
