/// Keeps the URLs that contain `keyword` as a substring, preserving order
///
/// An empty keyword keeps every URL.
///
/// # Example
///
/// ```
/// use sitemap_batcher::crawler::filter_by_keyword;
///
/// let urls = vec!["a/product/x".to_string(), "a/category/y".to_string()];
/// assert_eq!(filter_by_keyword(&urls, "product"), vec!["a/product/x".to_string()]);
/// ```
pub fn filter_by_keyword(urls: &[String], keyword: &str) -> Vec<String> {
    urls.iter()
        .filter(|url| url.contains(keyword))
        .cloned()
        .collect()
}
