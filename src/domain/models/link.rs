use url::Url;

/// Schemes that take the user away from the current site.
const EXTERNAL_SCHEMES: [&str; 2] = ["http", "https"];

/// Returns true when `href` is an absolute link leaving the site.
///
/// Relative references fail to parse without a base and are treated as
/// internal navigation.
pub fn is_external_link(href: &str) -> bool {
    match Url::parse(href.trim()) {
        Ok(url) => EXTERNAL_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}
