//! talking to the CSS API: building the request and reading the response

use std::sync::LazyLock;

use regex::Regex;

static CSS_API_URL: &str = "https://fonts.googleapis.com/css2";

/// Every italic flag paired with every weight from 100 to 900.
static ITAL_WGHT_AXES: &str = "ital,wght@0,100;0,200;0,300;0,400;0,500;0,600;0,700;0,800;0,900;\
1,100;1,200;1,300;1,400;1,500;1,600;1,700;1,800;1,900";

#[allow(clippy::expect_used)]
static WOFF2_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"url\((https://[^)]+\.woff2)\)").expect("woff2 url regex is valid")
});

/// Build the stylesheet URL requesting all weights and styles of `family`.
///
/// This never fails; whether the family exists is only known once the
/// stylesheet has been fetched.
pub fn css_request_url(family: &str) -> String {
    let family = family.replace(' ', "+");
    format!("{CSS_API_URL}?family={family}:{ITAL_WGHT_AXES}&display=swap")
}

/// Find the urls of all WOFF2 files referenced by a stylesheet.
///
/// Urls are returned in document order. Duplicates are kept.
pub fn extract_woff2_urls(css: &str) -> Vec<&str> {
    WOFF2_URL
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
