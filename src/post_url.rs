//! Post URL parsing
//!
//! LinkedIn exposes the same post under several URL shapes:
//!
//! - `https://www.linkedin.com/posts/<slug>-activity-<id>-<suffix>`
//! - `https://www.linkedin.com/feed/update/urn:li:activity:<id>`
//! - `https://www.linkedin.com/feed/update/urn:li:share:<id>` / `urn:li:ugcPost:<id>`
//!
//! [`extract_post_id`] maps all of them to the 19-digit identifier.

use regex::Regex;
use std::sync::LazyLock;

/// Patterns in priority order. The first pattern that matches anywhere in the
/// URL wins, regardless of where other patterns would have matched.
static POST_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"activity[-:](\d{19})(?:\D|$)").expect("valid activity pattern"),
        Regex::new(r"share[-:](\d{19})(?:\D|$)").expect("valid share pattern"),
        Regex::new(r"ugcPost[-:](\d{19})(?:\D|$)").expect("valid ugcPost pattern"),
    ]
});

/// Remove the query string and fragment from a URL
pub fn strip_query(url: &str) -> &str {
    let trimmed = url.trim();
    match trimmed.find(['?', '#']) {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    }
}

/// Extract the 19-digit post identifier from a post URL.
///
/// Returns `None` when no known URL shape matches.
pub fn extract_post_id(url: &str) -> Option<String> {
    let path = strip_query(url);

    POST_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(path))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
