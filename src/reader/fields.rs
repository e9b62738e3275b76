//! Selector fallback chains for the fields of a rendered post
//!
//! Every field is extracted independently. A failing or empty query falls
//! through to the next candidate and finally to the field's default; nothing
//! here ever aborts the whole read.

use crate::browser::RenderSurface;

/// Host of LinkedIn's media CDN; other image sources are avatars and chrome
pub const MEDIA_CDN_HOST: &str = "media.licdn.com";

/// Maximum number of image URLs reported per post
pub const MAX_IMAGES: usize = 5;

/// Outcome of extracting a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    /// Taken from the page via `selector`
    Found { value: T, selector: &'static str },
    /// No candidate produced a value
    Defaulted { value: T, reason: String },
}

impl<T> Extracted<T> {
    pub fn value(&self) -> &T {
        match self {
            Extracted::Found { value, .. } | Extracted::Defaulted { value, .. } => value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Extracted::Defaulted { .. })
    }

    fn defaulted(value: T, miss: Miss) -> Self {
        Extracted::Defaulted { value, reason: miss.reason() }
    }
}

/// Why no candidate matched
#[derive(Debug)]
enum Miss {
    NoMatch,
    QueryFailed(String),
}

impl Miss {
    fn reason(self) -> String {
        match self {
            Miss::NoMatch => "no selector matched".to_string(),
            Miss::QueryFailed(e) => format!("query failed: {}", e),
        }
    }
}

/// A text field with its selector chain, post-processing and default
#[derive(Clone, Copy)]
pub struct TextField {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
    pub transform: fn(&str) -> String,
    pub default: &'static str,
}

impl TextField {
    pub fn extract(&self, surface: &dyn RenderSurface) -> Extracted<String> {
        match first_text(surface, self.candidates, self.transform) {
            Ok((value, selector)) => Extracted::Found { value, selector },
            Err(miss) => {
                log::debug!("Field '{}' defaulted: {:?}", self.name, miss);
                Extracted::defaulted(self.default.to_string(), miss)
            }
        }
    }
}

fn trimmed(text: &str) -> String {
    text.trim().to_string()
}

/// "3d • Edited • 🌐" -> "3d"
fn before_bullet(text: &str) -> String {
    text.split('•').next().unwrap_or_default().trim().to_string()
}

/// "12 comments" -> "12"
fn first_token(text: &str) -> String {
    text.split_whitespace().next().unwrap_or_default().to_string()
}

pub const AUTHOR: TextField = TextField {
    name: "author",
    candidates: &[".update-components-actor__name", ".feed-shared-actor__name"],
    transform: trimmed,
    default: "Unknown",
};

pub const AUTHOR_TITLE: TextField = TextField {
    name: "author_title",
    candidates: &[".update-components-actor__description", ".feed-shared-actor__description"],
    transform: trimmed,
    default: "",
};

pub const CONTENT: TextField = TextField {
    name: "content",
    candidates: &[
        ".feed-shared-update-v2__description, .feed-shared-text, .break-words",
        "[dir='ltr'] .break-words",
    ],
    transform: trimmed,
    default: "",
};

pub const POSTED_DATE: TextField = TextField {
    name: "posted_date",
    candidates: &[".update-components-actor__sub-description", ".feed-shared-actor__sub-description"],
    transform: before_bullet,
    default: "Unknown",
};

pub const REACTIONS: TextField = TextField {
    name: "reactions",
    candidates: &[".social-details-social-counts__reactions-count", "[aria-label*='reaction']"],
    transform: trimmed,
    default: "0",
};

pub const COMMENTS: TextField = TextField {
    name: "comments",
    candidates: &[".social-details-social-counts__comments", "[aria-label*='comment']"],
    transform: first_token,
    default: "0",
};

pub const REPOSTS: TextField = TextField {
    name: "reposts",
    candidates: &["[aria-label*='repost']"],
    transform: first_token,
    default: "0",
};

const IMAGE_CANDIDATES: &[&str] = &[".feed-shared-image__container img", ".feed-shared-image img"];

const VIDEO_CANDIDATES: &[&str] = &["video"];

const ARTICLE_TITLE_CANDIDATES: &[&str] = &[
    ".feed-shared-article .feed-shared-article__title",
    ".feed-shared-external-article .feed-shared-article__title",
];

/// First candidate whose text is non-empty after `transform`
fn first_text(
    surface: &dyn RenderSurface,
    candidates: &'static [&'static str],
    transform: fn(&str) -> String,
) -> Result<(String, &'static str), Miss> {
    let mut last_error = None;

    for &selector in candidates {
        match surface.text(selector) {
            Ok(Some(text)) => {
                let value = transform(&text);
                if !value.is_empty() {
                    return Ok((value, selector));
                }
            }
            Ok(None) => {}
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    Err(last_error.map_or(Miss::NoMatch, Miss::QueryFailed))
}

/// Up to [`MAX_IMAGES`] distinct CDN image URLs
pub fn extract_images(surface: &dyn RenderSurface) -> Extracted<Vec<String>> {
    let mut last_error = None;

    for &selector in IMAGE_CANDIDATES {
        match surface.attributes(selector, "src") {
            Ok(sources) => {
                let mut images: Vec<String> = Vec::new();
                for src in sources {
                    if src.contains(MEDIA_CDN_HOST) && !images.contains(&src) {
                        images.push(src);
                    }
                }
                images.truncate(MAX_IMAGES);

                if !images.is_empty() {
                    return Extracted::Found { value: images, selector };
                }
            }
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    Extracted::defaulted(Vec::new(), last_error.map_or(Miss::NoMatch, Miss::QueryFailed))
}

pub fn extract_has_video(surface: &dyn RenderSurface) -> Extracted<bool> {
    let mut last_error = None;

    for &selector in VIDEO_CANDIDATES {
        match surface.exists(selector) {
            Ok(true) => return Extracted::Found { value: true, selector },
            Ok(false) => {}
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    Extracted::defaulted(false, last_error.map_or(Miss::NoMatch, Miss::QueryFailed))
}

pub fn extract_article_title(surface: &dyn RenderSurface) -> Extracted<Option<String>> {
    match first_text(surface, ARTICLE_TITLE_CANDIDATES, trimmed) {
        Ok((title, selector)) => Extracted::Found { value: Some(title), selector },
        Err(miss) => Extracted::defaulted(None, miss),
    }
}
