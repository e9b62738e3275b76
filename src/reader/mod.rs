//! Browser-session post reader
//!
//! Reads a LinkedIn post by rendering it in a throwaway browser that carries the
//! user's `li_at` session cookie. One call walks a fixed sequence of states and
//! never retries:
//!
//! ```text
//! Init -> SessionInjected -> PageLoaded -> FieldsExtracted
//! ```
//!
//! Only launch and page-load failures are errors. Every field that cannot be
//! found falls back to its default, so a successful read may be partial.

pub mod fields;

pub use fields::Extracted;

use crate::{browser::{ChromeLauncher, SessionCookie, SurfaceLauncher},
            config::ReaderConfig,
            error::BrowserError,
            post_url};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};

/// Progress of a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Init,
    SessionInjected,
    PageLoaded,
    FieldsExtracted,
}

/// Structured fields of a rendered post
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPost {
    /// 19-digit identifier parsed from the URL, if it had a known shape
    pub post_id: Option<String>,
    /// Query-stripped URL that was rendered
    pub source_url: String,
    pub author: Extracted<String>,
    pub author_title: Extracted<String>,
    pub content: Extracted<String>,
    pub posted_date: Extracted<String>,
    pub reactions: Extracted<String>,
    pub comments: Extracted<String>,
    pub reposts: Extracted<String>,
    pub images: Extracted<Vec<String>>,
    pub has_video: Extracted<bool>,
    pub article_title: Extracted<Option<String>>,
}

impl ExtractedPost {
    /// Field values as a flat JSON object
    pub fn data(&self) -> Value {
        json!({
            "author": self.author.value(),
            "author_title": self.author_title.value(),
            "content": self.content.value(),
            "posted_date": self.posted_date.value(),
            "reactions": self.reactions.value(),
            "comments": self.comments.value(),
            "reposts": self.reposts.value(),
            "images": self.images.value(),
            "has_video": self.has_video.value(),
            "article_title": self.article_title.value(),
        })
    }

    /// Names of the fields that fell back to their default
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        [
            ("author", self.author.is_defaulted()),
            ("author_title", self.author_title.is_defaulted()),
            ("content", self.content.is_defaulted()),
            ("posted_date", self.posted_date.is_defaulted()),
            ("reactions", self.reactions.is_defaulted()),
            ("comments", self.comments.is_defaulted()),
            ("reposts", self.reposts.is_defaulted()),
            ("images", self.images.is_defaulted()),
            ("has_video", self.has_video.is_defaulted()),
            ("article_title", self.article_title.is_defaulted()),
        ]
        .into_iter()
        .filter_map(|(name, defaulted)| defaulted.then_some(name))
        .collect()
    }
}

/// Reads posts through a fresh rendering surface per call
pub struct PostReader {
    launcher: Arc<dyn SurfaceLauncher>,
    cookie: SessionCookie,
    settle_delay: Duration,
}

impl PostReader {
    /// Reader backed by headless Chrome
    pub fn new(config: ReaderConfig) -> Self {
        let launcher = Arc::new(ChromeLauncher::new(config.launch.clone()));
        Self::with_launcher(config, launcher)
    }

    /// Reader backed by a custom surface launcher
    pub fn with_launcher(config: ReaderConfig, launcher: Arc<dyn SurfaceLauncher>) -> Self {
        Self {
            launcher,
            cookie: SessionCookie::linkedin(config.session_cookie),
            settle_delay: config.settle_delay,
        }
    }

    /// Render `url` with the session cookie and extract the post fields.
    ///
    /// Blocks for the duration of the render, including the settle delay.
    pub fn read(&self, url: &str) -> Result<ExtractedPost, BrowserError> {
        let source_url = post_url::strip_query(url).to_string();
        if source_url.is_empty() {
            return Err(BrowserError::InvalidUrl("URL is empty".to_string()));
        }
        let post_id = post_url::extract_post_id(url);

        let mut state = ReadState::Init;

        // Dropped on every exit path, which tears the browser down
        let surface = self.launcher.launch()?;

        surface.inject_cookie(&self.cookie)?;
        advance(&mut state, ReadState::SessionInjected);

        surface.navigate(&source_url)?;
        if !self.settle_delay.is_zero() {
            std::thread::sleep(self.settle_delay);
        }
        advance(&mut state, ReadState::PageLoaded);

        let surface = surface.as_ref();
        let post = ExtractedPost {
            post_id,
            author: fields::AUTHOR.extract(surface),
            author_title: fields::AUTHOR_TITLE.extract(surface),
            content: fields::CONTENT.extract(surface),
            posted_date: fields::POSTED_DATE.extract(surface),
            reactions: fields::REACTIONS.extract(surface),
            comments: fields::COMMENTS.extract(surface),
            reposts: fields::REPOSTS.extract(surface),
            images: fields::extract_images(surface),
            has_video: fields::extract_has_video(surface),
            article_title: fields::extract_article_title(surface),
            source_url,
        };
        advance(&mut state, ReadState::FieldsExtracted);

        let defaulted = post.defaulted_fields();
        if !defaulted.is_empty() {
            log::info!("Read post {} with defaulted fields: {}", post.source_url, defaulted.join(", "));
        } else {
            log::info!("Read post {}", post.source_url);
        }

        Ok(post)
    }
}

fn advance(state: &mut ReadState, next: ReadState) {
    log::debug!("Post reader: {:?} -> {:?}", state, next);
    *state = next;
}
