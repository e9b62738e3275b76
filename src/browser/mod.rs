//! Rendering surface abstraction
//!
//! The post reader talks to the page through [`RenderSurface`], obtained from a
//! [`SurfaceLauncher`]. A surface lives for exactly one read: dropping it tears
//! the underlying browser down. [`ChromeLauncher`] is the headless_chrome
//! implementation; tests substitute their own.

pub mod config;
pub mod session;

pub use config::LaunchOptions;
pub use session::{ChromeLauncher, ChromeSurface};

use crate::error::BrowserError;

/// Cookie injected into the surface before navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    /// Cookie domain, e.g. `.linkedin.com`
    pub domain: String,
    /// URL the cookie is associated with
    pub url: String,
}

impl SessionCookie {
    /// The `li_at` cookie scoped to the LinkedIn domain
    pub fn linkedin(value: impl Into<String>) -> Self {
        Self {
            name: crate::config::SESSION_COOKIE_NAME.to_string(),
            value: value.into(),
            domain: ".linkedin.com".to_string(),
            url: "https://www.linkedin.com".to_string(),
        }
    }
}

/// A live, isolated page used for one render/extract cycle
pub trait RenderSurface {
    /// Install a cookie for subsequent navigations
    fn inject_cookie(&self, cookie: &SessionCookie) -> Result<(), BrowserError>;

    /// Navigate and wait for the load event
    fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Visible text of the first element matching `selector`, `None` when nothing matches
    fn text(&self, selector: &str) -> anyhow::Result<Option<String>>;

    /// Attribute of every element matching `selector` that carries it, in document order
    fn attributes(&self, selector: &str, attribute: &str) -> anyhow::Result<Vec<String>>;

    /// Whether any element matches `selector`
    fn exists(&self, selector: &str) -> anyhow::Result<bool>;
}

/// Factory for rendering surfaces
pub trait SurfaceLauncher: Send + Sync {
    fn launch(&self) -> Result<Box<dyn RenderSurface>, BrowserError>;
}
