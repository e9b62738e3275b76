use crate::{browser::{config::LaunchOptions, RenderSurface, SessionCookie, SurfaceLauncher},
            error::BrowserError};
use anyhow::Context;
use headless_chrome::{protocol::cdp::Network::CookieParam, Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Navigation timeout applied to the tab
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Launches a fresh Chrome instance per read
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    options: LaunchOptions,
}

impl ChromeLauncher {
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }

    fn headless_chrome_options(&self) -> headless_chrome::LaunchOptions<'static> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));
        launch_opts.args.push(OsStr::new("--disable-dev-shm-usage"));

        launch_opts.idle_browser_timeout = self.options.idle_timeout;
        launch_opts.headless = self.options.headless;
        launch_opts.sandbox = self.options.sandbox;
        launch_opts.window_size = Some((self.options.window_width, self.options.window_height));

        if let Some(path) = &self.options.chrome_path {
            launch_opts.path = Some(path.clone());
        }

        launch_opts
    }
}

impl SurfaceLauncher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn RenderSurface>, BrowserError> {
        Ok(Box::new(ChromeSurface::launch(self.headless_chrome_options())?))
    }
}

/// One Chrome instance with a single tab; the process exits when this is dropped
pub struct ChromeSurface {
    /// Kept alive for the tab's lifetime; dropping it kills the process
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSurface {
    fn launch(options: headless_chrome::LaunchOptions<'static>) -> Result<Self, BrowserError> {
        let browser = Browser::new(options).map_err(|e| BrowserError::RenderSurfaceUnavailable(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::RenderSurfaceUnavailable(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(NAVIGATION_TIMEOUT);

        log::debug!("Rendering surface launched");
        Ok(Self { _browser: browser, tab })
    }

    fn evaluate(&self, js: &str) -> anyhow::Result<Option<serde_json::Value>> {
        let result = self.tab.evaluate(js, false).context("script evaluation failed")?;
        Ok(result.value)
    }
}

/// Quote a string as a JavaScript literal
fn js_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

impl RenderSurface for ChromeSurface {
    fn inject_cookie(&self, cookie: &SessionCookie) -> Result<(), BrowserError> {
        let param: CookieParam = serde_json::from_value(serde_json::json!({
            "name": cookie.name,
            "value": cookie.value,
            "url": cookie.url,
            "domain": cookie.domain,
            "path": "/",
            "secure": true,
            "httpOnly": true,
        }))
        .map_err(|e| BrowserError::PageLoadFailed(format!("Invalid session cookie: {}", e)))?;

        self.tab
            .set_cookies(vec![param])
            .map_err(|e| BrowserError::PageLoadFailed(format!("Failed to inject session cookie: {}", e)))?;

        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::PageLoadFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::PageLoadFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    fn text(&self, selector: &str) -> anyhow::Result<Option<String>> {
        let js = format!(
            "(function() {{ const el = document.querySelector({}); return el ? el.innerText : null; }})()",
            js_literal(selector)
        );

        Ok(self.evaluate(&js)?.and_then(|value| value.as_str().map(str::to_string)))
    }

    fn attributes(&self, selector: &str, attribute: &str) -> anyhow::Result<Vec<String>> {
        // Returned as a JSON string, arrays come back from CDP as remote object references
        let js = format!(
            "(function() {{ return JSON.stringify(Array.from(document.querySelectorAll({}))\
             .map(el => el.getAttribute({})).filter(v => v)); }})()",
            js_literal(selector),
            js_literal(attribute)
        );

        let value = self.evaluate(&js)?.context("no value returned from attribute query")?;
        let json_str = value.as_str().context("attribute query did not return a string")?;
        let values: Vec<String> = serde_json::from_str(json_str).context("failed to parse attribute list")?;

        Ok(values)
    }

    fn exists(&self, selector: &str) -> anyhow::Result<bool> {
        let js = format!("document.querySelector({}) !== null", js_literal(selector));

        Ok(self.evaluate(&js)?.and_then(|value| value.as_bool()).unwrap_or(false))
    }
}

impl Drop for ChromeSurface {
    fn drop(&mut self) {
        // The browser process itself is killed when `_browser` drops
        let _ = self.tab.close(false);
        log::debug!("Rendering surface torn down");
    }
}
