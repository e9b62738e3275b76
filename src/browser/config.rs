use std::{path::PathBuf, time::Duration};

/// Options for launching the per-call Chrome instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window (default: true)
    pub headless: bool,

    /// Chrome sandbox; disabled by default so the server runs inside containers
    pub sandbox: bool,

    /// Window width in pixels
    pub window_width: u32,

    /// Window height in pixels
    pub window_height: u32,

    /// Custom Chrome/Chromium executable
    pub chrome_path: Option<PathBuf>,

    /// How long the browser may sit idle before headless_chrome shuts it down
    pub idle_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
            idle_timeout: Duration::from_secs(120),
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome executable path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set the idle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}
