#![allow(dead_code)]

use async_trait::async_trait;
use linkedin_mcp::{api::{HttpRequest, HttpResponse, HttpTransport, TransportError},
                   browser::{RenderSurface, SessionCookie, SurfaceLauncher},
                   config::ClientConfig,
                   error::BrowserError,
                   LinkedInClient};
use serde_json::{json, Value};
use std::{collections::{HashMap, HashSet},
          sync::{atomic::{AtomicUsize, Ordering},
                 Arc, Mutex}};

pub const BASE_URL: &str = "https://api.test/rest";
pub const IDENTITY_URL: &str = "https://api.test/v2/userinfo";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-memory transport answering every request with `handler`
pub struct StubTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new(handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose URL ends with `suffix` (query excluded)
    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        self.requests().into_iter().filter(|r| r.url.ends_with(suffix)).collect()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub fn client(transport: Arc<StubTransport>) -> LinkedInClient {
    let config = ClientConfig::new("test-token")
        .with_base_url(BASE_URL)
        .with_identity_url(IDENTITY_URL);
    LinkedInClient::with_transport(config, transport)
}

/// Identity endpoint answering with member `abc123`; everything else goes to `rest`
pub fn with_identity(
    rest: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
) -> impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static {
    move |request| {
        if request.url == IDENTITY_URL {
            Ok(HttpResponse::json(200, &json!({"sub": "abc123"})))
        } else {
            Ok(rest(request))
        }
    }
}

pub fn body(request: &HttpRequest) -> Value {
    request.json().cloned().unwrap_or(Value::Null)
}

/// Static page served by [`FakeLauncher`]
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub texts: HashMap<&'static str, String>,
    pub attributes: HashMap<&'static str, Vec<String>>,
    pub present: HashSet<&'static str>,
    pub failing: HashSet<&'static str>,
    pub navigate_error: Option<String>,
}

impl FakePage {
    pub fn text(mut self, selector: &'static str, text: &str) -> Self {
        self.texts.insert(selector, text.to_string());
        self
    }

    pub fn images(mut self, selector: &'static str, sources: &[&str]) -> Self {
        self.attributes.insert(selector, sources.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn element(mut self, selector: &'static str) -> Self {
        self.present.insert(selector);
        self
    }

    pub fn failing(mut self, selector: &'static str) -> Self {
        self.failing.insert(selector);
        self
    }
}

/// What a [`FakeLauncher`] observed across reads
#[derive(Debug, Default)]
pub struct Observed {
    pub launches: AtomicUsize,
    pub teardowns: AtomicUsize,
    pub cookies: Mutex<Vec<SessionCookie>>,
    pub navigations: Mutex<Vec<String>>,
}

pub struct FakeLauncher {
    page: FakePage,
    launch_error: Option<String>,
    pub observed: Arc<Observed>,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Arc<Self> {
        Arc::new(Self {
            page,
            launch_error: None,
            observed: Arc::default(),
        })
    }

    pub fn unavailable(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            page: FakePage::default(),
            launch_error: Some(reason.to_string()),
            observed: Arc::default(),
        })
    }
}

impl SurfaceLauncher for FakeLauncher {
    fn launch(&self) -> Result<Box<dyn RenderSurface>, BrowserError> {
        if let Some(reason) = &self.launch_error {
            return Err(BrowserError::RenderSurfaceUnavailable(reason.clone()));
        }
        self.observed.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSurface {
            page: self.page.clone(),
            observed: Arc::clone(&self.observed),
        }))
    }
}

struct FakeSurface {
    page: FakePage,
    observed: Arc<Observed>,
}

impl RenderSurface for FakeSurface {
    fn inject_cookie(&self, cookie: &SessionCookie) -> Result<(), BrowserError> {
        self.observed.cookies.lock().unwrap().push(cookie.clone());
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.observed.navigations.lock().unwrap().push(url.to_string());
        match &self.page.navigate_error {
            Some(reason) => Err(BrowserError::PageLoadFailed(reason.clone())),
            None => Ok(()),
        }
    }

    fn text(&self, selector: &str) -> anyhow::Result<Option<String>> {
        if self.page.failing.contains(selector) {
            anyhow::bail!("evaluation failed for {}", selector);
        }
        Ok(self.page.texts.get(selector).cloned())
    }

    fn attributes(&self, selector: &str, _attribute: &str) -> anyhow::Result<Vec<String>> {
        if self.page.failing.contains(selector) {
            anyhow::bail!("evaluation failed for {}", selector);
        }
        Ok(self.page.attributes.get(selector).cloned().unwrap_or_default())
    }

    fn exists(&self, selector: &str) -> anyhow::Result<bool> {
        if self.page.failing.contains(selector) {
            anyhow::bail!("evaluation failed for {}", selector);
        }
        Ok(self.page.present.contains(selector))
    }
}

impl Drop for FakeSurface {
    fn drop(&mut self) {
        self.observed.teardowns.fetch_add(1, Ordering::SeqCst);
    }
}
