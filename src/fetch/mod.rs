//! Headless-browser page fetching.
//!
//! One browser session per call: launch, navigate, capture the rendered DOM,
//! tear down. Nothing is pooled or reused across evaluations, and teardown
//! runs on every exit path including failures.

pub mod chromium;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

/// Upper bound on navigation plus render capture.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Desktop Chrome user-agent presented to the target site.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Errors raised while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL did not parse or uses a scheme the browser cannot fetch.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The browser process could not be configured or launched.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Navigation or DOM capture failed (DNS, connection refused, bad page).
    #[error("navigation failed for `{url}`: {reason}")]
    Navigation { url: String, reason: String },

    /// The page did not reach a loaded state within the timeout.
    #[error("timed out after {timeout_secs}s loading `{url}`")]
    Timeout { url: String, timeout_secs: u64 },
}

/// A page as the browser rendered it, after JavaScript execution.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Serialized DOM at capture time.
    pub html: String,
    /// URL the browser ended up on after redirects.
    pub final_url: String,
    /// Wall time from navigation start to DOM capture.
    pub load_time_ms: u64,
}

/// A browser engine that can render one page per call.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render `url` and return the post-JavaScript DOM. Implementations own
    /// the full browser lifecycle within this call.
    async fn render(&self, url: &Url, timeout: Duration) -> Result<RenderedPage, FetchError>;
}

/// Fetch a URL with a scoped headless Chromium session and return the
/// rendered HTML.
pub async fn fetch(url: &str) -> Result<String, FetchError> {
    fetch_with(&chromium::ChromiumRenderer, url).await
}

/// Fetch through a specific renderer. The URL is validated before the
/// renderer is touched, so a bad URL never costs a browser launch.
pub async fn fetch_with(renderer: &dyn PageRenderer, url: &str) -> Result<String, FetchError> {
    let parsed = parse_url(url)?;
    let page = renderer.render(&parsed, NAVIGATION_TIMEOUT).await?;
    info!(
        url,
        final_url = %page.final_url,
        load_time_ms = page.load_time_ms,
        bytes = page.html.len(),
        "fetched page"
    );
    Ok(page.html)
}

/// Validate the URL before spending a browser launch on it.
fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
