//! Chromium session driving via the DevTools protocol.

use super::{FetchError, PageRenderer, RenderedPage, USER_AGENT};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Renders pages in a freshly launched headless Chromium per call.
pub struct ChromiumRenderer;

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    /// Render a page in a freshly launched headless Chromium.
    ///
    /// The browser is shut down and the CDP event handler aborted before
    /// this function returns, whether navigation succeeded or not.
    async fn render(&self, url: &url::Url, timeout: Duration) -> Result<RenderedPage, FetchError> {
        let config = browser_config()?;

        debug!(%url, "launching headless chromium");
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        // The handler task pumps CDP events for the lifetime of the session.
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let result = drive(&browser, url, timeout).await;

        if let Err(e) = browser.close().await {
            warn!("browser close failed: {e}");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }
}

/// Navigate, wait for the load event, and capture the rendered DOM.
async fn drive(
    browser: &Browser,
    url: &url::Url,
    timeout: Duration,
) -> Result<RenderedPage, FetchError> {
    let started = Instant::now();
    let nav_error = |e: chromiumoxide::error::CdpError| FetchError::Navigation {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let page = browser.new_page("about:blank").await.map_err(nav_error)?;

    let navigation = async {
        page.goto(url.as_str()).await?;
        page.wait_for_navigation().await?;
        page.content().await
    };

    let html = tokio::time::timeout(timeout, navigation)
        .await
        .map_err(|_| FetchError::Timeout {
            url: url.to_string(),
            timeout_secs: timeout.as_secs(),
        })?
        .map_err(nav_error)?;

    let final_url = page
        .url()
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| url.to_string());

    page.close().await.ok();

    Ok(RenderedPage {
        html,
        final_url,
        load_time_ms: started.elapsed().as_millis() as u64,
    })
}

/// Headless launch configuration: realistic user-agent, fixed viewport, and
/// the flags needed to run inside containers and CI.
fn browser_config() -> Result<BrowserConfig, FetchError> {
    let args = [
        "--disable-blink-features=AutomationControlled",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--disable-extensions",
        "--disable-background-networking",
        "--no-first-run",
        "--window-size=1920,1080",
    ];

    BrowserConfig::builder()
        .viewport(Some(Viewport {
            width: 1920,
            height: 1080,
            device_scale_factor: Some(1.0),
            ..Default::default()
        }))
        .args(args)
        .arg(format!("--user-agent={USER_AGENT}"))
        .build()
        .map_err(FetchError::Launch)
}
