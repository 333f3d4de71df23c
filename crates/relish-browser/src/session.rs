use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// User agent presented to the site instead of the headless Chrome default.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Options for launching a browser session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    pub extensions: bool,
    /// Bound on every page action (navigation, element lookup, read).
    pub page_timeout: Duration,
    pub user_agent: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            headless: true,
            extensions: true,
            page_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A live Chrome session with a single page.
///
/// Owned by one caller; all interactions are sequential. The CDP handler
/// stream runs on a spawned task that is aborted when the session closes.
pub struct Session {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    page_timeout: Duration,
}

impl Session {
    /// Launch Chrome and open a blank working page.
    pub async fn launch(options: &SessionOptions) -> Result<Self> {
        debug!("launching browser");

        let mut builder = BrowserConfig::builder()
            .request_timeout(options.page_timeout)
            .args(chrome_args(options));

        if !options.headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(Error::Browser)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Browser(format!("failed to launch Chrome: {e}")))?;

        // The handler stream must be polled for any CDP command to complete.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Some CDP events are not fully parseable; keep going.
                    debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            page_timeout: options.page_timeout,
        })
    }

    /// Navigate the page to the given URL and wait for it to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page.goto(url).await?;
        Ok(())
    }

    /// Reload the current page.
    pub async fn reload(&self) -> Result<()> {
        debug!("reloading page");
        self.page.reload().await?;
        Ok(())
    }

    /// Wait for an element to appear, polling with exponential backoff
    /// (100ms doubling, capped at 1s) up to the page timeout.
    ///
    /// The page renders parts of its DOM after the load event fires, so a
    /// single `find_element` call right after navigation is not reliable.
    pub async fn wait_for_element(&self, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.page_timeout;
        let mut poll_interval = Duration::from_millis(100);
        let max_interval = Duration::from_secs(1);

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }

            if Instant::now() >= deadline {
                return Err(Error::ElementNotFound(format!(
                    "no element matching '{}' after {}ms",
                    selector,
                    self.page_timeout.as_millis()
                )));
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(max_interval);
        }
    }

    /// Fill a form field, click the submit button, and wait for the
    /// resulting navigation to settle.
    pub async fn fill_and_submit(
        &self,
        field_selector: &str,
        button_selector: &str,
        text: &str,
    ) -> Result<()> {
        debug!(
            field = field_selector,
            button = button_selector,
            "filling form field"
        );

        let field = self.wait_for_element(field_selector).await?;
        field.click().await?;
        field.type_str(text).await?;

        let button = self.wait_for_element(button_selector).await?;
        button.click().await?;

        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Read the inner text of the first element matching the selector.
    pub async fn element_text(&self, selector: &str) -> Result<String> {
        let element = self.wait_for_element(selector).await?;
        let text = element.inner_text().await?;
        Ok(text.unwrap_or_default())
    }

    /// Shut down the browser. Best effort: a browser that already died is
    /// not an error worth surfacing on the way out.
    pub async fn close(mut self) {
        debug!("closing browser");
        if let Err(e) = self.browser.close().await {
            debug!("error closing browser: {e}");
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// Chrome command-line arguments for a session.
///
/// The stealth switches mirror what selenium-stealth sets, so the login
/// page does not flag the session as automated.
fn chrome_args(options: &SessionOptions) -> Vec<String> {
    let mut args = vec![
        "--exclude-switches=enable-automation".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        format!("--user-agent={}", options.user_agent),
    ];

    if !options.extensions {
        args.push("--disable-extensions".to_string());
    }

    args
}
