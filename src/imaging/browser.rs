//! Element screenshots through headless Chrome.
//!
//! Each capture launches its own browser. The [`Browser`] value lives only
//! inside [`capture_element`], so the Chrome process is killed when that
//! function returns, on the error paths as well as on success.

use super::backend::BackendError;
use super::params::CaptureParams;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::path::Path;
use url::Url;

/// Browser window used for captures. The reference documents fit inside it.
const WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// `file://` URL for a local document, from its canonical absolute path.
///
/// Characters with a meaning in URLs (`#`, `?`, `%`, spaces) are
/// percent-encoded, so any checkout location loads the right file.
pub fn file_url(document: &Path) -> Result<String, BackendError> {
    let absolute = document.canonicalize()?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| {
            BackendError::Browser(format!("Cannot address {} as a URL", absolute.display()))
        })
}

/// Load `params.document`, wait for it to settle, and save a PNG of the first
/// element matching `params.selector` to `params.output`.
pub fn capture_element(params: &CaptureParams) -> Result<(), BackendError> {
    let url = file_url(&params.document)?;

    let browser = Browser::new(LaunchOptions {
        headless: true,
        window_size: Some(WINDOW_SIZE),
        args: vec![OsStr::new("--disable-gpu")],
        ..Default::default()
    })
    .map_err(|e| BackendError::BrowserLaunch(format!("{e:#}")))?;
    tracing::debug!(%url, "browser launched");

    let tab = browser
        .new_tab()
        .map_err(|e| BackendError::Browser(format!("{e:#}")))?;
    tab.navigate_to(&url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| BackendError::Browser(format!("Failed to load {url}: {e:#}")))?;

    // Animations and async layout get a fixed window to finish.
    std::thread::sleep(params.settle);

    let element =
        tab.find_element(&params.selector)
            .map_err(|_| BackendError::ElementNotFound {
                selector: params.selector.clone(),
                document: params.document.clone(),
            })?;
    let png = element
        .capture_screenshot(CaptureScreenshotFormatOption::Png)
        .map_err(|e| BackendError::Browser(format!("Screenshot failed: {e:#}")))?;

    std::fs::write(&params.output, png)?;
    tracing::debug!(output = %params.output.display(), "element captured");
    Ok(())
}
