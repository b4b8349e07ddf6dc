use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chrono::Local;
use futures::StreamExt;

use crate::error::AppError;

/// Extra settle time after the load event so late asynchronous requests
/// finish before the capture (network-idle approximation).
const NETWORK_IDLE_SETTLE: Duration = Duration::from_millis(500);

/// Removes AOS scroll-reveal markers so elements are not captured
/// mid-animation.
const STRIP_SCROLL_ANIMATIONS: &str =
    "document.querySelectorAll('[data-aos]').forEach((el) => el.removeAttribute('data-aos'));";

/// One capture job: where to point the browser and where the PNG lands.
#[derive(Debug, Clone)]
pub struct CapturePlan {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub encode_base64: bool,
}

/// Date-partitioned output location for today's captures.
#[derive(Debug, Clone)]
pub struct ShotDir {
    /// Filesystem directory the PNG is written into.
    pub dir: PathBuf,
    /// Matching public URL prefix, ending in `/`.
    pub url_path: String,
}

/// Ensure `<folder>/<yyyy>/<mm>/<dd>/` exists for the local date. Safe to
/// call from concurrent requests landing on the same day.
pub async fn ensure_shot_dir(folder: &str) -> Result<ShotDir, AppError> {
    let now = Local::now();
    let year = now.format("%Y").to_string();
    let month = now.format("%m").to_string();
    let day = now.format("%d").to_string();

    let dir = Path::new(folder).join(&year).join(&month).join(&day);
    tokio::fs::create_dir_all(&dir).await?;

    Ok(ShotDir {
        dir,
        url_path: format!("/{}/{}/{}/{}/", folder.trim_matches('/'), year, month, day),
    })
}

/// djb2 hash of the page URL (seed 5381, multiply-add-33 per character),
/// truncated to 32 bits by wrapping arithmetic. Distinct URLs can
/// collide; a same-day collision silently overwrites the earlier image.
pub fn url_hash(url: &str) -> u32 {
    let mut hash: u32 = 5381;
    for c in url.chars() {
        hash = hash.wrapping_mul(33).wrapping_add(c as u32);
    }
    hash
}

pub fn shot_file_name(url: &str) -> String {
    format!("{}.png", url_hash(url))
}

/// Drive one throwaway browser instance through a capture: set the
/// viewport, load the page, wait out asynchronous loads, strip scroll
/// animations, then write a full-page PNG to `plan.output`.
///
/// Returns the base64 data URI when the plan asks for one. The browser
/// is torn down on every exit path, failures included.
pub async fn capture_page(plan: &CapturePlan) -> Result<Option<String>, AppError> {
    let viewport = Viewport {
        width: plan.width,
        height: plan.height,
        device_scale_factor: Some(1.0),
        ..Viewport::default()
    };
    let config = BrowserConfig::builder()
        .window_size(plan.width, plan.height)
        .viewport(viewport)
        .build()
        .map_err(AppError::BrowserConfig)?;

    let (mut browser, mut handler) = Browser::launch(config).await?;
    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::debug!("cdp event error: {}", e);
            }
        }
    });

    // The page work runs in its own function so teardown below covers
    // every failure point.
    let result = drive_page(&browser, plan).await;

    if let Err(e) = browser.close().await {
        tracing::warn!("browser close failed: {}", e);
    }
    events.abort();

    result
}

async fn drive_page(browser: &Browser, plan: &CapturePlan) -> Result<Option<String>, AppError> {
    let page = browser.new_page("about:blank").await?;
    page.goto(plan.url.as_str()).await?;
    page.wait_for_navigation().await?;
    tokio::time::sleep(NETWORK_IDLE_SETTLE).await;

    page.evaluate(STRIP_SCROLL_ANIMATIONS).await?;

    let png = page
        .screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(true)
                .build(),
        )
        .await?;

    tokio::fs::write(&plan.output, &png).await?;
    tracing::info!("saved {} ({} bytes)", plan.output.display(), png.len());

    if plan.encode_base64 {
        Ok(Some(format!("data:image/png;base64,{}", BASE64.encode(&png))))
    } else {
        Ok(None)
    }
}
