use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::capture::{self, CapturePlan};
use crate::error::AppError;
use crate::models::{RenderMode, RenderResult, ScreenshotQuery};
use crate::AppState;

type AppResult<T> = Result<T, AppError>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/screenshot", get(take_screenshot))
}

/// `GET /screenshot?url=<string>&mode=<pc|mobile>&width=<int>&height=<int>&base64=<0|1>`
///
/// Renders the page in a throwaway headless browser, saves a full-page
/// PNG under today's date partition, and answers with capture metadata.
/// Logical failures still answer HTTP 200 with `state: false`.
async fn take_screenshot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScreenshotQuery>,
) -> AppResult<Json<RenderResult>> {
    // Validation happens before anything touches the disk or a browser.
    let url = query
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingUrl)?
        .to_string();
    let mode = RenderMode::parse(query.mode.as_deref())?;
    let (width, height) = query.resolve_dimensions(mode);

    let shot_dir = capture::ensure_shot_dir(&state.config.folder).await?;
    let file_name = capture::shot_file_name(&url);

    let plan = CapturePlan {
        url: url.clone(),
        width,
        height,
        output: shot_dir.dir.join(&file_name),
        encode_base64: query.wants_base64(),
    };

    // Admission control: at most `max_captures` browser instances alive
    // at once; requests past the cap wait for a slot.
    let _permit = state
        .capture_slots
        .acquire()
        .await
        .map_err(|_| AppError::Internal("capture pool closed".to_string()))?;

    tracing::info!("capturing {} at {}x{} ({})", url, width, height, mode.as_str());

    // The clock covers browser launch through capture; directory and
    // filename setup stay outside it.
    let started = Instant::now();
    let base64 = capture::capture_page(&plan).await?;
    let times = started.elapsed().as_millis().to_string();

    Ok(Json(RenderResult {
        state: true,
        url,
        mode: mode.as_str(),
        width,
        height,
        screenshot: format!("{}{}", shot_dir.url_path, file_name),
        times,
        base64,
    }))
}
