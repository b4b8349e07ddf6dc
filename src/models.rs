use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed table of named device profiles and their default emulated
/// browser dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Pc,
    Mobile,
}

impl RenderMode {
    /// An absent or empty mode means `pc`; anything outside the table is
    /// rejected rather than silently defaulted.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None | Some("") | Some("pc") => Ok(RenderMode::Pc),
            Some("mobile") => Ok(RenderMode::Mobile),
            Some(other) => Err(AppError::UnknownMode(other.to_string())),
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            RenderMode::Pc => (1366, 800),
            RenderMode::Mobile => (400, 900),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Pc => "pc",
            RenderMode::Mobile => "mobile",
        }
    }
}

/// Raw query parameters for `GET /screenshot`. Everything is accepted as
/// text so a malformed number degrades to the mode default instead of a
/// framework-level rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenshotQuery {
    pub url: Option<String>,
    pub mode: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub base64: Option<String>,
}

impl ScreenshotQuery {
    /// Explicit width/height win over the mode profile; non-numeric or
    /// zero values fall back to it.
    pub fn resolve_dimensions(&self, mode: RenderMode) -> (u32, u32) {
        let (mode_width, mode_height) = mode.dimensions();
        let width = parse_dimension(self.width.as_deref()).unwrap_or(mode_width);
        let height = parse_dimension(self.height.as_deref()).unwrap_or(mode_height);
        (width, height)
    }

    /// `base64=1` (any non-zero integer) switches on the inline payload.
    pub fn wants_base64(&self) -> bool {
        self.base64
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            != 0
    }
}

fn parse_dimension(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.parse::<u32>().ok()).filter(|v| *v > 0)
}

/// Successful capture response.
#[derive(Debug, Serialize)]
pub struct RenderResult {
    pub state: bool,
    pub url: String,
    pub mode: &'static str,
    pub width: u32,
    pub height: u32,
    /// Public URL path of the saved PNG under the static mount.
    pub screenshot: String,
    /// Wall-clock capture duration, integer milliseconds.
    pub times: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}
