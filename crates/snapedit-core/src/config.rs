//! Editor configuration.
//!
//! All fields have defaults, so a host can pass a partial object (or nothing):
//!
//! ```json
//! { "containerMargin": 40, "prefersReducedMotion": true }
//! ```

use crate::decode::{FilterType, MAX_FILE_SIZE};
use crate::present::RenderSchedule;
use serde::{Deserialize, Serialize};

/// Pixels subtracted from each container axis before fitting the preview.
pub const DEFAULT_CONTAINER_MARGIN: u32 = 40;

/// Tunables for an [`crate::session::EditSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Total margin per axis between the container and the preview.
    pub container_margin: u32,
    /// Largest accepted file in bytes.
    pub max_file_size: u64,
    /// Render previews synchronously instead of once per display refresh.
    pub prefers_reduced_motion: bool,
    /// Resampler used to build the preview proxy.
    pub preview_filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container_margin: DEFAULT_CONTAINER_MARGIN,
            max_file_size: MAX_FILE_SIZE,
            prefers_reduced_motion: false,
            preview_filter: FilterType::Lanczos3,
        }
    }
}

impl EditorConfig {
    /// Schedule implied by the motion preference.
    pub fn render_schedule(&self) -> RenderSchedule {
        RenderSchedule::for_reduced_motion(self.prefers_reduced_motion)
    }
}
