use serde::{Deserialize, Serialize};

/// Distance from the content bottom, in pixels, at which the next page is
/// requested.
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

/// Viewport geometry reported by the scrollable list container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// True when the visible bottom is within [`SCROLL_THRESHOLD_PX`] of
    /// the content bottom.
    pub fn near_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - SCROLL_THRESHOLD_PX
    }
}
