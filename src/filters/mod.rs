//! The filter family.
//!
//! Seven fixed filters, each mutating a [`PixelImage`] in place without
//! changing its dimensions:
//!
//! | Filter | Module | Kind |
//! |--------|--------|------|
//! | Edge Detect | [`edge`] | neighbor comparison, binary output |
//! | Edge Highlight | [`edge`] | 3x3 kernel |
//! | Flip Horizontal | [`flip`] | pair swap |
//! | Flip Vertical | [`flip`] | pair swap |
//! | Grayscale | [`grayscale`] | per pixel |
//! | Sharpen | [`sharpen`] | 3x3 kernel |
//! | Soften | [`blur`] | 3x3 kernel |
//!
//! ## Architecture
//!
//! - **Snapshot reads** - neighborhood filters read the pre-filter grid and
//!   never observe their own partial output
//! - **Alpha preservation** - alpha is never modified
//! - **Row parallel** - rows are processed with rayon where it is safe
//! - **Infallible** - any constructible image is a valid input, 1x1 included

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::FilterError;
use crate::pixels::PixelImage;

pub mod blur;
pub mod edge;
pub mod flip;
pub mod grayscale;
pub mod kernel;
pub mod sharpen;

pub use blur::soften;
pub use edge::{edge_detect, edge_detect_with_threshold, edge_highlight, EDGE_THRESHOLD};
pub use flip::{flip_horizontal, flip_vertical};
pub use grayscale::grayscale;
pub use kernel::{convolve, Kernel3};
pub use sharpen::sharpen;

/// A named, stateless image transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    EdgeDetect,
    EdgeHighlight,
    FlipHorizontal,
    FlipVertical,
    Grayscale,
    Sharpen,
    Soften,
}

impl Filter {
    /// Every filter, in the order their controls are presented.
    pub const ALL: [Filter; 7] = [
        Filter::EdgeDetect,
        Filter::EdgeHighlight,
        Filter::FlipHorizontal,
        Filter::FlipVertical,
        Filter::Grayscale,
        Filter::Sharpen,
        Filter::Soften,
    ];

    /// Human-readable label used for the filter's trigger control.
    pub const fn description(self) -> &'static str {
        match self {
            Filter::EdgeDetect => "Edge Detect",
            Filter::EdgeHighlight => "Edge Highlight",
            Filter::FlipHorizontal => "Flip Horizontal",
            Filter::FlipVertical => "Flip Vertical",
            Filter::Grayscale => "Grayscale",
            Filter::Sharpen => "Sharpen",
            Filter::Soften => "Soften",
        }
    }

    /// Apply this filter to `image` in place.
    pub fn apply(self, image: &mut PixelImage) {
        debug!(
            "applying {} to {}x{} image",
            self.description(),
            image.width(),
            image.height()
        );
        match self {
            Filter::EdgeDetect => edge_detect(image),
            Filter::EdgeHighlight => edge_highlight(image),
            Filter::FlipHorizontal => flip_horizontal(image),
            Filter::FlipVertical => flip_vertical(image),
            Filter::Grayscale => grayscale(image),
            Filter::Sharpen => sharpen(image),
            Filter::Soften => soften(image),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    /// Accepts the description case-insensitively, with spaces, hyphens or
    /// underscores between words ("Edge Detect", "edge-detect", "EDGE_DETECT").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        Filter::ALL
            .into_iter()
            .find(|f| normalize_name(f.description()) == key)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

fn normalize_name(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Apply `filters` to `image` in order.
pub fn apply_all(image: &mut PixelImage, filters: &[Filter]) {
    for filter in filters {
        filter.apply(image);
    }
}
