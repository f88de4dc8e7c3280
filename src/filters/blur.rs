//! Soften filter.
//!
//! Weighted 3x3 blur: center 1/4, orthogonal neighbors 1/8, diagonals 1/16.
//! The weights sum to one, so a flat field is unchanged. Border pixels pass
//! through (see [`super::kernel`]).

use super::kernel::{convolve, Kernel3};
use crate::pixels::PixelImage;

/// Soften the interior of `image` in place.
pub fn soften(image: &mut PixelImage) {
    convolve(image, &Kernel3::SOFTEN);
}
