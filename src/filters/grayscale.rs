//! Grayscale conversion filter.
//!
//! Uses ITU-R BT.601 luma coefficients, rounded to the nearest integer.
//! Each output pixel depends only on the same input pixel, so the
//! conversion is written in place.

use ndarray::Axis;
use rayon::prelude::*;

use crate::pixels::PixelImage;

/// ITU-R BT.601 luma coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Luma of one RGB triple, rounded and clamped to 0-255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Replace R, G and B of every pixel with its luma. Alpha is preserved.
pub fn grayscale(image: &mut PixelImage) {
    image
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            for mut px in row.axis_iter_mut(Axis(0)) {
                let gray = luminance(px[0], px[1], px[2]);
                px[0] = gray;
                px[1] = gray;
                px[2] = gray;
            }
        });
}
