//! Mirroring filters.
//!
//! - Horizontal: (x, y) <-> (W - 1 - x, y)
//! - Vertical: (x, y) <-> (x, H - 1 - y)
//!
//! Both swap pixel pairs in place, so no data is lost and the middle
//! column/row of an odd-sized image is never touched.

use ndarray::{Axis, Zip};
use rayon::prelude::*;

use crate::pixels::PixelImage;

/// Reverse the column order of every row.
pub fn flip_horizontal(image: &mut PixelImage) {
    let width = image.width();
    image
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            for x in 0..width / 2 {
                let mirror = width - 1 - x;
                for c in 0..row.dim().1 {
                    row.swap([x, c], [mirror, c]);
                }
            }
        });
}

/// Reverse the row order of the image.
pub fn flip_vertical(image: &mut PixelImage) {
    let height = image.height();
    let mut pixels = image.pixels_mut();
    for y in 0..height / 2 {
        let (mut top, mut bottom) = pixels.multi_slice_mut((
            ndarray::s![y, .., ..],
            ndarray::s![height - 1 - y, .., ..],
        ));
        Zip::from(&mut top)
            .and(&mut bottom)
            .for_each(|a, b| std::mem::swap(a, b));
    }
}
