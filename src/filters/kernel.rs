//! Shared 3x3 convolution used by the neighborhood filters.
//!
//! Every output pixel is computed from a snapshot of the image taken
//! before any write, so the result does not depend on iteration order.
//! Rows are processed in parallel with rayon.
//!
//! ## Border Policy
//!
//! Only interior pixels are convolved. Pixels in the first and last row
//! and column are copied through unchanged, and images smaller than 3x3
//! are left untouched. A flat field therefore stays flat under any kernel
//! whose weights sum to its divisor.

use ndarray::{ArrayView3, Axis};
use rayon::prelude::*;

use crate::pixels::PixelImage;

/// Integer 3x3 kernel. Output = round(sum(w * p) / divisor), clamped to 0-255.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kernel3 {
    pub weights: [[i32; 3]; 3],
    pub divisor: i32,
}

impl Kernel3 {
    /// Laplacian-style edge kernel, weights sum to 0.
    pub const EDGE_HIGHLIGHT: Kernel3 = Kernel3 {
        weights: [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]],
        divisor: 1,
    };

    pub const SHARPEN: Kernel3 = Kernel3 {
        weights: [[0, -1, 0], [-1, 5, -1], [0, -1, 0]],
        divisor: 1,
    };

    /// 0.0625 / 0.125 / 0.25 weights in sixteenths.
    pub const SOFTEN: Kernel3 = Kernel3 {
        weights: [[1, 2, 1], [2, 4, 2], [1, 2, 1]],
        divisor: 16,
    };

    /// Sum of all weights.
    pub fn weight_sum(&self) -> i32 {
        self.weights.iter().flatten().sum()
    }

    /// Weighted RGB sum around interior pixel (x, y), before division.
    #[inline]
    fn accumulate(&self, src: &ArrayView3<u8>, x: usize, y: usize) -> [i32; 3] {
        let mut acc = [0i32; 3];
        for (ky, row) in self.weights.iter().enumerate() {
            let sy = y + ky - 1;
            for (kx, &w) in row.iter().enumerate() {
                if w == 0 {
                    continue;
                }
                let sx = x + kx - 1;
                for (c, sum) in acc.iter_mut().enumerate() {
                    *sum += src[[sy, sx, c]] as i32 * w;
                }
            }
        }
        acc
    }

    #[inline]
    fn normalize(&self, sum: i32) -> u8 {
        let v = if self.divisor == 1 {
            sum as f32
        } else {
            (sum as f32 / self.divisor as f32).round()
        };
        v.clamp(0.0, 255.0) as u8
    }
}

/// Convolve the RGB channels of every interior pixel with `kernel`.
///
/// Alpha is preserved. Border pixels are unchanged.
pub fn convolve(image: &mut PixelImage, kernel: &Kernel3) {
    let (height, width) = (image.height(), image.width());
    if height < 3 || width < 3 {
        return;
    }

    let snapshot = image.snapshot();
    let src = snapshot.view();

    image
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < height - 1)
        .for_each(|(y, mut row)| {
            for x in 1..width - 1 {
                let acc = kernel.accumulate(&src, x, y);
                for (c, &sum) in acc.iter().enumerate() {
                    row[[x, c]] = kernel.normalize(sum);
                }
            }
        });
}
