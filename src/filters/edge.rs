//! Edge filters: Edge Detect, Edge Highlight.
//!
//! - **Edge Detect** produces a binary mask. A pixel becomes black when its
//!   right or lower neighbor differs from it by more than a threshold,
//!   white otherwise. Pixels in the last row or column have no such
//!   neighbor and are white.
//! - **Edge Highlight** convolves with a Laplacian kernel (center 8, all
//!   eight neighbors -1). See [`super::kernel`] for the border policy.
//!
//! Both read from a snapshot of the input. Alpha is preserved.

use ndarray::Axis;
use rayon::prelude::*;

use super::kernel::{convolve, Kernel3};
use crate::pixels::{pixel_at, Color, PixelImage};

/// Combined |dR| + |dG| + |dB| above which a neighbor marks an edge.
pub const EDGE_THRESHOLD: u32 = 10;

/// Binary edge mask using [`EDGE_THRESHOLD`].
pub fn edge_detect(image: &mut PixelImage) {
    edge_detect_with_threshold(image, EDGE_THRESHOLD);
}

/// Binary edge mask with a caller-chosen threshold.
pub fn edge_detect_with_threshold(image: &mut PixelImage, threshold: u32) {
    let (height, width) = (image.height(), image.width());
    let snapshot = image.snapshot();
    let src = snapshot.view();

    image
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let edge = if x + 1 < width && y + 1 < height {
                    let here = pixel_at(&src, x, y);
                    here.rgb_distance(pixel_at(&src, x + 1, y)) > threshold
                        || here.rgb_distance(pixel_at(&src, x, y + 1)) > threshold
                } else {
                    false
                };
                let out = if edge { Color::BLACK } else { Color::WHITE };
                row[[x, 0]] = out.r;
                row[[x, 1]] = out.g;
                row[[x, 2]] = out.b;
            }
        });
}

/// Laplacian edge highlight. Flat interior regions become black.
pub fn edge_highlight(image: &mut PixelImage) {
    convolve(image, &Kernel3::EDGE_HIGHLIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_edge(width: usize, height: usize, split: usize) -> PixelImage {
        let mut img = PixelImage::filled(width, height, Color::rgb(50, 50, 50)).unwrap();
        for y in 0..height {
            for x in split..width {
                img.set(x, y, Color::rgb(200, 200, 200)).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_edge_detect_uniform_is_white() {
        let mut img = PixelImage::filled(4, 3, Color::rgb(12, 34, 56)).unwrap();
        edge_detect(&mut img);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(img.get(x, y).unwrap(), Color::WHITE);
            }
        }
    }

    #[test]
    fn test_edge_detect_marks_left_of_boundary() {
        let mut img = vertical_edge(5, 3, 2);
        edge_detect(&mut img);

        // x = 1 sees its right neighbor jump from 50 to 200.
        assert_eq!(img.get(1, 0).unwrap(), Color::BLACK);
        assert_eq!(img.get(1, 1).unwrap(), Color::BLACK);
        assert_eq!(img.get(0, 0).unwrap(), Color::WHITE);
        assert_eq!(img.get(2, 0).unwrap(), Color::WHITE);
        // Last row has no lower neighbor.
        assert_eq!(img.get(1, 2).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_edge_detect_threshold_is_exclusive() {
        let mut img = PixelImage::filled(2, 2, Color::rgb(100, 100, 100)).unwrap();
        img.set(1, 0, Color::rgb(104, 103, 103)).unwrap();

        let mut at = img.clone();
        edge_detect_with_threshold(&mut at, 10);
        assert_eq!(at.get(0, 0).unwrap(), Color::WHITE);

        edge_detect_with_threshold(&mut img, 9);
        assert_eq!(img.get(0, 0).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_edge_detect_is_binary_and_keeps_alpha() {
        let colors: Vec<Color> = (0..36u32)
            .map(|i| Color::rgba((i * 7) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8, 77))
            .collect();
        let mut img = PixelImage::from_colors(6, 6, &colors).unwrap();
        edge_detect(&mut img);

        for y in 0..6 {
            for x in 0..6 {
                let c = img.get(x, y).unwrap();
                assert!(c.r == 0 || c.r == 255);
                assert_eq!(c.r, c.g);
                assert_eq!(c.g, c.b);
                assert_eq!(c.a, 77);
            }
        }
    }

    #[test]
    fn test_edge_detect_single_pixel() {
        let mut img = PixelImage::filled(1, 1, Color::rgb(3, 3, 3)).unwrap();
        edge_detect(&mut img);
        assert_eq!(img.get(0, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_edge_highlight_flat_interior_is_black() {
        let mut img = PixelImage::filled(4, 4, Color::rgb(128, 128, 128)).unwrap();
        edge_highlight(&mut img);

        assert_eq!(img.get(1, 1).unwrap(), Color::BLACK);
        assert_eq!(img.get(2, 2).unwrap(), Color::BLACK);
        // Border pixels pass through.
        assert_eq!(img.get(0, 0).unwrap(), Color::rgb(128, 128, 128));
        assert_eq!(img.get(3, 1).unwrap(), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_edge_highlight_responds_to_edge() {
        let mut img = vertical_edge(5, 5, 2);
        edge_highlight(&mut img);

        // Bright side of the edge: 8*200 - 5*200 - 3*50 = 450 -> 255
        assert_eq!(img.get(2, 2).unwrap().r, 255);
        // Dark side: 8*50 - 5*50 - 3*200 < 0 -> 0
        assert_eq!(img.get(1, 2).unwrap().r, 0);
        // Away from the edge the field is flat.
        assert_eq!(img.get(3, 2).unwrap().r, 0);
    }
}
