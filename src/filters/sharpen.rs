//! Sharpen filter.
//!
//! 3x3 kernel with center 5, the four orthogonal neighbors -1 and the
//! diagonals 0. Border pixels pass through (see [`super::kernel`]).

use super::kernel::{convolve, Kernel3};
use crate::pixels::PixelImage;

/// Sharpen the interior of `image` in place.
pub fn sharpen(image: &mut PixelImage) {
    convolve(image, &Kernel3::SHARPEN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::Color;

    #[test]
    fn test_sharpen_preserves_flat() {
        let flat = PixelImage::filled(5, 4, Color::rgba(128, 64, 32, 255)).unwrap();
        let mut img = flat.clone();
        sharpen(&mut img);
        assert_eq!(img, flat);
    }

    #[test]
    fn test_sharpen_enhances_bright_line() {
        let mut img = PixelImage::filled(3, 3, Color::rgb(100, 100, 100)).unwrap();
        for y in 0..3 {
            img.set(1, y, Color::rgb(150, 150, 150)).unwrap();
        }

        sharpen(&mut img);

        // 5*150 - 2*150 - 2*100 = 250
        assert_eq!(img.get(1, 1).unwrap(), Color::rgb(250, 250, 250));
    }

    #[test]
    fn test_sharpen_ignores_diagonals() {
        let mut img = PixelImage::filled(3, 3, Color::rgb(40, 40, 40)).unwrap();
        img.set(0, 0, Color::WHITE).unwrap();
        img.set(2, 2, Color::WHITE).unwrap();

        sharpen(&mut img);
        assert_eq!(img.get(1, 1).unwrap(), Color::rgb(40, 40, 40));
    }
}
