//! Owned RGBA pixel buffer.
//!
//! ## Layout
//!
//! Pixels live in an `Array3<u8>` of shape (height, width, 4), row-major,
//! indexed `[[y, x, channel]]` with channels R, G, B, A. This is the same
//! layout the filters in [`crate::filters`] read and write, so handing the
//! buffer to a display or codec collaborator is a move, not a conversion.

use ndarray::{Array3, ArrayView3, ArrayViewMut3};

use crate::error::{FilterError, Result};

/// Number of channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// A single RGBA sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same alpha, new color channels.
    pub const fn with_rgb(self, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: self.a }
    }

    /// Sum of absolute per-channel RGB differences (alpha ignored).
    pub fn rgb_distance(self, other: Color) -> u32 {
        self.r.abs_diff(other.r) as u32
            + self.g.abs_diff(other.g) as u32
            + self.b.abs_diff(other.b) as u32
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Color::rgba(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Owned, mutable RGBA image with fixed dimensions.
///
/// Width and height are always non-zero and never change after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    data: Array3<u8>,
}

impl PixelImage {
    /// Opaque black image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Color::BLACK)
    }

    /// Image where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self> {
        check_dimensions(width, height, CHANNELS)?;
        let px: [u8; 4] = color.into();
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| px[c]);
        Ok(Self { data })
    }

    /// Wrap raw row-major RGBA bytes.
    pub fn from_rgba(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = check_dimensions(width, height, CHANNELS)?;
        if bytes.len() != expected {
            return Err(FilterError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), bytes).map_err(|_| {
            FilterError::InvalidDimensions {
                width,
                height,
                channels: CHANNELS,
            }
        })?;
        Ok(Self { data })
    }

    /// Build from a row-major list of colors.
    pub fn from_colors(width: usize, height: usize, colors: &[Color]) -> Result<Self> {
        let bytes = colors
            .iter()
            .flat_map(|&c| <[u8; 4]>::from(c))
            .collect::<Vec<u8>>();
        Self::from_rgba(width, height, bytes)
    }

    /// Take ownership of a (height, width, 4) array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        check_dimensions(width, height, channels)?;
        Ok(Self {
            data: compact(data),
        })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Sample at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<Color> {
        self.check_bounds(x, y)?;
        Ok(self.pixel(x, y))
    }

    /// Overwrite the sample at (x, y).
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        self.check_bounds(x, y)?;
        self.put_pixel(x, y, color);
        Ok(())
    }

    /// Read-only view of the whole grid.
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub(crate) fn pixels_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    /// Owned copy of the current grid, unaffected by later writes.
    pub fn snapshot(&self) -> Array3<u8> {
        self.data.clone()
    }

    /// Replace every pixel at once. The new grid must have the same shape.
    pub fn replace_pixels(&mut self, pixels: Array3<u8>) -> Result<()> {
        if pixels.dim() != self.data.dim() {
            return Err(FilterError::ShapeMismatch {
                expected: self.data.dim(),
                actual: pixels.dim(),
            });
        }
        self.data = compact(pixels);
        Ok(())
    }

    /// Row-major RGBA bytes, if the buffer is contiguous (always true for
    /// images built by this crate).
    pub fn as_raw(&self) -> Option<&[u8]> {
        self.data.as_slice()
    }

    /// Consume into row-major RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        let len = self.data.len();
        if !self.data.is_standard_layout() {
            return self.data.iter().copied().collect();
        }
        match self.data.into_raw_vec_and_offset() {
            (raw, Some(0)) if raw.len() == len => raw,
            (raw, offset) => {
                let start = offset.unwrap_or(0);
                raw[start..start + len].to_vec()
            }
        }
    }

    /// Consume into the underlying (height, width, 4) array.
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Color {
        pixel_at(&self.data.view(), x, y)
    }

    #[inline]
    pub(crate) fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.data[[y, x, 0]] = color.r;
        self.data[[y, x, 1]] = color.g;
        self.data[[y, x, 2]] = color.b;
        self.data[[y, x, 3]] = color.a;
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(FilterError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}

/// Read a pixel from a (height, width, 4) view. Caller guarantees bounds.
#[inline]
pub(crate) fn pixel_at(view: &ArrayView3<u8>, x: usize, y: usize) -> Color {
    Color::rgba(
        view[[y, x, 0]],
        view[[y, x, 1]],
        view[[y, x, 2]],
        view[[y, x, 3]],
    )
}

/// Copy into a fresh row-major array whose data starts at offset 0.
///
/// Arrays sliced in place can be standard layout yet still own a larger
/// backing vector, which would leak into `into_raw`.
fn compact(data: Array3<u8>) -> Array3<u8> {
    Array3::from_shape_fn(data.dim(), |idx| data[idx])
}

/// Validate a (width, height, channels) triple, returning the byte count.
fn check_dimensions(width: usize, height: usize, channels: usize) -> Result<usize> {
    let invalid = FilterError::InvalidDimensions {
        width,
        height,
        channels,
    };
    if width == 0 || height == 0 || channels != CHANNELS {
        return Err(invalid);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    #[test]
    fn test_new_is_opaque_black() {
        let img = PixelImage::new(3, 2).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get(2, 1).unwrap(), Color::BLACK);
        assert_eq!(img.pixels().dim(), (2, 3, 4));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelImage::new(0, 5),
            Err(FilterError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelImage::new(5, 0),
            Err(FilterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_get_set() {
        let mut img = PixelImage::new(4, 4).unwrap();
        let c = Color::rgba(10, 20, 30, 40);
        img.set(3, 2, c).unwrap();
        assert_eq!(img.get(3, 2).unwrap(), c);
        assert_eq!(img.get(2, 3).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut img = PixelImage::new(4, 3).unwrap();
        assert!(matches!(
            img.get(4, 0),
            Err(FilterError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(matches!(
            img.set(0, 3, Color::WHITE),
            Err(FilterError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        let err = PixelImage::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            FilterError::BufferSize {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_from_colors_is_row_major() {
        let colors = [
            Color::rgb(1, 0, 0),
            Color::rgb(2, 0, 0),
            Color::rgb(3, 0, 0),
            Color::rgb(4, 0, 0),
            Color::rgb(5, 0, 0),
            Color::rgb(6, 0, 0),
        ];
        let img = PixelImage::from_colors(3, 2, &colors).unwrap();
        assert_eq!(img.get(0, 1).unwrap().r, 4);
        assert_eq!(img.get(2, 0).unwrap().r, 3);
    }

    #[test]
    fn test_from_array_rejects_rgb() {
        let arr = Array3::<u8>::zeros((2, 2, 3));
        assert!(matches!(
            PixelImage::from_array(arr),
            Err(FilterError::InvalidDimensions { channels: 3, .. })
        ));
    }

    #[test]
    fn test_from_array_sliced_in_place() {
        let mut arr = Array3::<u8>::from_shape_fn((4, 2, 4), |(y, x, c)| (y * 8 + x * 4 + c) as u8);
        arr.slice_collapse(s![1..3, .., ..]);

        let img = PixelImage::from_array(arr).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.get(0, 0).unwrap(), Color::rgba(8, 9, 10, 11));

        let raw = img.into_raw();
        assert_eq!(raw.len(), 16);
        assert_eq!(raw[0], 8);
        assert_eq!(raw[15], 23);
    }

    #[test]
    fn test_replace_pixels_sliced_in_place() {
        let mut img = PixelImage::new(2, 1).unwrap();
        let mut arr = Array3::<u8>::from_elem((3, 2, 4), 7);
        arr[[2, 1, 0]] = 99;
        arr.slice_collapse(s![2..3, .., ..]);

        img.replace_pixels(arr).unwrap();
        assert_eq!(img.get(1, 0).unwrap(), Color::rgba(99, 7, 7, 7));
        assert_eq!(img.into_raw().len(), 8);
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            PixelImage::from_rgba(usize::MAX, 2, Vec::new()),
            Err(FilterError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelImage::from_rgba(usize::MAX / 4 + 1, 1, Vec::new()),
            Err(FilterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_replace_pixels_keeps_shape() {
        let mut img = PixelImage::new(2, 2).unwrap();
        let err = img.replace_pixels(Array3::zeros((3, 2, 4))).unwrap_err();
        assert!(matches!(err, FilterError::ShapeMismatch { .. }));

        let white = PixelImage::filled(2, 2, Color::WHITE).unwrap().into_array();
        img.replace_pixels(white).unwrap();
        assert_eq!(img.get(1, 1).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut img = PixelImage::new(2, 2).unwrap();
        let snap = img.snapshot();
        img.set(0, 0, Color::WHITE).unwrap();
        assert_eq!(snap[[0, 0, 0]], 0);
    }

    #[test]
    fn test_raw_roundtrip() {
        let bytes: Vec<u8> = (0..16).collect();
        let img = PixelImage::from_rgba(2, 2, bytes.clone()).unwrap();
        assert_eq!(img.as_raw(), Some(bytes.as_slice()));
        assert_eq!(img.get(1, 0).unwrap(), Color::rgba(4, 5, 6, 7));
        assert_eq!(img.into_raw(), bytes);
    }

    #[test]
    fn test_rgb_distance() {
        let a = Color::rgba(10, 20, 30, 0);
        let b = Color::rgba(15, 10, 30, 255);
        assert_eq!(a.rgb_distance(b), 15);
    }
}
