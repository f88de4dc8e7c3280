//! WebAssembly exports for the SnapShop filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers are
//! flat RGBA bytes as found in a canvas `ImageData` (length = width * height * 4).

use wasm_bindgen::prelude::*;

use crate::filters::Filter;
use crate::pixels::PixelImage;

/// Apply a named filter to an RGBA buffer.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `name` - Filter description, e.g. "Edge Detect" or "soften"
///
/// # Returns
/// Flat array of filtered RGBA bytes with the same dimensions
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    name: &str,
) -> Result<Vec<u8>, JsError> {
    let filter = name.parse::<Filter>()?;
    let mut image = PixelImage::from_rgba(width, height, data.to_vec())?;
    filter.apply(&mut image);
    Ok(image.into_raw())
}

/// Descriptions of all filters, in presentation order.
#[wasm_bindgen]
pub fn filter_names_wasm() -> Vec<String> {
    Filter::ALL.iter().map(|f| f.description().to_string()).collect()
}
