//! SnapShop pixel-filter engine
//!
//! Loads a raster image into an owned RGBA buffer, applies one of seven
//! fixed filters in place, and encodes the result. Python bindings via
//! PyO3 and WASM bindings for JavaScript let a GUI hand in a decoded
//! buffer and get the filtered buffer back.
//!
//! ## Image Format
//! [`PixelImage`] is always RGBA, 8 bits per channel, stored as an
//! `ndarray::Array3<u8>` of shape (height, width, 4). Alpha is carried
//! through every filter unchanged.
//!
//! ## Filter Architecture
//! Filters never change image dimensions. Filters that look at neighbors
//! read from a snapshot of the pre-filter grid, so results never depend
//! on the order pixels are visited.
//!
//! ```no_run
//! use snapshop::{Filter, PixelImage};
//!
//! let mut image = PixelImage::load("photo.png")?;
//! Filter::Sharpen.apply(&mut image);
//! image.save("photo-sharp.png")?;
//! # Ok::<(), snapshop::FilterError>(())
//! ```

pub mod error;
pub mod filters;
pub mod io;
pub mod pixels;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, Result};
pub use filters::{apply_all, Filter};
pub use io::{decode, encode, load, save, save_new, save_with, SaveMode};
pub use pixels::{Color, PixelImage};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyFileExistsError, PyIOError, PyValueError};
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::Filter;
    use crate::io::{save_with, SaveMode};
    use crate::pixels::PixelImage;

    fn to_py_err(err: FilterError) -> PyErr {
        match err {
            FilterError::AlreadyExists { .. } => PyFileExistsError::new_err(err.to_string()),
            FilterError::Decode { .. }
            | FilterError::Encode { .. }
            | FilterError::Write { .. }
            | FilterError::UnsupportedFormat { .. } => PyIOError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }

    fn image_from_py(image: PyReadonlyArray3<'_, u8>) -> PyResult<PixelImage> {
        PixelImage::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    /// Apply a named filter to an RGBA u8 image of shape (height, width, 4).
    ///
    /// Returns a new array; the input is not modified.
    #[pyfunction]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filter = name.parse::<Filter>().map_err(to_py_err)?;
        let mut img = image_from_py(image)?;
        filter.apply(&mut img);
        Ok(img.into_array().into_pyarray(py))
    }

    /// Descriptions of all filters, in presentation order.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        Filter::ALL.iter().map(|f| f.description()).collect()
    }

    /// Decode an image file into an RGBA u8 array.
    #[pyfunction]
    pub fn load_image<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let img = PixelImage::load(path).map_err(to_py_err)?;
        Ok(img.into_array().into_pyarray(py))
    }

    /// Encode an RGBA u8 array, format chosen by the path's extension.
    ///
    /// Refuses to replace an existing file (`FileExistsError`) unless
    /// `overwrite` is true.
    #[pyfunction]
    #[pyo3(signature = (image, path, overwrite=false))]
    pub fn save_image<'py>(
        image: PyReadonlyArray3<'py, u8>,
        path: &str,
        overwrite: bool,
    ) -> PyResult<()> {
        let mode = if overwrite {
            SaveMode::Overwrite
        } else {
            SaveMode::CreateNew
        };
        save_with(&image_from_py(image)?, path, mode).map_err(to_py_err)
    }

    /// SnapShop extension module
    #[pymodule]
    pub fn snapshop(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        m.add_function(wrap_pyfunction!(load_image, m)?)?;
        m.add_function(wrap_pyfunction!(save_image, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::snapshop;
