//! Codec boundary: decoding files/bytes into a [`PixelImage`] and encoding
//! it back out.
//!
//! - `load` / `decode`: any format the `image` crate can read, as RGBA8.
//! - `encode`: in-memory encode to a chosen format.
//! - `save`: format inferred from the extension; the file is replaced
//!   atomically so a failed save leaves any existing file intact.
//! - `save_new`: like `save`, but refuses to touch a path that already exists.

use std::fs::{self, OpenOptions};
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{info, warn};

use crate::error::{FilterError, Result};
use crate::pixels::PixelImage;

/// Load an image file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<PixelImage> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| FilterError::Decode {
        origin: path.display().to_string(),
        source,
    })?;
    let image = from_dynamic(decoded, &path.display().to_string())?;
    info!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Decode an in-memory image, guessing the format from its contents.
pub fn decode(bytes: &[u8]) -> Result<PixelImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| FilterError::Decode {
        origin: "memory buffer".to_string(),
        source,
    })?;
    from_dynamic(decoded, "memory buffer")
}

/// Encode to `format` in memory.
///
/// Formats without an alpha channel (JPEG) receive only the RGB channels.
pub fn encode(image: &PixelImage, format: ImageFormat) -> Result<Vec<u8>> {
    let target = format!("{format:?}");
    let dynamic = to_dynamic(image, &target)?;
    let dynamic = if supports_alpha(format) {
        dynamic
    } else {
        warn!("{target} has no alpha channel, dropping alpha on encode");
        DynamicImage::ImageRgb8(dynamic.to_rgb8())
    };

    let mut out = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut out, format)
        .map_err(|source| FilterError::Encode { target, source })?;
    Ok(out.into_inner())
}

/// How [`save_with`] treats an existing file at the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Atomically replace whatever is there.
    #[default]
    Overwrite,
    /// Fail with [`FilterError::AlreadyExists`] and leave the file alone.
    CreateNew,
}

/// Save to `path`, choosing the format from its extension. Replaces an
/// existing file.
pub fn save(image: &PixelImage, path: impl AsRef<Path>) -> Result<()> {
    save_with(image, path, SaveMode::Overwrite)
}

/// Save to `path` only if nothing exists there yet.
pub fn save_new(image: &PixelImage, path: impl AsRef<Path>) -> Result<()> {
    save_with(image, path, SaveMode::CreateNew)
}

/// Save to `path` with an explicit [`SaveMode`].
pub fn save_with(image: &PixelImage, path: impl AsRef<Path>, mode: SaveMode) -> Result<()> {
    let path = path.as_ref();
    if mode == SaveMode::CreateNew && path.exists() {
        return Err(FilterError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let format = ImageFormat::from_path(path).map_err(|_| FilterError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    if !format.writing_enabled() {
        return Err(FilterError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let bytes = encode(image, format)?;
    match mode {
        SaveMode::Overwrite => write_replacing(path, &bytes)?,
        SaveMode::CreateNew => write_new(path, &bytes)?,
    }
    info!(
        "saved {} ({}x{}, {} bytes)",
        path.display(),
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(())
}

impl PixelImage {
    /// See [`load`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load(path)
    }

    /// See [`save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save(self, path)
    }

    /// See [`save_new`].
    pub fn save_new(&self, path: impl AsRef<Path>) -> Result<()> {
        save_new(self, path)
    }
}

fn from_dynamic(decoded: DynamicImage, origin: &str) -> Result<PixelImage> {
    let rgba = decoded.into_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    PixelImage::from_rgba(width, height, rgba.into_raw()).map_err(|err| match err {
        // Zero-sized images decode fine but cannot be filtered.
        FilterError::InvalidDimensions { .. } => FilterError::Decode {
            origin: origin.to_string(),
            source: dimension_error(),
        },
        other => other,
    })
}

fn to_dynamic(image: &PixelImage, target: &str) -> Result<DynamicImage> {
    let raw = image.clone().into_raw();
    let buffer = RgbaImage::from_raw(image.width() as u32, image.height() as u32, raw)
        .ok_or_else(|| FilterError::Encode {
            target: target.to_string(),
            source: dimension_error(),
        })?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Hdr)
}

fn dimension_error() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

/// Write through a sibling temp file and rename it over `path`.
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let write_err = |source| FilterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    Ok(())
}

/// Create `path` exclusively and write `bytes`. A partial file left by a
/// failed write is removed.
fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            ErrorKind::AlreadyExists => FilterError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => FilterError::Write {
                path: path.to_path_buf(),
                source,
            },
        })?;

    if let Err(source) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(FilterError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique temp name next to `path`, distinct per process and per call.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}
