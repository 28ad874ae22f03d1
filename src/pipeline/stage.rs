// src/pipeline/stage.rs

//! Image staging and conditioning.
//!
//! The downloaded bytes are written to the fixed staging path and decoded.
//! If the file is over the byte ceiling or the pixel-area ceiling it is
//! shrunk so its longest edge fits the resize target, then written back in
//! its original format. Images under both ceilings are left untouched.

use std::io::{Error as IoError, ErrorKind};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::{AppError, Result};
use crate::models::{ImageConfig, StagedImage};

/// Stage downloaded bytes. Any I/O or decode failure is logged and
/// reported as a miss so the caller moves on to the next candidate.
pub async fn stage_image(
    bytes: &[u8],
    source_url: &str,
    config: &ImageConfig,
) -> Option<StagedImage> {
    match try_stage(bytes, config).await {
        Ok(staged) => {
            log::info!(
                "Successfully saved image from {} ({}x{}, {} bytes)",
                source_url,
                staged.width,
                staged.height,
                staged.byte_len
            );
            Some(staged)
        }
        Err(e) => {
            log::warn!("Failed to save image from {}: {}", source_url, e);
            None
        }
    }
}

async fn try_stage(bytes: &[u8], config: &ImageConfig) -> Result<StagedImage> {
    if let Some(parent) = config.staging_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(&config.staging_path, bytes).await?;

    let config = config.clone();
    tokio::task::spawn_blocking(move || condition_staged(&config))
        .await
        .map_err(|e| AppError::Task(e.to_string()))?
}

/// Decode the staged file and resize it in place when over a ceiling.
pub fn condition_staged(config: &ImageConfig) -> Result<StagedImage> {
    let path = &config.staging_path;
    let original_len = std::fs::metadata(path)?.len();

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| IoError::new(ErrorKind::InvalidData, "unrecognized image format"))?;
    let image = reader.decode()?;

    let area = u64::from(image.width()) * u64::from(image.height());
    if original_len <= config.max_bytes && area <= config.max_pixels {
        return Ok(StagedImage {
            path: path.clone(),
            format,
            width: image.width(),
            height: image.height(),
            byte_len: original_len,
            resized: false,
            rewritten: false,
        });
    }

    let original = (image.width(), image.height());
    log::info!(
        "Image is too large ({} bytes, {}x{}); resizing.",
        original_len,
        original.0,
        original.1
    );
    let shrunk = shrink_to_fit(image, config.resize_target);
    encodable(shrunk, format).save_with_format(path, format)?;

    let (width, height) = image::image_dimensions(path)?;
    let resized = (width, height) != original;
    if resized {
        log::info!("Successfully resized image to {}x{}", width, height);
    } else {
        log::info!("Re-encoded image at {}x{}", width, height);
    }

    Ok(StagedImage {
        path: path.clone(),
        format,
        width,
        height,
        byte_len: std::fs::metadata(path)?.len(),
        resized,
        rewritten: true,
    })
}

/// Bound the longest edge by `target`, keeping aspect ratio. Never enlarges.
fn shrink_to_fit(image: DynamicImage, target: u32) -> DynamicImage {
    if image.width().max(image.height()) <= target {
        return image;
    }
    image.resize(target, target, FilterType::Lanczos3)
}

/// JPEG cannot carry alpha or 16-bit channels.
fn encodable(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    }
}
