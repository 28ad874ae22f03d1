//! Staged image metadata.

use std::path::PathBuf;

use image::ImageFormat;

/// The downloaded image after conditioning, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    /// Fixed staging path, overwritten every run
    pub path: PathBuf,

    /// Format detected from the file contents
    pub format: ImageFormat,

    pub width: u32,
    pub height: u32,

    /// File size after conditioning
    pub byte_len: u64,

    /// Whether conditioning changed the dimensions
    pub resized: bool,

    /// Whether conditioning re-encoded the file
    pub rewritten: bool,
}

impl StagedImage {
    /// MIME type sent with the upload.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// File name sent with the upload.
    pub fn file_name(&self) -> String {
        let ext = self.format.extensions_str().first().copied().unwrap_or("img");
        format!("image.{ext}")
    }

    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
