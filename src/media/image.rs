// SPDX-License-Identifier: MPL-2.0
//! Decoding of gallery photos (WebP, JPEG, PNG) into renderable handles.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Width divided by height, or 1.0 for a degenerate image.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Decodes encoded image bytes into RGBA pixel data.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a supported image or the
/// decoded image has zero area.
pub fn decode(bytes: &[u8]) -> Result<ImageData> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Decode("image has empty dimensions".into()));
    }

    let pixels = img.to_rgba8().into_vec();
    Ok(ImageData::from_rgba(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 90, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("failed to encode png");
        bytes.into_inner()
    }

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let data = decode(&encoded_png(4, 2)).expect("decode should succeed");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
        assert!((data.aspect_ratio() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
