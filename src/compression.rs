//! Downsampling of captured prints before they are stored or uploaded.
//!
//! Prints travel as `data:<mime>;base64,<payload>` URLs. Compression decodes
//! the payload, clamps the longer side to a maximum while keeping the aspect
//! ratio, and re-encodes as JPEG. It never fails from the caller's point of
//! view: anything that cannot be decoded or encoded comes back unchanged.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageEncoder, codecs::jpeg::JpegEncoder, imageops::FilterType};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Not a base64 data URL")]
    NotDataUrl,

    #[error("Base64 error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Compression task failed: {0}")]
    TaskError(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionSettings {
    pub max_dimension: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl CompressionSettings {
    /// `max_dimension` is raised to at least 1 and `quality` clamped to 1-100.
    pub fn new(max_dimension: u32, quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            quality: quality.clamp(1, 100),
        }
    }
}

/// Mime type and base64 payload of a data URL, without decoding.
pub fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    Some((mime, payload.trim()))
}

/// Split a data URL into its mime type and decoded bytes.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), CompressionError> {
    let (mime, payload) = split_data_url(data_url).ok_or(CompressionError::NotDataUrl)?;
    let bytes = STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Target size for an image whose longer side must not exceed `max_dimension`.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    if width >= height {
        let ratio = max_dimension as f64 / width as f64;
        (max_dimension, ((height as f64 * ratio).round() as u32).max(1))
    } else {
        let ratio = max_dimension as f64 / height as f64;
        (((width as f64 * ratio).round() as u32).max(1), max_dimension)
    }
}

fn resize_to_fit(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let (new_width, new_height) = target_dimensions(width, height, max_dimension);

    if new_width != width || new_height != height {
        debug!(
            "Resizing {}x{} -> {}x{}",
            width, height, new_width, new_height
        );
        img.resize_exact(new_width, new_height, FilterType::Lanczos3)
    } else {
        img
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CompressionError> {
    // JPEG doesn't support alpha channel, so convert to RGB
    let rgb_image = img.to_rgb8();
    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));
    encoder.write_image(
        &rgb_image,
        rgb_image.width(),
        rgb_image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(output)
}

/// Fallible core of [`compress_data_url`].
pub fn try_compress_data_url(
    data_url: &str,
    settings: CompressionSettings,
) -> Result<String, CompressionError> {
    let (_, bytes) = decode_data_url(data_url)?;
    let img = image::load_from_memory(&bytes)?;
    let resized = resize_to_fit(img, settings.max_dimension);
    let jpeg = encode_jpeg(&resized, settings.quality)?;
    Ok(encode_data_url("image/jpeg", &jpeg))
}

/// Clamp the longer side of an encoded print and re-encode it as JPEG.
///
/// Returns the input unchanged when it cannot be decoded or encoded, or when
/// the re-encoded print would not be smaller.
pub fn compress_data_url(data_url: &str, settings: CompressionSettings) -> String {
    match try_compress_data_url(data_url, settings) {
        Ok(compressed) if compressed.len() < data_url.len() => {
            debug!(
                "Compressed print from {} to {} bytes",
                data_url.len(),
                compressed.len()
            );
            compressed
        }
        Ok(_) => {
            debug!("Re-encoded print is not smaller, keeping original");
            data_url.to_string()
        }
        Err(CompressionError::NotDataUrl) => data_url.to_string(),
        Err(e) => {
            warn!("Failed to compress print, keeping original: {}", e);
            data_url.to_string()
        }
    }
}

/// [`compress_data_url`] on the blocking pool.
pub async fn compress_data_url_async(data_url: String, settings: CompressionSettings) -> String {
    let fallback = data_url.clone();
    match tokio::task::spawn_blocking(move || compress_data_url(&data_url, settings)).await {
        Ok(compressed) => compressed,
        Err(e) => {
            warn!("{}", CompressionError::TaskError(e.to_string()));
            fallback
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_images::{dimensions_of, png_data_url};
    use super::*;

    #[test]
    fn test_target_dimensions_preserve_aspect_ratio() {
        assert_eq!(target_dimensions(1600, 1200, 800), (800, 600));
        assert_eq!(target_dimensions(1200, 1600, 800), (600, 800));
        assert_eq!(target_dimensions(640, 480, 800), (640, 480));
        assert_eq!(target_dimensions(4000, 1, 800), (800, 1));
    }

    #[test]
    fn test_zero_max_dimension_is_raised_to_one() {
        assert_eq!(target_dimensions(1600, 1200, 0), (1, 1));
        assert_eq!(target_dimensions(1200, 1600, 0), (1, 1));

        let settings = CompressionSettings::new(0, 0);
        assert_eq!(settings.max_dimension, 1);
        assert_eq!(settings.quality, 1);

        let compressed = compress_data_url(&png_data_url(64, 48), settings);
        assert_eq!(dimensions_of(&compressed), (1, 1));
    }

    #[test]
    fn test_data_url_roundtrip() {
        let url = encode_data_url("image/png", b"hello");
        assert_eq!(url, "data:image/png;base64,aGVsbG8=");
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_oversized_print_is_clamped_and_smaller() {
        let original = png_data_url(1600, 1200);
        let compressed = compress_data_url(&original, CompressionSettings::new(800, 70));

        assert!(compressed.starts_with("data:image/jpeg;base64,"));
        assert!(compressed.len() < original.len());
        assert_eq!(dimensions_of(&compressed), (800, 600));
    }

    #[test]
    fn test_portrait_print_clamps_height() {
        let original = png_data_url(300, 900);
        let compressed = compress_data_url(&original, CompressionSettings::new(600, 70));
        assert_eq!(dimensions_of(&compressed), (200, 600));
    }

    #[test]
    fn test_garbage_input_is_returned_unchanged() {
        let inputs = [
            "not a data url",
            "https://example.com/photo.jpg",
            "data:image/png;base64,@@@@",
            "data:image/png;base64,aGVsbG8=",
        ];
        for input in inputs {
            assert_eq!(
                compress_data_url(input, CompressionSettings::new(800, 70)),
                input
            );
        }
    }

    #[tokio::test]
    async fn test_async_compression_matches_sync() {
        let original = png_data_url(1000, 500);
        let settings = CompressionSettings::new(400, 60);
        let sync = compress_data_url(&original, settings);
        let async_result = compress_data_url_async(original, settings).await;
        assert_eq!(sync, async_result);
    }
}
