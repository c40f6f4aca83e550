//! Image loading: read from disk, check limits, decode, and encode for upload.
//!
//! The image is decoded once to prove it is a real image and to learn its
//! format and dimensions. JPEG, PNG and WebP bytes are then sent as-is; any
//! other decodable format is re-encoded to PNG, which Gemini accepts inline.

use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::GenerationError;

/// Base64-encoded image ready to send as an inline data part.
#[derive(Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
    /// Decoded width in pixels
    pub width: u32,
    /// Decoded height in pixels
    pub height: u32,
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl ImageInput {
    /// Load and validate an image file.
    ///
    /// Decoding runs on the blocking pool so large images don't stall the
    /// runtime.
    pub async fn load(path: &Path, limits: &LimitsConfig) -> Result<Self, GenerationError> {
        let read_err = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GenerationError::ImageNotFound(path.to_path_buf())
            } else {
                GenerationError::ImageRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        };

        // Size check before reading anything into memory
        let metadata = tokio::fs::metadata(path).await.map_err(read_err)?;
        let max_bytes = limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(GenerationError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: limits.max_file_size_mb,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(read_err)?;

        let path_owned = path.to_path_buf();
        let max_dim = limits.max_image_dimension;
        let input = tokio::task::spawn_blocking(move || {
            Self::from_bytes_sync(bytes, &path_owned, max_dim)
        })
        .await
        .map_err(|e| GenerationError::ImageRead {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!("decode task failed: {e}")),
        })??;

        tracing::debug!(
            "Loaded {:?} as {} ({}x{})",
            path,
            input.mime_type,
            input.width,
            input.height
        );
        Ok(input)
    }

    /// Synchronous decode + encode (runs in spawn_blocking).
    fn from_bytes_sync(
        bytes: Vec<u8>,
        path: &Path,
        max_dim: Option<u32>,
    ) -> Result<Self, GenerationError> {
        let decode_err = |source: image::ImageError| GenerationError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        let reader = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| GenerationError::ImageRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        let format = reader.format();
        let image = reader.decode().map_err(decode_err)?;

        let (width, height) = image.dimensions();
        if let Some(max_dim) = max_dim.filter(|&max| width > max || height > max) {
            return Err(GenerationError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim,
            });
        }

        let (payload, mime_type) = match format.and_then(passthrough_mime_type) {
            Some(mime) => (bytes, mime),
            None => (encode_png(&image).map_err(decode_err)?, "image/png"),
        };

        Ok(Self {
            data: base64::engine::general_purpose::STANDARD.encode(&payload),
            mime_type: mime_type.to_string(),
            width,
            height,
        })
    }
}

/// MIME type for formats Gemini accepts without conversion.
fn passthrough_mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
