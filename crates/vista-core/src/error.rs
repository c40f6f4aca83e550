//! Error types for Vista.
//!
//! Errors are split by when they happen: `ConfigError` while building the
//! assistant, `GenerationError` while serving a single request. Every
//! generation failure keeps the originating fault as its `source` so callers
//! can tell an unreadable image apart from a network or remote fault.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key from the explicit argument, the config file, or the environment
    #[error("API key must be provided or set in the GOOGLE_API_KEY environment variable")]
    MissingCredential,

    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while loading an image or talking to the model.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Image path does not exist
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// Image exists but could not be read
    #[error("Cannot read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image bytes are not a decodable image
    #[error("Cannot decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// File exceeds size limit
    #[error("File too large: {} ({size_mb}MB > {max_mb}MB)", .path.display())]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {} ({width}x{height} > {max_dim})", .path.display())]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// The HTTP request never produced a response (DNS, connect, TLS, timeout)
    #[error("Request to {model} failed: {source}")]
    Transport {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with an error or refused to generate
    #[error("Gemini error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// The service answered 2xx with a body we could not parse
    #[error("Failed to parse Gemini response: {source}")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
    },
}
