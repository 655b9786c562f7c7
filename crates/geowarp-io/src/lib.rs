#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding/decoding failures,
/// and format-specific errors.
pub mod error;

/// High-level image reading and decoding functions.
///
/// Decodes PNG and JPEG bytes of any color layout into RGB8 images.
/// See [`functional::decode_image_any_rgb8`].
pub mod functional;

/// JPEG image encoding.
pub mod jpeg;

/// PNG image encoding and decoding.
///
/// Read and write 8-bit RGB PNG images, in memory or on disk.
pub mod png;

pub use crate::error::IoError;
