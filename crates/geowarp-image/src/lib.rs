#![deny(missing_docs)]
//! Image types used by the geowarp transform pipeline.

/// image representation for geometric transforms.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize, RgbImage};
