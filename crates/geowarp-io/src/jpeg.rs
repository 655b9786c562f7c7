use std::path::Path;

use geowarp_image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::IoError;

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image to write.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &RgbImage,
    quality: u8,
) -> Result<(), IoError> {
    let (width, height) = jpeg_dims(image)?;
    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(())
}

/// Encodes an RGB image to JPEG bytes.
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn encode_image_jpeg_rgb8(image: &RgbImage, quality: u8) -> Result<Vec<u8>, IoError> {
    let (width, height) = jpeg_dims(image)?;
    let mut buf = Vec::new();
    let encoder = Encoder::new(&mut buf, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(buf)
}

// the jpeg format stores dimensions as u16
fn jpeg_dims(image: &RgbImage) -> Result<(u16, u16), IoError> {
    let size = image.size();
    match (u16::try_from(size.width), u16::try_from(size.height)) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok((width, height)),
        _ => Err(IoError::UnsupportedImageSize(size)),
    }
}
