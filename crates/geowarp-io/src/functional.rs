use std::{io::Cursor, path::Path};

use geowarp_image::{Image, ImageSize, RgbImage};
use image::ImageFormat;

use crate::error::IoError;

/// Decodes PNG or JPEG bytes into an 8-bit RGB image.
///
/// The format is detected from the content, not from a file name. Grayscale,
/// alpha and 16-bit inputs are converted to RGB8; the alpha channel is
/// dropped.
///
/// # Arguments
///
/// * `bytes` - The raw bytes of the encoded image.
///
/// # Returns
///
/// The decoded image with three channels.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedImageFormat`] for anything that is not PNG
/// or JPEG and [`IoError::ImageDecodeError`] for corrupted data.
pub fn decode_image_any_rgb8(bytes: &[u8]) -> Result<RgbImage, IoError> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    match reader.format() {
        Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
        _ => return Err(IoError::UnsupportedImageFormat),
    }

    let img = reader.decode()?;
    log::debug!(
        "decoded {}x{} image with color type {:?}",
        img.width(),
        img.height(),
        img.color()
    );

    let rgb = img.into_rgb8();
    let size = ImageSize {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
    };

    Ok(Image::new(size, rgb.into_raw())?)
}

/// Reads a PNG or JPEG image from the given file path as RGB8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    decode_image_any_rgb8(&bytes)
}
