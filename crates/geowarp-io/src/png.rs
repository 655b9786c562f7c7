use std::{fs::File, io::Write, path::Path};

use geowarp_image::{Image, ImageSize, RgbImage};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image with three channels (rgb8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A RGB image with three channels (rgb8).
pub fn read_image_png_rgb8(file_path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("png") => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let file = File::open(file_path)?;
    decode_png_rgb8_impl(file)
}

/// Decodes a PNG image with three channels (rgb8) from raw bytes.
///
/// # Arguments
///
/// - `bytes` - Raw bytes of the png file
pub fn decode_image_png_rgb8(bytes: &[u8]) -> Result<RgbImage, IoError> {
    decode_png_rgb8_impl(bytes)
}

fn decode_png_rgb8_impl(source: impl std::io::Read) -> Result<RgbImage, IoError> {
    let mut reader = Decoder::new(source)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let color = reader.output_color_type();
    if color != (ColorType::Rgb, BitDepth::Eight) {
        return Err(IoError::PngDecodeError(format!(
            "expected an 8-bit RGB png, got {:?}",
            color
        )));
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(Image::new(size, buf)?)
}

/// Encodes an RGB image to PNG bytes.
///
/// # Arguments
///
/// - `image` - The image to encode.
///
/// # Returns
///
/// The bytes of a complete PNG file.
pub fn encode_image_png_rgb8(image: &RgbImage) -> Result<Vec<u8>, IoError> {
    let mut buf = Vec::new();
    write_png_impl(&mut buf, image.as_slice(), image.size(), ColorType::Rgb)?;
    Ok(buf)
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image to write.
pub fn write_image_png_rgb8(file_path: impl AsRef<Path>, image: &RgbImage) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    write_png_impl(file, image.as_slice(), image.size(), ColorType::Rgb)
}

fn write_png_impl(
    sink: impl Write,
    image_data: &[u8],
    image_size: ImageSize,
    color_type: ColorType,
) -> Result<(), IoError> {
    let (Ok(width), Ok(height)) = (
        u32::try_from(image_size.width),
        u32::try_from(image_size.height),
    ) else {
        return Err(IoError::UnsupportedImageSize(image_size));
    };

    let mut encoder = Encoder::new(sink, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;

    fn gradient(width: usize, height: usize) -> Result<RgbImage, IoError> {
        let data = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        Ok(Image::new([width, height].into(), data)?)
    }

    #[test]
    fn encode_decode_png_rgb8() -> Result<(), IoError> {
        let image = gradient(7, 5)?;
        let bytes = encode_image_png_rgb8(&image)?;
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        let image_back = decode_image_png_rgb8(&bytes)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn read_write_png_rgb8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let file_path = tmp_dir.path().join("gradient-rgb8.png");
        let image = gradient(16, 9)?;
        write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_png_rgb8(&file_path)?;
        assert_eq!(image_back.size().width, 16);
        assert_eq!(image_back.size().height, 9);
        assert_eq!(image_back.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn read_png_bad_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.jpg");
        std::fs::write(&file_path, b"")?;

        let res = read_image_png_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
