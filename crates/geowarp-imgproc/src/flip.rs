use geowarp_image::{Image, ImageError};
use rayon::prelude::*;

/// Flip the input image horizontally.
///
/// Pixel `(x, y)` of the output is pixel `(W - 1 - x, y)` of the input, so
/// no sample is interpolated.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use geowarp_image::{Image, ImageSize};
/// use geowarp_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 4,
///         height: 1,
///     },
///     vec![1, 2, 3, 4],
/// )
/// .unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[4, 3, 2, 1]);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();

    let cols = src.cols();
    if cols == 0 || C == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .zip(src.as_slice().par_chunks_exact(cols * C))
        .for_each(|(dst_row, src_row)| {
            dst_row
                .chunks_exact_mut(C)
                .zip(src_row.chunks_exact(C).rev())
                .for_each(|(dst_pixel, src_pixel)| dst_pixel.copy_from_slice(src_pixel));
        });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// Pixel `(x, y)` of the output is pixel `(x, H - 1 - y)` of the input.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use geowarp_image::{Image, ImageSize};
/// use geowarp_imgproc::flip::vertical_flip;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![0f32; 2 * 3 * 3],
/// )
/// .unwrap();
///
/// let flipped: Image<f32, 3> = vertical_flip(&image).unwrap();
///
/// assert_eq!(flipped.size().width, 2);
/// assert_eq!(flipped.size().height, 3);
/// ```
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();

    let row_len = src.cols() * C;
    if row_len == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip(src.as_slice().par_chunks_exact(row_len).rev())
        .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use geowarp_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_hflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        let data_expected = vec![1u8, 0, 3, 2, 5, 4];
        let flipped = super::horizontal_flip(&image)?;
        assert_eq!(flipped.as_slice(), &data_expected);
        Ok(())
    }

    #[test]
    fn test_hflip_rgb_keeps_channel_order() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new([2, 1].into(), vec![1u8, 2, 3, 4, 5, 6])?;
        let flipped = super::horizontal_flip(&image)?;
        assert_eq!(flipped.as_slice(), &[4, 5, 6, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_vflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        let data_expected = vec![4u8, 5, 2, 3, 0, 1];
        let flipped = super::vertical_flip(&image)?;
        assert_eq!(flipped.as_slice(), &data_expected);
        Ok(())
    }

    #[test]
    fn test_flip_twice_is_identity() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new([5, 4].into(), (0..60).collect::<Vec<u8>>())?;
        let hh = super::horizontal_flip(&super::horizontal_flip(&image)?)?;
        let vv = super::vertical_flip(&super::vertical_flip(&image)?)?;
        assert_eq!(hh, image);
        assert_eq!(vv, image);
        Ok(())
    }

    #[test]
    fn test_flip_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([0, 4].into(), vec![])?;
        assert_eq!(super::horizontal_flip(&image)?.size(), image.size());
        assert_eq!(super::vertical_flip(&image)?.size(), image.size());
        Ok(())
    }
}
