use geowarp_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.round().max(0.0) as usize).min(cols - 1);
    let iv = (v.round().max(0.0) as usize).min(rows - 1);

    let base = (iv * cols + iu) * C;
    let src = &image.as_slice()[base..base + C];

    let mut pixel = [0.0; C];
    for (out, &val) in pixel.iter_mut().zip(src) {
        *out = val.into();
    }

    pixel
}

#[cfg(test)]
mod tests {
    use geowarp_image::{Image, ImageError};

    #[test]
    fn nearest_rounds_and_clamps() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 2].into(), vec![0, 10, 20, 30])?;
        assert_eq!(super::nearest_neighbor_interpolation(&image, 0.4, 0.6), [20.0]);
        assert_eq!(super::nearest_neighbor_interpolation(&image, 1.9, 1.9), [30.0]);
        Ok(())
    }
}
