use geowarp_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix `[a, b, c, d, e, f]`.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if the linear part is singular.
pub fn invert_affine_transform(m: &[f32; 6]) -> Result<[f32; 6], ImageError> {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }
    let inv_determinant = 1.0 / determinant;

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    Ok([new_a, new_b, new_c, new_d, new_e, new_f])
}

/// Applies an affine transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels). Pixels
///   that map outside `src` are left untouched.
/// * `m` - The 2x3 affine transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use geowarp_image::{Image, ImageSize};
/// use geowarp_imgproc::interpolation::InterpolationMode;
/// use geowarp_imgproc::warp::warp_affine;
///
/// let src = Image::<f32, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<f32, 3>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m)?;

    if src.size().is_empty() {
        return Ok(());
    }

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        Ok(transform_point(x as f32, y as f32, &m_inv))
    })?;

    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);
    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |x, y, dst_pixel| {
        if x >= 0.0 && x < src_cols && y >= 0.0 && y < src_rows {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            for (out, val) in dst_pixel.iter_mut().zip(pixel) {
                *out = T::from_f32(val);
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geowarp_image::{Image, ImageError, ImageSize};

    use crate::interpolation::InterpolationMode;

    #[test]
    fn warp_affine_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_transformed = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.num_channels(), 3);
        assert_eq!(image_transformed.size().width, 2);
        assert_eq!(image_transformed.size().height, 3);

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_identity() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            (0..20).map(|x| x as u8).collect(),
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), image.as_slice());
        assert_eq!(image_transformed.size(), image.size());

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_rot90() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0f32, 1.0f32, 2.0f32, 3.0f32],
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        // counter-clockwise quarter turn about (0.5, 0.5)
        super::warp_affine(
            &image,
            &mut image_transformed,
            &[0.0, 1.0, 0.0, -1.0, 0.0, 1.0],
            InterpolationMode::Nearest,
        )?;

        assert_eq!(
            image_transformed.as_slice(),
            &[1.0f32, 3.0f32, 0.0f32, 2.0f32]
        );

        Ok(())
    }

    #[test]
    fn warp_affine_keeps_border_value() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([3, 1].into(), 9)?;
        let mut image_transformed = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        // shift right by one pixel
        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
            InterpolationMode::Nearest,
        )?;

        assert_eq!(image_transformed.as_slice(), &[0, 9, 9]);
        Ok(())
    }

    #[test]
    fn invert_affine_roundtrip() -> Result<(), ImageError> {
        let m = [2.0, 0.5, 3.0, -0.25, 1.5, -4.0];
        let m_inv = super::invert_affine_transform(&m)?;
        let (u, v) = super::transform_point(7.0, -2.0, &m);
        let (x, y) = super::transform_point(u, v, &m_inv);
        assert_relative_eq!(x, 7.0, epsilon = 1e-4);
        assert_relative_eq!(y, -2.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn invert_affine_singular() {
        let m = [1.0, 2.0, 0.0, 2.0, 4.0, 0.0];
        assert_eq!(
            super::invert_affine_transform(&m),
            Err(ImageError::CannotComputeDeterminant)
        );
    }
}
