use geowarp_image::{Image, RgbImage};
use geowarp_imgproc::{
    flip,
    interpolation::InterpolationMode,
    warp::{warp_affine, warp_perspective},
};

use crate::{
    builder::{build_transform, TransformMatrices},
    error::TransformError,
    matrix::{AffineMatrix, Homography},
    params::TransformParams,
};

/// Resampling options shared by the warp stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformOptions {
    /// Interpolation used by the rotate+scale and perspective stages.
    pub interpolation: InterpolationMode,
    /// RGB value of destination pixels that map outside the source.
    pub fill: [u8; 3],
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMode::Bilinear,
            fill: [0, 0, 0],
        }
    }
}

/// The transformed image together with the matrices that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformOutput {
    /// The transformed image, same size as the input.
    pub image: RgbImage,
    /// The matrices applied, in order.
    pub matrices: TransformMatrices,
}

fn filled(src: &RgbImage, fill: [u8; 3]) -> Result<RgbImage, TransformError> {
    let size = src.size();
    Ok(Image::new(size, fill.repeat(size.width * size.height))?)
}

fn resample_affine(
    src: &RgbImage,
    m: &AffineMatrix,
    options: &TransformOptions,
) -> Result<RgbImage, TransformError> {
    let mut dst = filled(src, options.fill)?;
    warp_affine(src, &mut dst, &m.to_f32(), options.interpolation)?;
    Ok(dst)
}

fn resample_perspective(
    src: &RgbImage,
    h: &Homography,
    options: &TransformOptions,
) -> Result<RgbImage, TransformError> {
    let mut dst = filled(src, options.fill)?;
    warp_perspective(src, &mut dst, &h.to_f32(), options.interpolation)?;
    Ok(dst)
}

/// Apply precomputed matrices to an image.
///
/// The stages run in the fixed order rotate+scale, horizontal flip,
/// vertical flip, perspective. Every stage yields a new image of the input
/// size. Flips reverse pixel indices and never interpolate.
///
/// # Errors
///
/// * [`TransformError::InvalidImage`] if the image has no pixels.
/// * [`TransformError::NonInvertibleTransform`] if a warp matrix is
///   singular. This is checked before any stage runs.
pub fn apply_transform(
    src: &RgbImage,
    matrices: &TransformMatrices,
    options: &TransformOptions,
) -> Result<RgbImage, TransformError> {
    let size = src.size();
    if size.is_empty() {
        return Err(TransformError::InvalidImage(format!(
            "cannot transform an empty image: {size}"
        )));
    }

    matrices.rotate_scale.inverse()?;
    if let Some(h) = &matrices.perspective {
        h.inverse()?;
    }

    let mut image = resample_affine(src, &matrices.rotate_scale, options)?;
    log::debug!("rotate+scale stage done ({:?})", options.interpolation);

    if matrices.flip_horizontal.is_some() {
        image = flip::horizontal_flip(&image)?;
        log::debug!("horizontal flip stage done");
    }

    if matrices.flip_vertical.is_some() {
        image = flip::vertical_flip(&image)?;
        log::debug!("vertical flip stage done");
    }

    if let Some(h) = &matrices.perspective {
        image = resample_perspective(&image, h, options)?;
        log::debug!("perspective stage done");
    }

    Ok(image)
}

/// Build and apply the transform described by `params` with default options.
///
/// # Example
///
/// ```
/// use geowarp_image::Image;
/// use geowarp_transform::{transform, TransformParams};
///
/// let image = Image::<u8, 3>::new([4, 1].into(), (0..12).collect()).unwrap();
/// let params = TransformParams::default().with_flip_horizontal(true);
///
/// let out = transform(&image, &params).unwrap();
///
/// assert_eq!(out.image.as_slice(), &[9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2]);
/// assert!(out.matrices.flip_horizontal.is_some());
/// ```
pub fn transform(
    src: &RgbImage,
    params: &TransformParams,
) -> Result<TransformOutput, TransformError> {
    transform_with_options(src, params, &TransformOptions::default())
}

/// Build and apply the transform described by `params`.
pub fn transform_with_options(
    src: &RgbImage,
    params: &TransformParams,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let matrices = build_transform(src.size(), params)?;
    let image = apply_transform(src, &matrices, options)?;

    log::info!(
        "transformed {} image: angle {} scale {} flip_h {} flip_v {} perspective {}",
        src.size(),
        params.angle,
        params.scale,
        params.flip_horizontal,
        params.flip_vertical,
        params.perspective
    );

    Ok(TransformOutput { image, matrices })
}
