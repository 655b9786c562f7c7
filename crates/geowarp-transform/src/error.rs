use geowarp_image::ImageError;

/// An error type for the transform module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// The image is empty or could not be decoded.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A transform parameter is outside its domain.
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The domain the value had to satisfy.
        reason: &'static str,
    },

    /// The point correspondences do not define a unique homography.
    #[error("Ill-conditioned homography: {0}")]
    IllConditionedHomography(&'static str),

    /// A matrix that must be inverted for resampling is singular.
    #[error("Non-invertible transform, determinant is {0}")]
    NonInvertibleTransform(f64),

    /// Error from the image container or the resampling kernels.
    #[error(transparent)]
    Image(#[from] ImageError),
}
