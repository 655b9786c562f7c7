#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Apply the matrices to an image in the fixed stage order.
pub mod apply;

/// Build the matrices of a transform request.
///
/// All matrices are derived from the image size and the parameters only.
pub mod builder;

/// Error types for the transform module.
pub mod error;

/// Affine and projective matrix types.
pub mod matrix;

/// The user-chosen transform parameters.
pub mod params;

/// Text rendering of matrices and the explanatory formula sheet.
pub mod report;

pub use apply::{
    apply_transform, transform, transform_with_options, TransformOptions, TransformOutput,
};
pub use builder::{build_transform, homography_from_points, TransformMatrices, KEYSTONE_FRACTIONS};
pub use error::TransformError;
pub use geowarp_imgproc::interpolation::InterpolationMode;
pub use matrix::{AffineMatrix, Homography};
pub use params::TransformParams;
pub use report::{Formula, ReportEntry, TransformReport, FORMULAS};
