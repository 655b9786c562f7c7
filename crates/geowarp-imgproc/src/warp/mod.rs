//! Geometric image transformations using affine and perspective warps.
//!
//! Both warps use inverse mapping: every destination pixel is mapped back
//! into the source with the inverted matrix and sampled there. Destination
//! pixels that land outside the source keep the value they already hold, so
//! callers pre-fill `dst` with the border value.
//!
//! # Examples
//!
//! Rotating an image by 90 degrees about its top-left pixel:
//!
//! ```
//! use geowarp_image::Image;
//! use geowarp_imgproc::interpolation::InterpolationMode;
//! use geowarp_imgproc::warp::warp_affine;
//!
//! let src = Image::<u8, 1>::new([2, 2].into(), vec![0, 1, 2, 3]).unwrap();
//! let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
//!
//! // x' = -y + 1, y' = x
//! let m = [0.0, -1.0, 1.0, 1.0, 0.0, 0.0];
//! warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
//!
//! assert_eq!(dst.as_slice(), &[2, 0, 3, 1]);
//! ```

mod affine;
mod perspective;

pub use affine::{invert_affine_transform, warp_affine};
pub use perspective::{invert_perspective_transform, warp_perspective};
