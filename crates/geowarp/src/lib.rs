#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use geowarp_image as image;

#[doc(inline)]
pub use geowarp_imgproc as imgproc;

#[doc(inline)]
pub use geowarp_io as io;

#[doc(inline)]
pub use geowarp_transform as transform;

/// Upload to download request flow: decode, transform, encode.
pub mod pipeline;
