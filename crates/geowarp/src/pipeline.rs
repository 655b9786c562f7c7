use geowarp_image::RgbImage;
use geowarp_io::{functional::decode_image_any_rgb8, png::encode_image_png_rgb8, IoError};
use geowarp_transform::{
    transform_with_options, TransformError, TransformMatrices, TransformOptions, TransformParams,
    TransformReport,
};

/// File name offered for the transformed PNG.
pub const DEFAULT_DOWNLOAD_NAME: &str = "transformed_image.png";

/// An error type for the request flow.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The upload could not be decoded or transformed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The result could not be encoded.
    #[error("Failed to encode the transformed image. {0}")]
    Encode(#[from] IoError),
}

/// Everything produced for one upload.
#[derive(Debug)]
pub struct ProcessedUpload {
    /// The decoded upload.
    pub original: RgbImage,
    /// The transformed image, same size as the original.
    pub transformed: RgbImage,
    /// The matrices that were applied.
    pub matrices: TransformMatrices,
    /// The transformed image encoded as PNG.
    pub png: Vec<u8>,
}

impl ProcessedUpload {
    /// The labelled matrices for display.
    pub fn report(&self) -> TransformReport {
        TransformReport::new(&self.matrices)
    }
}

/// Decode an uploaded PNG or JPEG, transform it and encode the result.
///
/// # Errors
///
/// Undecodable bytes are reported as [`TransformError::InvalidImage`];
/// parameter and matrix errors pass through unchanged.
pub fn process_upload(
    bytes: &[u8],
    params: &TransformParams,
) -> Result<ProcessedUpload, PipelineError> {
    process_upload_with_options(bytes, params, &TransformOptions::default())
}

/// Same as [`process_upload`] with explicit resampling options.
pub fn process_upload_with_options(
    bytes: &[u8],
    params: &TransformParams,
    options: &TransformOptions,
) -> Result<ProcessedUpload, PipelineError> {
    // reject bad parameters before decoding anything
    params.validate()?;

    let original = decode_image_any_rgb8(bytes)
        .map_err(|e| TransformError::InvalidImage(e.to_string()))?;
    log::debug!("decoded upload of {} bytes: {}", bytes.len(), original.size());

    let output = transform_with_options(&original, params, options)?;
    let png = encode_image_png_rgb8(&output.image)?;
    log::info!("encoded {} bytes of png", png.len());

    Ok(ProcessedUpload {
        original,
        transformed: output.image,
        matrices: output.matrices,
        png,
    })
}
