use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Smallest accepted rotation angle in degrees.
pub const MIN_ANGLE: f64 = -180.0;

/// Largest accepted rotation angle in degrees.
pub const MAX_ANGLE: f64 = 180.0;

/// Largest accepted scale factor. The lower bound is exclusive zero.
pub const MAX_SCALE: f64 = 3.0;

/// The user-chosen parameters of one transform request.
///
/// Missing fields take their default when deserialized, so `{"angle": 30}`
/// is a complete parameter set.
///
/// # Examples
///
/// ```
/// use geowarp_transform::TransformParams;
///
/// let params = TransformParams::default().with_angle(45.0).with_flip_horizontal(true);
///
/// assert_eq!(params.angle, 45.0);
/// assert_eq!(params.scale, 1.0);
/// assert!(params.flip_horizontal);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Rotation angle in degrees, positive is clockwise on screen.
    pub angle: f64,
    /// Uniform scale factor about the image center.
    pub scale: f64,
    /// Mirror the image left to right after rotating.
    pub flip_horizontal: bool,
    /// Mirror the image top to bottom after rotating.
    pub flip_vertical: bool,
    /// Apply the fixed keystone distortion last.
    pub perspective: bool,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            flip_horizontal: false,
            flip_vertical: false,
            perspective: false,
        }
    }
}

impl TransformParams {
    /// Set the rotation angle in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable the horizontal flip.
    pub fn with_flip_horizontal(mut self, enabled: bool) -> Self {
        self.flip_horizontal = enabled;
        self
    }

    /// Enable or disable the vertical flip.
    pub fn with_flip_vertical(mut self, enabled: bool) -> Self {
        self.flip_vertical = enabled;
        self
    }

    /// Enable or disable the keystone distortion.
    pub fn with_perspective(mut self, enabled: bool) -> Self {
        self.perspective = enabled;
        self
    }

    /// Check the numeric parameters against their domains.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameter`] when the angle is not a
    /// finite value in `[-180, 180]` or the scale is not in `(0, 3]`.
    pub fn validate(&self) -> Result<(), TransformError> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > MAX_SCALE {
            return Err(TransformError::InvalidParameter {
                name: "scale",
                value: self.scale,
                reason: "expected a finite value in (0, 3]",
            });
        }

        if !(MIN_ANGLE..=MAX_ANGLE).contains(&self.angle) {
            return Err(TransformError::InvalidParameter {
                name: "angle",
                value: self.angle,
                reason: "expected a finite value in [-180, 180] degrees",
            });
        }

        Ok(())
    }
}
