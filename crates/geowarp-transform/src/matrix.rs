//! Row-major affine and projective matrices on homogeneous 2-D coordinates.
//!
//! Both types map source pixel coordinates to destination coordinates with
//! the origin at the top-left corner and y growing downward.

use crate::error::TransformError;

// determinants below this are treated as singular
const SINGULAR_EPS: f64 = 1e-12;

/// A 2x3 affine matrix `[a, b, tx, c, d, ty]`.
///
/// A point `(x, y)` maps to `(a*x + b*y + tx, c*x + d*y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMatrix([f64; 6]);

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// The identity transform.
    pub fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    /// Create a matrix from its six row-major coefficients.
    pub fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self(coeffs)
    }

    /// The six row-major coefficients.
    pub fn coeffs(&self) -> &[f64; 6] {
        &self.0
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * m[4] - m[1] * m[3]
    }

    /// Map a point through the matrix.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
    }

    /// The matrix that applies `self` first and `next` second.
    ///
    /// # Examples
    ///
    /// ```
    /// use geowarp_transform::AffineMatrix;
    ///
    /// let shift = AffineMatrix::from_coeffs([1.0, 0.0, 2.0, 0.0, 1.0, 0.0]);
    /// let double = AffineMatrix::from_coeffs([2.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    ///
    /// // (1, 1) -> (3, 1) -> (6, 2)
    /// assert_eq!(shift.then(&double).transform_point(1.0, 1.0), (6.0, 2.0));
    /// ```
    pub fn then(&self, next: &AffineMatrix) -> AffineMatrix {
        let (a, b) = (&self.0, &next.0);
        AffineMatrix([
            b[0] * a[0] + b[1] * a[3],
            b[0] * a[1] + b[1] * a[4],
            b[0] * a[2] + b[1] * a[5] + b[2],
            b[3] * a[0] + b[4] * a[3],
            b[3] * a[1] + b[4] * a[4],
            b[3] * a[2] + b[4] * a[5] + b[5],
        ])
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertibleTransform`] if the linear part
    /// is singular.
    pub fn inverse(&self) -> Result<AffineMatrix, TransformError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPS {
            return Err(TransformError::NonInvertibleTransform(det));
        }

        let m = &self.0;
        let inv_det = 1.0 / det;
        let (a, b) = (m[4] * inv_det, -m[1] * inv_det);
        let (c, d) = (-m[3] * inv_det, m[0] * inv_det);

        Ok(AffineMatrix([
            a,
            b,
            -(a * m[2] + b * m[5]),
            c,
            d,
            -(c * m[2] + d * m[5]),
        ]))
    }

    /// Lift to a 3x3 homography with last row `[0, 0, 1]`.
    pub fn to_homography(&self) -> Homography {
        let m = &self.0;
        Homography([m[0], m[1], m[2], m[3], m[4], m[5], 0.0, 0.0, 1.0])
    }

    /// Single precision coefficients for the resampling kernels.
    pub fn to_f32(&self) -> [f32; 6] {
        self.0.map(|v| v as f32)
    }
}

/// A 3x3 homography, row-major.
///
/// A point `(x, y)` maps to `(x'/w', y'/w')` with
/// `[x', y', w'] = H * [x, y, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography([f64; 9]);

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    /// The identity transform.
    pub fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Create a homography from its nine row-major coefficients.
    pub fn from_coeffs(coeffs: [f64; 9]) -> Self {
        Self(coeffs)
    }

    /// The nine row-major coefficients.
    pub fn coeffs(&self) -> &[f64; 9] {
        &self.0
    }

    /// Determinant of the 3x3 matrix.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) -
        m[1] * (m[3] * m[8] - m[5] * m[6]) +
        m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Map a point through the homography.
    ///
    /// Returns `None` if the point is sent to infinity.
    pub fn transform_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.0;
        let w = m[6] * x + m[7] * y + m[8];
        if w.abs() < f64::EPSILON {
            return None;
        }
        Some((
            (m[0] * x + m[1] * y + m[2]) / w,
            (m[3] * x + m[4] * y + m[5]) / w,
        ))
    }

    /// The homography that applies `self` first and `next` second.
    pub fn then(&self, next: &Homography) -> Homography {
        let (a, b) = (&self.0, &next.0);
        let mut out = [0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                out[r * 3 + c] = (0..3).map(|k| b[r * 3 + k] * a[k * 3 + c]).sum();
            }
        }
        Homography(out)
    }

    /// The inverse homography.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertibleTransform`] if the matrix is
    /// singular.
    pub fn inverse(&self) -> Result<Homography, TransformError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPS {
            return Err(TransformError::NonInvertibleTransform(det));
        }

        let m = &self.0;
        let adj = [
            m[4] * m[8] - m[5] * m[7],
            m[2] * m[7] - m[1] * m[8],
            m[1] * m[5] - m[2] * m[4],
            m[5] * m[6] - m[3] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[2] * m[3] - m[0] * m[5],
            m[3] * m[7] - m[4] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[0] * m[4] - m[1] * m[3],
        ];

        Ok(Homography(adj.map(|v| v / det)))
    }

    /// Single precision coefficients for the resampling kernels.
    pub fn to_f32(&self) -> [f32; 9] {
        self.0.map(|v| v as f32)
    }
}

impl From<AffineMatrix> for Homography {
    fn from(m: AffineMatrix) -> Self {
        m.to_homography()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AffineMatrix, Homography};
    use crate::error::TransformError;

    #[test]
    fn affine_compose_order() {
        let scale = AffineMatrix::from_coeffs([2.0, 0.0, 0.0, 0.0, 3.0, 0.0]);
        let shift = AffineMatrix::from_coeffs([1.0, 0.0, 1.0, 0.0, 1.0, -1.0]);

        assert_eq!(scale.then(&shift).transform_point(1.0, 1.0), (3.0, 2.0));
        assert_eq!(shift.then(&scale).transform_point(1.0, 1.0), (4.0, 0.0));
    }

    #[test]
    fn affine_inverse() -> Result<(), TransformError> {
        let m = AffineMatrix::from_coeffs([0.5, -1.2, 30.0, 0.8, 0.4, -7.0]);
        let identity = m.then(&m.inverse()?);
        for (v, e) in identity.coeffs().iter().zip(AffineMatrix::identity().coeffs()) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn affine_singular() {
        let m = AffineMatrix::from_coeffs([1.0, 2.0, 3.0, 2.0, 4.0, 5.0]);
        assert_eq!(m.inverse(), Err(TransformError::NonInvertibleTransform(0.0)));
    }

    #[test]
    fn homography_matches_affine() {
        let m = AffineMatrix::from_coeffs([0.0, -1.0, 150.0, 1.0, 0.0, 50.0]);
        let h = Homography::from(m);
        assert_eq!(h.transform_point(50.0, 60.0), Some(m.transform_point(50.0, 60.0)));
        assert_relative_eq!(h.determinant(), m.determinant());
    }

    #[test]
    fn homography_inverse_and_compose() -> Result<(), TransformError> {
        let h = Homography::from_coeffs([1.1, 0.2, 3.0, -0.1, 0.9, 2.0, 0.001, 0.002, 1.0]);
        let (x, y) = h.transform_point(12.0, 7.0).unwrap_or_default();
        let (u, v) = h.inverse()?.transform_point(x, y).unwrap_or_default();
        assert_relative_eq!(u, 12.0, epsilon = 1e-9);
        assert_relative_eq!(v, 7.0, epsilon = 1e-9);

        let identity = h.then(&h.inverse()?);
        for (v, e) in identity.coeffs().iter().zip(Homography::identity().coeffs()) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn homography_point_at_infinity() {
        let h = Homography::from_coeffs([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(h.transform_point(0.0, 5.0), None);
    }
}
