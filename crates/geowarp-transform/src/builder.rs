use geowarp_image::ImageSize;

use crate::{
    error::TransformError,
    matrix::{AffineMatrix, Homography},
    params::TransformParams,
};

/// Destination of the four source corners as fractions of `(w, h)`.
///
/// Corners are ordered top-left, top-right, bottom-left, bottom-right. The
/// values are fixed and must not be tuned.
pub const KEYSTONE_FRACTIONS: [(f64, f64); 4] = [(0.1, 0.1), (0.9, 0.05), (0.2, 0.9), (0.8, 0.95)];

// pivots and areas below this, relative to the input scale, are degenerate
const DEGENERATE_EPS: f64 = 1e-10;

/// The matrices of one transform request, in application order.
///
/// Optional stages are `None` when the matching flag is off.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformMatrices {
    /// Rotation and scale about the image center, always applied.
    pub rotate_scale: AffineMatrix,
    /// `[[-1, 0, w], [0, 1, 0]]` when the horizontal flip is on.
    pub flip_horizontal: Option<AffineMatrix>,
    /// `[[1, 0, 0], [0, -1, h]]` when the vertical flip is on.
    pub flip_vertical: Option<AffineMatrix>,
    /// The keystone homography when the perspective flag is on.
    pub perspective: Option<Homography>,
}

impl TransformMatrices {
    /// The full forward map as a single homography.
    ///
    /// The flips contribute their displayed matrices, which reflect about
    /// `x = w/2` and `y = h/2`. The pixel flips reflect about the centers of
    /// the edge pixels, so the composite is one pixel off per applied flip.
    pub fn composite(&self) -> Homography {
        let mut h = self.rotate_scale.to_homography();
        if let Some(m) = &self.flip_horizontal {
            h = h.then(&m.to_homography());
        }
        if let Some(m) = &self.flip_vertical {
            h = h.then(&m.to_homography());
        }
        if let Some(p) = &self.perspective {
            h = h.then(p);
        }
        h
    }
}

/// Rotation by `-angle` degrees and uniform scale about `center`.
///
/// A positive angle turns the image clockwise on screen. The center maps to
/// itself.
pub fn rotation_scale_matrix(center: (f64, f64), angle: f64, scale: f64) -> AffineMatrix {
    let (cx, cy) = center;
    let (sin, cos) = angle.to_radians().sin_cos();
    let (alpha, beta) = (scale * cos, scale * sin);

    AffineMatrix::from_coeffs([
        alpha,
        -beta,
        (1.0 - alpha) * cx + beta * cy,
        beta,
        alpha,
        -beta * cx + (1.0 - alpha) * cy,
    ])
}

/// Reflection of x shifted by the image width.
pub fn flip_horizontal_matrix(size: ImageSize) -> AffineMatrix {
    AffineMatrix::from_coeffs([-1.0, 0.0, size.width as f64, 0.0, 1.0, 0.0])
}

/// Reflection of y shifted by the image height.
pub fn flip_vertical_matrix(size: ImageSize) -> AffineMatrix {
    AffineMatrix::from_coeffs([1.0, 0.0, 0.0, 0.0, -1.0, size.height as f64])
}

/// The source corners and their keystone destinations for an image size.
pub fn keystone_points(size: ImageSize) -> ([(f64, f64); 4], [(f64, f64); 4]) {
    let (w, h) = (size.width as f64, size.height as f64);
    let src = [(0.0, 0.0), (w - 1.0, 0.0), (0.0, h - 1.0), (w - 1.0, h - 1.0)];
    let dst = KEYSTONE_FRACTIONS.map(|(fx, fy)| (fx * w, fy * h));
    (src, dst)
}

/// Compute the homography that maps four source points onto four
/// destination points.
///
/// The bottom-right coefficient is fixed to one and the remaining eight are
/// solved from the two linear equations each correspondence contributes.
///
/// # Errors
///
/// Returns [`TransformError::IllConditionedHomography`] if three points of
/// either set are collinear or the system is numerically singular.
///
/// # Examples
///
/// ```
/// use geowarp_transform::homography_from_points;
///
/// let src = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
/// let dst = [(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)];
///
/// let h = homography_from_points(&src, &dst).unwrap();
/// let (x, y) = h.transform_point(0.5, 0.5).unwrap();
///
/// assert!((x - 1.0).abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
/// ```
pub fn homography_from_points(
    src: &[(f64, f64); 4],
    dst: &[(f64, f64); 4],
) -> Result<Homography, TransformError> {
    if has_collinear_triplet(src) {
        return Err(TransformError::IllConditionedHomography(
            "three source points are collinear",
        ));
    }
    if has_collinear_triplet(dst) {
        return Err(TransformError::IllConditionedHomography(
            "three destination points are collinear",
        ));
    }

    let mut a = [[0.0f64; 8]; 8];
    let mut b = [0.0f64; 8];

    for (i, (&(x, y), &(xp, yp))) in src.iter().zip(dst.iter()).enumerate() {
        a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -xp * x, -xp * y];
        b[2 * i] = xp;
        a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -yp * x, -yp * y];
        b[2 * i + 1] = yp;
    }

    let h = solve_linear_system(&mut a, &mut b)?;
    let homography =
        Homography::from_coeffs([h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0]);

    // a map between sets of extents e_src and e_dst has det ~ (e_dst / e_src)^2
    let ratio = extent(dst) / extent(src);
    let det = homography.determinant();
    if !det.is_finite() || det.abs() < DEGENERATE_EPS * ratio * ratio {
        return Err(TransformError::IllConditionedHomography("det is too small"));
    }

    Ok(homography)
}

/// Largest absolute coordinate of a point set, at least one.
fn extent(points: &[(f64, f64); 4]) -> f64 {
    points
        .iter()
        .fold(1.0f64, |acc, &(x, y)| acc.max(x.abs()).max(y.abs()))
}

fn has_collinear_triplet(points: &[(f64, f64); 4]) -> bool {
    let extent = extent(points);
    let tolerance = DEGENERATE_EPS * extent * extent;

    const TRIPLETS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLETS.iter().any(|&[i, j, k]| {
        let (p, q, r) = (points[i], points[j], points[k]);
        let cross = (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
        cross.abs() <= tolerance
    })
}

/// Gaussian elimination with partial pivoting on an 8x8 system.
fn solve_linear_system(
    a: &mut [[f64; 8]; 8],
    b: &mut [f64; 8],
) -> Result<[f64; 8], TransformError> {
    const N: usize = 8;

    let scale = a
        .iter()
        .flatten()
        .fold(0.0f64, |acc, v| acc.max(v.abs()))
        .max(1.0);

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        let pivot = a[col][col];
        if !pivot.is_finite() || pivot.abs() < DEGENERATE_EPS * scale {
            return Err(TransformError::IllConditionedHomography(
                "vanishing pivot in the linear system",
            ));
        }

        for row in (col + 1)..N {
            let factor = a[row][col] / pivot;
            for j in col..N {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; N];
    for i in (0..N).rev() {
        let tail: f64 = ((i + 1)..N).map(|j| a[i][j] * x[j]).sum();
        x[i] = (b[i] - tail) / a[i][i];
    }

    Ok(x)
}

/// Compute the matrices of a transform request for an image size.
///
/// The result depends only on `size` and `params`; no pixel data is read.
///
/// # Errors
///
/// * [`TransformError::InvalidParameter`] if the angle or scale is out of
///   range.
/// * [`TransformError::InvalidImage`] if the image has no pixels.
/// * [`TransformError::IllConditionedHomography`] if the keystone
///   correspondences are degenerate, which happens for one pixel wide or
///   tall images.
pub fn build_transform(
    size: ImageSize,
    params: &TransformParams,
) -> Result<TransformMatrices, TransformError> {
    params.validate()?;

    if size.is_empty() {
        return Err(TransformError::InvalidImage(format!(
            "cannot transform an empty image: {size}"
        )));
    }

    let rotate_scale = rotation_scale_matrix(size.center(), params.angle, params.scale);
    log::debug!(
        "rotation {} deg, scale {} about {:?}: {:?}",
        params.angle,
        params.scale,
        size.center(),
        rotate_scale.coeffs()
    );

    let flip_horizontal = params
        .flip_horizontal
        .then(|| flip_horizontal_matrix(size));
    let flip_vertical = params.flip_vertical.then(|| flip_vertical_matrix(size));

    let perspective = if params.perspective {
        let (src, dst) = keystone_points(size);
        let h = homography_from_points(&src, &dst)?;
        log::debug!("keystone homography: {:?}", h.coeffs());
        Some(h)
    } else {
        None
    };

    Ok(TransformMatrices {
        rotate_scale,
        flip_horizontal,
        flip_vertical,
        perspective,
    })
}
