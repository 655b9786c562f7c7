//! Text rendering of the applied matrices and the fixed formula sheet.

use std::fmt;

use crate::{
    builder::TransformMatrices,
    matrix::{AffineMatrix, Homography},
};

// avoid printing `-0.0000`
fn clean(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, coeffs: &[f64], cols: usize) -> fmt::Result {
    write!(f, "[")?;
    for (r, row) in coeffs.chunks_exact(cols).enumerate() {
        if r > 0 {
            write!(f, "\n ")?;
        }
        write!(f, "[")?;
        for (c, v) in row.iter().enumerate() {
            if c > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:9.4}", clean(*v))?;
        }
        write!(f, "]")?;
    }
    write!(f, "]")
}

impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.coeffs(), 3)
    }
}

impl fmt::Display for Homography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.coeffs(), 3)
    }
}

/// One labelled matrix of a [`TransformReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    /// Human readable name including the matrix shape.
    pub label: &'static str,
    /// The rendered matrix.
    pub matrix: String,
}

/// The matrices that were applied, labelled and rendered as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformReport {
    entries: Vec<ReportEntry>,
}

impl TransformReport {
    /// Label and render the matrices in application order. Stages that were
    /// not applied are skipped.
    pub fn new(matrices: &TransformMatrices) -> Self {
        let mut entries = vec![ReportEntry {
            label: "Rotation + scale matrix (2x3)",
            matrix: matrices.rotate_scale.to_string(),
        }];

        if let Some(m) = &matrices.flip_horizontal {
            entries.push(ReportEntry {
                label: "Horizontal flip matrix (2x3)",
                matrix: m.to_string(),
            });
        }
        if let Some(m) = &matrices.flip_vertical {
            entries.push(ReportEntry {
                label: "Vertical flip matrix (2x3)",
                matrix: m.to_string(),
            });
        }
        if let Some(h) = &matrices.perspective {
            entries.push(ReportEntry {
                label: "Perspective matrix (3x3)",
                matrix: h.to_string(),
            });
        }

        Self { entries }
    }

    /// The labelled matrices.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl fmt::Display for TransformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", entry.label)?;
            writeln!(f, "{}", entry.matrix)?;
        }
        Ok(())
    }
}

/// A static explanation of one transform stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formula {
    /// Stage name.
    pub title: &'static str,
    /// LaTeX source of the matrix.
    pub latex: &'static str,
    /// One sentence explanation.
    pub description: &'static str,
}

/// The formula sheet, in application order. Not derived from any input.
pub const FORMULAS: [Formula; 4] = [
    Formula {
        title: "Rotation + scale",
        latex: r"\text{Affine matrix} = \begin{bmatrix} s \cdot \cos\theta & -s \cdot \sin\theta & t_x \\ s \cdot \sin\theta & s \cdot \cos\theta & t_y \end{bmatrix}",
        description: "Rotates about the image center and scales uniformly.",
    },
    Formula {
        title: "Horizontal flip",
        latex: r"\begin{bmatrix} -1 & 0 & W \\ 0 & 1 & 0 \end{bmatrix}",
        description: "Mirrors x and shifts by the width W so the image stays in view.",
    },
    Formula {
        title: "Vertical flip",
        latex: r"\begin{bmatrix} 1 & 0 & 0 \\ 0 & -1 & H \end{bmatrix}",
        description: "Mirrors y and shifts by the height H so the image stays in view.",
    },
    Formula {
        title: "Perspective",
        latex: r"\mathbf{x'} = H \cdot \mathbf{x} \quad \text{(H is a 3x3 perspective matrix)}",
        description: "A projective map that adds a keystone depth effect.",
    },
];
