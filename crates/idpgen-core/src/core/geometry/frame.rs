use nalgebra::{Matrix3, Point3, Vector3};

/// Orthonormal right-handed frame derived from three ordered points A, B, C.
///
/// `x_axis` points from B toward A, `normal` is perpendicular to the ABC
/// plane, and `perp` completes the frame. When the inputs are collinear or
/// coincident the affected vectors are returned un-normalized (zero length)
/// rather than raising; callers must treat that as a degenerate-geometry
/// signal and abort the placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub normal: Vector3<f64>,
    pub x_axis: Vector3<f64>,
    pub perp: Vector3<f64>,
}

impl LocalFrame {
    /// True when any frame vector could not be normalized.
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm() == 0.0 || self.x_axis.norm() == 0.0 || self.perp.norm() == 0.0
    }

    /// Rotation mapping the canonical basis into this frame, as columns
    /// (x_axis, -perp, normal).
    pub fn rotation(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.x_axis, -self.perp, self.normal])
    }
}

fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len > 0.0 { v / len } else { v }
}

/// Builds the local frame for connected points A -> B -> C.
pub fn axis_vectors(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> LocalFrame {
    let ab = a - b;
    let normal = ab.cross(&(c - b));
    let perp = ab.cross(&normal);

    LocalFrame {
        normal: normalize_or_zero(normal),
        x_axis: normalize_or_zero(ab),
        perp: normalize_or_zero(perp),
    }
}

/// Rotation that maps the canonical orthonormal basis to the local frame
/// anchored at A, with the x-axis toward B's side and the ABC plane normal as
/// the third axis.
pub fn rotation_to_frame(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Matrix3<f64> {
    axis_vectors(a, b, c).rotation()
}
