use super::GeometryError;
use super::frame::axis_vectors;
use nalgebra::{Point3, Vector3};

/// Places one new atom from internal coordinates (natural extension reference
/// frame step).
///
/// `bend` is the complement of the bond angle at `parent` (callers supply
/// pi - bondAngle), `torsion` the dihedral about the parent / x-point / y-point
/// plane, and `distance` the bond length from `parent` to the new atom. The
/// local offset
///
/// ```text
/// (d * cos(bend), d * sin(bend) * cos(torsion), d * sin(bend) * sin(torsion))
/// ```
///
/// is rotated into the frame anchored at `parent` and translated by `parent`.
///
/// The three reference points must be mutually distinct and non-collinear;
/// otherwise the frame is degenerate and `GeometryError::DegenerateFrame` is
/// returned. The error is fatal to the build that produced the points: a
/// degenerate frame never yields a coordinate.
pub fn place_atom(
    bend: f64,
    torsion: f64,
    distance: f64,
    parent: &Point3<f64>,
    x_point: &Point3<f64>,
    y_point: &Point3<f64>,
) -> Result<Point3<f64>, GeometryError> {
    let frame = axis_vectors(parent, x_point, y_point);
    if frame.is_degenerate() {
        return Err(GeometryError::DegenerateFrame);
    }

    let offset = Vector3::new(
        distance * bend.cos(),
        distance * bend.sin() * torsion.cos(),
        distance * bend.sin() * torsion.sin(),
    );

    Ok(parent + frame.rotation() * offset)
}
