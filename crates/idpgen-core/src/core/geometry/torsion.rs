use super::GeometryError;
use crate::core::models::atom::BackboneAtom;
use itertools::Itertools;
use nalgebra::{Point3, Vector3};

/// Computes the signed torsion (dihedral) angles of a sequential coordinate
/// chain, one per interior bond: `N - 3` angles for `N >= 4` points.
///
/// For each interior bond the angle between the plane of the preceding three
/// atoms and the plane of the following three is resolved in sign via `atan2`
/// of the projections of adjacent plane normals onto each other and onto the
/// unit bond vector. The sign convention is exactly the one consumed by
/// [`super::place_atom`]: a chain grown from a torsion sequence reproduces
/// that sequence here.
///
/// If a protein backbone of N, CA, C atoms starts at the N-terminal, the
/// returned angles interleave as psi, omega, phi, psi, omega, phi, ...
pub fn torsion_angles(coords: &[Point3<f64>]) -> Result<Vec<f64>, GeometryError> {
    if coords.len() < 4 {
        return Err(GeometryError::InsufficientPoints {
            actual: coords.len(),
        });
    }

    let bonds: Vec<Vector3<f64>> = coords.iter().tuple_windows().map(|(a, b)| b - a).collect();

    let angles = bonds
        .iter()
        .tuple_windows()
        .map(|(q0, q1, q2)| {
            let u0 = q0.cross(q1).normalize();
            let u1 = q1.cross(q2).normalize();
            let u2 = q1.normalize().cross(&u1);
            -(u0.dot(&u2)).atan2(u0.dot(&u1))
        })
        .collect();

    Ok(angles)
}

/// Advisory pre-validation for backbone arrays destined for torsion
/// calculation: the first atom must be an N and the atom count a multiple of
/// three (one N/CA/C triplet per residue, oxygens excluded).
///
/// Returns a diagnostic message when the layout is unusable, `None` when it
/// is valid. Database tooling reports the diagnostic instead of failing hard.
pub fn validate_backbone_for_torsion(labels: &[BackboneAtom]) -> Option<String> {
    if labels.first() != Some(&BackboneAtom::N) {
        return Some("The first atom is not N, it should be!".to_string());
    }
    if labels.len() % 3 != 0 {
        return Some("Number of backbone atoms is not a multiple of 3.".to_string());
    }
    None
}
