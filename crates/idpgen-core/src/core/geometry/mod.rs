//! # Geometric Kernel
//!
//! Pure vector-math primitives for backbone construction: local reference
//! frames, the internal-to-Cartesian placement step (natural extension
//! reference frame), its inverse (signed torsion angles from coordinates),
//! and the carbonyl-oxygen post-pass. No state, no I/O.

mod frame;
mod oxygen;
mod placement;
mod torsion;

pub use frame::{LocalFrame, axis_vectors, rotation_to_frame};
pub use oxygen::place_carbonyl_oxygens;
pub use placement::place_atom;
pub use torsion::{torsion_angles, validate_backbone_for_torsion};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GeometryError {
    /// Collinear or coincident reference points produced an unnormalizable
    /// frame vector. Fatal to the current build; never retried.
    #[error("degenerate reference frame: collinear or coincident reference points")]
    DegenerateFrame,

    /// Malformed input to the torsion calculator.
    #[error("torsion calculation requires at least 4 points, got {actual}")]
    InsufficientPoints { actual: usize },
}
