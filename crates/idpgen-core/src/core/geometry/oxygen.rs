use super::GeometryError;
use super::placement::place_atom;
use crate::core::constants::BondGeometryConstants;
use crate::core::models::atom::BackboneAtom;
use crate::core::models::chain::BackboneChain;
use std::f64::consts::PI;

/// Decorates a grown N/CA/C backbone with carbonyl oxygens, returning a new
/// chain with each residue's O appended after its C.
///
/// The oxygen is placed in the peptide plane, on the opposite side from the
/// alpha carbon, by anchoring the frame at C toward the next residue's N and
/// rotating half a turn out of the C / N-next / CA plane: that pins the
/// N-C-O bend angle and peptide-plane coplanarity, which together determine
/// the CA-C-O angle. The final residue has no successor nitrogen and keeps a
/// bare C terminus.
///
/// The input must be a pure backbone (N, CA, C cycle); a degenerate frame at
/// any carbonyl site aborts with `GeometryError::DegenerateFrame`.
pub fn place_carbonyl_oxygens(
    chain: &BackboneChain,
    constants: &BondGeometryConstants,
) -> Result<BackboneChain, GeometryError> {
    debug_assert!(
        chain.len() % 3 == 0
            && !chain.labels().contains(&BackboneAtom::O),
        "carbonyl pass expects a bare N/CA/C backbone"
    );

    let coords = chain.coords();
    let residues = chain.len() / 3;
    let mut decorated = BackboneChain::with_capacity(chain.len() + residues.saturating_sub(1));

    for r in 0..residues {
        let n = coords[3 * r];
        let ca = coords[3 * r + 1];
        let c = coords[3 * r + 2];

        decorated.push_atom(BackboneAtom::N, n);
        decorated.push_atom(BackboneAtom::Ca, ca);
        decorated.push_atom(BackboneAtom::C, c);

        if r + 1 < residues {
            let next_n = coords[3 * (r + 1)];
            let o = place_atom(
                PI - constants.angle_n_c_o,
                PI,
                constants.bond_c_o,
                &c,
                &next_n,
                &ca,
            )?;
            decorated.push_atom(BackboneAtom::O, o);
        }
    }

    Ok(decorated)
}
