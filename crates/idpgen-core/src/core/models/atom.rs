use std::fmt;
use std::str::FromStr;

/// Identifies one kind of backbone atom.
///
/// A residue's canonical backbone order is N, CA, C, O; the carbonyl oxygen is
/// optional (it is added by a dedicated post-pass and is absent from a chain
/// that is still growing). The enum discriminants follow the canonical order
/// so that [`BackboneAtom::canonical_index`] can index fixed 4-wide tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackboneAtom {
    /// Backbone amide nitrogen.
    N,
    /// Alpha carbon.
    Ca,
    /// Carbonyl carbon.
    C,
    /// Carbonyl oxygen.
    O,
}

impl BackboneAtom {
    /// The canonical per-residue atom order.
    pub const CANONICAL_ORDER: [BackboneAtom; 4] =
        [BackboneAtom::N, BackboneAtom::Ca, BackboneAtom::C, BackboneAtom::O];

    /// Position of this atom kind in the canonical per-residue order.
    pub fn canonical_index(self) -> usize {
        match self {
            BackboneAtom::N => 0,
            BackboneAtom::Ca => 1,
            BackboneAtom::C => 2,
            BackboneAtom::O => 3,
        }
    }

    /// Hard-sphere van der Waals radius in Angstroms, used for clash testing.
    pub fn vdw_radius(self) -> f64 {
        match self {
            BackboneAtom::N => 1.55,
            BackboneAtom::Ca => 1.70,
            BackboneAtom::C => 1.70,
            BackboneAtom::O => 1.52,
        }
    }

    /// PDB-style atom name.
    pub fn name(self) -> &'static str {
        match self {
            BackboneAtom::N => "N",
            BackboneAtom::Ca => "CA",
            BackboneAtom::C => "C",
            BackboneAtom::O => "O",
        }
    }

    /// Element symbol.
    pub fn element(self) -> &'static str {
        match self {
            BackboneAtom::N => "N",
            BackboneAtom::Ca | BackboneAtom::C => "C",
            BackboneAtom::O => "O",
        }
    }
}

impl fmt::Display for BackboneAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackboneAtom {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" => Ok(BackboneAtom::N),
            "CA" => Ok(BackboneAtom::Ca),
            "C" => Ok(BackboneAtom::C),
            "O" => Ok(BackboneAtom::O),
            _ => Err(()),
        }
    }
}
