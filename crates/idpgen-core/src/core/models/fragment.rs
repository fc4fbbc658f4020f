use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-residue secondary-structure classification driving fragment selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SsClass {
    Loop,
    Helix,
    Strand,
}

impl SsClass {
    /// Parses a single-letter DSSP-style class code.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(SsClass::Loop),
            'H' => Some(SsClass::Helix),
            'S' => Some(SsClass::Strand),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SsClass::Loop => 'L',
            SsClass::Helix => 'H',
            SsClass::Strand => 'S',
        }
    }
}

impl fmt::Display for SsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown secondary-structure class '{0}'")]
pub struct UnknownSsClass(pub char);

impl FromStr for SsClass {
    type Err = UnknownSsClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => SsClass::from_char(c).ok_or(UnknownSsClass(c)),
            _ => Err(UnknownSsClass(s.chars().next().unwrap_or('?'))),
        }
    }
}

/// One residue's (phi, psi, omega) backbone torsion triple, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionTriple {
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
}

/// A contiguous run of same-class residues' torsion triples, the unit drawn
/// during chain growth.
///
/// Fragments are immutable once created. `source` identifies the database
/// entry the run came from, `start` the residue offset of this window within
/// it, and `residues` the one-letter residue sequence covered by the window.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleFragment {
    pub source: String,
    pub start: usize,
    pub class: SsClass,
    pub residues: String,
    pub torsions: Vec<TorsionTriple>,
}

impl AngleFragment {
    /// Number of residues spanned by this fragment.
    pub fn len(&self) -> usize {
        self.torsions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.torsions.is_empty()
    }

    /// Flattens the triples into the torsion sequence a builder can actually
    /// consume, discarding the boundary entries that lack full four-atom
    /// support: the leading phi (no preceding carbonyl carbon) and the
    /// trailing psi and omega (no following nitrogen or alpha carbon).
    ///
    /// For a fragment of `k` residues this yields `3 * (k - 1)` torsions in
    /// placement order: psi(0), omega(0), phi(1), psi(1), omega(1), ...,
    /// phi(k-1). A single-residue fragment yields nothing.
    pub fn interior_torsions(&self) -> Vec<f64> {
        let flat: Vec<f64> = self
            .torsions
            .iter()
            .flat_map(|t| [t.phi, t.psi, t.omega])
            .collect();
        if flat.len() < 3 {
            return Vec::new();
        }
        flat[1..flat.len() - 2].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(phi: f64, psi: f64, omega: f64) -> TorsionTriple {
        TorsionTriple { phi, psi, omega }
    }

    fn fragment(torsions: Vec<TorsionTriple>) -> AngleFragment {
        AngleFragment {
            source: "test".to_string(),
            start: 0,
            class: SsClass::Loop,
            residues: "A".repeat(torsions.len()),
            torsions,
        }
    }

    #[test]
    fn interior_torsions_drop_leading_phi_and_trailing_psi_omega() {
        let frag = fragment(vec![
            triple(1.0, 2.0, 3.0),
            triple(4.0, 5.0, 6.0),
            triple(7.0, 8.0, 9.0),
        ]);

        assert_eq!(frag.interior_torsions(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn two_residue_fragment_yields_three_torsions() {
        let frag = fragment(vec![triple(1.0, 2.0, 3.0), triple(4.0, 5.0, 6.0)]);

        assert_eq!(frag.interior_torsions(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn single_residue_fragment_yields_no_torsions() {
        let frag = fragment(vec![triple(1.0, 2.0, 3.0)]);

        assert!(frag.interior_torsions().is_empty());
    }

    #[test]
    fn ss_class_round_trips_letters() {
        for letter in ['L', 'H', 'S'] {
            let class = SsClass::from_char(letter).unwrap();
            assert_eq!(class.letter(), letter);
            assert_eq!(letter.to_string().parse::<SsClass>(), Ok(class));
        }
        assert_eq!(SsClass::from_char('X'), None);
        assert_eq!("X".parse::<SsClass>(), Err(UnknownSsClass('X')));
    }
}
