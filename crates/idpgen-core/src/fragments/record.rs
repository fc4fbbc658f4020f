use serde::Deserialize;

/// One residue's flat numeric record as stored in the fragment database.
///
/// A database file carries one comma-separated record per residue, in chain
/// order: the one-letter residue code, the secondary-structure class letter,
/// the alpha-carbon position, the three backbone torsions (radians), and the
/// first side-chain torsion. The coordinate and chi1 fields are part of the
/// storage contract and are carried through loading, but conformer assembly
/// consumes only the torsions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FragmentRecord {
    pub residue: char,
    pub label: char,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
    pub chi1: f64,
}
