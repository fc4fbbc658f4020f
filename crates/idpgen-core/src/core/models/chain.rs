use super::atom::BackboneAtom;
use nalgebra::Point3;

/// An append-only, ordered sequence of labeled backbone atom positions.
///
/// Coordinates, atom labels, and residue indices are stored as parallel
/// vectors. The label sequence strictly follows the canonical per-residue
/// order (N, CA, C, optionally O), with a residue's index derived from its N
/// atom. Once appended, an atom is never mutated in place; the only way to
/// undo work is [`BackboneChain::truncate`], which rolls the chain back to a
/// prior length.
///
/// One chain is created empty per conformer-build request, grown monotonically
/// by the builder, and handed off complete (or explicitly partial) to the
/// serializer. Chains are not reused across requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackboneChain {
    coords: Vec<Point3<f64>>,
    labels: Vec<BackboneAtom>,
    residue_indices: Vec<usize>,
}

impl BackboneChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(atoms: usize) -> Self {
        Self {
            coords: Vec::with_capacity(atoms),
            labels: Vec::with_capacity(atoms),
            residue_indices: Vec::with_capacity(atoms),
        }
    }

    /// Appends one atom, deriving its residue index from the label cycle.
    ///
    /// An N opens a new residue; any other label belongs to the residue opened
    /// by the most recent N. The canonical intra-residue order is a debug
    /// invariant: violating it indicates a builder bug, not a data error.
    pub fn push_atom(&mut self, label: BackboneAtom, position: Point3<f64>) {
        let residue_index = match label {
            BackboneAtom::N => self.residue_indices.last().map_or(0, |r| r + 1),
            _ => {
                debug_assert!(
                    self.labels.last().is_some_and(|prev| {
                        prev.canonical_index() < label.canonical_index()
                    }),
                    "backbone label {} breaks the canonical N/CA/C/O cycle",
                    label
                );
                *self.residue_indices.last().unwrap_or(&0)
            }
        };
        self.coords.push(position);
        self.labels.push(label);
        self.residue_indices.push(residue_index);
    }

    /// Rolls the chain back to `len` atoms, discarding everything after.
    pub fn truncate(&mut self, len: usize) {
        self.coords.truncate(len);
        self.labels.truncate(len);
        self.residue_indices.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of residues opened so far (an N atom opens a residue).
    pub fn residue_count(&self) -> usize {
        self.residue_indices.last().map_or(0, |r| r + 1)
    }

    pub fn coords(&self) -> &[Point3<f64>] {
        &self.coords
    }

    pub fn labels(&self) -> &[BackboneAtom] {
        &self.labels
    }

    pub fn residue_indices(&self) -> &[usize] {
        &self.residue_indices
    }

    /// The three most recently placed positions, oldest last, if at least
    /// three atoms exist. Growth references these as (parent, x-axis point,
    /// y-axis point) = (last, second-last, third-last).
    pub fn last_three(&self) -> Option<(Point3<f64>, Point3<f64>, Point3<f64>)> {
        if self.coords.len() < 3 {
            return None;
        }
        let n = self.coords.len();
        Some((self.coords[n - 1], self.coords[n - 2], self.coords[n - 3]))
    }
}
