use super::table::ClashTable;
use crate::core::models::atom::BackboneAtom;
use nalgebra::{DMatrix, Point3};

/// A borrowed view of one group of placed atoms: parallel coordinate and
/// label slices. Residue boundaries are implied by the label cycle; every N
/// opens a new residue block.
#[derive(Debug, Clone, Copy)]
pub struct AtomGroup<'a> {
    coords: &'a [Point3<f64>],
    labels: &'a [BackboneAtom],
}

impl<'a> AtomGroup<'a> {
    pub fn new(coords: &'a [Point3<f64>], labels: &'a [BackboneAtom]) -> Self {
        debug_assert_eq!(coords.len(), labels.len());
        Self { coords, labels }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Half-open atom-index ranges of the residue blocks in this group. The
    /// first block starts at 0 even if the group begins mid-residue; a
    /// terminal residue may legitimately contribute only three atoms.
    fn residue_blocks(&self) -> Vec<(usize, usize)> {
        let mut blocks = Vec::new();
        let mut start = 0;
        for (i, label) in self.labels.iter().enumerate() {
            if *label == BackboneAtom::N && i != 0 {
                blocks.push((start, i));
                start = i;
            }
        }
        if start < self.labels.len() {
            blocks.push((start, self.labels.len()));
        }
        blocks
    }
}

/// Batched clash test: builds the full pairwise Euclidean distance matrix
/// between the two groups and the matching allowed-distance matrix tiled from
/// the radius-sum table, and reports whether any pair is strictly closer than
/// allowed.
pub fn has_clash_batched(settled: &AtomGroup, new: &AtomGroup, table: &ClashTable) -> bool {
    if settled.is_empty() || new.is_empty() {
        return false;
    }

    let distances = DMatrix::from_fn(settled.len(), new.len(), |i, j| {
        (settled.coords[i] - new.coords[j]).norm()
    });
    let allowed = DMatrix::from_fn(settled.len(), new.len(), |i, j| {
        table.allowed_distance(settled.labels[i], new.labels[j])
    });

    distances
        .iter()
        .zip(allowed.iter())
        .any(|(distance, limit)| distance < limit)
}

/// Incremental clash test: walks settled residue blocks against new residue
/// blocks, comparing each local distance block against the matching slice of
/// the radius-sum table, and short-circuits on the first violation.
///
/// Equivalent to [`has_clash_batched`] for identical inputs; the two exist as
/// independently verifiable implementations of the same predicate.
pub fn has_clash_incremental(settled: &AtomGroup, new: &AtomGroup, table: &ClashTable) -> bool {
    for (s_start, s_end) in settled.residue_blocks() {
        for (n_start, n_end) in new.residue_blocks() {
            for i in s_start..s_end {
                for j in n_start..n_end {
                    let distance = (settled.coords[i] - new.coords[j]).norm();
                    if distance < table.allowed_distance(settled.labels[i], new.labels[j]) {
                        return true;
                    }
                }
            }
        }
    }
    false
}
