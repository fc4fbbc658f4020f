//! # Steric Validation Module
//!
//! Hard-sphere overlap detection between two disjoint groups of placed
//! backbone atoms: a "settled" group (the accepted chain prefix) and a "new"
//! group (the segment just appended and under validation). Two algorithmically
//! distinct but semantically identical predicates are provided (a batched
//! full-matrix form, and an incremental residue-by-residue form with early
//! exit) as independently verifiable implementations of one contract.
//!
//! The predicates must only be applied to groups that are not covalently
//! bonded to each other: the caller's windowing excludes the residues at the
//! settled/new boundary (see the chain builder).

mod table;
mod validator;

pub use table::ClashTable;
pub use validator::{AtomGroup, has_clash_batched, has_clash_incremental};
