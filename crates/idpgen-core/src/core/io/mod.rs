//! # File I/O Module
//!
//! Serialization of finished backbone chains to fixed-column structure
//! records. Only the writer side lives in the core; identifier parsing and
//! remote retrieval are collaborator responsibilities outside this crate.

pub mod pdb;
