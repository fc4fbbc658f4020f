//! # Workflows Module
//!
//! High-level entry points that tie the fragment pool, the growth engine, and
//! the core geometry together into complete procedures. A workflow handles
//! candidate resolution, per-conformer randomness, progress reporting, and
//! result organization, and is the API front ends are expected to call.

pub mod build;
