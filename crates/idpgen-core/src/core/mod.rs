//! # Core Module
//!
//! This module provides the fundamental building blocks and algorithms for
//! backbone conformer assembly, serving as the computational core of the
//! library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the problem:
//!
//! - **Molecular Representation** ([`models`]) - Backbone atoms, chains, and
//!   torsion-angle fragments
//! - **Physical Parameters** ([`constants`]) - Immutable bond-geometry
//!   constants shared by every build
//! - **Geometric Kernel** ([`geometry`]) - Internal-to-Cartesian placement,
//!   reference frames, and torsion (dihedral) calculation
//! - **Steric Validation** ([`clash`]) - Van der Waals hard-sphere overlap
//!   predicates over atom groups
//! - **File I/O** ([`io`]) - Fixed-column structure-file output
//!
//! Everything in this layer is a pure function over immutable inputs or an
//! owned value with explicit, append-only mutation; nothing performs I/O
//! except [`io`] itself.

pub mod clash;
pub mod constants;
pub mod geometry;
pub mod io;
pub mod models;
