//! # Engine Module
//!
//! The stateful chain-growth layer: a builder owns one growing
//! [`crate::core::models::chain::BackboneChain`] per conformer request and
//! drives it from the deterministic seed through fragment consumption to a
//! typed terminal state, with a clash gate and rollback between fragments.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Build parameters with a validating
//!   builder
//! - **Growth** ([`builder`]) - The seeding / growing / terminal state machine
//! - **Sampling** ([`sampling`]) - Injectable uniform fragment draws
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Build failure taxonomy
//!
//! Nothing in the engine blocks or performs I/O; shared inputs (constants,
//! clash table, candidate fragments) are immutable, so independent requests
//! can run in parallel while each chain stays exclusively owned by its
//! builder.

pub mod builder;
pub mod config;
pub mod error;
pub mod progress;
pub mod sampling;
