use crate::core::models::chain::BackboneChain;
use thiserror::Error;

/// Why a conformer-build request failed.
///
/// A request either yields a complete, clash-free chain, an explicitly
/// flagged partial chain, or one of these named failures; never a silently
/// invalid structure.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No fragments in the pool match the requested patterns. Recoverable at
    /// the request level by widening the pattern.
    #[error("no fragments match the requested secondary-structure patterns")]
    EmptyFragmentPool,

    /// The geometry kernel reported a degenerate reference frame. Fatal to
    /// this build; the chain up to the last successfully placed atom is
    /// retained for diagnostic inspection.
    #[error("degenerate reference frame after placing {placed_atoms} atoms")]
    DegenerateGeometry {
        placed_atoms: usize,
        partial_chain: BackboneChain,
    },

    /// Every candidate fragment drawn for one growth step clashed with the
    /// settled chain. The build is stuck; reported to the caller as a
    /// per-request failure, not fatal to the process.
    #[error("exceeded {max_retries} clash-rejection retries in a single growth step")]
    RetriesExhausted { max_retries: usize },
}
