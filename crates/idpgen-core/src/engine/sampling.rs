use crate::core::models::fragment::AngleFragment;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Candidate fragment set is empty, cannot draw")]
    EmptyCandidates,
}

/// Draws one fragment uniformly at random from the candidate window set.
///
/// Randomness is injected by the caller so builds stay deterministic and
/// testable under a seeded source.
pub fn draw_fragment<'a>(
    candidates: &'a [AngleFragment],
    rng: &mut impl Rng,
) -> Result<&'a AngleFragment, SamplingError> {
    candidates.choose(rng).ok_or(SamplingError::EmptyCandidates)
}
