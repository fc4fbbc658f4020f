use crate::core::clash::ClashTable;
use crate::core::geometry::{place_carbonyl_oxygens, torsion_angles, validate_backbone_for_torsion};
use crate::core::models::chain::BackboneChain;
use crate::core::models::fragment::AngleFragment;
use crate::engine::builder::{BuildStatus, ChainBuilder};
use crate::engine::config::BuildConfig;
use crate::engine::error::BuildError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::fragments::pool::FragmentPool;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One finished conformer: the oxygen-decorated backbone and how its growth
/// terminated. An `Exhausted` status flags an explicitly partial chain.
#[derive(Debug, Clone)]
pub struct Conformer {
    pub index: usize,
    pub chain: BackboneChain,
    pub status: BuildStatus,
}

/// A per-request failure that did not abort the rest of the batch.
#[derive(Debug)]
pub struct ConformerFailure {
    pub index: usize,
    pub error: BuildError,
}

/// Outcome of a batch build request.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub conformers: Vec<Conformer>,
    pub failures: Vec<ConformerFailure>,
}

/// Builds `config.num_conformers` independent conformers from the pool.
///
/// Candidate windows are resolved once across every requested pattern; each
/// conformer then grows from its own seeded random stream, so batches are
/// reproducible given `config.rng_seed` and safe to run in parallel (enable
/// the `parallel` feature). Individual build failures are collected in the
/// report; only an empty candidate set fails the whole request.
#[instrument(skip_all, name = "build_workflow")]
pub fn run(
    config: &BuildConfig,
    pool: &FragmentPool,
    reporter: &ProgressReporter,
) -> Result<BuildReport, BuildError> {
    reporter.report(Progress::PhaseStart {
        name: "Resolving fragment candidates",
    });

    let candidates: Vec<AngleFragment> = config
        .patterns
        .iter()
        .flat_map(|pattern| pool.fragments_matching(pattern))
        .collect();

    info!(
        candidates = candidates.len(),
        patterns = config.patterns.len(),
        "Candidate window set resolved."
    );
    if candidates.is_empty() {
        return Err(BuildError::EmptyFragmentPool);
    }
    reporter.report(Progress::PhaseFinish);

    let clash_table = ClashTable::new();
    let base_seed = config.rng_seed.unwrap_or_else(rand::random);
    debug!(base_seed, "Using base seed for conformer batch.");

    reporter.report(Progress::BatchStart {
        total_conformers: config.num_conformers as u64,
    });

    let build_one = |index: usize| {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
        let result = ChainBuilder::new(config, &clash_table, &candidates)
            .build(&mut rng)
            .and_then(|outcome| {
                let chain = place_carbonyl_oxygens(&outcome.chain, &config.constants)
                    .map_err(|_| BuildError::DegenerateGeometry {
                        placed_atoms: outcome.chain.len(),
                        partial_chain: outcome.chain.clone(),
                    })?;
                Ok(Conformer {
                    index,
                    chain,
                    status: outcome.status,
                })
            });
        reporter.report(Progress::ConformerDone);
        (index, result)
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = (0..config.num_conformers).map(build_one).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<_> = (0..config.num_conformers)
        .into_par_iter()
        .map(build_one)
        .collect();

    reporter.report(Progress::BatchFinish);

    let mut report = BuildReport::default();
    for (index, result) in results {
        match result {
            Ok(conformer) => {
                if let BuildStatus::Exhausted { placed_residues } = conformer.status {
                    warn!(
                        index,
                        placed_residues,
                        target = config.sequence.chars().count(),
                        "Conformer terminated early; reporting an explicitly partial chain."
                    );
                }
                report.conformers.push(conformer);
            }
            Err(error) => {
                warn!(index, %error, "Conformer build failed.");
                report.failures.push(ConformerFailure { index, error });
            }
        }
    }

    audit_first_conformer(&report);

    info!(
        built = report.conformers.len(),
        failed = report.failures.len(),
        "Batch complete."
    );
    Ok(report)
}

/// Round-trip sanity audit: recover the torsions of the first completed
/// conformer through the calculator and log the result. Purely diagnostic.
fn audit_first_conformer(report: &BuildReport) {
    let Some(conformer) = report
        .conformers
        .iter()
        .find(|c| c.status == BuildStatus::Completed)
    else {
        return;
    };

    // The torsion calculator works on the bare backbone triplets; strip the
    // interleaved oxygens before the check.
    let backbone: Vec<_> = conformer
        .chain
        .coords()
        .iter()
        .zip(conformer.chain.labels())
        .filter(|(_, label)| label.canonical_index() < 3)
        .map(|(coord, _)| *coord)
        .collect();
    let labels: Vec<_> = conformer
        .chain
        .labels()
        .iter()
        .copied()
        .filter(|label| label.canonical_index() < 3)
        .collect();

    if let Some(diagnostic) = validate_backbone_for_torsion(&labels) {
        warn!(conformer = conformer.index, %diagnostic, "Backbone audit failed.");
        return;
    }
    match torsion_angles(&backbone) {
        Ok(angles) => debug!(
            conformer = conformer.index,
            torsions = angles.len(),
            "Torsion round-trip audit passed."
        ),
        Err(error) => warn!(conformer = conformer.index, %error, "Torsion audit failed."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::BackboneAtom;
    use crate::fragments::record::FragmentRecord;

    fn loop_pool(residues: usize) -> FragmentPool {
        let mut pool = FragmentPool::new();
        let records: Vec<FragmentRecord> = (0..residues)
            .map(|_| FragmentRecord {
                residue: 'A',
                label: 'L',
                x: 0.0,
                y: 0.0,
                z: 0.0,
                phi: (-139f64).to_radians(),
                psi: 135f64.to_radians(),
                omega: 175f64.to_radians(),
                chi1: 0.0,
            })
            .collect();
        pool.add_records("entry", &records);
        pool
    }

    fn config(sequence: &str, nconfs: usize) -> BuildConfig {
        BuildConfig::builder()
            .sequence(sequence)
            .pattern("L{2,6}".parse().unwrap())
            .num_conformers(nconfs)
            .rng_seed(99)
            .build()
            .unwrap()
    }

    #[test]
    fn batch_builds_the_requested_number_of_conformers() {
        let pool = loop_pool(6);
        let config = config("AGSVL", 3);

        let report = run(&config, &pool, &ProgressReporter::new()).unwrap();

        assert_eq!(report.conformers.len() + report.failures.len(), 3);
        for conformer in &report.conformers {
            if conformer.status == BuildStatus::Completed {
                // 5 residues with O on every non-terminal one.
                assert_eq!(conformer.chain.len(), 19);
                assert_eq!(conformer.chain.residue_count(), 5);
            }
        }
    }

    #[test]
    fn conformers_carry_interleaved_oxygens() {
        let pool = loop_pool(6);
        let config = config("AGS", 1);

        let report = run(&config, &pool, &ProgressReporter::new()).unwrap();

        let conformer = &report.conformers[0];
        let oxygens = conformer
            .chain
            .labels()
            .iter()
            .filter(|l| **l == BackboneAtom::O)
            .count();
        assert_eq!(oxygens, conformer.chain.residue_count() - 1);
    }

    #[test]
    fn no_matching_fragments_fail_the_whole_request() {
        let pool = FragmentPool::new();
        let config = config("AGSVL", 2);

        let result = run(&config, &pool, &ProgressReporter::new());

        assert!(matches!(result, Err(BuildError::EmptyFragmentPool)));
    }

    #[test]
    fn seeded_batches_are_reproducible() {
        let pool = loop_pool(6);
        let config = config("AGSVL", 2);

        let a = run(&config, &pool, &ProgressReporter::new()).unwrap();
        let b = run(&config, &pool, &ProgressReporter::new()).unwrap();

        assert_eq!(a.conformers.len(), b.conformers.len());
        for (x, y) in a.conformers.iter().zip(&b.conformers) {
            assert_eq!(x.chain, y.chain);
            assert_eq!(x.status, y.status);
        }
    }

    #[test]
    fn progress_events_bracket_the_batch() {
        use std::sync::Mutex;
        let pool = loop_pool(6);
        let config = config("AGS", 2);
        let events = Mutex::new(Vec::new());

        {
            let reporter = ProgressReporter::with_callback(Box::new(|p| {
                events.lock().unwrap().push(format!("{:?}", p));
            }));
            run(&config, &pool, &reporter).unwrap();
        }

        let seen = events.into_inner().unwrap();
        assert!(seen.iter().any(|e| e.contains("BatchStart")));
        assert_eq!(
            seen.iter().filter(|e| e.contains("ConformerDone")).count(),
            2
        );
        assert!(seen.last().is_some());
    }
}
