use super::config::BuildConfig;
use super::error::BuildError;
use super::sampling;
use crate::core::clash::{AtomGroup, ClashTable, has_clash_incremental};
use crate::core::constants::BondGeometryConstants;
use crate::core::geometry::place_atom;
use crate::core::models::atom::BackboneAtom;
use crate::core::models::chain::BackboneChain;
use crate::core::models::fragment::AngleFragment;
use nalgebra::Point3;
use rand::Rng;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// How a finished build terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The atom budget implied by the target sequence was filled exactly.
    Completed,
    /// The drawn fragment could not fit within the remaining atom budget;
    /// its partially appended atoms were rolled back to the last fragment
    /// boundary and growth stopped. The chain holds `placed_residues`
    /// complete residues, fewer than the target.
    Exhausted { placed_residues: usize },
}

/// A finished (complete or explicitly partial) backbone, plus how it ended.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub chain: BackboneChain,
    pub status: BuildStatus,
}

/// The repeating per-atom (bond length, bend complement) constants consumed
/// during growth: C->N, N->CA, CA->C, indexed modulo three by the atom's
/// position in the chain. An index computation over an immutable table, so a
/// rollback needs no counter bookkeeping.
#[derive(Debug, Clone)]
struct BondCycle {
    table: [(f64, f64); 3],
}

impl BondCycle {
    fn new(constants: &BondGeometryConstants) -> Self {
        Self {
            table: [
                (constants.bond_c_n, PI - constants.angle_ca_c_n),
                (constants.bond_n_ca, PI - constants.angle_c_n_ca),
                (constants.bond_ca_c, PI - constants.angle_n_ca_c),
            ],
        }
    }

    /// Constants for the atom at `atom_index`; the seed places atoms 0..3
    /// outside the cycle.
    fn for_atom(&self, atom_index: usize) -> (f64, f64) {
        self.table[(atom_index - 3) % 3]
    }
}

enum Append {
    Placed,
    Overflow,
    Degenerate,
}

enum StepOutcome {
    Advanced,
    Exhausted,
}

/// Grows one backbone chain from the deterministic seed to a terminal state.
///
/// States: Seeded -> Growing -> {Completed, Exhausted, Degenerate, Stuck}.
/// The builder exclusively owns its chain; every shared input is immutable.
/// After each fragment is appended the new segment is checked against the
/// settled chain (minus the covalent boundary window) and rolled back on a
/// clash, bounded by the configured per-step retry budget.
pub struct ChainBuilder<'a> {
    config: &'a BuildConfig,
    clash_table: &'a ClashTable,
    candidates: &'a [AngleFragment],
    cycle: BondCycle,
    chain: BackboneChain,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(
        config: &'a BuildConfig,
        clash_table: &'a ClashTable,
        candidates: &'a [AngleFragment],
    ) -> Self {
        let budget = config.atom_budget();
        Self {
            config,
            clash_table,
            candidates,
            cycle: BondCycle::new(&config.constants),
            chain: BackboneChain::with_capacity(budget),
        }
    }

    /// Runs the build to a terminal state, consuming the builder.
    pub fn build(mut self, rng: &mut impl Rng) -> Result<BuildOutcome, BuildError> {
        if self.candidates.is_empty() {
            return Err(BuildError::EmptyFragmentPool);
        }

        let budget = self.config.atom_budget();
        self.seed()?;

        while self.chain.len() < budget {
            match self.grow_step(budget, rng)? {
                StepOutcome::Advanced => {}
                StepOutcome::Exhausted => {
                    let placed_residues = self.chain.len() / 3;
                    debug!(
                        placed_residues,
                        target = self.config.sequence.chars().count(),
                        "Growth exhausted at a fragment boundary."
                    );
                    return Ok(BuildOutcome {
                        chain: self.chain,
                        status: BuildStatus::Exhausted { placed_residues },
                    });
                }
            }
        }

        debug!(atoms = self.chain.len(), "Chain completed.");
        Ok(BuildOutcome {
            chain: self.chain,
            status: BuildStatus::Completed,
        })
    }

    /// Places the first residue deterministically, without consulting any
    /// fragment: N at the origin, CA on the x-axis at the N-CA bond length,
    /// and C from the bend angle with a null torsion against a dummy y-axis
    /// reference.
    fn seed(&mut self) -> Result<(), BuildError> {
        let constants = &self.config.constants;
        let n = Point3::origin();
        let ca = Point3::new(constants.bond_n_ca, 0.0, 0.0);
        let dummy = Point3::new(0.0, constants.bond_n_ca, 0.0);

        self.chain.push_atom(BackboneAtom::N, n);
        self.chain.push_atom(BackboneAtom::Ca, ca);

        match place_atom(
            PI - constants.angle_n_ca_c,
            0.0,
            constants.bond_ca_c,
            &ca,
            &n,
            &dummy,
        ) {
            Ok(c) => {
                self.chain.push_atom(BackboneAtom::C, c);
                Ok(())
            }
            Err(_) => Err(self.degenerate())
        }
    }

    /// One growth step: draw, append, gate; redraw on clash up to the retry
    /// bound, after which the build is stuck.
    fn grow_step(
        &mut self,
        budget: usize,
        rng: &mut impl Rng,
    ) -> Result<StepOutcome, BuildError> {
        let pre_len = self.chain.len();

        for attempt in 0..=self.config.max_retries_per_step {
            let fragment = sampling::draw_fragment(self.candidates, rng)
                .map_err(|_| BuildError::EmptyFragmentPool)?;
            if fragment.len() < 2 {
                // Cannot contribute interior torsions; drawing it again will
                // not help, but the retry bound keeps this finite.
                trace!(source = %fragment.source, "Skipping sub-minimal fragment.");
                continue;
            }

            match self.append_fragment(fragment, budget) {
                Append::Placed => {
                    if self.segment_clashes(pre_len) {
                        trace!(
                            attempt,
                            source = %fragment.source,
                            "Fragment rejected by the clash gate; rolling back."
                        );
                        self.chain.truncate(pre_len);
                        continue;
                    }
                    return Ok(StepOutcome::Advanced);
                }
                Append::Overflow => {
                    self.chain.truncate(pre_len);
                    return Ok(StepOutcome::Exhausted);
                }
                Append::Degenerate => return Err(self.degenerate()),
            }
        }

        Err(BuildError::RetriesExhausted {
            max_retries: self.config.max_retries_per_step,
        })
    }

    /// Appends every interior torsion of `fragment`, one atom per torsion,
    /// cycling through the bond constants and referencing the three most
    /// recently placed atoms. Checks the budget before each placement.
    fn append_fragment(&mut self, fragment: &AngleFragment, budget: usize) -> Append {
        for torsion in fragment.interior_torsions() {
            if self.chain.len() >= budget {
                return Append::Overflow;
            }

            let atom_index = self.chain.len();
            let (bond_length, bend) = self.cycle.for_atom(atom_index);
            let (parent, x_point, y_point) = self.chain.last_three().unwrap();

            match place_atom(bend, torsion, bond_length, &parent, &x_point, &y_point) {
                Ok(position) => {
                    let label = BackboneAtom::CANONICAL_ORDER[atom_index % 3];
                    self.chain.push_atom(label, position);
                }
                Err(_) => return Append::Degenerate,
            }
        }
        Append::Placed
    }

    /// Clash gate between the settled chain and the segment appended since
    /// `pre_len`, with covalent-boundary windowing: the last two settled
    /// residues and the first new residue are excluded so that no pair
    /// across the peptide bond (or within one residue) is ever compared.
    fn segment_clashes(&self, pre_len: usize) -> bool {
        debug_assert!(pre_len % 3 == 0 && self.chain.len() % 3 == 0);
        let settled_residues = pre_len / 3;
        let new_residues = (self.chain.len() - pre_len) / 3;
        if settled_residues <= 2 || new_residues <= 1 {
            return false;
        }

        let settled_end = (settled_residues - 2) * 3;
        let new_start = pre_len + 3;
        let coords = self.chain.coords();
        let labels = self.chain.labels();
        let settled = AtomGroup::new(&coords[..settled_end], &labels[..settled_end]);
        let fresh = AtomGroup::new(&coords[new_start..], &labels[new_start..]);

        has_clash_incremental(&settled, &fresh, self.clash_table)
    }

    fn degenerate(&mut self) -> BuildError {
        let partial_chain = std::mem::take(&mut self.chain);
        BuildError::DegenerateGeometry {
            placed_atoms: partial_chain.len(),
            partial_chain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::torsion_angles;
    use crate::core::models::fragment::{SsClass, TorsionTriple};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fragment(torsions: &[(f64, f64, f64)]) -> AngleFragment {
        AngleFragment {
            source: "synthetic".to_string(),
            start: 0,
            class: SsClass::Loop,
            residues: "A".repeat(torsions.len()),
            torsions: torsions
                .iter()
                .map(|(phi, psi, omega)| TorsionTriple {
                    phi: phi.to_radians(),
                    psi: psi.to_radians(),
                    omega: omega.to_radians(),
                })
                .collect(),
        }
    }

    /// A three-residue extended (beta-like) fragment that never folds back.
    fn extended_fragment() -> AngleFragment {
        fragment(&[
            (-139.0, 135.0, 175.0),
            (-139.0, 135.0, 175.0),
            (-139.0, 135.0, 175.0),
        ])
    }

    /// A three-residue fragment with all-zero torsions: the chain curls into
    /// a tight ring and reliably collides with the settled prefix.
    fn curling_fragment() -> AngleFragment {
        fragment(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 0.0)])
    }

    fn config(sequence: &str) -> BuildConfig {
        BuildConfig::builder()
            .sequence(sequence)
            .pattern("L{2,6}".parse().unwrap())
            .max_retries_per_step(8)
            .build()
            .unwrap()
    }

    fn build(
        config: &BuildConfig,
        candidates: &[AngleFragment],
        seed: u64,
    ) -> Result<BuildOutcome, BuildError> {
        let table = ClashTable::new();
        let mut rng = StdRng::seed_from_u64(seed);
        ChainBuilder::new(config, &table, candidates).build(&mut rng)
    }

    #[test]
    fn seed_places_the_first_residue_exactly() {
        let config = config("A");
        let outcome = build(&config, &[extended_fragment()], 1).unwrap();

        assert_eq!(outcome.status, BuildStatus::Completed);
        let coords = outcome.chain.coords();
        assert_eq!(coords.len(), 3);

        let n_ca = (coords[1] - coords[0]).norm();
        assert!((n_ca - config.constants.bond_n_ca).abs() < 1e-9);

        let u = coords[0] - coords[1];
        let v = coords[2] - coords[1];
        let bend = (u.dot(&v) / (u.norm() * v.norm())).acos();
        assert!((bend - config.constants.angle_n_ca_c).abs() < 1e-6);

        let ca_c = (coords[2] - coords[1]).norm();
        assert!((ca_c - config.constants.bond_ca_c).abs() < 1e-9);
    }

    #[test]
    fn five_residue_target_completes_from_three_residue_fragments() {
        let config = config("AGSVL");
        let outcome = build(&config, &[extended_fragment()], 2).unwrap();

        assert_eq!(outcome.status, BuildStatus::Completed);
        assert_eq!(outcome.chain.len(), 15);
        assert_eq!(outcome.chain.residue_count(), 5);
    }

    #[test]
    fn bond_lengths_cycle_through_the_constant_table() {
        let config = config("AGSVL");
        let outcome = build(&config, &[extended_fragment()], 3).unwrap();

        let coords = outcome.chain.coords();
        let c = &config.constants;
        let expected = [c.bond_c_n, c.bond_n_ca, c.bond_ca_c];
        for i in 3..coords.len() {
            let bond = (coords[i] - coords[i - 1]).norm();
            assert!(
                (bond - expected[(i - 3) % 3]).abs() < 1e-9,
                "bond into atom {} is {}",
                i,
                bond
            );
        }
    }

    #[test]
    fn built_torsions_round_trip_through_the_calculator() {
        let config = config("AGSVL");
        let outcome = build(&config, &[extended_fragment()], 4).unwrap();

        let consumed: Vec<f64> = {
            let interior = extended_fragment().interior_torsions();
            interior.iter().chain(interior.iter()).copied().collect()
        };
        let recovered = torsion_angles(outcome.chain.coords()).unwrap();

        assert_eq!(recovered.len(), consumed.len());
        for (got, expected) in recovered.iter().zip(&consumed) {
            assert!(
                (got - expected).abs() < 1e-6,
                "torsion {} != {}",
                got,
                expected
            );
        }
    }

    #[test]
    fn overflowing_fragment_is_rolled_back_to_the_boundary() {
        // 4 residues = 12 atoms: seed (3) + one fragment (6) = 9, and the
        // next 6-torsion fragment overflows after 3 atoms.
        let config = config("AGSV");
        let outcome = build(&config, &[extended_fragment()], 5).unwrap();

        assert_eq!(
            outcome.status,
            BuildStatus::Exhausted { placed_residues: 3 }
        );
        assert_eq!(outcome.chain.len(), 9);
        assert_eq!(outcome.chain.residue_count(), 3);
    }

    #[test]
    fn clashing_draws_exhaust_the_retry_budget() {
        let config = config("AGSVLAG");
        let result = build(&config, &[curling_fragment()], 6);

        assert!(matches!(
            result,
            Err(BuildError::RetriesExhausted { max_retries: 8 })
        ));
    }

    #[test]
    fn mixed_candidates_keep_budget_bookkeeping_intact_across_rejections() {
        // The curling fragment is drawable but rejected whenever the gate
        // applies; rollbacks must leave the budget bookkeeping intact in
        // every legal terminal state.
        let config = config("AGSVLAG");
        let candidates = [extended_fragment(), curling_fragment()];

        match build(&config, &candidates, 7) {
            Ok(outcome) => match outcome.status {
                BuildStatus::Completed => {
                    assert_eq!(outcome.chain.len(), 21);
                    assert_eq!(outcome.chain.residue_count(), 7);
                }
                BuildStatus::Exhausted { placed_residues } => {
                    assert_eq!(outcome.chain.len(), placed_residues * 3);
                    assert!(placed_residues < 7);
                }
            },
            Err(BuildError::RetriesExhausted { max_retries }) => {
                assert_eq!(max_retries, 8);
            }
            Err(other) => panic!("unexpected failure: {:?}", other),
        }
    }

    fn hand_laid_builder<'a>(
        config: &'a BuildConfig,
        table: &'a ClashTable,
        overlap_new_residue: usize,
        overlap_settled_residue: usize,
    ) -> ChainBuilder<'a> {
        // Five residues laid out far apart, except that the N of one residue
        // is dropped onto the N of another.
        let mut builder = ChainBuilder::new(config, table, &[]);
        for r in 0..5 {
            let base = if r == overlap_new_residue {
                Point3::new(0.0, 20.0 * overlap_settled_residue as f64, 0.0)
            } else {
                Point3::new(0.0, 20.0 * r as f64, 0.0)
            };
            builder.chain.push_atom(BackboneAtom::N, base);
            builder
                .chain
                .push_atom(BackboneAtom::Ca, base + nalgebra::Vector3::new(1.458, 0.0, 0.0));
            builder
                .chain
                .push_atom(BackboneAtom::C, base + nalgebra::Vector3::new(2.009, 1.42, 0.0));
        }
        builder
    }

    #[test]
    fn gate_compares_new_segment_against_the_settled_prefix() {
        let config = config("AGSVL");
        let table = ClashTable::new();
        // Settled: residues 0-2 (pre_len 9); new: residues 3-4. Residue 4
        // collides with residue 0; both are inside the compared windows.
        let builder = hand_laid_builder(&config, &table, 4, 0);

        assert!(builder.segment_clashes(9));
    }

    #[test]
    fn gate_windowing_excludes_the_covalent_boundary() {
        let config = config("AGSVL");
        let table = ClashTable::new();
        // Residue 3 (first new residue) collides with residue 2 (last
        // settled residue): exactly the covalently linked window the gate
        // must ignore.
        let builder = hand_laid_builder(&config, &table, 3, 2);

        assert!(!builder.segment_clashes(9));
    }

    #[test]
    fn gate_skips_segments_too_short_to_window() {
        let config = config("AGSVL");
        let table = ClashTable::new();
        let builder = hand_laid_builder(&config, &table, 4, 0);

        // Two settled residues or a single new residue leave nothing to
        // compare after windowing.
        assert!(!builder.segment_clashes(6));
        assert!(!builder.segment_clashes(12));
    }

    #[test]
    fn empty_candidate_set_is_an_empty_pool_error() {
        let config = config("AG");
        let result = build(&config, &[], 8);

        assert!(matches!(result, Err(BuildError::EmptyFragmentPool)));
    }

    #[test]
    fn straight_bend_angle_degenerates_and_preserves_the_partial_chain() {
        let mut constants = BondGeometryConstants::default();
        constants.angle_n_ca_c = PI;
        let config = BuildConfig::builder()
            .sequence("AGS")
            .pattern("L{2,6}".parse().unwrap())
            .constants(constants)
            .build()
            .unwrap();

        let result = build(&config, &[extended_fragment()], 9);

        match result {
            Err(BuildError::DegenerateGeometry {
                placed_atoms,
                partial_chain,
            }) => {
                assert_eq!(placed_atoms, 3);
                assert_eq!(partial_chain.len(), 3);
            }
            other => panic!("expected DegenerateGeometry, got {:?}", other),
        }
    }

    #[test]
    fn identical_seeds_build_identical_chains() {
        let config = config("AGSVL");
        let candidates = [
            extended_fragment(),
            fragment(&[(-70.0, -35.0, 175.0), (-70.0, -35.0, 175.0)]),
        ];

        match (
            build(&config, &candidates, 11),
            build(&config, &candidates, 11),
        ) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.chain, b.chain);
                assert_eq!(a.status, b.status);
            }
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            (a, b) => panic!("diverging outcomes: {:?} vs {:?}", a, b),
        }
    }
}
