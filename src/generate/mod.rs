//! Rejection-sampling plan construction over a precinct registry.

mod biased;
mod random;

use std::collections::BTreeSet;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    plan::{Party, Plan, PrecinctId},
    registry::PrecinctRegistry,
    score::DEFAULT_POPULATION_MARGIN,
};

/// Default bound on whole-partition construction attempts before a generation
/// call reports [`Error::GenerationExhausted`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Which construction algorithm grows each district of an attempt.
#[derive(Debug, Clone, Copy)]
enum BuilderKind {
    Random,
    Biased(Party),
}

/// Generates whole plans by repeated construction attempts.
///
/// Every entry point builds candidate partitions from scratch and keeps the
/// first one the validator accepts; a failed candidate is discarded whole.
/// For tight margins or demanding district counts no acceptable partition of
/// the precinct graph may exist, so every loop carries an attempt budget
/// instead of sampling forever.
#[derive(Debug, Clone)]
pub struct PlanGenerator<'a> {
    registry: &'a PrecinctRegistry,
    margin: f64,
    max_attempts: usize,
}

impl<'a> PlanGenerator<'a> {
    /// Construct a generator over a registry with the default population
    /// margin and attempt budget.
    pub fn new(registry: &'a PrecinctRegistry) -> Self {
        Self {
            registry,
            margin: DEFAULT_POPULATION_MARGIN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the population margin candidate plans are validated against.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the attempt budget shared by every generation loop.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generate a structurally valid plan with unbiased randomized growth.
    pub fn random_plan(&self, district_count: usize, rng: &mut impl Rng) -> Result<Plan> {
        self.sample_valid_plan(district_count, BuilderKind::Random, rng)
    }

    /// Generate a structurally valid plan whose districts were each grown to
    /// greedily maximize `party`'s wasted-vote advantage.
    ///
    /// Converges much faster than [`Self::search_gerrymander`] in practice,
    /// since each district is already skewed as it is built.
    pub fn biased_plan(&self, district_count: usize, party: Party, rng: &mut impl Rng) -> Result<Plan> {
        self.sample_valid_plan(district_count, BuilderKind::Biased(party), rng)
    }

    /// Search for an unbiased plan whose efficiency gap is strictly above
    /// `threshold` percent.
    ///
    /// Repeatedly generates unbiased partitions and re-scores the valid ones.
    /// The attempt budget counts raw construction attempts, valid or not.
    pub fn search_gerrymander(
        &self,
        district_count: usize,
        threshold: u32,
        rng: &mut impl Rng,
    ) -> Result<Plan> {
        self.check_district_count(district_count)?;

        for attempt in 1..=self.max_attempts {
            let plan = self.build_partition(district_count, BuilderKind::Random, rng)?;
            if !self.registry.is_valid_plan(&plan, self.margin)? {
                trace!(attempt, districts = plan.len(), "rejected candidate partition");
                continue;
            }
            if self.registry.is_gerrymandered(&plan, threshold)? {
                debug!(attempt, districts = plan.len(), threshold, "found gerrymandered partition");
                return Ok(plan);
            }
            trace!(attempt, threshold, "valid partition below threshold");
        }

        Err(Error::GenerationExhausted { attempts: self.max_attempts })
    }

    /// Retry whole-partition construction until the validator accepts.
    fn sample_valid_plan(
        &self,
        district_count: usize,
        kind: BuilderKind,
        rng: &mut impl Rng,
    ) -> Result<Plan> {
        self.check_district_count(district_count)?;

        for attempt in 1..=self.max_attempts {
            let plan = self.build_partition(district_count, kind, rng)?;
            if self.registry.is_valid_plan(&plan, self.margin)? {
                debug!(attempt, districts = plan.len(), "accepted candidate partition");
                return Ok(plan);
            }
            trace!(attempt, districts = plan.len(), "rejected candidate partition");
        }

        Err(Error::GenerationExhausted { attempts: self.max_attempts })
    }

    /// Build one whole candidate partition.
    ///
    /// Seeds are drawn as a random permutation of the free ids; each seed
    /// that is still free when its turn comes grows one district, consuming
    /// ids from the shared free set. The attempt may produce more districts
    /// than requested when growth gets boxed in early, or fewer when
    /// districts overshoot the target; the validator judges the result
    /// against its own district count.
    fn build_partition(
        &self,
        district_count: usize,
        kind: BuilderKind,
        rng: &mut impl Rng,
    ) -> Result<Plan> {
        let target = self.registry.total_population() / district_count as u64;
        let mut free: BTreeSet<PrecinctId> = self.registry.precinct_ids().clone();

        let mut seeds: Vec<PrecinctId> = free.iter().copied().collect();
        seeds.shuffle(rng);

        let mut plan = Plan::new();
        for seed in seeds {
            if !free.contains(&seed) {
                continue; // consumed by an earlier district
            }
            let district = match kind {
                BuilderKind::Random => self.grow_random_district(seed, &mut free, target, rng)?,
                BuilderKind::Biased(party) => {
                    self.grow_biased_district(seed, &mut free, target, party, rng)?
                }
            };
            plan.push(district);
        }

        Ok(plan)
    }

    fn check_district_count(&self, district_count: usize) -> Result<()> {
        if district_count == 0 || district_count > self.registry.len() {
            return Err(Error::InvalidDistrictCount(district_count));
        }
        Ok(())
    }
}
