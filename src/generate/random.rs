use std::collections::BTreeSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    generate::PlanGenerator,
    plan::{District, PrecinctId},
};

impl PlanGenerator<'_> {
    /// Grow one district from `seed` by randomized depth-first expansion,
    /// consuming ids from the shared free set.
    ///
    /// Every consumed precinct pushes its neighbors in a fresh random order,
    /// so growth keeps moving through a single frontier link at a time
    /// rather than balancing across the whole boundary. The resulting
    /// districts are deliberately snake-like, which raises the variance of
    /// the partitions fed to the gerrymander search. Growth stops once the
    /// accumulated population reaches the target, or earlier when the
    /// district is boxed in by already-assigned neighbors.
    pub(super) fn grow_random_district(
        &self,
        seed: PrecinctId,
        free: &mut BTreeSet<PrecinctId>,
        target_population: u64,
        rng: &mut impl Rng,
    ) -> Result<District> {
        let mut district = District::new();
        let mut population = 0u64;
        let mut pending = vec![seed];

        while let Some(id) = pending.pop() {
            if population >= target_population {
                break;
            }
            // A pushed neighbor may have been consumed in the meantime.
            if !free.remove(&id) {
                continue;
            }

            district.insert(id);
            population += self.registry.demographics_of(id)?.pop;

            let mut neighbors: Vec<PrecinctId> =
                self.registry.adjacent_ids_of(id)?.iter().copied().collect();
            neighbors.shuffle(rng);
            pending.extend(neighbors);
        }

        Ok(district)
    }
}
