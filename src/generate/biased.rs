use std::collections::BTreeSet;

use rand::Rng;

use crate::{
    error::Result,
    generate::PlanGenerator,
    plan::{District, Party, PrecinctId},
    registry::Demographics,
    score::waste_advantage,
};

impl PlanGenerator<'_> {
    /// Grow one district from `seed`, at each step annexing the free frontier
    /// precinct that most improves `party`'s wasted-vote advantage.
    ///
    /// The frontier is the union of the members' adjacency sets; whether a
    /// frontier id is an actual candidate is decided against the free set at
    /// selection time. Growth stops once the accumulated population reaches
    /// the target, or when no free frontier precinct remains (a district may
    /// end below target when geographically boxed in).
    pub(super) fn grow_biased_district(
        &self,
        seed: PrecinctId,
        free: &mut BTreeSet<PrecinctId>,
        target_population: u64,
        party: Party,
        rng: &mut impl Rng,
    ) -> Result<District> {
        let mut district = District::new();
        let mut tally = Demographics::default();
        let mut frontier: BTreeSet<PrecinctId> = BTreeSet::new();
        let mut current = seed;

        while free.remove(&current) {
            district.insert(current);
            tally.add(self.registry.demographics_of(current)?);
            frontier.extend(self.registry.adjacent_ids_of(current)?.iter().copied());

            if tally.pop >= target_population {
                break;
            }
            match self.select_candidate(&frontier, free, tally, party, rng)? {
                Some(next) => current = next,
                None => break,
            }
        }

        Ok(district)
    }

    /// Pick the free frontier precinct whose annexation maximizes the
    /// favored party's waste advantage.
    ///
    /// A strictly greater advantage always wins; an exact tie flips a fair
    /// coin against the incumbent best, so a run of tied candidates is
    /// broken reservoir-style rather than by one uniform draw over the ties.
    fn select_candidate(
        &self,
        frontier: &BTreeSet<PrecinctId>,
        free: &BTreeSet<PrecinctId>,
        tally: Demographics,
        party: Party,
        rng: &mut impl Rng,
    ) -> Result<Option<PrecinctId>> {
        let mut best: Option<(PrecinctId, i64)> = None;

        for &id in frontier {
            if !free.contains(&id) {
                continue;
            }

            let candidate = self.registry.demographics_of(id)?;
            let advantage = waste_advantage(
                party,
                (tally.dem + candidate.dem) as i64,
                (tally.rep + candidate.rep) as i64,
            );

            best = match best {
                Some((_, incumbent)) if advantage < incumbent => best,
                Some((_, incumbent)) if advantage == incumbent && !rng.random_bool(0.5) => best,
                _ => Some((id, advantage)),
            };
        }

        Ok(best.map(|(id, _)| id))
    }
}
