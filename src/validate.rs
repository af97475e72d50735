//! Structural validation of plans: geographic continuity and population
//! balance against the mean district population.

use std::collections::BTreeSet;

use crate::{
    error::{Error, Result},
    plan::{District, Plan, PrecinctId},
    registry::PrecinctRegistry,
};

impl PrecinctRegistry {
    /// Check whether a plan is a structurally valid partition.
    ///
    /// A plan is valid iff every district is continuous, every district's
    /// population lies within `margin` (a fraction, inclusive bounds) of the
    /// mean district population, and every registered precinct appears in
    /// exactly one district. The mean is `total_population / plan.len()`
    /// with integer division, so validity is always relative to the plan's
    /// own district count.
    ///
    /// Fails with [`Error::InvalidDistrictCount`] for a plan with no
    /// districts and with [`Error::PrecinctNotFound`] if a district names an
    /// unregistered precinct.
    pub fn is_valid_plan(&self, plan: &Plan, margin: f64) -> Result<bool> {
        if plan.is_empty() {
            return Err(Error::InvalidDistrictCount(0));
        }

        let mean = (self.total_population() / plan.len() as u64) as f64;
        let mut seen: BTreeSet<PrecinctId> = BTreeSet::new();

        for district in plan.iter() {
            if district.is_empty() || !self.district_is_continuous(district)? {
                return Ok(false);
            }

            let mut population = 0u64;
            for id in district.iter() {
                population += self.demographics_of(id)?.pop;
                if !seen.insert(id) {
                    return Ok(false); // assigned to two districts
                }
            }

            let population = population as f64;
            if population > mean * (1.0 + margin) || population < mean * (1.0 - margin) {
                return Ok(false);
            }
        }

        // Every registered precinct must be covered.
        Ok(seen.len() == self.len())
    }

    /// Check that every member of a district is reachable from every other
    /// through adjacency edges confined to the district.
    ///
    /// Worklist walk from an arbitrary member; the district is continuous iff
    /// the walk visits every member. A singleton is trivially continuous.
    fn district_is_continuous(&self, district: &District) -> Result<bool> {
        let Some(start) = district.first() else {
            return Ok(true);
        };

        let mut visited = BTreeSet::from([start]);
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            for &next in self.adjacent_ids_of(id)? {
                if district.contains(next) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        Ok(visited.len() == district.len())
    }
}
