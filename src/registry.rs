use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    plan::PrecinctId,
};

/// Two-party vote totals and population, for one precinct or for a running
/// district aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    /// Votes for the Democratic party.
    pub dem: u64,
    /// Votes for the Republican party.
    pub rep: u64,
    /// Total population.
    pub pop: u64,
}

impl Demographics {
    /// Construct a demographic record.
    pub fn new(dem: u64, rep: u64, pop: u64) -> Self {
        Self { dem, rep, pop }
    }

    /// Accumulate another record into this one.
    pub(crate) fn add(&mut self, other: Demographics) {
        self.dem += other.dem;
        self.rep += other.rep;
        self.pop += other.pop;
    }
}

#[derive(Debug, Clone)]
struct Precinct {
    demographics: Demographics,
    adjacent: BTreeSet<PrecinctId>,
}

/// Owning store of precinct records and their adjacency.
///
/// The registry is write-once: precincts are registered up front and never
/// mutated while plans are built, validated, or scored. Adjacency is taken
/// as given and assumed symmetric; the registry does not enforce it.
#[derive(Debug, Clone, Default)]
pub struct PrecinctRegistry {
    precincts: AHashMap<PrecinctId, Precinct>,
    ids: BTreeSet<PrecinctId>,
    total_population: u64,
}

impl PrecinctRegistry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a precinct with its vote counts, population, and neighbors.
    /// Re-registering an existing id is a no-op, not an error.
    pub fn register(
        &mut self,
        id: PrecinctId,
        dem: u64,
        rep: u64,
        pop: u64,
        adjacent: impl IntoIterator<Item = PrecinctId>,
    ) {
        if self.precincts.contains_key(&id) {
            return;
        }

        self.precincts.insert(id, Precinct {
            demographics: Demographics::new(dem, rep, pop),
            adjacent: adjacent.into_iter().collect(),
        });
        self.ids.insert(id);
        self.total_population += pop;
    }

    /// Get the number of registered precincts.
    #[inline]
    pub fn len(&self) -> usize {
        self.precincts.len()
    }

    /// Whether the registry has no precincts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.precincts.is_empty()
    }

    /// Whether a given id is registered.
    #[inline]
    pub fn contains(&self, id: PrecinctId) -> bool {
        self.precincts.contains_key(&id)
    }

    /// Get the combined population of all registered precincts.
    #[inline]
    pub fn total_population(&self) -> u64 {
        self.total_population
    }

    /// Get the set of all registered precinct ids.
    #[inline]
    pub fn precinct_ids(&self) -> &BTreeSet<PrecinctId> {
        &self.ids
    }

    fn precinct(&self, id: PrecinctId) -> Result<&Precinct> {
        self.precincts.get(&id).ok_or(Error::PrecinctNotFound(id))
    }

    /// Get the demographic record of a precinct.
    pub fn demographics_of(&self, id: PrecinctId) -> Result<Demographics> {
        Ok(self.precinct(id)?.demographics)
    }

    /// Get the ids of the precincts bordering a precinct.
    pub fn adjacent_ids_of(&self, id: PrecinctId) -> Result<&BTreeSet<PrecinctId>> {
        Ok(&self.precinct(id)?.adjacent)
    }

    /// Whether precinct `id` borders precinct `other`.
    pub fn are_adjacent(&self, id: PrecinctId, other: PrecinctId) -> Result<bool> {
        Ok(self.adjacent_ids_of(id)?.contains(&other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_registry() -> PrecinctRegistry {
        let mut registry = PrecinctRegistry::new();
        registry.register(1, 10, 5, 100, [2]);
        registry.register(2, 3, 12, 80, [1]);
        registry
    }

    #[test]
    fn registration_accumulates_population() {
        let registry = small_registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.total_population(), 180);
        assert_eq!(registry.precinct_ids().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn reregistration_is_a_noop() {
        let mut registry = small_registry();
        registry.register(1, 999, 999, 999, [2, 7]);

        assert_eq!(registry.total_population(), 180);
        assert_eq!(registry.demographics_of(1).unwrap(), Demographics::new(10, 5, 100));
        assert!(!registry.are_adjacent(1, 7).unwrap());
    }

    #[test]
    fn unknown_id_lookup_fails() {
        let registry = small_registry();
        assert_eq!(registry.demographics_of(9), Err(Error::PrecinctNotFound(9)));
        assert_eq!(registry.adjacent_ids_of(9).unwrap_err(), Error::PrecinctNotFound(9));
        assert!(!registry.contains(9));
    }

    #[test]
    fn adjacency_lookups() {
        let registry = small_registry();
        assert!(registry.are_adjacent(1, 2).unwrap());
        assert!(registry.are_adjacent(2, 1).unwrap());
        assert!(!registry.are_adjacent(1, 1).unwrap());
    }
}
