use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stable key for a registered precinct.
pub type PrecinctId = u32;

/// The two major parties tracked by precinct vote counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Democratic,
    Republican,
}

impl Party {
    /// The opposing party.
    #[inline]
    pub fn opponent(self) -> Party {
        match self {
            Party::Democratic => Party::Republican,
            Party::Republican => Party::Democratic,
        }
    }
}

/// A group of precincts assigned together under one plan.
///
/// Districts are transient: they are built fresh on every generation attempt
/// and only become meaningful once a full [`Plan`] passes validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct District(BTreeSet<PrecinctId>);

impl District {
    /// Construct an empty district.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a precinct to the district. Returns whether the id was newly added.
    pub fn insert(&mut self, id: PrecinctId) -> bool {
        self.0.insert(id)
    }

    /// Whether the district contains a given precinct.
    #[inline]
    pub fn contains(&self, id: PrecinctId) -> bool {
        self.0.contains(&id)
    }

    /// Get the number of member precincts.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the district has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over member ids in ascending order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = PrecinctId> + '_ {
        self.0.iter().copied()
    }

    /// An arbitrary member id (the smallest), used to seed traversals.
    #[inline]
    pub(crate) fn first(&self) -> Option<PrecinctId> {
        self.0.first().copied()
    }
}

impl FromIterator<PrecinctId> for District {
    fn from_iter<T: IntoIterator<Item = PrecinctId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A complete partition of the registered precincts into districts.
///
/// District order carries no meaning. A plan is only valid relative to a
/// population margin; see [`PrecinctRegistry::is_valid_plan`].
///
/// [`PrecinctRegistry::is_valid_plan`]: crate::PrecinctRegistry::is_valid_plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    districts: Vec<District>,
}

impl Plan {
    /// Construct an empty plan.
    pub fn new() -> Self {
        Self { districts: Vec::new() }
    }

    /// Append a district to the plan.
    pub(crate) fn push(&mut self, district: District) {
        self.districts.push(district);
    }

    /// Get the number of districts in the plan.
    #[inline]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// Whether the plan has no districts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Get the districts as a slice.
    #[inline]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Iterate over the districts.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, District> {
        self.districts.iter()
    }
}

impl FromIterator<District> for Plan {
    fn from_iter<T: IntoIterator<Item = District>>(iter: T) -> Self {
        Self { districts: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_deduplicates_members() {
        let mut district = District::new();
        assert!(district.insert(3));
        assert!(!district.insert(3));
        assert_eq!(district.len(), 1);
    }

    #[test]
    fn district_iterates_in_ascending_order() {
        let district: District = [9, 1, 5].into_iter().collect();
        assert_eq!(district.iter().collect::<Vec<_>>(), vec![1, 5, 9]);
        assert_eq!(district.first(), Some(1));
    }

    #[test]
    fn party_opponent_is_involutive() {
        assert_eq!(Party::Democratic.opponent(), Party::Republican);
        assert_eq!(Party::Republican.opponent().opponent(), Party::Republican);
    }
}
