//! Efficiency-gap scoring: the normalized difference between each party's
//! wasted votes across a plan.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    plan::{Party, Plan},
    registry::{Demographics, PrecinctRegistry},
};

/// Population margin used when validating plans inside scoring and as the
/// generation default.
///
/// Real-world plans hold districts within a few percent of the mean; the wide
/// default keeps small hand-built precinct sets from rejecting every
/// partition outright.
pub const DEFAULT_POPULATION_MARGIN: f64 = 0.2;

/// Efficiency-gap score of a plan: a percentage, or the sentinel for a plan
/// that failed structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapScore {
    /// Normalized wasted-vote difference, in `[0, 100]`.
    Percent(u32),
    /// The plan is not a valid partition; no score is defined for it.
    Invalid,
}

impl GapScore {
    /// Whether the score is strictly above `threshold`. An invalid plan is
    /// never above any threshold.
    pub fn exceeds(self, threshold: u32) -> bool {
        match self {
            GapScore::Percent(score) => score > threshold,
            GapScore::Invalid => false,
        }
    }
}

/// Votes wasted by the Democratic side of one district: every vote when
/// losing or tied, the margin beyond a bare majority when winning.
pub(crate) fn dem_wasted(dem: i64, rep: i64) -> i64 {
    if dem > rep { dem - rep - 1 } else { dem }
}

/// Votes wasted by the Republican side of one district.
pub(crate) fn rep_wasted(dem: i64, rep: i64) -> i64 {
    if dem > rep { rep } else { rep - dem - 1 }
}

/// Wasted-vote advantage of `party` for a district tally: the opponent's
/// wasted votes minus the favored party's own.
pub(crate) fn waste_advantage(party: Party, dem: i64, rep: i64) -> i64 {
    match party {
        Party::Democratic => rep_wasted(dem, rep) - dem_wasted(dem, rep),
        Party::Republican => dem_wasted(dem, rep) - rep_wasted(dem, rep),
    }
}

impl PrecinctRegistry {
    /// Compute the efficiency gap of a plan as a percentage in `[0, 100]`.
    ///
    /// A plan that fails validation at [`DEFAULT_POPULATION_MARGIN`] scores
    /// [`GapScore::Invalid`] rather than a number. Fails with
    /// [`Error::DegenerateVotes`] if the districts sum to zero votes.
    pub fn efficiency_gap(&self, plan: &Plan) -> Result<GapScore> {
        if !self.is_valid_plan(plan, DEFAULT_POPULATION_MARGIN)? {
            return Ok(GapScore::Invalid);
        }

        let mut dem_waste = 0i64;
        let mut rep_waste = 0i64;
        let mut total_votes = 0u64;

        for district in plan.iter() {
            let mut tally = Demographics::default();
            for id in district.iter() {
                tally.add(self.demographics_of(id)?);
            }

            let (dem, rep) = (tally.dem as i64, tally.rep as i64);
            dem_waste += dem_wasted(dem, rep);
            rep_waste += rep_wasted(dem, rep);
            total_votes += tally.dem + tally.rep;
        }

        if total_votes == 0 {
            return Err(Error::DegenerateVotes);
        }

        Ok(GapScore::Percent((100 * dem_waste.abs_diff(rep_waste) / total_votes) as u32))
    }

    /// Whether the plan's efficiency gap is strictly above `threshold`
    /// percent. An invalid plan is never gerrymandered.
    pub fn is_gerrymandered(&self, plan: &Plan, threshold: u32) -> Result<bool> {
        Ok(self.efficiency_gap(plan)?.exceeds(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::District;

    #[test]
    fn wasted_votes_follow_the_bare_majority_rule() {
        // Winner wastes the margin beyond a bare majority, loser wastes all.
        assert_eq!(dem_wasted(10, 4), 5);
        assert_eq!(rep_wasted(10, 4), 4);
        assert_eq!(dem_wasted(4, 10), 4);
        assert_eq!(rep_wasted(4, 10), 5);
    }

    #[test]
    fn tied_district_counts_the_nominal_winner_at_minus_one() {
        assert_eq!(dem_wasted(6, 6), 6);
        assert_eq!(rep_wasted(6, 6), -1);
    }

    #[test]
    fn waste_advantage_is_antisymmetric() {
        assert_eq!(waste_advantage(Party::Republican, 10, 4), 1);
        assert_eq!(waste_advantage(Party::Democratic, 10, 4), -1);
        assert_eq!(waste_advantage(Party::Democratic, 4, 10), 1);
    }

    #[test]
    fn invalid_score_never_exceeds_a_threshold() {
        assert!(!GapScore::Invalid.exceeds(0));
        assert!(GapScore::Percent(8).exceeds(7));
        assert!(!GapScore::Percent(7).exceeds(7));
    }

    /// Two adjacent precincts, one per district.
    fn two_precinct_registry(votes: [(u64, u64); 2]) -> PrecinctRegistry {
        let mut registry = PrecinctRegistry::new();
        registry.register(1, votes[0].0, votes[0].1, 10, [2]);
        registry.register(2, votes[1].0, votes[1].1, 10, [1]);
        registry
    }

    #[test]
    fn efficiency_gap_of_a_balanced_pair() {
        let registry = two_precinct_registry([(10, 4), (4, 10)]);
        let plan: Plan = [[1], [2]].iter().map(|ids| ids.iter().copied().collect::<District>()).collect();

        // Each district wastes 5 on one side and 4 on the other; the sums
        // cancel to a gap of |9 - 9| = 0.
        assert_eq!(registry.efficiency_gap(&plan).unwrap(), GapScore::Percent(0));
        assert!(!registry.is_gerrymandered(&plan, 0).unwrap());
    }

    #[test]
    fn partial_coverage_scores_invalid() {
        let registry = two_precinct_registry([(10, 4), (4, 10)]);
        let plan: Plan = [[1]].iter().map(|ids| ids.iter().copied().collect::<District>()).collect();

        assert_eq!(registry.efficiency_gap(&plan).unwrap(), GapScore::Invalid);
        assert!(!registry.is_gerrymandered(&plan, 0).unwrap());
    }

    #[test]
    fn zero_vote_registry_cannot_be_scored() {
        let registry = two_precinct_registry([(0, 0), (0, 0)]);
        let plan: Plan = [[1], [2]].iter().map(|ids| ids.iter().copied().collect::<District>()).collect();

        assert_eq!(registry.efficiency_gap(&plan), Err(Error::DegenerateVotes));
    }
}
