//! Error types for mandergap operations.

use thiserror::Error;

use crate::plan::PrecinctId;

/// Failure conditions reported by registry lookups, plan validation, and
/// plan generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup of a precinct id that was never registered.
    #[error("precinct {0} is not registered")]
    PrecinctNotFound(PrecinctId),

    /// Requested district count is zero or exceeds the precinct count.
    #[error("invalid district count: {0}")]
    InvalidDistrictCount(usize),

    /// A generation loop spent its whole attempt budget without producing an
    /// acceptable plan.
    #[error("plan generation exhausted its budget after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// Scoring a plan over a registry that recorded zero votes.
    #[error("cannot score a plan with zero total votes")]
    DegenerateVotes,
}

/// Result type alias for mandergap operations.
pub type Result<T> = std::result::Result<T, Error>;
