#![doc = "Mandergap public API"]
mod error;
mod generate;
mod plan;
mod registry;
mod score;
mod validate;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use registry::{Demographics, PrecinctRegistry};

#[doc(inline)]
pub use plan::{District, Party, Plan, PrecinctId};

#[doc(inline)]
pub use score::{DEFAULT_POPULATION_MARGIN, GapScore};

#[doc(inline)]
pub use generate::{DEFAULT_MAX_ATTEMPTS, PlanGenerator};
