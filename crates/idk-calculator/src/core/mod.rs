//! Host-independent calculator core
//!
//! Everything here is a total function over the calculator state: there is
//! no error type because no input can fail. Unparsable displays turn
//! sign-flip and percent into no-ops, and division by zero flows into the
//! estimate as a non-finite value.

pub mod estimate;
pub mod number;
mod operations;
pub mod random;
pub mod state;

pub use estimate::{parse_estimate, Estimate, EstimateEngine};
pub use operations::Operation;
pub use random::{RandomSource, SequenceSource};
pub use state::{EstimateCalculator, Phase};

/// Calculator driven by the standard seedable generator
pub type StdCalculator = EstimateCalculator<rand::rngs::StdRng>;
