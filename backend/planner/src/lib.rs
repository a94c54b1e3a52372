pub mod gate;
pub mod prompt;
pub mod providers;
pub mod simplifier;

pub use gate::{
    should_fallback_to_original, GateThresholds, GateVerdict, OverlapGate, OverlapReport,
    RejectReason,
};
pub use prompt::build_prompt;
pub use simplifier::{Simplifier, SimplifierOptions};
