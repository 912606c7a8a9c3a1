//! Domain layer: pure draw logic, no I/O.

pub mod clock;
pub mod phase;
pub mod rules;
pub mod schedule;
pub mod selection;

pub use clock::{Clock, ManualClock, SystemClock};
pub use phase::{can_enter, phase_of, remaining_seconds, Phase, RoundStatus, RoundWindow};
pub use schedule::{RoundParams, RoundPlan};
pub use selection::select_winners;
