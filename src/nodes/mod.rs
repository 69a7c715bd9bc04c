pub mod clock_tracker;
pub mod gated_toggle;
pub mod phase_sync;
pub mod sequencer;

pub use clock_tracker::*;
pub use gated_toggle::*;
pub use phase_sync::*;
pub use sequencer::*;
