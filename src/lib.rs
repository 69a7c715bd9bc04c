pub mod dsp;
pub mod engine;
pub mod nodes;

pub use dsp::{PulseGenerator, SampleCounter, SchmittTrigger};
pub use engine::{
    ClockSyncEngine, EngineConfig, EngineInputs, EngineOutputs, PersistedState, Ppqn, GATE_HIGH,
};
pub use nodes::{
    ClockTiming, ClockTracker, GatedToggle, PhaseCorrection, PhaseSynchronizer, PulseSequencer,
    SyncStatus,
};

#[cfg(feature = "wasm")]
pub use engine::wasm::WasmClockSync;
