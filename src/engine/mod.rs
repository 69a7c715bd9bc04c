pub mod io;
pub mod state;

#[cfg(feature = "wasm")]
pub mod wasm;


pub use io::{EngineConfig, EngineInputs, EngineOutputs, Ppqn, GATE_HIGH};
pub use state::PersistedState;

use crate::nodes::phase_sync::SYNC_OUTPUT_SCALE;
use crate::nodes::{
    ClockTiming, ClockTracker, GatedToggle, PhaseCorrection, PhaseSynchronizer, PulseSequencer,
    SyncStatus,
};

/// Per-sample orchestration of the clock-sync core.
///
/// Owns every piece of state exclusively; the host calls [`process`] once per
/// audio frame and nothing else mutates the engine concurrently. Sample-rate
/// changes and state import/export are host-serialized against the process
/// call.
///
/// [`process`]: ClockSyncEngine::process
pub struct ClockSyncEngine {
    sample_rate: f32,
    config: EngineConfig,
    run: GatedToggle,
    sync: GatedToggle,
    main_clock: ClockTracker,
    external_clock: ClockTracker,
    synchronizer: PhaseSynchronizer,
    sequencer: PulseSequencer,
}

impl ClockSyncEngine {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_config(sample_rate, EngineConfig::default())
    }

    pub fn with_config(sample_rate: f32, config: EngineConfig) -> Self {
        Self {
            sample_rate,
            config,
            run: GatedToggle::new(),
            sync: GatedToggle::new(),
            main_clock: ClockTracker::new(),
            external_clock: ClockTracker::new(),
            synchronizer: PhaseSynchronizer::new(),
            sequencer: PulseSequencer::new(config.ppqn.pulses()),
        }
    }

    /// Process one sample of control input.
    pub fn process(&mut self, inputs: &EngineInputs) -> EngineOutputs {
        let running = self.run.process(inputs.run_button, inputs.run_gate);
        let syncing = self.sync.process(inputs.sync_button, inputs.sync_gate);

        if let Some(timing) = self.main_clock.process(inputs.main_clock, self.sample_rate) {
            self.sequencer.set_period(timing.time_per_period);
        }

        if self
            .external_clock
            .process(inputs.external_clock, self.sample_rate)
            .is_some()
        {
            // Offset is read after the main tracker processed this sample, so
            // a coincident main edge reads as zero offset.
            let offset = self.main_clock.elapsed(self.sample_rate);
            let threshold = PhaseSynchronizer::effective_threshold(
                inputs.threshold_knob,
                inputs.threshold_cv,
            );
            let correction =
                self.synchronizer
                    .on_external_edge(offset, self.main_clock.timing(), threshold);

            if syncing {
                match correction {
                    PhaseCorrection::Shift(delay) => self.sequencer.shift_phase(delay),
                    PhaseCorrection::Rescale(delay) => self.sequencer.rescale_rate(delay),
                    PhaseCorrection::None => {}
                }
            }
        }

        let dt = if self.sample_rate > 0.0 {
            1.0 / self.sample_rate
        } else {
            0.0
        };
        let pulse_high = self.sequencer.advance(dt);

        let status = self.synchronizer.status();
        let emit_quality =
            self.sequencer.is_active() && (syncing || self.config.sync_output_always);
        let sync_quality = if emit_quality {
            (status.error * SYNC_OUTPUT_SCALE).clamp(0.0, SYNC_OUTPUT_SCALE)
        } else {
            0.0
        };

        EngineOutputs {
            clock_out: if pulse_high && running { GATE_HIGH } else { 0.0 },
            sync_quality,
            running_light: if running { 1.0 } else { 0.0 },
            sync_toggle_light: if syncing { 1.0 } else { 0.0 },
            sync_green_light: if status.synchronized { 1.0 } else { 0.0 },
            sync_red_light: if status.synchronized { 0.0 } else { status.error },
        }
    }

    /// Atomic cache update; measured periods survive a rate change.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn set_ppqn(&mut self, ppqn: Ppqn) {
        self.config.ppqn = ppqn;
        self.sequencer.set_pulses_per_note(ppqn.pulses());
        if self.main_clock.has_period() {
            self.sequencer
                .set_period(self.main_clock.timing().time_per_period);
        }
    }

    pub fn set_sync_output_always(&mut self, always: bool) {
        self.config.sync_output_always = always;
    }

    pub fn main_timing(&self) -> ClockTiming {
        self.main_clock.timing()
    }

    pub fn external_timing(&self) -> ClockTiming {
        self.external_clock.timing()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.synchronizer.status()
    }

    pub fn is_running(&self) -> bool {
        self.run.is_active()
    }

    pub fn is_synchronizing(&self) -> bool {
        self.sync.is_active()
    }

    pub fn is_armed(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn export_state(&self) -> PersistedState {
        PersistedState {
            running: Some(self.run.is_latched()),
            synchronize: Some(self.sync.is_latched()),
            sync_output_always: Some(self.config.sync_output_always),
            ppqn: Some(self.config.ppqn.pulses()),
        }
    }

    /// Restore persisted fields; anything absent keeps its current value.
    /// Foreign ppqn values snap to the nearest supported subdivision.
    pub fn import_state(&mut self, state: &PersistedState) {
        if let Some(running) = state.running {
            self.run.set_latched(running);
        }
        if let Some(synchronize) = state.synchronize {
            self.sync.set_latched(synchronize);
        }
        if let Some(always) = state.sync_output_always {
            self.config.sync_output_always = always;
        }
        if let Some(pulses) = state.ppqn {
            self.set_ppqn(Ppqn::nearest(pulses));
        }
    }

    pub fn reset(&mut self) {
        self.run.reset();
        self.sync.reset();
        self.main_clock.reset();
        self.external_clock.reset();
        self.synchronizer.reset();
        self.sequencer.reset();
    }
}
