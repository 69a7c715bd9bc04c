use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::engine::{ClockSyncEngine, EngineInputs, PersistedState, Ppqn};

fn log_console(message: &str) {
    console::log_1(&message.into());
}

/// JavaScript-facing engine handle.
///
/// Clock signals arrive as per-block Float32Arrays from the audio worklet;
/// buttons, gates, and the threshold knob are control-rate values updated
/// between blocks. Negative gate values mean "unpatched".
#[wasm_bindgen]
pub struct WasmClockSync {
    engine: ClockSyncEngine,
    run_button: f32,
    sync_button: f32,
    threshold_knob: f32,
    run_gate: Option<f32>,
    sync_gate: Option<f32>,
    threshold_cv: Option<f32>,
}

#[wasm_bindgen]
impl WasmClockSync {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f32) -> Self {
        log_console(&format!("Creating clock sync engine at {} Hz", sample_rate));
        Self {
            engine: ClockSyncEngine::new(sample_rate),
            run_button: 0.0,
            sync_button: 0.0,
            threshold_knob: 0.0,
            run_gate: None,
            sync_gate: None,
            threshold_cv: None,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.engine.set_sample_rate(sample_rate);
    }

    pub fn set_run_button(&mut self, value: f32) {
        self.run_button = value;
    }

    pub fn set_sync_button(&mut self, value: f32) {
        self.sync_button = value;
    }

    pub fn set_threshold_knob(&mut self, value: f32) {
        self.threshold_knob = value;
    }

    /// A negative value disconnects the port.
    pub fn set_run_gate(&mut self, value: f32) {
        self.run_gate = (value >= 0.0).then_some(value);
    }

    pub fn set_sync_gate(&mut self, value: f32) {
        self.sync_gate = (value >= 0.0).then_some(value);
    }

    pub fn set_threshold_cv(&mut self, value: f32) {
        self.threshold_cv = (value >= 0.0).then_some(value);
    }

    pub fn set_ppqn(&mut self, pulses: u32) {
        self.engine.set_ppqn(Ppqn::nearest(pulses));
    }

    pub fn set_sync_output_always(&mut self, always: bool) {
        self.engine.set_sync_output_always(always);
    }

    /// Process one block. All slices must share a length; `clock_out` and
    /// `sync_quality` are filled in place.
    pub fn process_block(
        &mut self,
        main_clock: &[f32],
        external_clock: &[f32],
        clock_out: &mut [f32],
        sync_quality: &mut [f32],
    ) {
        let len = main_clock
            .len()
            .min(external_clock.len())
            .min(clock_out.len())
            .min(sync_quality.len());

        for i in 0..len {
            let outputs = self.engine.process(&EngineInputs {
                run_button: self.run_button,
                run_gate: self.run_gate,
                sync_button: self.sync_button,
                sync_gate: self.sync_gate,
                threshold_knob: self.threshold_knob,
                threshold_cv: self.threshold_cv,
                main_clock: main_clock[i],
                external_clock: external_clock[i],
            });
            clock_out[i] = outputs.clock_out;
            sync_quality[i] = outputs.sync_quality;
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn is_synchronizing(&self) -> bool {
        self.engine.is_synchronizing()
    }

    pub fn main_bpm(&self) -> f32 {
        self.engine.main_timing().beats_per_minute
    }

    pub fn external_bpm(&self) -> f32 {
        self.engine.external_timing().beats_per_minute
    }

    pub fn sync_error(&self) -> f32 {
        self.engine.sync_status().error
    }

    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.export_state())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn set_state(&mut self, value: JsValue) -> Result<(), JsValue> {
        let state: PersistedState = serde_wasm_bindgen::from_value(value)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.engine.import_state(&state);
        Ok(())
    }

    /// JSON fallback for hosts that persist strings. Malformed fields are
    /// dropped individually.
    pub fn set_state_json(&mut self, json: &str) {
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(value) => {
                self.engine.import_state(&PersistedState::from_value(&value));
            }
            Err(err) => log_console(&format!("Ignoring unparseable state: {}", err)),
        }
    }

    pub fn get_state_json(&self) -> String {
        self.engine.export_state().to_value().to_string()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
