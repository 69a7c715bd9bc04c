use crate::nodes::ClockTiming;

/// Scale applied to the threshold control voltage before summing with the
/// knob value. The sum is deliberately left unclamped.
pub const THRESHOLD_CV_SCALE: f32 = 0.1;
/// Full-scale voltage of the proportional sync-quality output.
pub const SYNC_OUTPUT_SCALE: f32 = 10.0;

/// Alignment of the most recent external edge against the main clock.
/// Recomputed on external edges only; holds its value in between.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SyncStatus {
    /// Normalized phase error: 0 at coincidence, 1 at half a period out.
    pub error: f32,
    pub threshold: f32,
    pub synchronized: bool,
}

/// Correction the sequencer should apply for the current external edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseCorrection {
    None,
    /// External edge landed in the back half of the main period: pull the
    /// sequencer's accumulated note time forward by this much.
    Shift(f32),
    /// External edge landed in the front half: re-spread the remaining pulses
    /// of the current note over this interval.
    Rescale(f32),
}

/// Computes the triangular phase-error metric and picks a correction
/// strategy on every external-clock edge.
#[derive(Debug, Default)]
pub struct PhaseSynchronizer {
    status: SyncStatus,
}

impl PhaseSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined threshold from the manual knob and the optional control
    /// voltage. No clamping: both contributions may push the effective
    /// threshold outside [0, 1].
    pub fn effective_threshold(knob: f32, cv: Option<f32>) -> f32 {
        knob + cv.map_or(0.0, |v| v * THRESHOLD_CV_SCALE)
    }

    /// Evaluate one external edge. `offset` is the main clock's elapsed time
    /// since its own last edge, read from the live counter.
    pub fn on_external_edge(
        &mut self,
        offset: f32,
        main: ClockTiming,
        threshold: f32,
    ) -> PhaseCorrection {
        if main.half_period <= 0.0 {
            // No main period measured yet; nothing to compare against.
            return PhaseCorrection::None;
        }

        let delay = main.time_per_period - offset;
        let error =
            (main.half_period - (offset - main.half_period).abs()).abs() / main.half_period;
        self.status = SyncStatus {
            error,
            threshold,
            synchronized: error <= threshold,
        };

        if self.status.synchronized {
            PhaseCorrection::None
        } else if offset > main.half_period {
            PhaseCorrection::Shift(delay)
        } else {
            PhaseCorrection::Rescale(delay)
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn reset(&mut self) {
        self.status = SyncStatus::default();
    }
}
