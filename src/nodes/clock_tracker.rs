use crate::dsp::{SampleCounter, SchmittTrigger};

/// One completed period measurement.
///
/// `time_per_period` stays 0 until the first edge after construction or a
/// reset; every rate field derives from it, so nothing here ever divides by
/// zero. Beats/sec and beats/min are informational only.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClockTiming {
    pub time_per_period: f32,
    pub half_period: f32,
    pub beats_per_second: f32,
    pub beats_per_minute: f32,
}

impl ClockTiming {
    pub fn is_measured(&self) -> bool {
        self.time_per_period > 0.0
    }
}

/// Measures the period of a periodic trigger signal.
///
/// The counter ticks every sample; the division into seconds happens once per
/// detected edge rather than once per sample.
#[derive(Debug, Default)]
pub struct ClockTracker {
    trigger: SchmittTrigger,
    counter: SampleCounter,
    timing: ClockTiming,
}

impl ClockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one sample and edge-detect `voltage`. Returns the completed
    /// measurement on each rising edge.
    pub fn process(&mut self, voltage: f32, sample_rate: f32) -> Option<ClockTiming> {
        self.counter.tick();

        if !self.trigger.process(voltage) {
            return None;
        }

        let period = self.counter.elapsed(sample_rate);
        self.counter.reset();
        if period <= 0.0 {
            // Degenerate sample rate; keep the previous measurement.
            return None;
        }

        self.timing = ClockTiming {
            time_per_period: period,
            half_period: period / 2.0,
            beats_per_second: 1.0 / period,
            beats_per_minute: 60.0 / period,
        };
        Some(self.timing)
    }

    pub fn timing(&self) -> ClockTiming {
        self.timing
    }

    pub fn has_period(&self) -> bool {
        self.timing.is_measured()
    }

    /// Time since the last edge, read from the live counter.
    pub fn elapsed(&self, sample_rate: f32) -> f32 {
        self.counter.elapsed(sample_rate)
    }

    pub fn reset(&mut self) {
        self.trigger.reset();
        self.counter.reset();
        self.timing = ClockTiming::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn drive_silence(tracker: &mut ClockTracker, samples: usize) {
        for _ in 0..samples {
            assert!(tracker.process(0.0, SAMPLE_RATE).is_none());
        }
    }

    #[test]
    fn test_period_measured_between_edges() {
        let mut tracker = ClockTracker::new();

        tracker.process(10.0, SAMPLE_RATE);
        drive_silence(&mut tracker, 23_999);
        let timing = tracker
            .process(10.0, SAMPLE_RATE)
            .expect("edge should complete a period");

        assert!((timing.time_per_period - 0.5).abs() < 1e-6);
        assert!((timing.half_period - 0.25).abs() < 1e-6);
        assert!((timing.beats_per_second - 2.0).abs() < 1e-4);
        assert!((timing.beats_per_minute - 120.0).abs() < 1e-2);
    }

    #[test]
    fn test_no_measurement_before_first_edge() {
        let mut tracker = ClockTracker::new();
        drive_silence(&mut tracker, 1000);
        assert!(!tracker.has_period());
        assert_eq!(tracker.timing(), ClockTiming::default());
    }

    #[test]
    fn test_elapsed_tracks_live_counter() {
        let mut tracker = ClockTracker::new();
        tracker.process(10.0, SAMPLE_RATE);
        drive_silence(&mut tracker, 4_800);
        assert!((tracker.elapsed(SAMPLE_RATE) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_counter_resets_on_edge() {
        let mut tracker = ClockTracker::new();
        tracker.process(10.0, SAMPLE_RATE);
        drive_silence(&mut tracker, 23_999);
        tracker.process(10.0, SAMPLE_RATE);
        assert_eq!(tracker.elapsed(SAMPLE_RATE), 0.0);
    }

    #[test]
    fn test_degenerate_sample_rate_keeps_previous() {
        let mut tracker = ClockTracker::new();
        tracker.process(10.0, SAMPLE_RATE);
        drive_silence(&mut tracker, 23_999);
        let timing = tracker.process(10.0, SAMPLE_RATE).unwrap();

        // An edge measured against a dead sample rate is discarded.
        for _ in 0..100 {
            tracker.process(0.0, 0.0);
        }
        assert!(tracker.process(10.0, 0.0).is_none());
        assert_eq!(tracker.timing(), timing);
    }
}
