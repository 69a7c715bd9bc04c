/// Re-arm threshold in volts; the input must fall to or below this level
/// before another rising edge can fire.
pub const LOW_THRESHOLD: f32 = 0.1;
/// Trigger threshold in volts.
pub const HIGH_THRESHOLD: f32 = 1.0;

/// Rising-edge detector with hysteresis.
///
/// The gap between the two thresholds keeps noisy signals hovering around a
/// single crossing point from producing a burst of spurious edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per rising edge.
    pub fn process(&mut self, value: f32) -> bool {
        if self.high {
            if value <= LOW_THRESHOLD {
                self.high = false;
            }
            false
        } else if value >= HIGH_THRESHOLD {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_fires_once() {
        let mut trigger = SchmittTrigger::new();
        assert!(trigger.process(5.0));
        assert!(!trigger.process(5.0));
        assert!(!trigger.process(10.0));
    }

    #[test]
    fn test_rearm_requires_low_threshold() {
        let mut trigger = SchmittTrigger::new();
        assert!(trigger.process(5.0));
        // Dropping into the hysteresis band must not re-arm.
        assert!(!trigger.process(0.5));
        assert!(!trigger.process(5.0));
        // Falling through the low threshold re-arms.
        assert!(!trigger.process(0.0));
        assert!(trigger.process(5.0));
    }

    #[test]
    fn test_chatter_in_band_is_ignored() {
        let mut trigger = SchmittTrigger::new();
        for v in [0.2, 0.8, 0.3, 0.9, 0.5] {
            assert!(!trigger.process(v));
        }
        assert!(trigger.process(1.0));
    }
}
