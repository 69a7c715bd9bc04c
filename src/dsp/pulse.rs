/// Emits a gate that stays high for a fixed duration after each trigger.
#[derive(Debug, Default, Clone, Copy)]
pub struct PulseGenerator {
    remaining: f32,
}

impl PulseGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or extend) a pulse of `duration` seconds.
    pub fn trigger(&mut self, duration: f32) {
        if duration > self.remaining {
            self.remaining = duration;
        }
    }

    /// Advance by `dt` seconds; returns true while the pulse is high.
    pub fn process(&mut self, dt: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_width() {
        let mut pulse = PulseGenerator::new();
        let dt = 1.0 / 48_000.0;
        pulse.trigger(1e-3);

        let mut high_samples = 0;
        for _ in 0..96 {
            if pulse.process(dt) {
                high_samples += 1;
            }
        }
        // 1 ms at 48 kHz is 48 samples, one sample of rounding slack.
        assert!((48..=49).contains(&high_samples), "width {high_samples}");
    }

    #[test]
    fn test_retrigger_does_not_shorten() {
        let mut pulse = PulseGenerator::new();
        pulse.trigger(1e-3);
        pulse.trigger(1e-4);
        let mut high_samples = 0;
        let dt = 1.0 / 48_000.0;
        while pulse.process(dt) {
            high_samples += 1;
        }
        assert!((48..=49).contains(&high_samples), "width {high_samples}");
    }
}
