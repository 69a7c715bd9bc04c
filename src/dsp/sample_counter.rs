/// Counts whole audio samples since the last reset.
///
/// Accumulating `sample_time` every sample compounds floating-point error
/// over long runs. Counting integer samples and dividing by the sample rate
/// once per request bounds the error to a single division's rounding.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleCounter {
    samples: u64,
}

impl SampleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.samples += 1;
    }

    pub fn reset(&mut self) {
        self.samples = 0;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Elapsed time in seconds. The only division in the timing path.
    pub fn elapsed(&self, sample_rate: f32) -> f32 {
        if sample_rate <= 0.0 {
            return 0.0;
        }
        self.samples as f32 / sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_defers_division() {
        let mut counter = SampleCounter::new();
        for _ in 0..48_000 {
            counter.tick();
        }
        assert_eq!(counter.samples(), 48_000);
        assert_eq!(counter.elapsed(48_000.0), 1.0);
    }

    #[test]
    fn test_reset_zeroes_count() {
        let mut counter = SampleCounter::new();
        counter.tick();
        counter.tick();
        counter.reset();
        assert_eq!(counter.samples(), 0);
        assert_eq!(counter.elapsed(44_100.0), 0.0);
    }

    #[test]
    fn test_degenerate_sample_rate() {
        let mut counter = SampleCounter::new();
        counter.tick();
        assert_eq!(counter.elapsed(0.0), 0.0);
        assert_eq!(counter.elapsed(-48_000.0), 0.0);
    }
}
