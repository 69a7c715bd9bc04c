use crate::dsp::PulseGenerator;

/// Width of each emitted clock pulse in seconds, independent of the pulse
/// interval.
pub const PULSE_WIDTH: f32 = 1e-3;

/// Emits evenly spaced pulses at a configurable subdivision of the main
/// clock's period.
///
/// Stays inactive until the main clock has produced a measured period whose
/// derived pulse interval exceeds the fixed pulse width; a shorter interval
/// would leave the output gate permanently high.
#[derive(Debug)]
pub struct PulseSequencer {
    pulse: PulseGenerator,
    active: bool,
    pulses_per_note: u32,
    pulses_this_note: u32,
    note_time: f32,
    time_per_pulse: f32,
}

impl PulseSequencer {
    pub fn new(pulses_per_note: u32) -> Self {
        Self {
            pulse: PulseGenerator::new(),
            active: false,
            pulses_per_note: pulses_per_note.max(1),
            pulses_this_note: 0,
            note_time: 0.0,
            time_per_pulse: 0.0,
        }
    }

    pub fn set_pulses_per_note(&mut self, pulses_per_note: u32) {
        self.pulses_per_note = pulses_per_note.max(1);
        self.pulses_this_note = 0;
        self.note_time = 0.0;
    }

    /// Nominal rate update from a completed main-clock period.
    pub fn set_period(&mut self, period: f32) {
        if period <= 0.0 {
            self.active = false;
            return;
        }
        self.time_per_pulse = period / self.pulses_per_note as f32;
        self.active = self.time_per_pulse > PULSE_WIDTH;
    }

    /// Phase correction: pull the current note toward the next main edge by
    /// rewinding accumulated note time.
    pub fn shift_phase(&mut self, delay: f32) {
        self.note_time -= delay;
    }

    /// Rate correction: finish the remaining pulses of this note in `delay`
    /// seconds. The nominal interval returns with the next `set_period`.
    pub fn rescale_rate(&mut self, delay: f32) {
        let per_pulse = delay / self.pulses_per_note as f32;
        if per_pulse > 0.0 {
            self.time_per_pulse = per_pulse;
        }
    }

    /// Advance by one sample; returns whether the output gate is high.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        self.note_time += dt;
        if self.note_time >= self.time_per_pulse {
            self.pulse.trigger(PULSE_WIDTH);
            self.note_time -= self.time_per_pulse;
            self.pulses_this_note += 1;

            if self.pulses_this_note >= self.pulses_per_note {
                // Hard boundary reset; successive subtractions would
                // otherwise accumulate drift without bound.
                self.pulses_this_note = 0;
                self.note_time = 0.0;
            }
        }

        self.pulse.process(dt)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pulses_this_note(&self) -> u32 {
        self.pulses_this_note
    }

    pub fn note_time(&self) -> f32 {
        self.note_time
    }

    pub fn time_per_pulse(&self) -> f32 {
        self.time_per_pulse
    }

    pub fn reset(&mut self) {
        self.pulse.reset();
        self.active = false;
        self.pulses_this_note = 0;
        self.note_time = 0.0;
        self.time_per_pulse = 0.0;
    }
}
