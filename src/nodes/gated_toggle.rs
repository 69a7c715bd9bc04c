use crate::dsp::SchmittTrigger;

/// Level a connected gate must exceed to count as high.
pub const GATE_THRESHOLD: f32 = 1.0;

/// Momentary button combined with an optional external gate.
///
/// Each button press flips the latch; a connected gate then acts as an
/// external enable on top of it. Disconnecting the gate degrades to
/// manual-only control. Only the latch is persisted; gate connectivity is
/// re-derived live every sample.
#[derive(Debug, Default)]
pub struct GatedToggle {
    button: SchmittTrigger,
    latched: bool,
    active: bool,
}

impl GatedToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, button: f32, gate: Option<f32>) -> bool {
        if self.button.process(button) {
            self.latched = !self.latched;
        }
        self.active = self.latched && gate.map_or(true, |g| g > GATE_THRESHOLD);
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn set_latched(&mut self, latched: bool) {
        self.latched = latched;
    }

    pub fn reset(&mut self) {
        self.button.reset();
        self.latched = false;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(toggle: &mut GatedToggle, gate: Option<f32>) {
        toggle.process(10.0, gate);
        toggle.process(0.0, gate);
    }

    #[test]
    fn test_button_latches() {
        let mut toggle = GatedToggle::new();
        assert!(!toggle.is_active());

        press(&mut toggle, None);
        assert!(toggle.is_active());

        press(&mut toggle, None);
        assert!(!toggle.is_active());
    }

    #[test]
    fn test_held_button_toggles_once() {
        let mut toggle = GatedToggle::new();
        for _ in 0..100 {
            toggle.process(10.0, None);
        }
        assert!(toggle.is_active());
    }

    #[test]
    fn test_low_gate_forces_inactive() {
        let mut toggle = GatedToggle::new();
        // Regardless of button history, a connected low gate wins.
        press(&mut toggle, Some(0.0));
        assert!(!toggle.is_active());
        press(&mut toggle, Some(GATE_THRESHOLD));
        assert!(!toggle.is_active());
    }

    #[test]
    fn test_gate_enables_latched_toggle() {
        let mut toggle = GatedToggle::new();
        press(&mut toggle, Some(0.0));
        assert!(toggle.is_latched());
        assert!(!toggle.is_active());

        toggle.process(0.0, Some(10.0));
        assert!(toggle.is_active());

        // Unplugging the gate falls back to the latch alone.
        toggle.process(0.0, None);
        assert!(toggle.is_active());
    }

    #[test]
    fn test_restored_latch_drives_active() {
        let mut toggle = GatedToggle::new();
        toggle.set_latched(true);
        toggle.process(0.0, None);
        assert!(toggle.is_active());
    }
}
