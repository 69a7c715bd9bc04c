/// Output high level for gate-style signals, in volts.
pub const GATE_HIGH: f32 = 10.0;

/// One sample's worth of control inputs. Ports that can be left unpatched on
/// the panel are `Option`; connectivity is re-derived every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineInputs {
    pub run_button: f32,
    pub run_gate: Option<f32>,
    pub sync_button: f32,
    pub sync_gate: Option<f32>,
    pub threshold_knob: f32,
    pub threshold_cv: Option<f32>,
    pub main_clock: f32,
    pub external_clock: f32,
}

/// One sample's worth of outputs and indicator levels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EngineOutputs {
    /// Subdivided clock gate: 0 or [`GATE_HIGH`].
    pub clock_out: f32,
    /// Proportional phase-error signal, 0 while suppressed.
    pub sync_quality: f32,
    pub running_light: f32,
    pub sync_toggle_light: f32,
    pub sync_green_light: f32,
    pub sync_red_light: f32,
}

/// Output subdivision, restricted to the supported set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ppqn {
    P1,
    P4,
    P6,
    P12,
    #[default]
    P24,
    P48,
}

impl Ppqn {
    pub const ALL: [Ppqn; 6] = [
        Ppqn::P1,
        Ppqn::P4,
        Ppqn::P6,
        Ppqn::P12,
        Ppqn::P24,
        Ppqn::P48,
    ];

    pub fn pulses(self) -> u32 {
        match self {
            Ppqn::P1 => 1,
            Ppqn::P4 => 4,
            Ppqn::P6 => 6,
            Ppqn::P12 => 12,
            Ppqn::P24 => 24,
            Ppqn::P48 => 48,
        }
    }

    pub fn from_pulses(pulses: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.pulses() == pulses)
    }

    /// Closest supported subdivision; used when restoring foreign or stale
    /// persisted values.
    pub fn nearest(pulses: u32) -> Self {
        Self::ALL
            .into_iter()
            .min_by_key(|p| (p.pulses() as i64 - pulses as i64).abs())
            .unwrap_or_default()
    }
}

/// Fixed engine configuration; the host's menu layer maps onto this struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub ppqn: Ppqn,
    /// Emit the sync-quality output even while the sync toggle is off.
    pub sync_output_always: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppqn_round_trip() {
        for ppqn in Ppqn::ALL {
            assert_eq!(Ppqn::from_pulses(ppqn.pulses()), Some(ppqn));
        }
        assert_eq!(Ppqn::from_pulses(13), None);
    }

    #[test]
    fn test_ppqn_nearest_snaps() {
        assert_eq!(Ppqn::nearest(0), Ppqn::P1);
        assert_eq!(Ppqn::nearest(5), Ppqn::P4);
        assert_eq!(Ppqn::nearest(20), Ppqn::P24);
        assert_eq!(Ppqn::nearest(1000), Ppqn::P48);
    }

    #[test]
    fn test_default_ppqn() {
        assert_eq!(Ppqn::default(), Ppqn::P24);
        assert_eq!(EngineConfig::default().ppqn.pulses(), 24);
    }
}
