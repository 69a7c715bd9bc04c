use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Host-facing persisted fields.
///
/// Every field is optional so partially written or foreign documents restore
/// what they can; anything missing keeps the engine's current value. There is
/// no schema version.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronize: Option<bool>,
    #[serde(
        default,
        rename = "syncOutputAlways",
        skip_serializing_if = "Option::is_none"
    )]
    pub sync_output_always: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppqn: Option<u32>,
}

impl PersistedState {
    /// Field-wise extraction from a JSON mapping. A malformed value drops
    /// that field alone; the rest still restore.
    pub fn from_value(value: &Value) -> Self {
        Self {
            running: value.get("running").and_then(Value::as_bool),
            synchronize: value.get("synchronize").and_then(Value::as_bool),
            sync_output_always: value.get("syncOutputAlways").and_then(Value::as_bool),
            ppqn: value
                .get("ppqn")
                .and_then(Value::as_u64)
                .map(|v| v.min(u32::MAX as u64) as u32),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "running": self.running,
            "synchronize": self.synchronize,
            "syncOutputAlways": self.sync_output_always,
            "ppqn": self.ppqn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_round_trip() {
        let state = PersistedState {
            running: Some(true),
            synchronize: Some(false),
            sync_output_always: Some(true),
            ppqn: Some(24),
        };
        assert_eq!(PersistedState::from_value(&state.to_value()), state);
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let state = PersistedState::from_value(&json!({ "running": true }));
        assert_eq!(state.running, Some(true));
        assert_eq!(state.synchronize, None);
        assert_eq!(state.sync_output_always, None);
        assert_eq!(state.ppqn, None);
    }

    #[test]
    fn test_malformed_fields_dropped_individually() {
        let state = PersistedState::from_value(&json!({
            "running": "yes",
            "synchronize": true,
            "syncOutputAlways": 1,
            "ppqn": -3,
        }));
        assert_eq!(state.running, None);
        assert_eq!(state.synchronize, Some(true));
        assert_eq!(state.sync_output_always, None);
        assert_eq!(state.ppqn, None);
    }

    #[test]
    fn test_serde_defaults_tolerate_unknown_keys() {
        let state: PersistedState =
            serde_json::from_str(r#"{"ppqn": 12, "panelColor": "red"}"#).expect("parse");
        assert_eq!(state.ppqn, Some(12));
        assert_eq!(state.running, None);
    }
}
