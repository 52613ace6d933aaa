// Sound event entities produced by the detection pipeline
//
// These are the output boundary of the crate: the event list is meant to
// be serialized into a per-recording record and rendered as a timeline.
// The four type identifiers are stable wire values and must not change.

use serde::{Deserialize, Serialize};

/// Classification of a detected sound event
///
/// A closed set; every event carries exactly one type. The serialized
/// identifiers (`loudSound`, `snoring`, `talking`, `silence`) round-trip
/// through persistence and are relied on by display code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEventType {
    /// Short sharp spike well above baseline
    LoudSound,
    /// Rhythmic or long sustained elevation
    Snoring,
    /// Short irregular sustained elevation
    Talking,
    /// Extended quiet stretch at or near baseline
    Silence,
}

impl SoundEventType {
    /// Human-readable label for reports and timelines
    pub fn display_name(&self) -> &'static str {
        match self {
            SoundEventType::LoudSound => "Loud Sound",
            SoundEventType::Snoring => "Snoring",
            SoundEventType::Talking => "Talking",
            SoundEventType::Silence => "Silence",
        }
    }
}

/// A labeled span of the recording
///
/// `timestamp` is the offset from recording start and `duration` the span
/// length, both in sample units (nominally seconds). Invariants upheld by
/// the pipeline: `duration >= 1`, `timestamp >= 0`, and the span never
/// extends past the end of the sample sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundEvent {
    pub timestamp: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: SoundEventType,
    pub peak_decibels: f32,
    pub average_decibels: f32,
}

impl SoundEvent {
    /// End of the event's span (timestamp + duration)
    pub fn end(&self) -> f64 {
        self.timestamp + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_identifiers_are_stable() {
        assert_eq!(
            serde_json::to_string(&SoundEventType::LoudSound).unwrap(),
            "\"loudSound\""
        );
        assert_eq!(
            serde_json::to_string(&SoundEventType::Snoring).unwrap(),
            "\"snoring\""
        );
        assert_eq!(
            serde_json::to_string(&SoundEventType::Talking).unwrap(),
            "\"talking\""
        );
        assert_eq!(
            serde_json::to_string(&SoundEventType::Silence).unwrap(),
            "\"silence\""
        );
    }

    #[test]
    fn test_event_roundtrip_keeps_type_field() {
        let event = SoundEvent {
            timestamp: 42.0,
            duration: 3.0,
            kind: SoundEventType::Talking,
            peak_decibels: 48.5,
            average_decibels: 44.0,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"talking\""));
        assert!(json.contains("\"peakDecibels\""));

        let parsed: SoundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_end_is_timestamp_plus_duration() {
        let event = SoundEvent {
            timestamp: 10.0,
            duration: 5.0,
            kind: SoundEventType::Silence,
            peak_decibels: 32.0,
            average_decibels: 30.0,
        };
        assert_eq!(event.end(), 15.0);
    }
}
