use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::types::SoundEvent;

/// Oscillator shape for a synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A short procedurally synthesized tone: an exponential pitch sweep with a
/// linear attack and exponential release envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    /// Frequency at t = 0 (Hz).
    pub start_hz: f32,
    /// Frequency at t = duration (Hz).
    pub end_hz: f32,
    /// Total length in seconds.
    pub duration: f32,
    /// Gain reached at the end of the attack.
    pub peak_gain: f32,
    /// Attack length in seconds.
    pub attack: f32,
}

impl ToneSpec {
    /// Gain the release ramps down to. Exponential ramps cannot reach zero.
    pub const FLOOR_GAIN: f32 = 0.001;

    /// Frequency at time `t` along the exponential sweep.
    pub fn frequency_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.end_hz;
        }
        let k = (t / self.duration).clamp(0.0, 1.0);
        self.start_hz * (self.end_hz / self.start_hz).powf(k)
    }
}

/// Maps sound events to tone specs. Loadable from JSON so the host and the
/// game agree on one description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToneBank {
    #[serde(default)]
    tones: HashMap<u32, ToneSpec>,
}

impl ToneBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bank from a JSON object keyed by event id.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn register(&mut self, event: SoundEvent, spec: ToneSpec) {
        self.tones.insert(event.0, spec);
    }

    pub fn get(&self, event: SoundEvent) -> Option<&ToneSpec> {
        self.tones.get(&event.0)
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pop() -> ToneSpec {
        ToneSpec {
            waveform: Waveform::Sine,
            start_hz: 880.0,
            end_hz: 110.0,
            duration: 0.15,
            peak_gain: 0.3,
            attack: 0.02,
        }
    }

    #[test]
    fn sweep_hits_endpoints() {
        let tone = pop();
        assert!((tone.frequency_at(0.0) - 880.0).abs() < 1e-3);
        assert!((tone.frequency_at(0.15) - 110.0).abs() < 1e-3);
        // Halfway through an 8x drop is a factor of sqrt(8).
        assert!((tone.frequency_at(0.075) - 880.0 / 8f32.sqrt()).abs() < 1e-2);
    }

    #[test]
    fn register_and_lookup() {
        let mut bank = ToneBank::new();
        bank.register(SoundEvent(1), pop());
        assert_eq!(bank.get(SoundEvent(1)), Some(&pop()));
        assert!(bank.get(SoundEvent(2)).is_none());
    }

    #[test]
    fn parse_bank_from_json() {
        let json = r#"{
            "tones": {
                "2": { "waveform": "square", "start_hz": 440, "end_hz": 220,
                       "duration": 0.1, "peak_gain": 0.2, "attack": 0.01 }
            }
        }"#;
        let bank = ToneBank::from_json(json).unwrap();
        let click = bank.get(SoundEvent(2)).unwrap();
        assert_eq!(click.waveform, Waveform::Square);
        assert_eq!(click.start_hz, 440.0);
    }
}
