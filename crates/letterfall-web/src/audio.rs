use letterfall_engine::{SoundEvent, ToneBank, ToneSpec, Waveform};
use web_sys as web;

/// Plays engine sound events as short oscillator tones.
///
/// The audio context is only created on `resume`, which must run inside a
/// user gesture. Until then, and whenever Web Audio fails, tones are skipped.
pub struct ToneSynth {
    ctx: Option<web::AudioContext>,
}

impl ToneSynth {
    pub const fn new() -> Self {
        Self { ctx: None }
    }

    pub fn is_ready(&self) -> bool {
        self.ctx.is_some()
    }

    /// Create (or resume) the audio context.
    pub fn resume(&mut self) {
        if self.ctx.is_none() {
            match web::AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    log::warn!("audio unavailable: {:?}", e);
                    return;
                }
            }
        }
        if let Some(ctx) = &self.ctx {
            if let Err(e) = ctx.resume() {
                log::warn!("audio resume failed: {:?}", e);
            }
        }
    }

    /// Play every event that has a tone in `bank`.
    pub fn play_all(&self, bank: &ToneBank, sounds: &[SoundEvent]) {
        if self.ctx.is_none() {
            return;
        }
        for &sound in sounds {
            match bank.get(sound) {
                Some(spec) => {
                    if let Err(e) = self.play(spec) {
                        log::warn!("tone {} skipped: {:?}", sound.0, e);
                    }
                }
                None => log::debug!("no tone for sound {}", sound.0),
            }
        }
    }

    fn play(&self, spec: &ToneSpec) -> Result<(), wasm_bindgen::JsValue> {
        let Some(ctx) = &self.ctx else {
            return Ok(());
        };
        let now = ctx.current_time();
        let end = now + spec.duration as f64;

        let osc = web::OscillatorNode::new(ctx)?;
        osc.set_type(oscillator_type(spec.waveform));
        osc.frequency().set_value_at_time(spec.start_hz, now)?;
        osc.frequency().exponential_ramp_to_value_at_time(spec.end_hz, end)?;

        let gain = web::GainNode::new(ctx)?;
        gain.gain().set_value_at_time(0.0, now)?;
        gain.gain().linear_ramp_to_value_at_time(spec.peak_gain, now + spec.attack as f64)?;
        gain.gain().exponential_ramp_to_value_at_time(ToneSpec::FLOOR_GAIN, end)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        osc.start_with_when(now)?;
        osc.stop_with_when(end)?;
        Ok(())
    }
}

impl Default for ToneSynth {
    fn default() -> Self {
        Self::new()
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Sawtooth => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}
