//! Patch file format and operations.
//!
//! A patch captures every continuous parameter of the instrument in the
//! physical units the front end works in (seconds, Hz, normalized levels).
//! The default patch reproduces the power-on state of the hardware.

use serde::{Deserialize, Serialize};
use std::path::Path;

use voltio_core::RegisterBus;
use voltio_core::regmap::{adsr, filter as filter_regs, lfo as lfo_regs};
use voltio_synth::{EnvTarget, LfoSelect, Synth};

use crate::error::PatchError;

/// Settings for one of the three oscillators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OscillatorPatch {
    /// Waveform select, 0-3.
    #[serde(default)]
    pub waveform: u32,
    /// Detune in semitones, -24 to 24.
    #[serde(default)]
    pub detune: i32,
    /// Square-wave pulse width, 0.0-1.0.
    #[serde(default = "default_pulse_width")]
    pub pulse_width: f32,
    /// Mix level, 0.0-1.0.
    #[serde(default)]
    pub mix: f32,
    /// Pulse-width modulation enable.
    #[serde(default = "default_true")]
    pub pwm: bool,
}

impl Default for OscillatorPatch {
    fn default() -> Self {
        Self {
            waveform: 0,
            detune: 0,
            pulse_width: 0.5,
            mix: 0.0,
            pwm: true,
        }
    }
}

/// Settings for one ADSR envelope generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnvelopePatch {
    /// Attack time in seconds, 0-10.
    #[serde(default)]
    pub attack: f32,
    /// Decay time in seconds, 0-10.
    #[serde(default)]
    pub decay: f32,
    /// Sustain level, 0.0-1.0.
    #[serde(default = "default_unit")]
    pub sustain: f32,
    /// Release time in seconds, 0-10.
    #[serde(default)]
    pub release: f32,
}

impl Default for EnvelopePatch {
    fn default() -> Self {
        Self {
            attack: 0.0,
            decay: 0.0,
            sustain: 1.0,
            release: 0.0,
        }
    }
}

/// Settings for the ladder filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FilterPatch {
    /// Cutoff frequency in Hz, 0-20000.
    #[serde(default = "default_cutoff")]
    pub cutoff_hz: f32,
    /// Resonance, 0.0-1.0.
    #[serde(default)]
    pub resonance: f32,
    /// Response type: 0 low pass, 1 band pass, 2 high pass.
    #[serde(default)]
    pub kind: u32,
    /// Slope select: 0 for 24 dB/oct, 1 for 12 dB/oct.
    #[serde(default = "default_one")]
    pub attenuation: u32,
    /// Envelope modulation depth, 0.0-1.0.
    #[serde(default)]
    pub envelope_amount: f32,
    /// Cutoff modulation enable.
    #[serde(default = "default_true")]
    pub modulation_enable: bool,
    /// Cutoff modulation depth, 0.0-1.0.
    #[serde(default = "default_unit")]
    pub modulation_amount: f32,
}

impl Default for FilterPatch {
    fn default() -> Self {
        Self {
            cutoff_hz: 20_000.0,
            resonance: 0.0,
            kind: 0,
            attenuation: 1,
            envelope_amount: 0.0,
            modulation_enable: true,
            modulation_amount: 1.0,
        }
    }
}

/// Settings for one LFO.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LfoPatch {
    /// Waveform select, 0-3.
    #[serde(default)]
    pub waveform: u32,
    /// Period in seconds, 0-30. Zero selects the fastest rate.
    #[serde(default)]
    pub period_s: f32,
    /// Modulation depth, 0.0-1.0.
    #[serde(default)]
    pub amount: f32,
}

fn default_pulse_width() -> f32 {
    0.5
}

fn default_unit() -> f32 {
    1.0
}

fn default_cutoff() -> f32 {
    20_000.0
}

fn default_one() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_oscillators() -> [OscillatorPatch; 3] {
    // Oscillator A carries the signal at power-on, B and C are mixed out.
    [
        OscillatorPatch {
            mix: 1.0,
            ..OscillatorPatch::default()
        },
        OscillatorPatch::default(),
        OscillatorPatch::default(),
    ]
}

/// A complete instrument patch.
///
/// # TOML Format
///
/// ```toml
/// [[oscillators]]
/// waveform = 0
/// detune = 0
/// pulse_width = 0.5
/// mix = 1.0
/// pwm = true
///
/// [amp_env]
/// attack = 0.01
/// decay = 0.2
/// sustain = 0.7
/// release = 1.5
///
/// [filter]
/// cutoff_hz = 4000.0
/// resonance = 0.3
///
/// [[lfos]]
/// waveform = 1
/// period_s = 2.0
/// amount = 0.25
/// ```
///
/// Every section and field is optional; omitted values fall back to the
/// power-on defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// The three oscillators, in A, B, C order.
    #[serde(default = "default_oscillators")]
    pub oscillators: [OscillatorPatch; 3],
    /// Amplitude envelope.
    #[serde(default)]
    pub amp_env: EnvelopePatch,
    /// Filter envelope.
    #[serde(default)]
    pub filter_env: EnvelopePatch,
    /// Ladder filter.
    #[serde(default)]
    pub filter: FilterPatch,
    /// The three LFOs, in A, B, C order.
    #[serde(default)]
    pub lfos: [LfoPatch; 3],
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            oscillators: default_oscillators(),
            amp_env: EnvelopePatch::default(),
            filter_env: EnvelopePatch::default(),
            filter: FilterPatch::default(),
            lfos: [LfoPatch::default(); 3],
        }
    }
}

fn check(field: &str, value: f32, min: f32, max: f32) -> Result<(), PatchError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PatchError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

impl Patch {
    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PatchError::read_file(path, e))?;
        let patch: Patch = toml::from_str(&content)?;
        patch.validate()?;
        Ok(patch)
    }

    /// Load a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PatchError> {
        let patch: Patch = toml::from_str(toml_str)?;
        patch.validate()?;
        Ok(patch)
    }

    /// Save the patch to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PatchError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?).map_err(|e| PatchError::write_file(path, e))
    }

    /// Serialize the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, PatchError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every field against the range the hardware accepts.
    pub fn validate(&self) -> Result<(), PatchError> {
        for (i, o) in self.oscillators.iter().enumerate() {
            check(&format!("oscillators[{i}].waveform"), o.waveform as f32, 0.0, 3.0)?;
            check(&format!("oscillators[{i}].detune"), o.detune as f32, -24.0, 24.0)?;
            check(&format!("oscillators[{i}].pulse_width"), o.pulse_width, 0.0, 1.0)?;
            check(&format!("oscillators[{i}].mix"), o.mix, 0.0, 1.0)?;
        }
        for (name, env) in [("amp_env", &self.amp_env), ("filter_env", &self.filter_env)] {
            check(&format!("{name}.attack"), env.attack, 0.0, adsr::TIME_MAX_S)?;
            check(&format!("{name}.decay"), env.decay, 0.0, adsr::TIME_MAX_S)?;
            check(&format!("{name}.sustain"), env.sustain, 0.0, 1.0)?;
            check(&format!("{name}.release"), env.release, 0.0, adsr::TIME_MAX_S)?;
        }
        check("filter.cutoff_hz", self.filter.cutoff_hz, 0.0, filter_regs::CUTOFF_MAX_HZ)?;
        check("filter.resonance", self.filter.resonance, 0.0, 1.0)?;
        check("filter.kind", self.filter.kind as f32, 0.0, 2.0)?;
        check("filter.attenuation", self.filter.attenuation as f32, 0.0, 1.0)?;
        check("filter.envelope_amount", self.filter.envelope_amount, 0.0, 1.0)?;
        check("filter.modulation_amount", self.filter.modulation_amount, 0.0, 1.0)?;
        for (i, l) in self.lfos.iter().enumerate() {
            check(&format!("lfos[{i}].waveform"), l.waveform as f32, 0.0, 3.0)?;
            check(&format!("lfos[{i}].period_s"), l.period_s, 0.0, lfo_regs::PERIOD_MAX_S)?;
            check(&format!("lfos[{i}].amount"), l.amount, 0.0, 1.0)?;
        }
        Ok(())
    }

    /// Writes every parameter in the patch to the hardware.
    ///
    /// Sustain is written before decay and release; those two registers are
    /// derived from the sustain level latched at write time.
    pub fn apply<B: RegisterBus>(&self, synth: &mut Synth<B>) {
        for (i, o) in self.oscillators.iter().enumerate() {
            let n = i as u32;
            synth.set_osc_mix(n, o.mix);
            synth.set_osc_waveform(n, o.waveform);
            synth.set_osc_detune(n, o.detune);
            synth.set_osc_pulse_width(n, o.pulse_width);
            synth.set_osc_pwm_enable(n, o.pwm);
        }

        for (target, env) in [
            (EnvTarget::Amplitude, &self.amp_env),
            (EnvTarget::Filter, &self.filter_env),
        ] {
            synth.set_env_sustain(target, env.sustain);
            synth.set_env_attack(target, env.attack);
            synth.set_env_decay(target, env.decay);
            synth.set_env_release(target, env.release);
        }

        synth.set_filter_cutoff(self.filter.cutoff_hz);
        synth.set_filter_resonance(self.filter.resonance);
        synth.set_filter_type(self.filter.kind, self.filter.attenuation);
        synth.set_filter_env_amount(self.filter.envelope_amount);
        synth.set_filter_mod_enable(self.filter.modulation_enable);
        synth.set_filter_mod_amount(self.filter.modulation_amount);

        for (sel, l) in [LfoSelect::A, LfoSelect::B, LfoSelect::C]
            .into_iter()
            .zip(&self.lfos)
        {
            synth.set_lfo_waveform(sel, l.waveform);
            synth.set_lfo_rate(sel, l.period_s);
            synth.set_lfo_amount(sel, l.amount);
        }
    }
}
