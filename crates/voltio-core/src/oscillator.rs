//! Oscillator bank driver.

use crate::bus::RegisterBus;
use crate::codec;
use crate::regmap::osc;

/// Driver for the multi-channel oscillator bank.
///
/// The bank multiplexes three oscillators (A/B/C) and all voice channels
/// onto a single register file. Per-oscillator parameters (waveform,
/// detune, pulse width, mix, PWM enable) carry the oscillator index in the
/// selector bits; per-channel parameters (frequency, modulation enable)
/// carry the voice channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OscillatorBank {
    base: u32,
}

impl OscillatorBank {
    /// Create a driver for the bank at `base`.
    pub const fn new(base: u32) -> Self {
        Self { base }
    }

    /// The peripheral's base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Set the pitch of one voice channel.
    pub fn set_frequency<B: RegisterBus>(&self, bus: &mut B, channel: u32, hz: f32) {
        let word = codec::with_selector(channel, codec::osc_frequency(hz));
        bus.write(self.base, osc::FREQUENCY, word);
    }

    /// Select the waveform of one oscillator.
    pub fn set_waveform<B: RegisterBus>(&self, bus: &mut B, oscillator: u32, waveform: u32) {
        let word = codec::with_selector(oscillator, codec::osc_waveform(waveform));
        bus.write(self.base, osc::WAVEFORM, word);
    }

    /// Detune one oscillator by a whole number of semitones.
    pub fn set_detune<B: RegisterBus>(&self, bus: &mut B, oscillator: u32, semitones: i32) {
        let word = codec::with_selector(oscillator, codec::osc_detune(semitones));
        bus.write(self.base, osc::DETUNE, word);
    }

    /// Set one oscillator's square-wave pulse width (0.0-1.0).
    pub fn set_pulse_width<B: RegisterBus>(&self, bus: &mut B, oscillator: u32, pw: f32) {
        let word = codec::with_selector(oscillator, codec::osc_pulse_width(pw));
        bus.write(self.base, osc::PULSE_WIDTH, word);
    }

    /// Set one oscillator's level in the output mix (0.0-1.0).
    pub fn set_mix<B: RegisterBus>(&self, bus: &mut B, oscillator: u32, mix: f32) {
        let word = codec::with_selector(oscillator, codec::osc_mix(mix));
        bus.write(self.base, osc::MIX, word);
    }

    /// Enable or disable pulse-width modulation for one oscillator.
    pub fn set_pwm_enable<B: RegisterBus>(&self, bus: &mut B, oscillator: u32, enable: bool) {
        let word = codec::with_selector(oscillator, u32::from(enable));
        bus.write(self.base, osc::PWM_ENABLE, word);
    }

    /// Enable or disable pitch modulation for one voice channel.
    pub fn set_modulation_enable<B: RegisterBus>(&self, bus: &mut B, channel: u32, enable: bool) {
        let word = codec::with_selector(channel, u32::from(enable));
        bus.write(self.base, osc::MODULATION_ENABLE, word);
    }
}
