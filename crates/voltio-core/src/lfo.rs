//! Low-frequency oscillator driver.

use crate::bus::RegisterBus;
use crate::codec;
use crate::regmap::lfo;

/// Driver for one low-frequency oscillator instance.
///
/// The synthesizer carries three (A/B/C). Rate and depth are global per
/// instance; the channel gate word tells the LFO which voice channels it
/// currently modulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfo {
    base: u32,
}

impl Lfo {
    /// Create a driver for the LFO at `base`.
    pub const fn new(base: u32) -> Self {
        Self { base }
    }

    /// The peripheral's base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Select the waveform.
    pub fn set_waveform<B: RegisterBus>(&self, bus: &mut B, waveform: u32) {
        bus.write(self.base, lfo::WAVEFORM, waveform);
    }

    /// Set the rate from a period in seconds (0-30; non-positive saturates
    /// to the fastest rate).
    pub fn set_rate<B: RegisterBus>(&self, bus: &mut B, period_s: f32) {
        bus.write(self.base, lfo::RATE, codec::lfo_rate(period_s));
    }

    /// Set the modulation depth (0.0-1.0).
    pub fn set_amount<B: RegisterBus>(&self, bus: &mut B, amount: f32) {
        bus.write(self.base, lfo::AMOUNT, codec::lfo_amount(amount));
    }

    /// Start modulating one voice channel.
    pub fn channel_on<B: RegisterBus>(&self, bus: &mut B, channel: u32) {
        bus.write(self.base, lfo::CHANNEL_GATE, codec::lfo_gate_on(channel));
    }

    /// Stop modulating one voice channel.
    pub fn channel_off<B: RegisterBus>(&self, bus: &mut B, channel: u32) {
        bus.write(self.base, lfo::CHANNEL_GATE, codec::lfo_gate_off(channel));
    }
}
