//! Ladder filter driver.

use crate::bus::RegisterBus;
use crate::codec;
use crate::regmap::filter;

/// Driver for the Moog-style ladder filter.
///
/// The filter is a single shared instance (not per-channel); its cutoff can
/// be swept by the filter envelope and the LFOs when modulation is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderFilter {
    base: u32,
}

impl LadderFilter {
    /// Create a driver for the filter at `base`.
    pub const fn new(base: u32) -> Self {
        Self { base }
    }

    /// The peripheral's base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Set the cutoff frequency in Hz (0-20000).
    pub fn set_cutoff<B: RegisterBus>(&self, bus: &mut B, hz: f32) {
        bus.write(self.base, filter::CUTOFF, codec::filter_cutoff(hz));
    }

    /// Set the resonance (0.0-1.0).
    pub fn set_resonance<B: RegisterBus>(&self, bus: &mut B, resonance: f32) {
        bus.write(self.base, filter::RESONANCE, codec::filter_resonance(resonance));
    }

    /// Set the envelope modulation depth (0.0-1.0).
    pub fn set_envelope_amount<B: RegisterBus>(&self, bus: &mut B, amount: f32) {
        bus.write(
            self.base,
            filter::ENVELOPE_AMOUNT,
            codec::filter_env_amount(amount),
        );
    }

    /// Enable or disable cutoff modulation.
    pub fn set_modulation_enable<B: RegisterBus>(&self, bus: &mut B, enable: bool) {
        bus.write(self.base, filter::MODULATION_ENABLE, u32::from(enable));
    }

    /// Set the cutoff modulation depth (0.0-1.0).
    pub fn set_modulation_amount<B: RegisterBus>(&self, bus: &mut B, amount: f32) {
        bus.write(
            self.base,
            filter::MODULATION_AMOUNT,
            codec::filter_mod_amount(amount),
        );
    }

    /// Select the response type and slope. Two separate register writes:
    /// the hardware latches them independently.
    pub fn set_type<B: RegisterBus>(&self, bus: &mut B, kind: u32, attenuation: u32) {
        bus.write(self.base, filter::TYPE, kind);
        bus.write(self.base, filter::ATTENUATION, attenuation);
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::bus::MemBus;

    const BASE: u32 = 0x43C3_0000;

    #[test]
    fn cutoff_write_is_encoded() {
        let mut bus = MemBus::new();
        LadderFilter::new(BASE).set_cutoff(&mut bus, 20_000.0);
        let w = bus.writes()[0];
        assert_eq!((w.offset, w.value), (filter::CUTOFF, 42_893));
    }

    #[test]
    fn type_issues_two_writes() {
        let mut bus = MemBus::new();
        LadderFilter::new(BASE).set_type(&mut bus, 2, 1);
        let writes = bus.writes();
        assert_eq!((writes[0].offset, writes[0].value), (filter::TYPE, 2));
        assert_eq!((writes[1].offset, writes[1].value), (filter::ATTENUATION, 1));
    }
}
