//! ADSR envelope generator driver.

use crate::bus::RegisterBus;
use crate::codec;
use crate::regmap::adsr;

/// Snapshot of the hardware's per-channel availability bitmap.
///
/// Bit `i` set means channel `i` is reported free. The hardware updates the
/// underlying registers autonomously as envelopes decay, so a snapshot is
/// only trustworthy for the allocation it was fetched for; never cache one
/// across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeBitmap {
    words: [u32; adsr::FREE_BITMAP_WORDS],
}

impl FreeBitmap {
    /// Build a snapshot from raw bitmap words.
    pub const fn from_words(words: [u32; adsr::FREE_BITMAP_WORDS]) -> Self {
        Self { words }
    }

    /// Whether the hardware reports `channel` as free.
    ///
    /// Channels beyond the bitmap always read as busy.
    pub fn is_free(&self, channel: usize) -> bool {
        let word = channel / 32;
        if word >= self.words.len() {
            return false;
        }
        self.words[word] & (1 << (channel % 32)) != 0
    }
}

/// Driver for one ADSR envelope generator instance.
///
/// The synthesizer carries two: one shaping channel amplitude, one driving
/// the filter cutoff sweep. Both share this register layout.
///
/// Decay and release rates span from the sustain level, so their setters
/// read the sustain register immediately before encoding. That
/// read-then-write sequence has no hardware interlock; it is only safe
/// under single-threaded dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeGen {
    base: u32,
}

impl EnvelopeGen {
    /// Create a driver for the envelope generator at `base`.
    pub const fn new(base: u32) -> Self {
        Self { base }
    }

    /// The peripheral's base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Set the attack time in seconds (0 = instantaneous).
    pub fn set_attack<B: RegisterBus>(&self, bus: &mut B, time_s: f32) {
        bus.write(self.base, adsr::ATTACK, codec::adsr_attack(time_s));
    }

    /// Set the sustain level (0.0-1.0).
    ///
    /// Changing sustain does not rewrite decay/release; callers that need
    /// consistent ramps re-issue those after a sustain change.
    pub fn set_sustain<B: RegisterBus>(&self, bus: &mut B, level: f32) {
        bus.write(self.base, adsr::SUSTAIN, codec::adsr_sustain(level));
    }

    /// Set the decay time in seconds, ramping down to the currently latched
    /// sustain level.
    pub fn set_decay<B: RegisterBus>(&self, bus: &mut B, time_s: f32) {
        let sustain = bus.read(self.base, adsr::SUSTAIN);
        bus.write(self.base, adsr::DECAY, codec::adsr_decay(time_s, sustain));
    }

    /// Set the release time in seconds, ramping from the currently latched
    /// sustain level to silence.
    pub fn set_release<B: RegisterBus>(&self, bus: &mut B, time_s: f32) {
        let sustain = bus.read(self.base, adsr::SUSTAIN);
        bus.write(self.base, adsr::RELEASE, codec::adsr_release(time_s, sustain));
    }

    /// Open the gate for one channel (read-modify-write of the shared
    /// gate register).
    ///
    /// The gate register is 32 bits wide; channel indices are taken modulo
    /// 32, matching what the bus hardware does with the upper channels.
    pub fn gate_on<B: RegisterBus>(&self, bus: &mut B, channel: u32) {
        let gates = bus.read(self.base, adsr::GATE);
        bus.write(self.base, adsr::GATE, gates | 1u32.wrapping_shl(channel));
    }

    /// Close the gate for one channel.
    pub fn gate_off<B: RegisterBus>(&self, bus: &mut B, channel: u32) {
        let gates = bus.read(self.base, adsr::GATE);
        bus.write(self.base, adsr::GATE, gates & !1u32.wrapping_shl(channel));
    }

    /// Fetch a fresh snapshot of the free-channel bitmap.
    pub fn free_channels<B: RegisterBus>(&self, bus: &mut B) -> FreeBitmap {
        let mut words = [0u32; adsr::FREE_BITMAP_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = bus.read(self.base, adsr::FREE_BITMAP + 4 * i as u32);
        }
        FreeBitmap::from_words(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_reads_bits_across_words() {
        let map = FreeBitmap::from_words([0b1, 0, 1 << 5, 0]);
        assert!(map.is_free(0));
        assert!(!map.is_free(1));
        assert!(map.is_free(69));
        assert!(!map.is_free(127));
        assert!(!map.is_free(500));
    }

    #[cfg(feature = "std")]
    mod bus {
        use super::*;
        use crate::bus::MemBus;

        const BASE: u32 = 0x43C1_0000;

        #[test]
        fn gate_on_sets_only_the_channel_bit() {
            let mut bus = MemBus::new();
            let env = EnvelopeGen::new(BASE);
            bus.poke(BASE, adsr::GATE, 0b1000);

            env.gate_on(&mut bus, 0);
            assert_eq!(bus.peek(BASE, adsr::GATE), 0b1001);

            env.gate_off(&mut bus, 3);
            assert_eq!(bus.peek(BASE, adsr::GATE), 0b0001);
        }

        #[test]
        fn decay_reads_latched_sustain_first() {
            let mut bus = MemBus::new();
            let env = EnvelopeGen::new(BASE);
            bus.poke(BASE, adsr::SUSTAIN, adsr::LEVEL_MAX);

            env.set_decay(&mut bus, 0.0);
            // Full sustain leaves nothing to decay through.
            assert_eq!(bus.peek(BASE, adsr::DECAY), 0);

            env.set_release(&mut bus, 0.0);
            assert_eq!(bus.peek(BASE, adsr::RELEASE), adsr::LEVEL_MAX);
        }

        #[test]
        fn free_channels_reads_four_consecutive_words() {
            let mut bus = MemBus::new();
            let env = EnvelopeGen::new(BASE);
            bus.poke(BASE, adsr::FREE_BITMAP, 0xFFFF_FFFF);
            bus.poke(BASE, adsr::FREE_BITMAP + 12, 1);

            let map = env.free_channels(&mut bus);
            assert!(map.is_free(31));
            assert!(!map.is_free(32));
            assert!(map.is_free(96));
        }
    }
}
