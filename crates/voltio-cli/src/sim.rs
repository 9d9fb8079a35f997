//! Simulated register bus for offline replay.

use voltio_core::regmap::adsr;
use voltio_core::{MemBus, RegisterBus, RegisterWrite};
use voltio_synth::ModuleMap;

/// A [`MemBus`] that models the envelope peripheral's occupancy reporting.
///
/// The hardware clears a channel's free bit while its gate is held. The
/// simulator mirrors writes to the amplitude envelope's gate register into
/// the first free-bitmap word; the gate register addresses 32 channels, so
/// the replayed pool is 32 voices deep.
pub struct SimBus {
    inner: MemBus,
    amp_env: u32,
}

impl SimBus {
    /// Creates a bus with every addressable channel free.
    pub fn new(map: &ModuleMap) -> Self {
        let mut inner = MemBus::new();
        inner.poke(map.amp_env, adsr::FREE_BITMAP, u32::MAX);
        Self {
            inner,
            amp_env: map.amp_env,
        }
    }

    /// The writes performed so far, in order.
    pub fn writes(&self) -> &[RegisterWrite] {
        self.inner.writes()
    }

    /// Forgets the writes performed so far.
    pub fn clear_journal(&mut self) {
        self.inner.clear_journal();
    }
}

impl RegisterBus for SimBus {
    fn write(&mut self, base: u32, offset: u32, value: u32) {
        self.inner.write(base, offset, value);
        if base == self.amp_env && offset == adsr::GATE {
            self.inner.poke(base, adsr::FREE_BITMAP, !value);
        }
    }

    fn read(&mut self, base: u32, offset: u32) -> u32 {
        self.inner.read(base, offset)
    }
}
