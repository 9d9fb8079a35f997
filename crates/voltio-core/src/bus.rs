//! Register bus abstraction.
//!
//! The hardware exposes every peripheral as a bank of memory-mapped 32-bit
//! registers. [`RegisterBus`] reduces that to the two primitives the rest of
//! the control plane needs, so drivers never touch raw pointers and tests can
//! substitute an in-memory fake. There are no transactional guarantees across
//! multiple registers; read-then-write sequences (envelope decay/release) are
//! only safe because message dispatch is single-threaded.

/// Synchronous access to memory-mapped peripheral registers.
///
/// `base` is the peripheral instance's base address; `offset` is a
/// module-relative byte offset from its register map. Writes are
/// fire-and-forget: completion of the call is the only acknowledgement.
pub trait RegisterBus {
    /// Write one 32-bit word to `base + offset`.
    fn write(&mut self, base: u32, offset: u32, value: u32);

    /// Read one 32-bit word from `base + offset`.
    fn read(&mut self, base: u32, offset: u32) -> u32;
}

/// A single recorded register write.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Peripheral base address.
    pub base: u32,
    /// Byte offset within the peripheral.
    pub offset: u32,
    /// The 32-bit command word that was written.
    pub value: u32,
}

/// In-memory register bus for tests and offline replay.
///
/// Backs the whole address space with a map, journals every write in order,
/// and counts reads so tests can assert that externally-mutated state (the
/// free-channel bitmap) is re-fetched rather than cached.
///
/// Hardware-side register changes are simulated with [`MemBus::poke`], which
/// updates a register without touching the journal.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone)]
pub struct MemBus {
    regs: std::collections::BTreeMap<u64, u32>,
    journal: Vec<RegisterWrite>,
    read_count: usize,
}

#[cfg(feature = "std")]
impl MemBus {
    /// Create an empty bus; all registers read as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register as if the hardware had changed it. Not journaled.
    pub fn poke(&mut self, base: u32, offset: u32, value: u32) {
        self.regs.insert(Self::key(base, offset), value);
    }

    /// Read a register without counting it as a bus access.
    pub fn peek(&self, base: u32, offset: u32) -> u32 {
        self.regs.get(&Self::key(base, offset)).copied().unwrap_or(0)
    }

    /// All writes issued through the bus, in order.
    pub fn writes(&self) -> &[RegisterWrite] {
        &self.journal
    }

    /// Number of reads issued through the bus.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Forget journaled writes, keeping register contents.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn key(base: u32, offset: u32) -> u64 {
        u64::from(base) + u64::from(offset)
    }
}

#[cfg(feature = "std")]
impl RegisterBus for MemBus {
    fn write(&mut self, base: u32, offset: u32, value: u32) {
        self.regs.insert(Self::key(base, offset), value);
        self.journal.push(RegisterWrite {
            base,
            offset,
            value,
        });
    }

    fn read(&mut self, base: u32, offset: u32) -> u32 {
        self.read_count += 1;
        self.peek(base, offset)
    }
}
