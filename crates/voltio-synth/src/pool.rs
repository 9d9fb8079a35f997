//! Note-to-channel assignment.

use voltio_core::FreeBitmap;

/// Number of polyphonic channels in the hardware pool.
pub const NUM_CHANNELS: usize = voltio_core::regmap::NUM_CHANNELS;

/// The polyphonic note-to-channel assignment table.
///
/// Occupancy deliberately has two sources of truth that are *not* unified:
///
/// - **Allocation** consults only the hardware free-channel bitmap passed
///   in by the caller. The software table is a hint: a channel can still
///   be marked assigned here after its envelope has fully decayed and the
///   hardware has reclaimed it, in which case allocation simply overwrites
///   the stale entry.
/// - **Release** consults only this table, because the hardware has no
///   notion of which note a channel is sounding.
///
/// Both scans run in ascending channel order and take the first match.
/// For several simultaneous instances of the same note this means release
/// hits the *oldest-allocated* one first, which can strand a newer voice
/// of the same pitch. That ordering is part of the hardware product's
/// observed behavior and is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPool {
    assigned: [Option<u8>; NUM_CHANNELS],
}

impl ChannelPool {
    /// Create a pool with every channel unassigned.
    pub const fn new() -> Self {
        Self {
            assigned: [None; NUM_CHANNELS],
        }
    }

    /// Assign `note` to the lowest-numbered channel the hardware reports
    /// free, or `None` when the pool is exhausted (the caller drops the
    /// note; there is no stealing or queuing).
    pub fn allocate(&mut self, free: &FreeBitmap, note: u8) -> Option<usize> {
        let channel = (0..NUM_CHANNELS).find(|&ch| free.is_free(ch))?;
        self.assigned[channel] = Some(note);
        Some(channel)
    }

    /// Release the lowest-numbered channel recorded as sounding `note`.
    ///
    /// Returns the channel so the caller can gate it off, or `None` when
    /// no channel is recorded for the note (a silent no-op upstream).
    pub fn release(&mut self, note: u8) -> Option<usize> {
        let channel = self.assigned.iter().position(|&n| n == Some(note))?;
        self.assigned[channel] = None;
        Some(channel)
    }

    /// The note recorded for `channel`, if any.
    pub fn note_on_channel(&self, channel: usize) -> Option<u8> {
        self.assigned.get(channel).copied().flatten()
    }

    /// Number of channels currently recorded as assigned.
    pub fn assigned_count(&self) -> usize {
        self.assigned.iter().filter(|n| n.is_some()).count()
    }

    /// Forget every assignment.
    pub fn clear(&mut self) {
        self.assigned = [None; NUM_CHANNELS];
    }
}

impl Default for ChannelPool {
    fn default() -> Self {
        Self::new()
    }
}
