//! Frame kinds and payload layouts of the control protocol.

/// MIDI status bytes carried in the first payload byte of a note frame.
///
/// Only note-on and note-off are acted upon; other channel-voice statuses
/// pass through the dispatcher unchanged.
pub mod status {
    /// Note released.
    pub const NOTE_OFF: u8 = 0x80;
    /// Note pressed.
    pub const NOTE_ON: u8 = 0x90;
}

/// The kind byte at the start of every control frame.
///
/// Discriminants are the wire encoding and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlKind {
    /// Note event, three-byte MIDI payload.
    Midi = 0,
    /// Oscillator A waveform select.
    OscAWaveform = 1,
    /// Oscillator A detune in semitones.
    OscADetune = 2,
    /// Oscillator A square pulse width.
    OscAPulseWidth = 3,
    /// Oscillator A mix level.
    OscAMix = 4,
    /// Oscillator B waveform select.
    OscBWaveform = 5,
    /// Oscillator B detune in semitones.
    OscBDetune = 6,
    /// Oscillator B square pulse width.
    OscBPulseWidth = 7,
    /// Oscillator B mix level.
    OscBMix = 8,
    /// Oscillator C waveform select.
    OscCWaveform = 9,
    /// Oscillator C detune in semitones.
    OscCDetune = 10,
    /// Oscillator C square pulse width.
    OscCPulseWidth = 11,
    /// Oscillator C mix level.
    OscCMix = 12,
    /// LFO A waveform select.
    LfoAWaveform = 13,
    /// LFO A rate as a period.
    LfoARate = 14,
    /// LFO A modulation depth.
    LfoAAmount = 15,
    /// LFO B waveform select.
    LfoBWaveform = 16,
    /// LFO B rate as a period.
    LfoBRate = 17,
    /// LFO B modulation depth.
    LfoBAmount = 18,
    /// LFO C waveform select.
    LfoCWaveform = 19,
    /// LFO C rate as a period.
    LfoCRate = 20,
    /// LFO C modulation depth.
    LfoCAmount = 21,
    /// Amplitude envelope attack time.
    AmpAttack = 22,
    /// Amplitude envelope decay time.
    AmpDecay = 23,
    /// Amplitude envelope sustain level.
    AmpSustain = 24,
    /// Amplitude envelope release time.
    AmpRelease = 25,
    /// Filter response type and slope, packed in one value.
    FilterType = 26,
    /// Filter cutoff frequency.
    FilterCutoff = 27,
    /// Filter resonance.
    FilterResonance = 28,
    /// Filter envelope modulation depth.
    FilterEnvelope = 29,
    /// Filter envelope attack time.
    FilterAttack = 30,
    /// Filter envelope decay time.
    FilterDecay = 31,
    /// Filter envelope sustain level.
    FilterSustain = 32,
    /// Filter envelope release time.
    FilterRelease = 33,
    /// Sequencer: start recording.
    SequencerRecord = 34,
    /// Sequencer: stop.
    SequencerStop = 35,
    /// Sequencer: toggle playback.
    SequencerPlayPause = 36,
    /// Sequencer tempo.
    SequencerTempo = 37,
    /// Sequencer time division.
    SequencerTimeDiv = 38,
    /// Sequencer gate length.
    SequencerGate = 39,
}

impl ControlKind {
    /// Every kind, in wire order.
    pub const ALL: [Self; 40] = [
        Self::Midi,
        Self::OscAWaveform,
        Self::OscADetune,
        Self::OscAPulseWidth,
        Self::OscAMix,
        Self::OscBWaveform,
        Self::OscBDetune,
        Self::OscBPulseWidth,
        Self::OscBMix,
        Self::OscCWaveform,
        Self::OscCDetune,
        Self::OscCPulseWidth,
        Self::OscCMix,
        Self::LfoAWaveform,
        Self::LfoARate,
        Self::LfoAAmount,
        Self::LfoBWaveform,
        Self::LfoBRate,
        Self::LfoBAmount,
        Self::LfoCWaveform,
        Self::LfoCRate,
        Self::LfoCAmount,
        Self::AmpAttack,
        Self::AmpDecay,
        Self::AmpSustain,
        Self::AmpRelease,
        Self::FilterType,
        Self::FilterCutoff,
        Self::FilterResonance,
        Self::FilterEnvelope,
        Self::FilterAttack,
        Self::FilterDecay,
        Self::FilterSustain,
        Self::FilterRelease,
        Self::SequencerRecord,
        Self::SequencerStop,
        Self::SequencerPlayPause,
        Self::SequencerTempo,
        Self::SequencerTimeDiv,
        Self::SequencerGate,
    ];

    /// Decodes a kind byte, or `None` if it is outside the protocol.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(usize::from(byte)).copied()
    }

    /// The payload size this kind expects, in bytes.
    pub fn payload_len(self) -> usize {
        match self {
            Self::Midi => 3,
            _ => 2,
        }
    }
}

/// Three-byte note payload: status, key, velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMessage {
    /// MIDI status byte, see [`status`].
    pub status: u8,
    /// Key number, 0-127.
    pub key: u8,
    /// Key velocity. Accepted on the wire but not used by the hardware.
    pub velocity: u8,
}

impl NoteMessage {
    /// Reads a note payload from the front of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match *bytes {
            [status, key, velocity, ..] => Some(Self {
                status,
                key,
                velocity,
            }),
            _ => None,
        }
    }
}
