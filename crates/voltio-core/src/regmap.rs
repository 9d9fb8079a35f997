//! Register maps and fixed-point limits for the voltio peripherals.
//!
//! Offsets are byte offsets relative to a peripheral instance's base
//! address. The values here mirror the hardware register layout and must
//! not be changed independently of the FPGA bitstream.

/// Audio sample clock of the synthesis hardware, in Hz.
pub const AUDIO_RATE_HZ: f32 = 96_000.0;

/// Number of polyphonic channels managed by the control plane.
pub const NUM_CHANNELS: usize = 64;

/// Bit position of the channel/oscillator selector packed into command
/// words for registers that multiplex several channels.
pub const CHANNEL_SHIFT: u32 = 25;

/// Widest value that fits below the channel selector bits.
pub const SELECTOR_FIELD_MAX: u32 = (1 << CHANNEL_SHIFT) - 1;

/// Oscillator bank registers. Per-oscillator parameters carry the
/// oscillator index in the selector bits; per-channel parameters
/// (frequency, modulation enable) carry the voice channel instead.
pub mod osc {
    /// Frequency control word, per voice channel.
    pub const FREQUENCY: u32 = 0;
    /// Waveform select, per oscillator.
    pub const WAVEFORM: u32 = 4;
    /// Square-wave pulse width, per oscillator.
    pub const PULSE_WIDTH: u32 = 8;
    /// Pulse-width-modulation enable, per oscillator.
    pub const PWM_ENABLE: u32 = 12;
    /// Pitch modulation enable, per voice channel.
    pub const MODULATION_ENABLE: u32 = 16;
    /// Detune in packed semitone ratio, per oscillator.
    pub const DETUNE: u32 = 20;
    /// Output mix level, per oscillator.
    pub const MIX: u32 = 24;

    /// Pulse width resolution: 23-bit fixed point.
    pub const PULSE_WIDTH_MAX: u32 = 8_388_607;
    /// Mix resolution: 17-bit fixed point.
    pub const MIX_MAX: u32 = 131_071;
}

/// ADSR envelope generator registers.
pub mod adsr {
    /// Shared 32-bit gate register, one bit per channel (indices taken
    /// modulo 32). Read-modify-write.
    pub const GATE: u32 = 0;
    /// Attack rate control word.
    pub const ATTACK: u32 = 16;
    /// Decay rate control word.
    pub const DECAY: u32 = 20;
    /// Sustain level.
    pub const SUSTAIN: u32 = 24;
    /// Release rate control word.
    pub const RELEASE: u32 = 28;
    /// First of four consecutive 32-bit free-channel bitmap words,
    /// updated autonomously by the hardware as envelopes decay.
    pub const FREE_BITMAP: u32 = 32;

    /// Number of 32-bit words in the free-channel bitmap.
    pub const FREE_BITMAP_WORDS: usize = 4;

    /// Envelope amplitude ceiling: 23-bit unsigned.
    pub const LEVEL_MAX: u32 = 8_388_607;
    /// Longest attack/decay/release time accepted by the control plane.
    pub const TIME_MAX_S: f32 = 10.0;
}

/// Ladder filter registers.
pub mod filter {
    /// Cutoff frequency control word.
    pub const CUTOFF: u32 = 0;
    /// Resonance amount.
    pub const RESONANCE: u32 = 4;
    /// Envelope modulation depth.
    pub const ENVELOPE_AMOUNT: u32 = 8;
    /// Cutoff modulation enable.
    pub const MODULATION_ENABLE: u32 = 12;
    /// Cutoff modulation depth.
    pub const MODULATION_AMOUNT: u32 = 16;
    /// Response type (low/band/high pass).
    pub const TYPE: u32 = 20;
    /// Slope select (12/24 dB per octave).
    pub const ATTENUATION: u32 = 24;

    /// Resonance resolution: 15-bit fixed point.
    pub const RESONANCE_MAX: u32 = 32_767;
    /// Cutoff, envelope amount, and modulation amount registers are 16 bits wide.
    pub const WORD_MAX: u32 = 65_535;
    /// Highest cutoff frequency the filter accepts, in Hz.
    pub const CUTOFF_MAX_HZ: f32 = 20_000.0;
}

/// Low-frequency oscillator registers.
pub mod lfo {
    /// Channel gate: channel index plus control bits, write-only strobe.
    pub const CHANNEL_GATE: u32 = 0;
    /// Rate (frequency control word).
    pub const RATE: u32 = 4;
    /// Modulation depth.
    pub const AMOUNT: u32 = 8;
    /// Waveform select.
    pub const WAVEFORM: u32 = 12;

    /// Gate-on bit in the channel gate word.
    pub const GATE_ON_BIT: u32 = 1 << 7;
    /// Strobe bit that latches a channel gate write.
    pub const GATE_STROBE_BIT: u32 = 1 << 8;

    /// Rate is a 24-bit phase increment.
    pub const RATE_MAX: u32 = (1 << 24) - 1;
    /// Amount resolution: 15-bit fixed point.
    pub const AMOUNT_MAX: u32 = 32_767;
    /// Longest LFO period accepted by the control plane, in seconds.
    pub const PERIOD_MAX_S: f32 = 30.0;
}
