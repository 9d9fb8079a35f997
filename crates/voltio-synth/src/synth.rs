//! The synth facade: one object owning the bus and all seven peripherals.

use crate::pool::ChannelPool;
use libm::powf;
use voltio_core::{EnvelopeGen, LadderFilter, Lfo, OscillatorBank, RegisterBus};

/// Convert a note number to its equal-tempered frequency in Hz.
///
/// Note 0 sits at ~8.18 Hz, putting note 69 (A4) at standard tuning.
#[inline]
pub fn note_to_hz(note: u8) -> f32 {
    8.18 * powf(2.0, f32::from(note) / 12.0)
}

/// Base addresses of the seven peripheral instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleMap {
    /// Multi-channel oscillator bank.
    pub oscillator: u32,
    /// Amplitude envelope generator (also reports channel occupancy).
    pub amp_env: u32,
    /// Filter envelope generator.
    pub filter_env: u32,
    /// Ladder filter.
    pub filter: u32,
    /// LFO A.
    pub lfo_a: u32,
    /// LFO B.
    pub lfo_b: u32,
    /// LFO C.
    pub lfo_c: u32,
}

impl Default for ModuleMap {
    /// The AXI address layout of the reference bitstream.
    fn default() -> Self {
        Self {
            oscillator: 0x43C0_0000,
            amp_env: 0x43C1_0000,
            filter_env: 0x43C2_0000,
            filter: 0x43C3_0000,
            lfo_a: 0x43C4_0000,
            lfo_b: 0x43C5_0000,
            lfo_c: 0x43C6_0000,
        }
    }
}

/// Which envelope generator a parameter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvTarget {
    /// The envelope shaping channel amplitude.
    Amplitude,
    /// The envelope driving the filter cutoff sweep.
    Filter,
}

/// Which LFO instance a parameter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoSelect {
    /// LFO A.
    A,
    /// LFO B.
    B,
    /// LFO C.
    C,
}

impl LfoSelect {
    #[inline]
    fn index(self) -> usize {
        match self {
            LfoSelect::A => 0,
            LfoSelect::B => 1,
            LfoSelect::C => 2,
        }
    }
}

/// The synthesizer control plane.
///
/// Owns the register bus and a driver per peripheral instance, plus the
/// [`ChannelPool`]. Everything is synchronous and single-threaded: each
/// operation runs its register writes to completion before returning.
#[derive(Debug)]
pub struct Synth<B> {
    bus: B,
    oscillators: OscillatorBank,
    amp_env: EnvelopeGen,
    filter_env: EnvelopeGen,
    filter: LadderFilter,
    lfos: [Lfo; 3],
    pool: ChannelPool,
}

impl<B: RegisterBus> Synth<B> {
    /// Create a synth over `bus` with peripherals at the given addresses.
    pub fn new(bus: B, map: ModuleMap) -> Self {
        Self {
            bus,
            oscillators: OscillatorBank::new(map.oscillator),
            amp_env: EnvelopeGen::new(map.amp_env),
            filter_env: EnvelopeGen::new(map.filter_env),
            filter: LadderFilter::new(map.filter),
            lfos: [Lfo::new(map.lfo_a), Lfo::new(map.lfo_b), Lfo::new(map.lfo_c)],
            pool: ChannelPool::new(),
        }
    }

    // --- Note events ---

    /// Start sounding `note` on the lowest free channel.
    ///
    /// Fetches a fresh occupancy snapshot from the amplitude envelope
    /// hardware, picks the lowest-numbered free channel, then writes its
    /// oscillator frequency, gates both envelopes, enables the channel's
    /// pitch modulation, and gates the three LFOs. Returns the channel.
    /// If every channel is busy the note is dropped and `None` is returned.
    pub fn note_on(&mut self, note: u8) -> Option<usize> {
        let free = self.amp_env.free_channels(&mut self.bus);
        let Some(channel) = self.pool.allocate(&free, note) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(note, "note-on dropped: all channels busy");
            return None;
        };

        let ch = channel as u32;
        self.oscillators
            .set_frequency(&mut self.bus, ch, note_to_hz(note));
        self.amp_env.gate_on(&mut self.bus, ch);
        self.filter_env.gate_on(&mut self.bus, ch);
        self.oscillators.set_modulation_enable(&mut self.bus, ch, true);
        for lfo in &self.lfos {
            lfo.channel_on(&mut self.bus, ch);
        }
        Some(channel)
    }

    /// Stop sounding `note`.
    ///
    /// Looks the note up in the assignment table, gates off both envelopes
    /// and the three LFOs for its channel, and clears the entry. A note
    /// with no recorded channel is a silent no-op.
    pub fn note_off(&mut self, note: u8) -> Option<usize> {
        let channel = self.pool.release(note)?;
        let ch = channel as u32;
        self.amp_env.gate_off(&mut self.bus, ch);
        self.filter_env.gate_off(&mut self.bus, ch);
        for lfo in &self.lfos {
            lfo.channel_off(&mut self.bus, ch);
        }
        Some(channel)
    }

    // --- Oscillator parameters ---

    /// Select the waveform of oscillator `osc` (0-2).
    pub fn set_osc_waveform(&mut self, osc: u32, waveform: u32) {
        self.oscillators.set_waveform(&mut self.bus, osc, waveform);
    }

    /// Detune oscillator `osc` by whole semitones.
    pub fn set_osc_detune(&mut self, osc: u32, semitones: i32) {
        self.oscillators.set_detune(&mut self.bus, osc, semitones);
    }

    /// Set the square-wave pulse width of oscillator `osc` (0.0-1.0).
    pub fn set_osc_pulse_width(&mut self, osc: u32, pw: f32) {
        self.oscillators.set_pulse_width(&mut self.bus, osc, pw);
    }

    /// Set the mix level of oscillator `osc` (0.0-1.0).
    pub fn set_osc_mix(&mut self, osc: u32, mix: f32) {
        self.oscillators.set_mix(&mut self.bus, osc, mix);
    }

    /// Enable or disable pulse-width modulation on oscillator `osc`.
    pub fn set_osc_pwm_enable(&mut self, osc: u32, enable: bool) {
        self.oscillators.set_pwm_enable(&mut self.bus, osc, enable);
    }

    // --- Envelope parameters ---

    /// Set an envelope's attack time in seconds.
    pub fn set_env_attack(&mut self, target: EnvTarget, time_s: f32) {
        self.env(target).set_attack(&mut self.bus, time_s);
    }

    /// Set an envelope's decay time in seconds.
    pub fn set_env_decay(&mut self, target: EnvTarget, time_s: f32) {
        self.env(target).set_decay(&mut self.bus, time_s);
    }

    /// Set an envelope's sustain level (0.0-1.0).
    pub fn set_env_sustain(&mut self, target: EnvTarget, level: f32) {
        self.env(target).set_sustain(&mut self.bus, level);
    }

    /// Set an envelope's release time in seconds.
    pub fn set_env_release(&mut self, target: EnvTarget, time_s: f32) {
        self.env(target).set_release(&mut self.bus, time_s);
    }

    // --- Filter parameters ---

    /// Set the filter cutoff frequency in Hz.
    pub fn set_filter_cutoff(&mut self, hz: f32) {
        self.filter.set_cutoff(&mut self.bus, hz);
    }

    /// Set the filter resonance (0.0-1.0).
    pub fn set_filter_resonance(&mut self, resonance: f32) {
        self.filter.set_resonance(&mut self.bus, resonance);
    }

    /// Set the filter envelope modulation depth (0.0-1.0).
    pub fn set_filter_env_amount(&mut self, amount: f32) {
        self.filter.set_envelope_amount(&mut self.bus, amount);
    }

    /// Enable or disable filter cutoff modulation.
    pub fn set_filter_mod_enable(&mut self, enable: bool) {
        self.filter.set_modulation_enable(&mut self.bus, enable);
    }

    /// Set the filter cutoff modulation depth (0.0-1.0).
    pub fn set_filter_mod_amount(&mut self, amount: f32) {
        self.filter.set_modulation_amount(&mut self.bus, amount);
    }

    /// Select the filter response type and slope.
    pub fn set_filter_type(&mut self, kind: u32, attenuation: u32) {
        self.filter.set_type(&mut self.bus, kind, attenuation);
    }

    // --- LFO parameters ---

    /// Select an LFO's waveform.
    pub fn set_lfo_waveform(&mut self, lfo: LfoSelect, waveform: u32) {
        self.lfos[lfo.index()].set_waveform(&mut self.bus, waveform);
    }

    /// Set an LFO's rate from a period in seconds.
    pub fn set_lfo_rate(&mut self, lfo: LfoSelect, period_s: f32) {
        self.lfos[lfo.index()].set_rate(&mut self.bus, period_s);
    }

    /// Set an LFO's modulation depth (0.0-1.0).
    pub fn set_lfo_amount(&mut self, lfo: LfoSelect, amount: f32) {
        self.lfos[lfo.index()].set_amount(&mut self.bus, amount);
    }

    // --- Accessors ---

    /// Read access to the assignment table.
    pub fn pool(&self) -> &ChannelPool {
        &self.pool
    }

    /// Read access to the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consume the synth and return the bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    #[inline]
    fn env(&self, target: EnvTarget) -> EnvelopeGen {
        match target {
            EnvTarget::Amplitude => self.amp_env,
            EnvTarget::Filter => self.filter_env,
        }
    }
}
