//! Parameter-to-register-word encoding command.

use anyhow::Result;
use clap::{Args, Subcommand};

use voltio_core::codec;
use voltio_synth::note_to_hz;

#[derive(Args)]
pub struct EncodeArgs {
    #[command(subcommand)]
    quantity: Quantity,
}

#[derive(Subcommand)]
enum Quantity {
    /// Oscillator phase increment from a frequency in Hz
    Frequency {
        /// Frequency in Hz
        hz: f32,
    },
    /// Oscillator frequency word for a note number
    Note {
        /// Note number, 0-127
        key: u8,
    },
    /// Oscillator detune ratio from signed semitones
    Detune {
        /// Semitones, negative for down
        #[arg(allow_hyphen_values = true)]
        semitones: i32,
    },
    /// Square-wave pulse width, 0.0-1.0
    PulseWidth {
        /// Normalized pulse width
        value: f32,
    },
    /// Oscillator mix level, 0.0-1.0
    Mix {
        /// Normalized mix level
        value: f32,
    },
    /// Envelope attack rate from a time in seconds
    Attack {
        /// Attack time in seconds
        seconds: f32,
    },
    /// Envelope decay rate from a time in seconds
    Decay {
        /// Decay time in seconds
        seconds: f32,
        /// Sustain level the decay ends at, 0.0-1.0
        #[arg(long, default_value = "1.0")]
        sustain_level: f32,
    },
    /// Envelope sustain level, 0.0-1.0
    Sustain {
        /// Normalized sustain level
        level: f32,
    },
    /// Envelope release rate from a time in seconds
    Release {
        /// Release time in seconds
        seconds: f32,
        /// Sustain level the release starts from, 0.0-1.0
        #[arg(long, default_value = "1.0")]
        sustain_level: f32,
    },
    /// Filter cutoff coefficient from a frequency in Hz
    Cutoff {
        /// Cutoff frequency in Hz
        hz: f32,
    },
    /// Filter resonance, 0.0-1.0
    Resonance {
        /// Normalized resonance
        value: f32,
    },
    /// Filter envelope modulation depth, 0.0-1.0
    EnvAmount {
        /// Normalized depth
        value: f32,
    },
    /// Filter cutoff modulation depth, 0.0-1.0
    ModAmount {
        /// Normalized depth
        value: f32,
    },
    /// LFO phase increment from a period in seconds
    LfoRate {
        /// Period in seconds
        period: f32,
    },
    /// LFO modulation depth, 0.0-1.0
    LfoAmount {
        /// Normalized depth
        value: f32,
    },
}

pub fn run(args: &EncodeArgs) -> Result<()> {
    let word = match args.quantity {
        Quantity::Frequency { hz } => codec::osc_frequency(hz),
        Quantity::Note { key } => codec::osc_frequency(note_to_hz(key)),
        Quantity::Detune { semitones } => codec::osc_detune(semitones),
        Quantity::PulseWidth { value } => codec::osc_pulse_width(value),
        Quantity::Mix { value } => codec::osc_mix(value),
        Quantity::Attack { seconds } => codec::adsr_attack(seconds),
        Quantity::Decay {
            seconds,
            sustain_level,
        } => codec::adsr_decay(seconds, codec::adsr_sustain(sustain_level)),
        Quantity::Sustain { level } => codec::adsr_sustain(level),
        Quantity::Release {
            seconds,
            sustain_level,
        } => codec::adsr_release(seconds, codec::adsr_sustain(sustain_level)),
        Quantity::Cutoff { hz } => codec::filter_cutoff(hz),
        Quantity::Resonance { value } => codec::filter_resonance(value),
        Quantity::EnvAmount { value } => codec::filter_env_amount(value),
        Quantity::ModAmount { value } => codec::filter_mod_amount(value),
        Quantity::LfoRate { period } => codec::lfo_rate(period),
        Quantity::LfoAmount { value } => codec::lfo_amount(value),
    };

    println!("{word} ({word:#010X})");
    Ok(())
}
