//! Fixed-point parameter codec.
//!
//! Pure conversions from engineering units into the command words the
//! peripherals expect. Every function here is total and deterministic:
//! same input, same word, no hidden state.
//!
//! The underlying arithmetic follows the hardware's fixed-point formats
//! exactly (truncation toward zero on the final cast) and every word is
//! saturated to its register field width before it can reach the bus, so an
//! out-of-range input can never wrap into the channel selector bits.

use crate::regmap::{AUDIO_RATE_HZ, CHANNEL_SHIFT, SELECTOR_FIELD_MAX, adsr, filter, lfo, osc};
use core::f32::consts::PI;
use libm::powf;

/// Truncate toward zero and saturate to `max`. Negative values clamp to 0.
#[inline]
fn quantize(value: f32, max: u32) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= max as f32 {
        max
    } else {
        value as u32
    }
}

/// Pack a channel (or oscillator) selector into the high bits of a word.
///
/// The value field must already be saturated below [`CHANNEL_SHIFT`];
/// every encoder in this module guarantees that.
#[inline]
pub fn with_selector(selector: u32, word: u32) -> u32 {
    (selector << CHANNEL_SHIFT) | word
}

// --- Oscillator bank ---

/// Frequency control word for one oscillator channel.
///
/// 20-bit phase-increment format: `freq * 2^20 / 96000`.
pub fn osc_frequency(hz: f32) -> u32 {
    quantize(hz * 1_048_576.0 / AUDIO_RATE_HZ, SELECTOR_FIELD_MAX)
}

/// Detune word: the equal-tempered frequency ratio `2^(semitones/12)`
/// in 14-bit fixed point.
pub fn osc_detune(semitones: i32) -> u32 {
    let ratio = powf(2.0, semitones as f32 / 12.0);
    quantize(16_384.0 * ratio, SELECTOR_FIELD_MAX)
}

/// Waveform select word. Raw enumeration value.
pub fn osc_waveform(waveform: u32) -> u32 {
    waveform.min(SELECTOR_FIELD_MAX)
}

/// Square-wave pulse width, normalized 0.0-1.0, 23-bit fixed point.
pub fn osc_pulse_width(pw: f32) -> u32 {
    quantize(osc::PULSE_WIDTH_MAX as f32 * pw, osc::PULSE_WIDTH_MAX)
}

/// Oscillator output mix level, normalized 0.0-1.0, 17-bit fixed point.
pub fn osc_mix(mix: f32) -> u32 {
    quantize(osc::MIX_MAX as f32 * mix, osc::MIX_MAX)
}

// --- ADSR envelope generator ---

/// Attack rate word: steps of the 23-bit level ramp per sample.
///
/// Zero time encodes an instantaneous attack (maximum step).
pub fn adsr_attack(time_s: f32) -> u32 {
    if time_s <= 0.0 {
        adsr::LEVEL_MAX
    } else {
        quantize(adsr::LEVEL_MAX as f32 / (time_s * AUDIO_RATE_HZ), adsr::LEVEL_MAX)
    }
}

/// Sustain level word, normalized 0.0-1.0 against the 23-bit ceiling.
pub fn adsr_sustain(level: f32) -> u32 {
    quantize(adsr::LEVEL_MAX as f32 * level, adsr::LEVEL_MAX)
}

/// Decay rate word. The ramp spans from full level down to the sustain
/// level, so the word depends on the sustain value currently latched in the
/// hardware; callers must read it immediately before encoding.
pub fn adsr_decay(time_s: f32, sustain: u32) -> u32 {
    let span = adsr::LEVEL_MAX - sustain.min(adsr::LEVEL_MAX);
    if time_s <= 0.0 {
        span
    } else {
        quantize(span as f32 / (time_s * AUDIO_RATE_HZ), adsr::LEVEL_MAX)
    }
}

/// Release rate word. Spans from the current sustain level down to zero;
/// same latched-sustain dependency as [`adsr_decay`].
pub fn adsr_release(time_s: f32, sustain: u32) -> u32 {
    let span = sustain.min(adsr::LEVEL_MAX);
    if time_s <= 0.0 {
        span
    } else {
        quantize(span as f32 / (time_s * AUDIO_RATE_HZ), adsr::LEVEL_MAX)
    }
}

// --- Ladder filter ---

/// Cutoff frequency word: normalized angular frequency in 15-bit fixed point.
pub fn filter_cutoff(hz: f32) -> u32 {
    quantize(hz * 32_768.0 / AUDIO_RATE_HZ * 2.0 * PI, filter::WORD_MAX)
}

/// Resonance word, normalized 0.0-1.0, 15-bit fixed point.
pub fn filter_resonance(resonance: f32) -> u32 {
    quantize(filter::RESONANCE_MAX as f32 * resonance, filter::RESONANCE_MAX)
}

/// Envelope modulation depth: the normalized amount scaled to the full
/// 20 kHz cutoff sweep in the cutoff word's fixed-point format.
pub fn filter_env_amount(amount: f32) -> u32 {
    quantize(
        amount * filter::CUTOFF_MAX_HZ / AUDIO_RATE_HZ * 2.0 * PI * 32_767.0,
        filter::WORD_MAX,
    )
}

/// Cutoff modulation depth, normalized 0.0-1.0.
pub fn filter_mod_amount(amount: f32) -> u32 {
    quantize(42_893.0 * amount, filter::WORD_MAX)
}

// --- Low-frequency oscillator ---

/// Rate word: 24-bit phase increment for a given period in seconds.
///
/// A non-positive period saturates to the fastest rate instead of
/// dividing by zero.
pub fn lfo_rate(period_s: f32) -> u32 {
    if period_s <= 0.0 {
        lfo::RATE_MAX
    } else {
        quantize(16_777_216.0 / AUDIO_RATE_HZ / period_s, lfo::RATE_MAX)
    }
}

/// Modulation depth word, normalized 0.0-1.0, 15-bit fixed point.
pub fn lfo_amount(amount: f32) -> u32 {
    quantize(lfo::AMOUNT_MAX as f32 * amount, lfo::AMOUNT_MAX)
}

/// Channel gate-on word: channel index, gate bit, and latch strobe.
pub fn lfo_gate_on(channel: u32) -> u32 {
    channel | lfo::GATE_ON_BIT | lfo::GATE_STROBE_BIT
}

/// Channel gate-off word: channel index and latch strobe, gate bit clear.
pub fn lfo_gate_off(channel: u32) -> u32 {
    channel | lfo::GATE_STROBE_BIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_word_for_concert_a() {
        // 440 Hz * 2^20 / 96000 = 4805.4 -> truncates to 4805
        assert_eq!(osc_frequency(440.0), 4805);
    }

    #[test]
    fn frequency_word_saturates() {
        assert_eq!(osc_frequency(-1.0), 0);
        assert_eq!(osc_frequency(1.0e12), SELECTOR_FIELD_MAX);
    }

    #[test]
    fn selector_packs_above_value_field() {
        let word = with_selector(3, osc_frequency(440.0));
        assert_eq!(word >> CHANNEL_SHIFT, 3);
        assert_eq!(word & SELECTOR_FIELD_MAX, 4805);
    }

    #[test]
    fn detune_zero_semitones_is_unity_ratio() {
        assert_eq!(osc_detune(0), 16_384);
    }

    #[test]
    fn detune_octave_doubles_ratio() {
        assert_eq!(osc_detune(12), 32_768);
        assert_eq!(osc_detune(-12), 8_192);
    }

    #[test]
    fn pulse_width_midpoint() {
        // 8388607 * 0.5 = 4194303.5, truncation toward zero
        assert_eq!(osc_pulse_width(0.5), 4_194_303);
        assert_eq!(osc_pulse_width(0.0), 0);
        assert_eq!(osc_pulse_width(1.0), osc::PULSE_WIDTH_MAX);
    }

    #[test]
    fn pulse_width_clamps_out_of_range() {
        assert_eq!(osc_pulse_width(1.5), osc::PULSE_WIDTH_MAX);
        assert_eq!(osc_pulse_width(-0.5), 0);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(osc_mix(0.0), 0);
        assert_eq!(osc_mix(1.0), osc::MIX_MAX);
    }

    #[test]
    fn attack_zero_time_is_instantaneous() {
        assert_eq!(adsr_attack(0.0), adsr::LEVEL_MAX);
    }

    #[test]
    fn attack_one_second_steps_per_sample() {
        // 8388607 / 96000 = 87.38 -> 87
        assert_eq!(adsr_attack(1.0), 87);
    }

    #[test]
    fn sustain_full_scale() {
        assert_eq!(adsr_sustain(1.0), adsr::LEVEL_MAX);
        assert_eq!(adsr_sustain(0.0), 0);
    }

    #[test]
    fn decay_at_full_sustain_has_no_span() {
        // Nothing to decay through when sustain sits at the ceiling.
        assert_eq!(adsr_decay(0.0, adsr::LEVEL_MAX), 0);
        assert_eq!(adsr_decay(2.0, adsr::LEVEL_MAX), 0);
    }

    #[test]
    fn release_at_full_sustain_spans_full_scale() {
        assert_eq!(adsr_release(0.0, adsr::LEVEL_MAX), adsr::LEVEL_MAX);
    }

    #[test]
    fn decay_release_tolerate_corrupt_sustain() {
        // A sustain value above the 23-bit ceiling must not underflow the span.
        assert_eq!(adsr_decay(0.0, u32::MAX), 0);
        assert_eq!(adsr_release(0.0, u32::MAX), adsr::LEVEL_MAX);
    }

    #[test]
    fn filter_cutoff_full_scale() {
        // 20000 * 32768/96000 * 2pi = 42893.8 -> 42893
        assert_eq!(filter_cutoff(20_000.0), 42_893);
    }

    #[test]
    fn filter_resonance_endpoints() {
        assert_eq!(filter_resonance(0.0), 0);
        assert_eq!(filter_resonance(1.0), filter::RESONANCE_MAX);
    }

    #[test]
    fn filter_env_amount_full_scale() {
        // 20000/96000 * 2pi * 32767 = 42891.9 -> 42891
        assert_eq!(filter_env_amount(1.0), 42_891);
    }

    #[test]
    fn filter_mod_amount_full_scale() {
        assert_eq!(filter_mod_amount(1.0), 42_893);
    }

    #[test]
    fn lfo_rate_one_second_period() {
        // 2^24 / 96000 = 174.76 -> 174
        assert_eq!(lfo_rate(1.0), 174);
    }

    #[test]
    fn lfo_rate_zero_period_saturates() {
        assert_eq!(lfo_rate(0.0), lfo::RATE_MAX);
        assert_eq!(lfo_rate(-3.0), lfo::RATE_MAX);
    }

    #[test]
    fn lfo_gate_words() {
        assert_eq!(lfo_gate_on(5), 5 | (1 << 7) | (1 << 8));
        assert_eq!(lfo_gate_off(5), 5 | (1 << 8));
    }
}
