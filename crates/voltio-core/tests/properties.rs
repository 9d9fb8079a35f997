//! Property-based tests for the parameter codec.
//!
//! The codec feeds command words straight into hardware registers, so the
//! properties that matter are saturation (no wraparound into the selector
//! bits), determinism, and monotonicity of the fixed-point mappings.

use proptest::prelude::*;
use voltio_core::codec;
use voltio_core::regmap::{adsr, filter, lfo, osc};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// No input, however wild, may produce a word that spills into the
    /// channel-selector bits.
    #[test]
    fn selector_field_is_never_clobbered(hz in -1.0e9f32..1.0e9f32, sel in 0u32..64) {
        let word = codec::with_selector(sel, codec::osc_frequency(hz));
        prop_assert_eq!(word >> 25, sel);
    }

    /// Frequency encoding is monotone: a higher pitch never yields a
    /// smaller control word.
    #[test]
    fn frequency_word_is_monotone(a in 0.0f32..30_000.0, b in 0.0f32..30_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(codec::osc_frequency(lo) <= codec::osc_frequency(hi));
    }

    /// Pure function: the same input always produces the same word.
    #[test]
    fn encoding_is_deterministic(pw in -2.0f32..2.0) {
        prop_assert_eq!(codec::osc_pulse_width(pw), codec::osc_pulse_width(pw));
    }

    /// Normalized inputs outside 0.0-1.0 saturate to the field limits.
    #[test]
    fn normalized_words_stay_in_field(x in -10.0f32..10.0) {
        prop_assert!(codec::osc_pulse_width(x) <= osc::PULSE_WIDTH_MAX);
        prop_assert!(codec::osc_mix(x) <= osc::MIX_MAX);
        prop_assert!(codec::filter_resonance(x) <= filter::RESONANCE_MAX);
        prop_assert!(codec::lfo_amount(x) <= lfo::AMOUNT_MAX);
        prop_assert!(codec::adsr_sustain(x) <= adsr::LEVEL_MAX);
    }

    /// Envelope rate words stay inside the 23-bit level format for any
    /// latched sustain value, including corrupt reads above the ceiling.
    #[test]
    fn envelope_rates_stay_in_format(time in -1.0f32..20.0, sustain in any::<u32>()) {
        prop_assert!(codec::adsr_attack(time) <= adsr::LEVEL_MAX);
        prop_assert!(codec::adsr_decay(time, sustain) <= adsr::LEVEL_MAX);
        prop_assert!(codec::adsr_release(time, sustain) <= adsr::LEVEL_MAX);
    }

    /// Shorter LFO periods never yield slower rate words, and the word
    /// stays in its 24-bit format.
    #[test]
    fn lfo_rate_is_antitone_in_period(a in 0.01f32..30.0, b in 0.01f32..30.0) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(codec::lfo_rate(short) >= codec::lfo_rate(long));
        prop_assert!(codec::lfo_rate(short) <= lfo::RATE_MAX);
    }

    /// Filter words saturate to their register widths.
    #[test]
    fn filter_words_stay_in_format(x in -1.0e6f32..1.0e6) {
        prop_assert!(codec::filter_cutoff(x) <= filter::WORD_MAX);
        prop_assert!(codec::filter_env_amount(x) <= filter::WORD_MAX);
        prop_assert!(codec::filter_mod_amount(x) <= filter::WORD_MAX);
    }
}
