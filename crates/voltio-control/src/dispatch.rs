//! Decoding control frames and applying them to the synthesizer.
//!
//! Parameter routing is table-driven: [`ROUTES`] maps each wire kind to a
//! decode scale and a target operation, so adding a kind is one table row
//! rather than another arm in a branch ladder.

use thiserror::Error;

use voltio_core::RegisterBus;
use voltio_synth::{EnvTarget, LfoSelect, Synth};

use crate::message::{ControlKind, NoteMessage, status};

/// A frame that could not be applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The frame had no kind byte.
    #[error("empty frame")]
    EmptyFrame,
    /// The kind byte is not part of the protocol.
    #[error("unknown message kind {byte:#04x}")]
    UnknownKind {
        /// The offending kind byte.
        byte: u8,
    },
    /// The payload was shorter than the kind requires.
    #[error("{kind:?} frame truncated: expected {expected} payload bytes, got {actual}")]
    ShortPayload {
        /// The frame kind.
        kind: ControlKind,
        /// Bytes the kind requires.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

/// Raw controller values span the 12-bit ADC range.
const ADC_FULL_SCALE: f32 = 4095.0;

/// How a raw `i16` datum maps into the codec's input domain.
#[derive(Debug, Clone, Copy)]
enum Scale {
    /// Normalized fraction 0.0-1.0.
    Unit,
    /// Envelope time, 0-10 seconds.
    Seconds10,
    /// LFO period, 0-30 seconds.
    Period30,
    /// Filter cutoff, 0-20000 Hz (full scale lands just above and is
    /// clamped by the codec).
    CutoffHz,
    /// Passed through as an integer selector or semitone count.
    Raw,
}

impl Scale {
    fn apply(self, data: i16) -> f32 {
        let d = f32::from(data);
        match self {
            Scale::Unit => d / ADC_FULL_SCALE,
            Scale::Seconds10 => d / ADC_FULL_SCALE * 10.0,
            Scale::Period30 => d / ADC_FULL_SCALE * 30.0,
            Scale::CutoffHz => d * 20_000.0 / 4096.0,
            Scale::Raw => d,
        }
    }
}

/// The synthesizer operation a parameter kind drives.
#[derive(Debug, Clone, Copy)]
enum Target {
    OscWaveform(u32),
    OscDetune(u32),
    OscPulseWidth(u32),
    OscMix(u32),
    LfoWaveform(LfoSelect),
    LfoRate(LfoSelect),
    LfoAmount(LfoSelect),
    EnvAttack(EnvTarget),
    EnvDecay(EnvTarget),
    EnvSustain(EnvTarget),
    EnvRelease(EnvTarget),
    /// Response type in the upper bits, attenuation select in bit 0.
    FilterType,
    FilterCutoff,
    FilterResonance,
    FilterEnvAmount,
    /// Recognized on the wire but not implemented in hardware.
    Sequencer,
}

struct ParamRoute {
    kind: ControlKind,
    scale: Scale,
    target: Target,
}

const fn route(kind: ControlKind, scale: Scale, target: Target) -> ParamRoute {
    ParamRoute {
        kind,
        scale,
        target,
    }
}

/// One row per parameter kind, in wire order. Indexed by `kind as u8 - 1`
/// (the note kind, 0, never reaches the table).
const ROUTES: [ParamRoute; 39] = {
    use ControlKind as K;
    use EnvTarget::{Amplitude, Filter};
    use LfoSelect::{A, B, C};
    [
        route(K::OscAWaveform, Scale::Raw, Target::OscWaveform(0)),
        route(K::OscADetune, Scale::Raw, Target::OscDetune(0)),
        route(K::OscAPulseWidth, Scale::Unit, Target::OscPulseWidth(0)),
        route(K::OscAMix, Scale::Unit, Target::OscMix(0)),
        route(K::OscBWaveform, Scale::Raw, Target::OscWaveform(1)),
        route(K::OscBDetune, Scale::Raw, Target::OscDetune(1)),
        route(K::OscBPulseWidth, Scale::Unit, Target::OscPulseWidth(1)),
        route(K::OscBMix, Scale::Unit, Target::OscMix(1)),
        route(K::OscCWaveform, Scale::Raw, Target::OscWaveform(2)),
        route(K::OscCDetune, Scale::Raw, Target::OscDetune(2)),
        route(K::OscCPulseWidth, Scale::Unit, Target::OscPulseWidth(2)),
        route(K::OscCMix, Scale::Unit, Target::OscMix(2)),
        route(K::LfoAWaveform, Scale::Raw, Target::LfoWaveform(A)),
        route(K::LfoARate, Scale::Period30, Target::LfoRate(A)),
        route(K::LfoAAmount, Scale::Unit, Target::LfoAmount(A)),
        route(K::LfoBWaveform, Scale::Raw, Target::LfoWaveform(B)),
        route(K::LfoBRate, Scale::Period30, Target::LfoRate(B)),
        route(K::LfoBAmount, Scale::Unit, Target::LfoAmount(B)),
        route(K::LfoCWaveform, Scale::Raw, Target::LfoWaveform(C)),
        route(K::LfoCRate, Scale::Period30, Target::LfoRate(C)),
        route(K::LfoCAmount, Scale::Unit, Target::LfoAmount(C)),
        route(K::AmpAttack, Scale::Seconds10, Target::EnvAttack(Amplitude)),
        route(K::AmpDecay, Scale::Seconds10, Target::EnvDecay(Amplitude)),
        route(K::AmpSustain, Scale::Unit, Target::EnvSustain(Amplitude)),
        route(K::AmpRelease, Scale::Seconds10, Target::EnvRelease(Amplitude)),
        route(K::FilterType, Scale::Raw, Target::FilterType),
        route(K::FilterCutoff, Scale::CutoffHz, Target::FilterCutoff),
        route(K::FilterResonance, Scale::Unit, Target::FilterResonance),
        route(K::FilterEnvelope, Scale::Unit, Target::FilterEnvAmount),
        route(K::FilterAttack, Scale::Seconds10, Target::EnvAttack(Filter)),
        route(K::FilterDecay, Scale::Seconds10, Target::EnvDecay(Filter)),
        route(K::FilterSustain, Scale::Unit, Target::EnvSustain(Filter)),
        route(K::FilterRelease, Scale::Seconds10, Target::EnvRelease(Filter)),
        route(K::SequencerRecord, Scale::Raw, Target::Sequencer),
        route(K::SequencerStop, Scale::Raw, Target::Sequencer),
        route(K::SequencerPlayPause, Scale::Raw, Target::Sequencer),
        route(K::SequencerTempo, Scale::Raw, Target::Sequencer),
        route(K::SequencerTimeDiv, Scale::Raw, Target::Sequencer),
        route(K::SequencerGate, Scale::Raw, Target::Sequencer),
    ]
};

/// Decodes one control frame and applies it to `synth`.
///
/// The first byte selects the [`ControlKind`]; the remainder is the payload.
/// Extra trailing bytes are ignored. Note frames with a status other than
/// note-on or note-off are accepted and dropped, as are the sequencer
/// transport kinds, which the hardware does not implement.
pub fn dispatch<B: RegisterBus>(synth: &mut Synth<B>, frame: &[u8]) -> Result<(), DispatchError> {
    let (&kind_byte, payload) = frame.split_first().ok_or(DispatchError::EmptyFrame)?;
    let kind = ControlKind::from_byte(kind_byte)
        .ok_or(DispatchError::UnknownKind { byte: kind_byte })?;

    let expected = kind.payload_len();
    if payload.len() < expected {
        return Err(DispatchError::ShortPayload {
            kind,
            expected,
            actual: payload.len(),
        });
    }

    if kind == ControlKind::Midi {
        // Length was checked above.
        let msg = NoteMessage::from_bytes(payload).ok_or(DispatchError::ShortPayload {
            kind,
            expected,
            actual: payload.len(),
        })?;
        apply_note(synth, msg);
        return Ok(());
    }

    let data = i16::from_le_bytes([payload[0], payload[1]]);
    let route = &ROUTES[usize::from(kind_byte) - 1];
    apply_route(synth, route, data);
    Ok(())
}

fn apply_note<B: RegisterBus>(synth: &mut Synth<B>, msg: NoteMessage) {
    match msg.status {
        status::NOTE_ON => {
            let channel = synth.note_on(msg.key);
            tracing::debug!(key = msg.key, ?channel, "note on");
        }
        status::NOTE_OFF => {
            let channel = synth.note_off(msg.key);
            tracing::debug!(key = msg.key, ?channel, "note off");
        }
        other => {
            tracing::trace!(status = other, "ignoring note status");
        }
    }
}

fn apply_route<B: RegisterBus>(synth: &mut Synth<B>, route: &ParamRoute, data: i16) {
    let value = route.scale.apply(data);
    // Small integer selectors; negative raw data clamps to zero.
    let word = value.max(0.0) as u32;

    tracing::debug!(kind = ?route.kind, data, "parameter change");
    match route.target {
        Target::OscWaveform(osc) => synth.set_osc_waveform(osc, word),
        Target::OscDetune(osc) => synth.set_osc_detune(osc, value as i32),
        Target::OscPulseWidth(osc) => synth.set_osc_pulse_width(osc, value),
        Target::OscMix(osc) => synth.set_osc_mix(osc, value),
        Target::LfoWaveform(sel) => synth.set_lfo_waveform(sel, word),
        Target::LfoRate(sel) => synth.set_lfo_rate(sel, value),
        Target::LfoAmount(sel) => synth.set_lfo_amount(sel, value),
        Target::EnvAttack(env) => synth.set_env_attack(env, value),
        Target::EnvDecay(env) => synth.set_env_decay(env, value),
        Target::EnvSustain(env) => synth.set_env_sustain(env, value),
        Target::EnvRelease(env) => synth.set_env_release(env, value),
        Target::FilterType => synth.set_filter_type(word >> 1, word & 1),
        Target::FilterCutoff => synth.set_filter_cutoff(value),
        Target::FilterResonance => synth.set_filter_resonance(value),
        Target::FilterEnvAmount => synth.set_filter_env_amount(value),
        Target::Sequencer => {
            tracing::debug!(kind = ?route.kind, data, "sequencer transport not wired up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltio_core::MemBus;
    use voltio_core::regmap::{adsr, filter, osc};
    use voltio_synth::ModuleMap;

    fn new_synth() -> Synth<MemBus> {
        let map = ModuleMap::default();
        let mut bus = MemBus::new();
        bus.poke(map.amp_env, adsr::FREE_BITMAP, u32::MAX);
        Synth::new(bus, map)
    }

    #[test]
    fn route_table_rows_line_up_with_kind_bytes() {
        for (i, row) in ROUTES.iter().enumerate() {
            assert_eq!(row.kind as usize, i + 1);
        }
    }

    #[test]
    fn note_on_frame_allocates_a_channel() {
        let mut synth = new_synth();
        dispatch(&mut synth, &[0x00, 0x90, 60, 100]).unwrap();
        assert_eq!(synth.pool().note_on_channel(0), Some(60));

        // Middle C lands on channel 0, selector bits clear.
        let map = ModuleMap::default();
        assert!(
            synth
                .bus()
                .writes()
                .iter()
                .any(|w| w.base == map.oscillator && w.offset == osc::FREQUENCY && w.value == 2859)
        );
    }

    #[test]
    fn note_off_frame_releases_the_channel() {
        let mut synth = new_synth();
        dispatch(&mut synth, &[0x00, 0x90, 60, 100]).unwrap();
        dispatch(&mut synth, &[0x00, 0x80, 60, 0]).unwrap();
        assert_eq!(synth.pool().assigned_count(), 0);
    }

    #[test]
    fn foreign_note_statuses_are_dropped() {
        let mut synth = new_synth();
        let before = synth.bus().writes().len();
        // Polyphonic aftertouch.
        dispatch(&mut synth, &[0x00, 0xA0, 60, 100]).unwrap();
        assert_eq!(synth.bus().writes().len(), before);
        assert_eq!(synth.pool().assigned_count(), 0);
    }

    #[test]
    fn pulse_width_frame_scales_to_full_register_range() {
        let mut synth = new_synth();
        // 4095 little-endian = full scale.
        dispatch(&mut synth, &[0x03, 0xFF, 0x0F]).unwrap();
        let map = ModuleMap::default();
        assert_eq!(
            synth.bus().writes().last().copied(),
            Some(voltio_core::RegisterWrite {
                base: map.oscillator,
                offset: osc::PULSE_WIDTH,
                value: osc::PULSE_WIDTH_MAX,
            })
        );
    }

    #[test]
    fn detune_frame_passes_signed_semitones() {
        let mut synth = new_synth();
        // -12 as i16 little-endian on oscillator B.
        dispatch(&mut synth, &[0x06, 0xF4, 0xFF]).unwrap();
        let w = *synth.bus().writes().last().unwrap();
        assert_eq!(w.offset, osc::DETUNE);
        // Oscillator selector 1, half the unity ratio.
        assert_eq!(w.value, (1 << 25) | 8_192);
    }

    #[test]
    fn filter_type_frame_splits_type_and_attenuation() {
        let mut synth = new_synth();
        dispatch(&mut synth, &[0x1A, 0x05, 0x00]).unwrap();
        let map = ModuleMap::default();
        let writes = synth.bus().writes();
        assert_eq!(writes[writes.len() - 2].offset, filter::TYPE);
        assert_eq!(writes[writes.len() - 2].value, 2);
        assert_eq!(writes[writes.len() - 1].offset, filter::ATTENUATION);
        assert_eq!(writes[writes.len() - 1].value, 1);
        assert!(writes.iter().all(|w| w.base == map.filter));
    }

    #[test]
    fn cutoff_frame_full_scale_hits_register_limit() {
        let mut synth = new_synth();
        // 4096 scales to exactly 20 kHz.
        dispatch(&mut synth, &[0x1B, 0x00, 0x10]).unwrap();
        assert_eq!(
            synth.bus().writes().last().map(|w| (w.offset, w.value)),
            Some((filter::CUTOFF, 42_893))
        );
    }

    #[test]
    fn envelope_frame_scales_to_seconds() {
        let mut synth = new_synth();
        // Full-scale attack = 10 s: 8388607 / (10 * 96000) = 8.7 -> 8.
        dispatch(&mut synth, &[0x16, 0xFF, 0x0F]).unwrap();
        assert_eq!(
            synth.bus().writes().last().map(|w| (w.offset, w.value)),
            Some((adsr::ATTACK, 8))
        );
    }

    #[test]
    fn negative_parameter_values_clamp_to_zero() {
        let mut synth = new_synth();
        // -1 as i16 little-endian.
        dispatch(&mut synth, &[0x04, 0xFF, 0xFF]).unwrap();
        assert_eq!(synth.bus().writes().last().map(|w| w.value), Some(0));
    }

    #[test]
    fn sequencer_frames_are_accepted_without_writes() {
        let mut synth = new_synth();
        for kind in [0x22, 0x23, 0x24, 0x25, 0x26, 0x27] {
            dispatch(&mut synth, &[kind, 0x10, 0x00]).unwrap();
        }
        assert!(synth.bus().writes().is_empty());
    }

    #[test]
    fn malformed_frames_are_rejected() {
        let mut synth = new_synth();
        assert_eq!(dispatch(&mut synth, &[]), Err(DispatchError::EmptyFrame));
        assert_eq!(
            dispatch(&mut synth, &[0xFF, 0x00, 0x00]),
            Err(DispatchError::UnknownKind { byte: 0xFF })
        );
        assert_eq!(
            dispatch(&mut synth, &[0x00, 0x90, 60]),
            Err(DispatchError::ShortPayload {
                kind: ControlKind::Midi,
                expected: 3,
                actual: 2,
            })
        );
        assert_eq!(
            dispatch(&mut synth, &[0x1B, 0x10]),
            Err(DispatchError::ShortPayload {
                kind: ControlKind::FilterCutoff,
                expected: 2,
                actual: 1,
            })
        );
        assert!(synth.bus().writes().is_empty());
    }
}
