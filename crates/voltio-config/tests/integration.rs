//! File round-trip tests for the patch format.

use tempfile::tempdir;
use voltio_config::{Patch, PatchError};

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lead.toml");

    let mut patch = Patch::default();
    patch.oscillators[0].waveform = 1;
    patch.oscillators[1].mix = 0.8;
    patch.oscillators[1].detune = 7;
    patch.amp_env.attack = 0.02;
    patch.amp_env.sustain = 0.6;
    patch.filter.cutoff_hz = 3_500.0;
    patch.filter.resonance = 0.4;
    patch.lfos[2].amount = 0.1;

    patch.save(&path).unwrap();
    assert_eq!(Patch::load(&path).unwrap(), patch);
}

#[test]
fn loading_a_missing_file_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    match Patch::load(&path) {
        Err(PatchError::ReadFile { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ReadFile error, got {other:?}"),
    }
}

#[test]
fn loading_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[filter]\nresonance = 2.0\n").unwrap();

    assert!(matches!(
        Patch::load(&path),
        Err(PatchError::OutOfRange { .. })
    ));
}

#[test]
fn loading_rejects_malformed_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("syntax.toml");
    std::fs::write(&path, "[filter\ncutoff_hz = 100").unwrap();

    assert!(matches!(Patch::load(&path), Err(PatchError::TomlParse(_))));
}
