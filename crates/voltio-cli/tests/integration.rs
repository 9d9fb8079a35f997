//! Integration tests for the voltio binary.

use std::process::Command;

/// Helper to get the path to the `voltio` binary built by cargo.
fn voltio_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voltio"))
}

#[test]
fn encode_pulse_width_midpoint() {
    let output = voltio_bin()
        .args(["encode", "pulse-width", "0.5"])
        .output()
        .expect("failed to run voltio encode");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4194303"), "unexpected output: {stdout}");
}

#[test]
fn encode_note_matches_frequency_table() {
    let output = voltio_bin()
        .args(["encode", "note", "60"])
        .output()
        .expect("failed to run voltio encode");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2859"), "unexpected output: {stdout}");
}

#[test]
fn encode_decay_uses_the_sustain_level() {
    let full = voltio_bin()
        .args(["encode", "decay", "1.0"])
        .output()
        .expect("failed to run voltio encode");
    let half = voltio_bin()
        .args(["encode", "decay", "1.0", "--sustain-level", "0.5"])
        .output()
        .expect("failed to run voltio encode");

    assert!(full.status.success() && half.status.success());
    assert_ne!(full.stdout, half.stdout);
}

#[test]
fn patch_show_round_trips_through_check() {
    let show = voltio_bin()
        .args(["patch", "show"])
        .output()
        .expect("failed to run voltio patch show");
    assert!(show.status.success());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.toml");
    std::fs::write(&path, &show.stdout).unwrap();

    let check = voltio_bin()
        .args(["patch", "check"])
        .arg(&path)
        .output()
        .expect("failed to run voltio patch check");
    assert!(check.status.success());
}

#[test]
fn replay_reports_register_writes() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("frames.log");
    std::fs::write(
        &log,
        "# middle C down, cutoff sweep, C up\n\
         00 90 3C 64\n\
         1B 00 08   # cutoff half scale\n\
         00 80 3C 00\n",
    )
    .unwrap();

    let output = voltio_bin()
        .arg("replay")
        .arg(&log)
        .output()
        .expect("failed to run voltio replay");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 frames"), "unexpected output: {stdout}");
    // Middle C's oscillator frequency word shows up in the journal.
    assert!(stdout.contains("0x00000B2B"), "unexpected output: {stdout}");
    assert!(!stdout.contains("still held"), "unexpected output: {stdout}");
}

#[test]
fn replay_rejects_bad_frames_with_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("frames.log");
    std::fs::write(&log, "00 90 3C 64\nFF 00 00\n").unwrap();

    let output = voltio_bin()
        .arg("replay")
        .arg(&log)
        .output()
        .expect("failed to run voltio replay");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "unexpected stderr: {stderr}");
}

#[test]
fn replay_applies_a_patch_first() {
    let dir = tempfile::tempdir().unwrap();
    let patch = dir.path().join("patch.toml");
    std::fs::write(&patch, "[filter]\ncutoff_hz = 800.0\n").unwrap();
    let log = dir.path().join("frames.log");
    std::fs::write(&log, "00 90 3C 64\n").unwrap();

    let output = voltio_bin()
        .arg("replay")
        .arg(&log)
        .args(["--patch"])
        .arg(&patch)
        .args(["--show-patch-writes"])
        .output()
        .expect("failed to run voltio replay");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // One held channel remains: the log never releases middle C.
    assert!(stdout.contains("1 channels still held"), "unexpected output: {stdout}");
}
