//! Integration tests for the ambifx binary.

use std::process::Command;

use ambifx_backend::{read_wav, read_wav_info};
use tempfile::TempDir;

fn ambifx_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ambifx"))
}

fn stdout_of(args: &[&str]) -> String {
    let output = ambifx_bin().args(args).output().expect("failed to run ambifx");
    assert!(
        output.status.success(),
        "ambifx {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_effects_lists_builtin_effects() {
    let stdout = stdout_of(&["effects"]);
    assert!(stdout.contains("Available Effects"));
    for id in ["null", "modulator", "compressor"] {
        assert!(stdout.contains(id), "effects listing should contain '{id}'");
    }
}

#[test]
fn cli_effects_detail_shows_parameters() {
    let stdout = stdout_of(&["effects", "modulator"]);
    assert!(stdout.contains("Parameters"));
    assert!(stdout.contains("frequency"));
    assert!(stdout.contains("highpass_cutoff"));
    assert!(stdout.contains("sine | sawtooth | square"));
}

#[test]
fn cli_effects_json() {
    let stdout = stdout_of(&["effects", "compressor", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["id"], "compressor");
    assert_eq!(value["type_id"], 0x000B);
    assert_eq!(value["parameters"][0]["key"], "onoff");
}

#[test]
fn cli_effects_unknown_fails() {
    let output = ambifx_bin().args(["effects", "reverb"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_devices_lists_null_output() {
    let stdout = stdout_of(&["devices", "--capture"]);
    assert!(stdout.contains("null (playback)"));
    assert!(stdout.contains("No Output"));
    assert!(stdout.contains("(none)"));
}

#[test]
fn cli_render_test_tone() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.wav");
    stdout_of(&[
        "render",
        out.to_str().unwrap(),
        "--effect",
        "modulator",
        "--param",
        "frequency=0",
        "--param",
        "highpass_cutoff=20Hz",
        "--layout",
        "quad",
        "--sample-rate",
        "48000",
        "--duration",
        "0.25",
        "--tone",
        "1000",
    ]);

    let info = read_wav_info(&out).unwrap();
    assert_eq!(info.channels, 4);
    assert_eq!(info.sample_rate, 48000);
    assert_eq!(info.num_frames, 12000);

    let (channels, _) = read_wav(&out).unwrap();
    assert!(channels[0][6000..].iter().any(|s| s.abs() > 0.1));
    assert!(channels[1].iter().all(|&s| s == 0.0));
}

#[test]
fn cli_render_wav_input_through_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("engine.toml");
    let input = dir.path().join("in.wav");
    let out = dir.path().join("out.wav");

    stdout_of(&["config", "init", config.to_str().unwrap()]);
    let stdout = stdout_of(&["config", "check", config.to_str().unwrap()]);
    assert!(stdout.contains("OK"));

    let tone: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    ambifx_backend::write_wav(
        &input,
        &[tone],
        ambifx_backend::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        },
    )
    .unwrap();

    stdout_of(&[
        "render",
        out.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    let info = read_wav_info(&out).unwrap();
    assert_eq!(info.sample_rate, 44100);
    assert_eq!(info.num_frames, 4410);
}

#[test]
fn cli_render_rejects_bad_param() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.wav");
    let output = ambifx_bin()
        .args([
            "render",
            out.to_str().unwrap(),
            "--effect",
            "modulator",
            "--param",
            "frequency=20kHz",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frequency"));
    assert!(!out.exists());
}

#[test]
fn cli_run_on_null_backend() {
    let stdout = stdout_of(&["run", "--effect", "compressor", "--duration", "0.2"]);
    assert!(stdout.contains("No Output"));
    assert!(stdout.contains("Rendered"));
}

#[test]
fn cli_run_rejects_unusable_duration() {
    for duration in ["inf", "-1"] {
        let output = ambifx_bin()
            .args(["run", "--effect", "null", &format!("--duration={duration}")])
            .output()
            .unwrap();
        assert!(!output.status.success(), "--duration {duration} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid duration"), "--duration {duration}: {stderr}");
        assert!(!stderr.contains("panicked"), "--duration {duration}: {stderr}");
    }
}

#[test]
fn cli_render_rejects_infinite_duration() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.wav");
    let output = ambifx_bin()
        .args(["render", out.to_str().unwrap(), "--effect", "null", "--duration", "inf"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid duration"));
    assert!(!out.exists());
}
