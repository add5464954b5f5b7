use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ucheckin-cli-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

fn run_ucheckin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ucheckin"))
        .args(args)
        .output()
        .expect("Failed to execute ucheckin")
}

fn combined_output(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string() + &String::from_utf8_lossy(&output.stdout)
}

fn wav_files(dir: &PathBuf) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

#[test]
fn test_default_run() {
    let dir = test_dir("default");
    let output = run_ucheckin(&["--output-dir", dir.to_str().unwrap()]);
    assert!(output.status.success(), "{}", combined_output(&output));

    let text = combined_output(&output);
    assert!(text.contains("Encoded 15973"), "unexpected output: {}", text);

    let path = dir.join("15973.wav");
    assert!(path.exists(), "Output file was not created");

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 48_000);
    assert_eq!(spec.bits_per_sample, 16);
    // 10 x (1024 + 4096 + 27 * 1024 + 24000)
    assert_eq!(reader.len(), 567_680);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_positional_parameters() {
    let dir = test_dir("positional");
    let output = run_ucheckin(&[
        "ABCDE",
        "18",
        "44.1",
        "100",
        "2",
        "50",
        "--output-dir",
        dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", combined_output(&output));

    let mut reader = hound::WavReader::open(dir.join("ABCDE.wav")).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.len(), 2 * (32_768 + 4_410));

    // 50 % volume: peak is half of full scale
    let peak = reader
        .samples::<i16>()
        .map(|s| s.unwrap().unsigned_abs())
        .max()
        .unwrap();
    assert_eq!(peak, 16_384);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_duration_option() {
    let dir = test_dir("duration");
    let output = run_ucheckin(&["15973", "--duration", "5", "--output-dir", dir.to_str().unwrap()]);
    assert!(output.status.success(), "{}", combined_output(&output));

    let reader = hound::WavReader::open(dir.join("15973.wav")).unwrap();
    assert_eq!(reader.len(), 4 * (32_768 + 24_000));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_excessive_duration_is_rejected() {
    let dir = test_dir("long-duration");
    for duration in ["1e300", "100000"] {
        let output = run_ucheckin(&["15973", "--duration", duration, "--output-dir", dir.to_str().unwrap()]);
        assert!(!output.status.success());
        assert!(
            combined_output(&output).contains("Duration must be between 0 and 300 seconds"),
            "unexpected output: {}",
            combined_output(&output)
        );
    }
    assert!(wav_files(&dir).is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_message_writes_nothing() {
    let dir = test_dir("invalid-message");
    let output = run_ucheckin(&["1597G", "--output-dir", dir.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(
        combined_output(&output).contains("Invalid message"),
        "unexpected output: {}",
        combined_output(&output)
    );
    assert!(wav_files(&dir).is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_render_settings() {
    let dir = test_dir("invalid-settings");

    let output = run_ucheckin(&["15973", "19.5", "48", "500", "0", "--output-dir", dir.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("Repetition must be at least 1"));

    let output = run_ucheckin(&[
        "15973",
        "19.5",
        "48",
        "500",
        "10",
        "150",
        "--output-dir",
        dir.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("Volume must be between 0 and 1"));

    assert!(wav_files(&dir).is_empty());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_reserved_mode() {
    let dir = test_dir("mode");
    let output = run_ucheckin(&["--mode", "1", "--output-dir", dir.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("mode 1 not implemented yet"));
    assert!(wav_files(&dir).is_empty());

    fs::remove_dir_all(&dir).ok();
}
