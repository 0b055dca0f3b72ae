use std::{
    io::Write as _,
    process::{Command, Output, Stdio},
};

fn stackris() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stackris"));
    command.env_remove("STACKRIS_WIDTH").env_remove("RUST_LOG");
    command
}

fn run_cmd(args: &[&str]) -> String {
    let output = stackris()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

fn run_piped(args: &[&str], input: &str) -> Output {
    let mut child = stackris()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_single_piece_input() {
    assert_eq!(run_cmd(&["I0"]), "1\n");
    assert_eq!(run_cmd(&["Q0"]), "2\n");
}

#[test]
fn test_input_multiple_pieces() {
    assert_eq!(run_cmd(&["I0 I1 I2"]), "3\n");
    assert_eq!(run_cmd(&["Q0 S0 T2"]), "4\n");
}

#[test]
fn test_input_multiple_sets() {
    assert_eq!(run_cmd(&["I0 I1 I2", "S0 Z2 I0"]), "3\n4\n");
    assert_eq!(run_cmd(&["Q0 Q2 Q4 Q6 Q8", "Q0 S0 T2"]), "0\n4\n");
}

#[test]
fn test_file_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "I0 I1 I2\nS0 Z2 I0").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    assert_eq!(run_cmd(&[path]), "3\n4\n");
}

#[test]
fn test_piped_input() {
    let output = run_piped(&[], "I0 I1 I2\n\nS0 Z2 I0\n");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "3\n0\n4\n");
}

#[test]
fn test_width_option() {
    assert_eq!(run_cmd(&["--width", "4", "I0 I0 Q0"]), "2\n");

    let output = stackris()
        .args(["I0 I0 Q0"])
        .env("STACKRIS_WIDTH", "4")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n");
}

#[test]
fn test_json_output() {
    let stdout = run_cmd(&["--format", "json", "I0 I0 Q4 I6 I6", "L0"]);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        lines,
        [
            serde_json::json!({
                "line": 1,
                "additions": ["I0", "I0", "Q4", "I6", "I6"],
                "height": 0,
                "cleared_lines": 2,
            }),
            serde_json::json!({
                "line": 2,
                "additions": ["L0"],
                "height": 3,
                "cleared_lines": 0,
            }),
        ]
    );
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heights.txt");
    let stdout = run_cmd(&["--output", path.to_str().unwrap(), "I0", "Q0"]);
    assert!(stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\n2\n");
}

#[test]
fn test_invalid_input_fails() {
    let output = run_piped(&[], "I0\nX1\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to parse line 2 of stdin"), "{stderr}");
}

#[test]
fn test_out_of_bounds_fails() {
    let output = stackris()
        .args(["I0", "I8"])
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("Failed to simulate line 2 of command line arguments"),
        "{stderr}"
    );
}
