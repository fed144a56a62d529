use std::{fs, path::Path, process::Command};

const HANDS: &str = "\
1,1,2,2,3,3,4,4,6,1,0
1,1,1,2,3,3,4,4,6,1,1
2,1,2,2,3,3,3,4,9,1,2
10,1,11,1,12,1,13,1,1,1,9
";

fn pokerga() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pokerga"));
    command.env_remove("RUST_LOG");
    command
}

fn write_hands(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("hands.csv");
    fs::write(&path, HANDS).unwrap();
    path
}

#[test]
fn test_train_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let hands = write_hands(dir.path());
    let report = dir.path().join("report.json");

    let status = pokerga()
        .args(["train", "--generations", "2", "--population", "8", "--threads", "2"])
        .args(["--seed", "00000000000000000000000000000001"])
        .arg("--hands")
        .arg(&hands)
        .arg("--output")
        .arg(&report)
        .status()
        .unwrap();
    assert!(status.success());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["seed"], "00000000000000000000000000000001");
    assert_eq!(json["config"]["generations"], 2);
    assert_eq!(json["ranking"].as_array().unwrap().len(), 8);
}

#[test]
fn test_evaluate_prints_score() {
    let dir = tempfile::tempdir().unwrap();
    let hands = write_hands(dir.path());

    // PUSH(1) RET PUSH(?)
    let output = pokerga()
        .args(["evaluate", "--chromosome", "0190"])
        .arg("--hands")
        .arg(&hands)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("PUSH(1) RET"));
    assert!(stdout.contains("score: 0.2500"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let hands = write_hands(dir.path());

    let output = pokerga()
        .args(["train", "--population", "0"])
        .arg("--hands")
        .arg(&hands)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid training configuration"));
}
