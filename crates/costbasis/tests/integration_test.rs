//! End-to-end tests running the `costbasis` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

fn costbasis(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_costbasis"))
        .args(args)
        .env_remove("COSTBASIS_LOTS")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run costbasis")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn lot_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_sample_holdings() {
    let output = costbasis(&["remaining", "--quantity", "100"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "270\n");

    let output = costbasis(&["profit", "-q", "300", "-p", "25"]);
    assert_eq!(stdout(&output), "500\n");
}

#[test]
fn test_csv_lots() {
    let file = lot_file(".csv", "id,quantity,price\n1,120,20\n2,70,30\n");
    let lots = path_str(file.path());

    let output = costbasis(&["--lots", lots, "sold-basis", "-q", "190"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "23.684\n");

    let output = costbasis(&["--lots", lots, "profit", "-q", "150", "-p", "40"]);
    assert_eq!(stdout(&output), "2700\n");
}

#[test]
fn test_lots_from_env() {
    let file = lot_file(".json", r#"[{"id": 1, "quantity": 5, "price": 2}]"#);
    let output = Command::new(env!("CARGO_BIN_EXE_costbasis"))
        .args(["remaining", "-q", "2"])
        .env("COSTBASIS_LOTS", file.path())
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn test_json_report() {
    let output = costbasis(&["--format", "json", "report", "-q", "300", "-p", "25"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["remaining_quantity"], 70);
    assert_eq!(value["profit"], "500");
    assert_eq!(value["sold"].as_array().unwrap().len(), 3);
}

#[test]
fn test_insufficient_shares_exit_code() {
    let output = costbasis(&["sold-basis", "-q", "371"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("error: insufficient shares: requested 371, available 370"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_invalid_input_exit_code() {
    let output = costbasis(&["profit", "-q", "10", "-p", "-3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("price cannot be negative"));
}

#[test]
fn test_bad_lot_file_exit_code() {
    let file = lot_file(".csv", "id,quantity,price\n1,10,20\n1,5,20\n");
    let output = costbasis(&["--lots", path_str(file.path()), "lots"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("duplicate lot id #1"), "{}", stderr(&output));

    let output = costbasis(&["--lots", "/nonexistent/lots.csv", "lots"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_oversized_lot_file_exit_code() {
    let file = lot_file(".csv", "id,quantity,price\n1,18446744073709551615,1\n2,2,1\n");
    let output = costbasis(&["--lots", path_str(file.path()), "lots"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("total quantity overflows at lot #2"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_completions() {
    let output = costbasis(&["--generate-completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("costbasis"));
}
