use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run groupbar with extra args and stdin data
fn run_groupbar(args: &[&str], stdin_data: &str) -> Result<Vec<u8>, String> {
    let mut child = Command::new("cargo")
        .args(["run", "--bin", "groupbar", "--"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_data.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && &bytes[0..8] == &[137, 80, 78, 71, 13, 10, 26, 10]
}

const SAMPLE_CSV: &str = "grp,val\nA,1\nA,3\nB,2\nB,4\nB,6\n";

#[test]
fn test_end_to_end_bar_chart() {
    let result = run_groupbar(&["bars(group: grp, value: val)"], SAMPLE_CSV);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let png_bytes = result.unwrap();
    assert!(is_valid_png(&png_bytes), "Output is not a valid PNG");
}

#[test]
fn test_end_to_end_full_pipeline() {
    let dsl = r##"bars(group: grp, value: val) | labs(title: "Weights", y: "Weight (g)") | theme(font_size: 14, aspect: 1.5) | errorbars(sd, sem) | colors("A": "#ff0000", "B": "#4CAF50")"##;
    let result = run_groupbar(&[dsl], SAMPLE_CSV);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_jittered_points_deterministic() {
    let dsl = r##"bars(group: grp, value: val) | points(jitter: 0.2, color: "#000000", size: 50)"##;
    let first = run_groupbar(&[dsl, "--seed", "7"], SAMPLE_CSV).expect("first render failed");
    let second = run_groupbar(&[dsl, "--seed", "7"], SAMPLE_CSV).expect("second render failed");
    assert!(is_valid_png(&first));
    assert_eq!(first, second, "Same seed must give byte-identical output");
}

#[test]
fn test_end_to_end_unselected_columns_prompt() {
    let result = run_groupbar(&["bars()"], SAMPLE_CSV);
    assert!(result.is_ok(), "Guard state must not be a process error");
    let stdout = result.unwrap();
    assert!(!is_valid_png(&stdout));
    let text = String::from_utf8_lossy(&stdout);
    assert!(text.contains("Select a group column"), "Got: {}", text);
}

#[test]
fn test_end_to_end_empty_stdin_prompt() {
    let result = run_groupbar(&["bars(group: grp, value: val)"], "");
    assert!(result.is_ok(), "Empty input must not be a process error");
    let text = String::from_utf8_lossy(&result.unwrap()).to_string();
    assert!(text.contains("Pipe a CSV table"), "Got: {}", text);
}

#[test]
fn test_end_to_end_header_only_csv() {
    let result = run_groupbar(&["bars(group: grp, value: val)"], "grp,val\n");
    assert!(result.is_err(), "Should have failed with empty CSV error");
    assert!(result.unwrap_err().contains("at least one data row"));
}

#[test]
fn test_end_to_end_column_not_found() {
    let result = run_groupbar(&["bars(group: missing, value: val)"], SAMPLE_CSV);
    assert!(result.is_err(), "Should have failed with column not found");
}

#[test]
fn test_end_to_end_non_numeric_value_column() {
    let csv = "grp,val\nA,1\nA,banana\n";
    let result = run_groupbar(&["bars(group: grp, value: val)"], csv);
    assert!(result.is_err(), "Should have failed with non-numeric data");
    assert!(result.unwrap_err().contains("banana"));
}

#[test]
fn test_end_to_end_invalid_syntax() {
    let result = run_groupbar(&["invalid syntax here"], SAMPLE_CSV);
    assert!(result.is_err(), "Should have failed with parse error");
    assert!(result.unwrap_err().contains("Parse error"));
}

#[test]
fn test_end_to_end_trailing_garbage_in_dsl() {
    let result = run_groupbar(&["bars(group: grp, value: val) extra"], SAMPLE_CSV);
    assert!(result.is_err(), "Trailing garbage should be a parse error");
    assert!(result.unwrap_err().contains("Parse error"));
}

#[test]
fn test_end_to_end_json_input() {
    let json = r#"[{"grp": "A", "val": 1}, {"grp": "A", "val": 3}, {"grp": "B", "val": 2}]"#;
    let result = run_groupbar(&["bars(group: grp, value: val)", "--json"], json);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_unicode_groups() {
    let csv = "groupe,température\ncontrôle,20.5\ncontrôle,21.0\nessai,23.4\n";
    let result = run_groupbar(&["bars(group: groupe, value: température)"], csv);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_single_observation_group() {
    let csv = "grp,val\nsolo,5\npair,2\npair,4\n";
    let result = run_groupbar(&["bars(group: grp, value: val) | errorbars(sd, sem)"], csv);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_negative_values() {
    let csv = "grp,val\nA,-2\nA,-4\nB,3\n";
    let result = run_groupbar(&["bars(group: grp, value: val)"], csv);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}
