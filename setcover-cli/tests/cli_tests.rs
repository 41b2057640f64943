use std::io::Write;
use std::process::Command;

fn scvr() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scvr"))
}

fn write_triangle_instance() -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("scvr_test_triangle_{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    // gecco2020: header "M N", then N lines "e k s1..sk" (0-based), unicost.
    writeln!(file, "3 3").unwrap();
    writeln!(file, "0 2 0 2").unwrap();
    writeln!(file, "1 2 0 1").unwrap();
    writeln!(file, "2 2 1 2").unwrap();
    path
}

#[test]
fn test_help() {
    let output = scvr().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Run a weighted set covering algorithm"));
}

#[test]
fn test_missing_required_input_is_bad_usage() {
    let output = scvr().args(["-a", "greedy"]).output().unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_greedy_reports_a_feasible_solution() {
    let instance = write_triangle_instance();
    let output = scvr()
        .args(["-a", "greedy", "-i", instance.to_str().unwrap(), "-f", "gecco2020"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("report should contain a JSON object");
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(report["greedy"]["Solution"]["Cost"], 2);
    std::fs::remove_file(&instance).ok();
}

#[test]
fn test_output_flag_writes_json_report_to_a_file() {
    let instance = write_triangle_instance();
    let report_path = std::env::temp_dir().join(format!("scvr_test_report_{}.json", std::process::id()));
    let output = scvr()
        .args([
            "-a",
            "greedy",
            "-i",
            instance.to_str().unwrap(),
            "-f",
            "gecco2020",
            "-o",
            report_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(report_path.exists());
    let content = std::fs::read_to_string(&report_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(json["Parameters"].is_object());
    std::fs::remove_file(&instance).ok();
    std::fs::remove_file(&report_path).ok();
}

#[test]
fn test_certificate_flag_writes_a_readable_certificate() {
    let instance = write_triangle_instance();
    let certificate_path = std::env::temp_dir().join(format!("scvr_test_cert_{}.sol", std::process::id()));
    let output = scvr()
        .args([
            "-a",
            "greedy",
            "-i",
            instance.to_str().unwrap(),
            "-f",
            "gecco2020",
            "-c",
            certificate_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let content = std::fs::read_to_string(&certificate_path).unwrap();
    let first_line: usize = content.lines().next().unwrap().trim().parse().unwrap();
    assert_eq!(first_line, 2);
    std::fs::remove_file(&instance).ok();
    std::fs::remove_file(&certificate_path).ok();
}

#[test]
fn test_unknown_format_is_a_runtime_error() {
    let instance = write_triangle_instance();
    let output = scvr()
        .args(["-a", "greedy", "-i", instance.to_str().unwrap(), "-f", "bogus"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    std::fs::remove_file(&instance).ok();
}

#[test]
fn test_trivial_bound_algorithm_reports_a_bound_without_solving() {
    let instance = write_triangle_instance();
    let output = scvr()
        .args(["-a", "trivial-bound", "-i", instance.to_str().unwrap(), "-f", "gecco2020"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert!(report["trivial-bound"]["Bound"].as_i64().unwrap() > 0);
    std::fs::remove_file(&instance).ok();
}

#[test]
fn test_crown_flag_does_not_change_feasibility() {
    let instance = write_triangle_instance();
    let output = scvr()
        .args([
            "-a",
            "greedy",
            "-i",
            instance.to_str().unwrap(),
            "-f",
            "gecco2020",
            "--crown",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("report should contain a JSON object");
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(report["greedy"]["Solution"]["Cost"], 2);
    std::fs::remove_file(&instance).ok();
}

#[test]
fn test_completions_prints_a_shell_script() {
    let output = scvr().args(["--completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("scvr"));
}
