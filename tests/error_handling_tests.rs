mod common;
use common::*;
use tempfile::TempDir;

#[test]
fn test_malformed_kill_aborts_by_default() {
    let workdir = TempDir::new().unwrap();
    let input = std::fs::read_to_string(fixture("malformed.log")).unwrap();

    let (stdout, stderr, exit_code) = run_fraglog_in_dir(workdir.path(), &[], &input);
    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("fraglog: error:"), "stderr: {}", stderr);
    assert!(stderr.contains("line 5"), "stderr: {}", stderr);
    assert!(
        !workdir.path().join("match_data.json").exists(),
        "no report may be written after a failure"
    );
}

#[test]
fn test_malformed_kill_aborts_in_parallel_mode() {
    let path = fixture("malformed.log");
    let (_stdout, stderr, exit_code) =
        run_fraglog_with_files(&["-o", "-", "--threads", "3"], &[path.as_path()]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("malformed kill event"), "stderr: {}", stderr);
}

#[test]
fn test_skip_strategy_drops_malformed_lines() {
    let path = fixture("malformed.log");
    let (stdout, stderr, exit_code) = run_fraglog_with_files(
        &["-o", "-", "--on-error", "skip", "--stats"],
        &[path.as_path()],
    );
    assert_eq!(exit_code, 0, "stderr: {}", stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["game-1"]["total_kills"], 2);
    assert_eq!(report["game-1"]["kills"]["Isgalamido"], 1);
    assert_eq!(report["game-1"]["kills"]["Mocinha"], 1);

    assert!(stderr.contains("1 malformed lines skipped"), "stderr: {}", stderr);
    assert!(stderr.contains("WARN"), "skipped lines are logged: {}", stderr);
}

#[test]
fn test_quiet_suppresses_skip_warnings() {
    let path = fixture("malformed.log");
    let (_stdout, stderr, exit_code) = run_fraglog_with_files(
        &["-o", "-", "--on-error", "skip", "-q"],
        &[path.as_path()],
    );
    assert_eq!(exit_code, 0);
    assert!(stderr.is_empty(), "stderr: {}", stderr);
}

#[test]
fn test_missing_input_file() {
    let (_stdout, stderr, exit_code) = run_fraglog_with_input(&["/nonexistent/games.log"], "");
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to open log file"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_usage_exit_code() {
    let (_stdout, _stderr, exit_code) = run_fraglog_with_input(&["--on-error", "retry"], "");
    assert_eq!(exit_code, 2);

    let (_stdout, _stderr, exit_code) = run_fraglog_with_input(&["--threads", "many"], "");
    assert_eq!(exit_code, 2);

    let (_stdout, _stderr, exit_code) = run_fraglog_with_input(&["-v", "-q"], "");
    assert_eq!(exit_code, 2);
}

#[test]
fn test_non_utf8_chat_line_is_tolerated() {
    let workdir = TempDir::new().unwrap();
    let path = workdir.path().join("latin1.log");
    std::fs::write(
        &path,
        b"  0:00 InitGame:\n 0:01 say: 2 caf\xe9\n 0:02 Kill: 2 3 7: a killed b by MOD_SHOTGUN\n",
    )
    .unwrap();

    let (stdout, stderr, exit_code) = run_fraglog_with_files(&["-o", "-"], &[path.as_path()]);
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["game-1"]["total_kills"], 1);
    assert_eq!(report["game-1"]["kills_by_means"]["MOD_SHOTGUN"], 1);
}
