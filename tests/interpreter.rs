//! Drives the oxsh binary end to end over piped stdin and checks the
//! observable effects: stdout, stderr diagnostics, and file side effects.

#![allow(clippy::expect_used)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("oxsh_it_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn run_script(dir: &Path, script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_oxsh"))
        .current_dir(dir)
        .env("HOME", dir)
        .env("OXSH_THEME", "plain")
        .env("OXSH_HISTORY", dir.join("history"))
        .env("OXSH_LOG_DIR", dir.join("logs"))
        .env("OXSH_LOG_LEVEL", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn oxsh");
    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("collect output")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn redirect_out_creates_and_truncates() {
    let dir = scratch_dir("redirect_out");
    fs::write(dir.join("out.txt"), "stale content much longer than hi\n").expect("seed file");

    let output = run_script(&dir, "echo hi > out.txt\nquit\n");

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.join("out.txt")).expect("read out.txt"),
        "hi\n"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn pipeline_feeds_producer_into_consumer() {
    let dir = scratch_dir("pipeline");

    let output = run_script(&dir, "printf hello_from_pipe | cat\nquit\n");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("hello_from_pipe"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn chained_redirects_apply_both_ends() {
    let dir = scratch_dir("chained");
    fs::write(dir.join("in.txt"), "b\na\n").expect("seed input");

    let output = run_script(&dir, "sort < in.txt > out.txt\nquit\n");

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.join("out.txt")).expect("read out.txt"),
        "a\nb\n"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_file_reports_and_continues() {
    let dir = scratch_dir("missing_input");

    let output = run_script(&dir, "cat < no_such_file.txt\necho still_alive\nquit\n");

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("[panic]"));
    // the interpreter survived the failed line
    assert!(stdout_of(&output).contains("still_alive"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn quoted_operator_stays_one_word() {
    let dir = scratch_dir("quoted");

    let output = run_script(&dir, "echo \"a|b\"\nquit\n");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("a|b"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_error_does_not_kill_the_interpreter() {
    let dir = scratch_dir("parse_error");

    let output = run_script(&dir, "echo oops >\necho recovered\nquit\n");

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("[panic]"));
    assert!(stdout_of(&output).contains("recovered"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cd_tilde_lands_in_home() {
    let dir = scratch_dir("cd_home");
    let canonical = dir.canonicalize().expect("canonicalize scratch dir");

    let output = run_script(&dir, "cd /\ncd ~\npwd\nquit\n");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains(&canonical.display().to_string()));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn history_lists_accepted_lines_most_recent_first() {
    let dir = scratch_dir("history");

    let output = run_script(&dir, "echo one\necho two\nhistory\nquit\n");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let first = stdout.find("\t2\thistory").expect("history lists itself");
    let second = stdout.find("\t1\techo two").expect("second entry");
    let third = stdout.find("\t0\techo one").expect("first entry");
    assert!(first < second && second < third);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn alias_ll_expands_to_ls_l() {
    let dir = scratch_dir("alias");
    fs::write(dir.join("marker_file"), "x").expect("seed file");

    let output = run_script(&dir, "ll\nquit\n");

    assert!(output.status.success());
    // `ls -l` long format carries permission bits, a bare `ls` would not
    let stdout = stdout_of(&output);
    assert!(stdout.contains("marker_file"));
    assert!(stdout.contains("-r"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_command_reports_nonzero_exit() {
    let dir = scratch_dir("unknown");

    let output = run_script(&dir, "definitely_not_a_command_xyz\necho after\nquit\n");

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("[panic]"));
    assert!(stdout_of(&output).contains("after"));
    let _ = fs::remove_dir_all(&dir);
}
