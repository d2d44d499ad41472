use assert_cmd::Command;
use std::fs;
use tealc::commands;
use tealc::options::Options;
use tealc::programs::{approval, ProgramKind};
use teal_backend::compile_teal;
use teal_ir::Mode;

const APPROVAL_TEAL: &str = "#pragma version 3
txn ApplicationID
int 0
==
bnz main_l1
txn OnCompletion
int NoOp
==
bnz main_l2
err
main_l1:
byte \"mynumber\"
txna ApplicationArgs 0
app_global_put
int 1
return
main_l2:
int 50
byte \"mynumber\"
app_global_get
btoi
==
assert
int 1
return";

fn compile_program(program: ProgramKind) -> String {
    let options = Options {
        program,
        ..Options::default()
    };
    commands::compile(&options).expect("program should compile")
}

#[test]
fn approval_program_snapshot() {
    let teal = compile_program(ProgramKind::Approval);
    insta::assert_snapshot!("approval_program", teal);
}

#[test]
fn gold_transfer_snapshot() {
    let teal = compile_program(ProgramKind::GoldTransfer);
    insta::assert_snapshot!("gold_transfer", teal);
}

#[test]
fn approval_program_at_version_two_uses_err_for_assert() {
    let program = approval::build_program().unwrap();
    let teal = compile_teal(&program, Mode::Application, 2).unwrap();
    insta::assert_snapshot!("approval_program_v2", teal);
}

#[test]
fn approval_program_is_deterministic() {
    let first = compile_program(ProgramKind::Approval);
    let second = compile_program(ProgramKind::Approval);
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first, APPROVAL_TEAL);
}

#[test]
fn cli_without_arguments_prints_approval_program() {
    Command::cargo_bin("tealc")
        .unwrap()
        .assert()
        .success()
        .stdout(format!("{}\n", APPROVAL_TEAL));
}

#[test]
fn cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold.teal");
    Command::cargo_bin("tealc")
        .unwrap()
        .args(["compile", "--program", "gold-transfer", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, format!("{}\n", compile_program(ProgramKind::GoldTransfer)));
}

#[test]
fn cli_reads_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tealc.toml");
    fs::write(&config, "program = \"approval\"\nversion = 2\n").unwrap();

    let output = Command::cargo_bin("tealc")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("#pragma version 2\n"));
    assert!(!stdout.contains("\nassert\n"));
}

#[test]
fn cli_verbose_logs_to_stderr_only() {
    let output = Command::cargo_bin("tealc")
        .unwrap()
        .args(["--verbose", "compile"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("{}\n", APPROVAL_TEAL));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("compile options"));

    let quiet = Command::cargo_bin("tealc").unwrap().arg("compile").output().unwrap();
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("compile options"));
}

#[test]
fn cli_fails_when_version_is_too_low() {
    let output = Command::cargo_bin("tealc")
        .unwrap()
        .args(["compile", "--target-version", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to compile approval program"));
    assert!(stderr.contains("requires TEAL version 2"));
}

#[test]
fn cli_simulates_deploy_then_call() {
    Command::cargo_bin("tealc")
        .unwrap()
        .args(["simulate", "--number", "50"])
        .assert()
        .success()
        .stdout(
            "deployment: approved\nno-op call: approved\nglobal state: {mynumber=0x0000000000000032}\n",
        );

    let output = Command::cargo_bin("tealc")
        .unwrap()
        .args(["simulate", "-n", "51"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("no-op call: aborted: assert failed"));
}
