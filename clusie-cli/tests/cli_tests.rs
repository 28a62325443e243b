//! Integration tests for the Clusie CLI.
//!
//! These tests invoke the `clusie` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use clusie_common::{Bytecode, Opcode, ProgramBuilder};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn clusie() -> Command {
    Command::cargo_bin("clusie").unwrap()
}

/// Write program bytes to a .clb file inside `dir`.
fn write_program(dir: &TempDir, code: &[u8]) -> PathBuf {
    let path = dir.path().join("test.clb");
    fs::write(&path, code).unwrap();
    path
}

/// STORE_U32 0 (CONST 6); STORE_PTR 4 (SLOT_ADDR 0); TERMINATE.
fn sample_program() -> Vec<u8> {
    ProgramBuilder::new()
        .op(Bytecode::StoreU32)
        .slot(0)
        .const_u32(6)
        .op(Bytecode::StorePtr)
        .slot(4)
        .expr(Opcode::SlotAddress)
        .slot(0)
        .op(Bytecode::Terminate)
        .finish()
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    clusie()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: clusie"));
}

#[test]
fn help_flag_exits_0() {
    clusie()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: clusie"));
}

#[test]
fn unknown_command_exits_1() {
    clusie()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- run ----

#[test]
fn run_without_input_exits_1() {
    clusie()
        .arg("run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires an input file"));
}

#[test]
fn run_missing_file_exits_1() {
    clusie()
        .args(["run", "/nonexistent/prog.clb"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_prints_requested_slots() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &sample_program());
    clusie()
        .args(["run", path.to_str().unwrap(), "--read", "u32@0"])
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn run_prints_multiple_slots_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &sample_program());
    clusie()
        .args([
            "run",
            path.to_str().unwrap(),
            "--read",
            "u32@0",
            "--read",
            "u64@4",
        ])
        .assert()
        .success()
        .stdout("6\n0\n");
}

#[test]
fn run_without_reads_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &sample_program());
    clusie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn run_bad_read_spec_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &sample_program());
    clusie()
        .args(["run", path.to_str().unwrap(), "--read", "f32@0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bad read spec"));
}

#[test]
fn run_runtime_error_exits_3() {
    // Division by zero.
    let code = ProgramBuilder::new()
        .op(Bytecode::StoreU32)
        .slot(0)
        .expr(Opcode::Divide)
        .const_u32(1)
        .const_u32(0)
        .op(Bytecode::Terminate)
        .finish();
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &code);
    clusie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn run_invalid_bytecode_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &[0x42]);
    clusie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("invalid bytecode"));
}

// ---- disassemble ----

#[test]
fn disassemble_prints_instructions() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &sample_program());
    clusie()
        .args(["disassemble", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("STORE_U32 0 (CONST 6)"))
        .stdout(predicate::str::contains("STORE_PTR 4 (SLOT_ADDR 0)"))
        .stdout(predicate::str::contains("TERMINATE"));
}

#[test]
fn disassemble_unknown_byte_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, &[0x42]);
    clusie()
        .args(["disassemble", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown bytecode"));
}
