// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Expression tree to TEAL text.
//!
//! Compilation runs in three steps: validation (types, mode, version),
//! lowering to a flat instruction list, and rendering that list one
//! instruction per line under a `#pragma version` header.

mod instructions;
mod lowering;
mod teal_writer;

pub use instructions::{Instruction, Jump, Label};
pub use teal_writer::TealWriter;

use crate::error::CompileError;
use crate::options::CompileOptions;
use log::{debug, info};
use lowering::Lowering;
use teal_ir::analysis::validate;
use teal_ir::{Expression, Mode, TealType, MAX_VERSION, MIN_VERSION};

/// Compile `expr` to TEAL source for `mode` at `version`
pub fn compile_teal(expr: &Expression, mode: Mode, version: u8) -> Result<String, CompileError> {
    compile_with_options(expr, &CompileOptions::new(mode, version))
}

pub fn compile_with_options(expr: &Expression, options: &CompileOptions) -> Result<String, CompileError> {
    let instructions = lower_program(expr, options)?;
    let text = teal_writer::render_to_string(|w| {
        w.line_fmt(format_args!("#pragma version {}", options.version));
        for instruction in &instructions {
            instruction.render(w);
        }
    });
    debug!("rendered {} bytes of TEAL", text.len());
    Ok(text)
}

/// Validate and lower without rendering
pub fn lower_program(expr: &Expression, options: &CompileOptions) -> Result<Vec<Instruction>, CompileError> {
    let CompileOptions { mode, version } = *options;
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(CompileError::UnsupportedVersion { version });
    }

    info!("compiling {} program for TEAL version {}", mode, version);
    let program_type = validate(expr, mode, version)?;
    match program_type {
        TealType::Bytes => {
            return Err(CompileError::InvalidProgram {
                program_type,
                reason: "would leave bytes on the stack",
            })
        }
        TealType::None if !expr.always_exits() => {
            return Err(CompileError::InvalidProgram {
                program_type,
                reason: "can finish without a result",
            })
        }
        _ => {}
    }

    let instructions = Lowering::new(version).lower(expr);
    debug!("lowered to {} instructions", instructions.len());
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teal_ir::construction::*;
    use teal_ir::{AnalysisError, BinOp, OnComplete, TxnField, TxnType};

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn header_carries_version() {
        let text = compile_teal(&approve(), Mode::Signature, 2).unwrap();
        assert_eq!(lines(&text), vec!["#pragma version 2", "int 1", "return"]);
    }

    #[test]
    fn out_of_range_versions_are_rejected() {
        assert_eq!(
            compile_teal(&int(1), Mode::Signature, 0),
            Err(CompileError::UnsupportedVersion { version: 0 })
        );
        assert_eq!(
            compile_teal(&int(1), Mode::Signature, MAX_VERSION + 1),
            Err(CompileError::UnsupportedVersion { version: MAX_VERSION + 1 })
        );
    }

    #[test]
    fn analysis_errors_propagate() {
        let program = seq(vec![app_global_put(bytes("k"), int(1)), approve()]);
        assert!(matches!(
            compile_teal(&program, Mode::Signature, 3),
            Err(CompileError::Analysis(AnalysisError::ModeMismatch { .. }))
        ));
    }

    #[test]
    fn programs_must_produce_a_result() {
        assert!(matches!(
            compile_teal(&bytes("x"), Mode::Signature, 2),
            Err(CompileError::InvalidProgram { program_type: TealType::Bytes, .. })
        ));
        assert!(matches!(
            compile_teal(&assert(int(1)), Mode::Signature, 2),
            Err(CompileError::InvalidProgram { program_type: TealType::None, .. })
        ));
    }

    #[test]
    fn assert_lowers_to_branch_before_version_three() {
        let program = seq(vec![assert(eq(txn(TxnField::Fee), int(1000))), approve()]);
        let v2 = compile_teal(&program, Mode::Signature, 2).unwrap();
        assert_eq!(
            lines(&v2),
            vec![
                "#pragma version 2",
                "txn Fee",
                "int 1000",
                "==",
                "bnz main_l1",
                "err",
                "main_l1:",
                "int 1",
                "return",
            ]
        );
        let v3 = compile_teal(&program, Mode::Signature, 3).unwrap();
        assert!(lines(&v3).contains(&"assert"));
        assert!(!v3.contains("main_l"));
    }

    #[test]
    fn and_or_fold_left() {
        let program = or(vec![
            and(vec![int(1), int(2), int(3)]).unwrap(),
            int(0),
        ])
        .unwrap();
        let text = compile_teal(&program, Mode::Signature, 1).unwrap();
        assert_eq!(
            lines(&text)[1..],
            ["int 1", "int 2", "&&", "int 3", "&&", "int 0", "||"]
        );
    }

    #[test]
    fn if_else_joins_at_end_label() {
        let program = if_then_else(eq(txn(TxnField::Fee), int(0)), int(1), int(0));
        let text = compile_teal(&program, Mode::Signature, 2).unwrap();
        assert_eq!(
            lines(&text)[1..],
            [
                "txn Fee",
                "int 0",
                "==",
                "bnz main_l1",
                "int 0",
                "b main_l2",
                "main_l1:",
                "int 1",
                "main_l2:",
            ]
        );
    }

    #[test]
    fn version_one_avoids_b_and_bz() {
        let program = seq(vec![if_then(int(1), assert(int(1))), approve_v1()]);
        let text = compile_teal(&program, Mode::Signature, 1).unwrap();
        assert!(!lines(&text).iter().any(|l| l.starts_with("bz ") || l.starts_with("b ")));
        assert!(text.contains("!\nbnz main_l1"));
    }

    // `return` needs v2, so v1 programs end on their last value
    fn approve_v1() -> Expression {
        int(1)
    }

    #[test]
    fn cond_with_value_bodies_jumps_to_end() {
        let program = cond(vec![
            (eq(txn(TxnField::OnCompletion), on_complete(OnComplete::OptIn)), int(1)),
            (int(1), int(0)),
        ])
        .unwrap();
        let text = compile_teal(&program, Mode::Application, 2).unwrap();
        assert_eq!(
            lines(&text)[1..],
            [
                "txn OnCompletion",
                "int OptIn",
                "==",
                "bnz main_l1",
                "int 1",
                "bnz main_l2",
                "err",
                "main_l1:",
                "int 1",
                "b main_l3",
                "main_l2:",
                "int 0",
                "main_l3:",
            ]
        );
    }

    #[test]
    fn byte_literals_keep_their_encoding() {
        let program = seq(vec![
            app_global_put(bytes_encoded(teal_ir::BytesEncoding::Base16, "0xff").unwrap(), bytes("a\"b")),
            app_global_put(bytes_encoded(teal_ir::BytesEncoding::Base64, "aGVsbG8=").unwrap(), int(1)),
            approve(),
        ]);
        let text = compile_teal(&program, Mode::Application, 2).unwrap();
        assert!(text.contains("byte 0xff\nbyte \"a\\\"b\"\napp_global_put"));
        assert!(text.contains("byte base64(aGVsbG8=)"));
    }

    #[test]
    fn compilation_is_deterministic() {
        let program = cond(vec![(int(1), approve()), (int(0), reject())]).unwrap();
        let first = compile_teal(&program, Mode::Application, 3).unwrap();
        let second = compile_teal(&program.clone(), Mode::Application, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn remaining_operations_lower_to_their_opcodes() {
        let program = seq(vec![
            app_global_del(bytes("k")),
            assert(not(neq(txn(TxnField::TypeEnum), txn_type(TxnType::AssetTransfer)))),
            assert(ge(
                binop(BinOp::Mul, int(6), int(7)),
                binop(BinOp::Mod, int(10), int(4)),
            )),
            assert(gt(len(account(1)), int(0))),
            approve(),
        ]);
        let text = compile_teal(&program, Mode::Application, 3).unwrap();
        assert_eq!(
            lines(&text)[1..],
            [
                "byte \"k\"",
                "app_global_del",
                "txn TypeEnum",
                "int axfer",
                "!=",
                "!",
                "assert",
                "int 6",
                "int 7",
                "*",
                "int 10",
                "int 4",
                "%",
                ">=",
                "assert",
                "txna Accounts 1",
                "len",
                "int 0",
                ">",
                "assert",
                "int 1",
                "return",
            ]
        );
    }

    #[test]
    fn application_call_type_needs_version_two() {
        let program = eq(txn(TxnField::TypeEnum), txn_type(TxnType::ApplicationCall));
        assert_eq!(
            compile_teal(&program, Mode::Signature, 1),
            Err(CompileError::Analysis(AnalysisError::VersionTooLow {
                operation: "int appl".to_string(),
                required: 2,
                version: 1,
            }))
        );
        let text = compile_teal(&program, Mode::Signature, 2).unwrap();
        assert_eq!(lines(&text)[1..], ["txn TypeEnum", "int appl", "=="]);
    }
}
