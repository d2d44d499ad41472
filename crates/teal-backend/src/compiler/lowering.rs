// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Lowers an expression tree to a flat instruction list.
//!
//! Operands are emitted before their operator (TEAL is a stack machine).
//! Control flow becomes labels and jumps; labels are numbered in the order
//! they are allocated, so lowering the same tree twice gives the same output.

use super::instructions::{Instruction, Jump, Label};
use crate::escape::quote_string;
use teal_ir::{Branch, BytesEncoding, Expression};

/// First version with the `assert` opcode
const ASSERT_VERSION: u8 = 3;
/// First version with `b` and `bz`
const BRANCH_VERSION: u8 = 2;

pub struct Lowering {
    version: u8,
    next_label: u32,
    instructions: Vec<Instruction>,
}

impl Lowering {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            next_label: 1,
            instructions: vec![],
        }
    }

    pub fn lower(mut self, expr: &Expression) -> Vec<Instruction> {
        self.expression(expr);
        self.instructions
    }

    fn new_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn op(&mut self, opcode: &'static str) {
        self.emit(Instruction::op(opcode));
    }

    fn op_with(&mut self, opcode: &'static str, immediate: impl Into<String>) {
        self.emit(Instruction::op_with(opcode, immediate));
    }

    fn label(&mut self, label: Label) {
        self.emit(Instruction::Label(label));
    }

    fn bnz(&mut self, target: Label) {
        self.emit(Instruction::Jump { kind: Jump::Bnz, target });
    }

    /// `bz`, or `! bnz` before it existed
    fn bz(&mut self, target: Label) {
        if self.version >= BRANCH_VERSION {
            self.emit(Instruction::Jump { kind: Jump::Bz, target });
        } else {
            self.op("!");
            self.bnz(target);
        }
    }

    /// `b`, or `int 1 bnz` before it existed
    fn jump(&mut self, target: Label) {
        if self.version >= BRANCH_VERSION {
            self.emit(Instruction::Jump { kind: Jump::B, target });
        } else {
            self.op_with("int", "1");
            self.bnz(target);
        }
    }

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Int(v) => self.op_with("int", v.to_string()),
            Expression::NamedInt(named) => self.op_with("int", named.name()),
            Expression::Bytes(literal) => {
                let text = match literal.encoding {
                    BytesEncoding::Utf8 => quote_string(&literal.text),
                    BytesEncoding::Base16 => format!("0x{}", literal.text),
                    BytesEncoding::Base32 => format!("base32({})", literal.text),
                    BytesEncoding::Base64 => format!("base64({})", literal.text),
                };
                self.op_with("byte", text);
            }
            Expression::Addr(address) => self.op_with("addr", address.text.clone()),
            Expression::Txn(field) => self.op_with("txn", field.name()),
            Expression::TxnArray { field, index } => self.emit(Instruction::Op {
                opcode: "txna",
                immediates: vec![field.name().to_string(), index.to_string()],
            }),
            Expression::Global(field) => self.op_with("global", field.name()),

            Expression::BinOp { op, lhs, rhs } => {
                self.expression(lhs);
                self.expression(rhs);
                self.op(op.opcode());
            }
            Expression::And(args) => self.fold_logical(args, "&&"),
            Expression::Or(args) => self.fold_logical(args, "||"),
            Expression::Not(arg) => {
                self.expression(arg);
                self.op("!");
            }
            Expression::Btoi(arg) => {
                self.expression(arg);
                self.op("btoi");
            }
            Expression::Itob(arg) => {
                self.expression(arg);
                self.op("itob");
            }
            Expression::Len(arg) => {
                self.expression(arg);
                self.op("len");
            }

            Expression::AppGlobalGet { key } => {
                self.expression(key);
                self.op("app_global_get");
            }
            Expression::AppGlobalPut { key, value } => {
                self.expression(key);
                self.expression(value);
                self.op("app_global_put");
            }
            Expression::AppGlobalDel { key } => {
                self.expression(key);
                self.op("app_global_del");
            }

            Expression::Assert(condition) => {
                self.expression(condition);
                if self.version >= ASSERT_VERSION {
                    self.op("assert");
                } else {
                    let passed = self.new_label();
                    self.bnz(passed);
                    self.op("err");
                    self.label(passed);
                }
            }
            Expression::Return(value) => {
                self.expression(value);
                self.op("return");
            }
            Expression::Err => self.op("err"),

            Expression::Seq(items) => {
                for item in items {
                    self.expression(item);
                }
            }

            Expression::If { condition, then_branch, else_branch: None } => {
                let end = self.new_label();
                self.expression(condition);
                self.bz(end);
                self.expression(then_branch);
                self.label(end);
            }
            Expression::If { condition, then_branch, else_branch: Some(else_branch) } => {
                let then_label = self.new_label();
                let end = (!else_branch.always_exits()).then(|| self.new_label());
                self.expression(condition);
                self.bnz(then_label);
                self.expression(else_branch);
                if let Some(end) = end {
                    self.jump(end);
                }
                self.label(then_label);
                self.expression(then_branch);
                if let Some(end) = end {
                    self.label(end);
                }
            }

            Expression::Cond(branches) => self.cond(branches),
        }
    }

    fn fold_logical(&mut self, args: &[Expression], opcode: &'static str) {
        let mut args = args.iter();
        if let Some(first) = args.next() {
            self.expression(first);
        }
        for arg in args {
            self.expression(arg);
            self.op(opcode);
        }
    }

    /// Guards first, each jumping to its body; falling past all guards is `err`
    fn cond(&mut self, branches: &[Branch]) {
        let labels: Vec<Label> = branches.iter().map(|_| self.new_label()).collect();
        let last = branches.len().saturating_sub(1);
        let needs_end = branches
            .iter()
            .enumerate()
            .any(|(i, b)| i < last && !b.body.always_exits());
        let end = needs_end.then(|| self.new_label());

        for (branch, &label) in branches.iter().zip(&labels) {
            self.expression(&branch.guard);
            self.bnz(label);
        }
        self.op("err");

        for (i, (branch, &label)) in branches.iter().zip(&labels).enumerate() {
            self.label(label);
            self.expression(&branch.body);
            if let Some(end) = end {
                if i < last && !branch.body.always_exits() {
                    self.jump(end);
                }
            }
        }
        if let Some(end) = end {
            self.label(end);
        }
    }
}
