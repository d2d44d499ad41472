// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Flat TEAL instruction list produced by lowering

use super::teal_writer::TealWriter;
use std::fmt;

/// Jump target; rendered as `main_l<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "main_l{}", self.0)
    }
}

/// Branching opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    /// Jump when the popped value is non-zero
    Bnz,
    /// Jump when the popped value is zero (v2+)
    Bz,
    /// Unconditional jump (v2+)
    B,
}

impl Jump {
    pub fn opcode(self) -> &'static str {
        match self {
            Jump::Bnz => "bnz",
            Jump::Bz => "bz",
            Jump::B => "b",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Plain opcode with its immediate arguments
    Op {
        opcode: &'static str,
        immediates: Vec<String>,
    },
    Jump { kind: Jump, target: Label },
    Label(Label),
}

impl Instruction {
    pub fn op(opcode: &'static str) -> Self {
        Instruction::Op {
            opcode,
            immediates: vec![],
        }
    }

    pub fn op_with(opcode: &'static str, immediate: impl Into<String>) -> Self {
        Instruction::Op {
            opcode,
            immediates: vec![immediate.into()],
        }
    }

    pub fn render(&self, w: &mut TealWriter) {
        match self {
            Instruction::Op { opcode, immediates } => {
                w.sep(" ", std::iter::once(opcode.to_string()).chain(immediates.iter().cloned()));
                w.line("");
            }
            Instruction::Jump { kind, target } => w.line_fmt(format_args!("{} {}", kind.opcode(), target)),
            Instruction::Label(label) => w.line_fmt(format_args!("{}:", label)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::teal_writer::render_to_string;

    #[test]
    fn renders_each_instruction_kind() {
        let text = render_to_string(|w| {
            Instruction::Op {
                opcode: "txna",
                immediates: vec!["ApplicationArgs".to_string(), "0".to_string()],
            }
            .render(w);
            Instruction::Jump { kind: Jump::Bnz, target: Label(4) }.render(w);
            Instruction::Label(Label(4)).render(w);
            Instruction::op("err").render(w);
        });
        assert_eq!(text, "txna ApplicationArgs 0\nbnz main_l4\nmain_l4:\nerr");
    }
}
