// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Direct evaluation of expression trees.
//!
//! This walks the tree with the same observable semantics the compiled
//! program has on-chain: `return` stops with approve/reject, `err` and
//! failed asserts abort, integer overflow aborts, and state writes only
//! survive an approved run.

use super::state::{GlobalState, Invocation, StackValue};
use crate::data::expressions::{BinOp, Expression};
use log::debug;
use std::fmt;

/// Result of running a program once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Approved,
    Rejected,
    Aborted(String),
}

impl Outcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Approved => f.write_str("approved"),
            Outcome::Rejected => f.write_str("rejected"),
            Outcome::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// Early exit from evaluation
enum Halt {
    Stop { approved: bool },
    Abort(String),
}

type EvalResult = Result<Option<StackValue>, Halt>;

/// Evaluate `expr` for `invocation`. `state` is only updated when the run is approved.
pub fn evaluate(expr: &Expression, invocation: &Invocation, state: &mut GlobalState) -> Outcome {
    let mut scratch = state.clone();
    let mut interpreter = Interpreter {
        invocation,
        state: &mut scratch,
    };

    let outcome = match interpreter.eval(expr) {
        Ok(Some(StackValue::Uint(v))) => final_outcome(v != 0),
        Ok(Some(StackValue::Bytes(_))) => Outcome::Aborted("program ended with bytes on the stack".to_string()),
        Ok(None) => Outcome::Aborted("program ended with an empty stack".to_string()),
        Err(Halt::Stop { approved }) => final_outcome(approved),
        Err(Halt::Abort(reason)) => Outcome::Aborted(reason),
    };

    if outcome.is_approved() {
        debug!("committing {} global state entries", scratch.len());
        *state = scratch;
    }
    outcome
}

fn final_outcome(approved: bool) -> Outcome {
    if approved {
        Outcome::Approved
    } else {
        Outcome::Rejected
    }
}

fn abort<T>(reason: impl Into<String>) -> Result<T, Halt> {
    Err(Halt::Abort(reason.into()))
}

struct Interpreter<'a> {
    invocation: &'a Invocation,
    state: &'a mut GlobalState,
}

impl Interpreter<'_> {
    fn eval(&mut self, expr: &Expression) -> EvalResult {
        let value = match expr {
            Expression::Int(v) => StackValue::Uint(*v),
            Expression::NamedInt(named) => StackValue::Uint(named.value()),
            Expression::Bytes(literal) => StackValue::Bytes(literal.value.clone()),
            Expression::Addr(address) => StackValue::Bytes(address.public_key.to_vec()),
            Expression::Txn(field) => self.invocation.txn_field(*field),
            Expression::TxnArray { field, index } => match self.invocation.txn_array_field(*field, *index) {
                Some(value) => value,
                None => return abort(format!("txna {} {} out of range", field.name(), index)),
            },
            Expression::Global(field) => self.invocation.global_field(*field),

            Expression::BinOp { op, lhs, rhs } => {
                let lhs = self.eval_value(lhs)?;
                let rhs = self.eval_value(rhs)?;
                StackValue::Uint(apply_binop(*op, lhs, rhs)?)
            }

            // TEAL evaluates every operand of && and || before combining
            Expression::And(args) => {
                let mut result = true;
                for arg in args {
                    result &= self.eval_uint(arg)? != 0;
                }
                StackValue::Uint(u64::from(result))
            }
            Expression::Or(args) => {
                let mut result = false;
                for arg in args {
                    result |= self.eval_uint(arg)? != 0;
                }
                StackValue::Uint(u64::from(result))
            }
            Expression::Not(arg) => StackValue::Uint(u64::from(self.eval_uint(arg)? == 0)),

            Expression::Btoi(arg) => {
                let bytes = self.eval_bytes(arg)?;
                if bytes.len() > 8 {
                    return abort(format!("btoi of {} bytes", bytes.len()));
                }
                StackValue::Uint(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
            }
            Expression::Itob(arg) => StackValue::Bytes(self.eval_uint(arg)?.to_be_bytes().to_vec()),
            Expression::Len(arg) => StackValue::Uint(self.eval_bytes(arg)?.len() as u64),

            Expression::AppGlobalGet { key } => {
                let key = self.eval_bytes(key)?;
                self.state.get(&key).cloned().unwrap_or(StackValue::Uint(0))
            }
            Expression::AppGlobalPut { key, value } => {
                let key = self.eval_bytes(key)?;
                let value = self.eval_value(value)?;
                self.state.put(key, value);
                return Ok(None);
            }
            Expression::AppGlobalDel { key } => {
                let key = self.eval_bytes(key)?;
                self.state.delete(&key);
                return Ok(None);
            }

            Expression::Assert(condition) => {
                if self.eval_uint(condition)? == 0 {
                    return abort("assert failed");
                }
                return Ok(None);
            }
            Expression::Return(value) => {
                let approved = self.eval_uint(value)? != 0;
                return Err(Halt::Stop { approved });
            }
            Expression::Err => return abort("err opcode executed"),

            Expression::Seq(items) => {
                let mut last = None;
                for item in items {
                    last = self.eval(item)?;
                }
                return Ok(last);
            }

            Expression::If { condition, then_branch, else_branch } => {
                return if self.eval_uint(condition)? != 0 {
                    self.eval(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch)
                } else {
                    Ok(None)
                };
            }

            Expression::Cond(branches) => {
                for branch in branches {
                    if self.eval_uint(&branch.guard)? != 0 {
                        return self.eval(&branch.body);
                    }
                }
                return abort("no Cond branch matched");
            }
        };
        Ok(Some(value))
    }

    fn eval_value(&mut self, expr: &Expression) -> Result<StackValue, Halt> {
        match self.eval(expr)? {
            Some(value) => Ok(value),
            None => abort("expression produced no value"),
        }
    }

    fn eval_uint(&mut self, expr: &Expression) -> Result<u64, Halt> {
        match self.eval_value(expr)? {
            StackValue::Uint(v) => Ok(v),
            StackValue::Bytes(_) => abort("expected uint64, got bytes"),
        }
    }

    fn eval_bytes(&mut self, expr: &Expression) -> Result<Vec<u8>, Halt> {
        match self.eval_value(expr)? {
            StackValue::Bytes(b) => Ok(b),
            StackValue::Uint(_) => abort("expected bytes, got uint64"),
        }
    }
}

fn apply_binop(op: BinOp, lhs: StackValue, rhs: StackValue) -> Result<u64, Halt> {
    if op.is_equality() {
        let equal = match (&lhs, &rhs) {
            (StackValue::Uint(a), StackValue::Uint(b)) => a == b,
            (StackValue::Bytes(a), StackValue::Bytes(b)) => a == b,
            _ => return abort(format!("cannot compare {} with {}", lhs, rhs)),
        };
        return Ok(u64::from(equal == (op == BinOp::Eq)));
    }

    let (StackValue::Uint(a), StackValue::Uint(b)) = (&lhs, &rhs) else {
        return abort(format!("{} expects uint64 operands", op.opcode()));
    };
    let (a, b) = (*a, *b);
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => a.checked_div(b),
        BinOp::Mod => a.checked_rem(b),
        BinOp::Lt => Some(u64::from(a < b)),
        BinOp::Le => Some(u64::from(a <= b)),
        BinOp::Gt => Some(u64::from(a > b)),
        BinOp::Ge => Some(u64::from(a >= b)),
        BinOp::Eq | BinOp::Neq => unreachable!("equality handled above"),
    };
    match result {
        Some(v) => Ok(v),
        None => abort(format!("arithmetic failure in {} {} {}", a, op.opcode(), b)),
    }
}
