// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::fields::{GlobalField, NamedInt, TxnArrayField, TxnField};
use crate::data::literals::{Address, ByteLiteral};
use serde::{Deserialize, Serialize};

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add, Sub, Mul, Div, Mod,
    Eq, Neq, Lt, Le, Gt, Ge,
}

impl BinOp {
    /// TEAL opcode for this operation
    pub fn opcode(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }

    /// `==` and `!=` accept any pair of matching value types, everything else is integer-only
    pub fn is_equality(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Neq)
    }
}

/// One arm of a `Cond`: the body runs when the guard is the first non-zero guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub guard: Expression,
    pub body: Expression,
}

/// Program expression tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal
    Int(u64),

    /// Integer constant spelled by name
    NamedInt(NamedInt),

    /// Byte-string literal
    Bytes(ByteLiteral),

    /// Account address literal (evaluates to the 32-byte public key)
    Addr(Address),

    /// Field of the current transaction
    Txn(TxnField),

    /// Indexed element of an array field of the current transaction
    TxnArray { field: TxnArrayField, index: u8 },

    /// Global ledger value
    Global(GlobalField),

    BinOp {
        op: BinOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    /// Logical conjunction of two or more operands
    And(Vec<Expression>),

    /// Logical disjunction of two or more operands
    Or(Vec<Expression>),

    Not(Box<Expression>),

    /// Big-endian bytes (at most 8) to integer
    Btoi(Box<Expression>),

    /// Integer to 8 big-endian bytes
    Itob(Box<Expression>),

    /// Length of a byte string
    Len(Box<Expression>),

    /// Read the current application's global state
    AppGlobalGet { key: Box<Expression> },

    /// Write the current application's global state
    AppGlobalPut {
        key: Box<Expression>,
        value: Box<Expression>,
    },

    /// Delete a key from the current application's global state
    AppGlobalDel { key: Box<Expression> },

    /// Fail the program unless the operand is non-zero
    Assert(Box<Expression>),

    /// Stop immediately, approving iff the operand is non-zero
    Return(Box<Expression>),

    /// Fail the program immediately
    Err,

    /// Evaluate in order; the value of the sequence is the value of the last element
    Seq(Vec<Expression>),

    If {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Option<Box<Expression>>,
    },

    /// Ordered dispatch; fails the program when no guard holds
    Cond(Vec<Branch>),
}

impl Expression {
    /// Direct sub-expressions in evaluation order
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Int(_)
            | Expression::NamedInt(_)
            | Expression::Bytes(_)
            | Expression::Addr(_)
            | Expression::Txn(_)
            | Expression::TxnArray { .. }
            | Expression::Global(_)
            | Expression::Err => vec![],
            Expression::BinOp { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            Expression::And(args) | Expression::Or(args) | Expression::Seq(args) => args.iter().collect(),
            Expression::Not(e)
            | Expression::Btoi(e)
            | Expression::Itob(e)
            | Expression::Len(e)
            | Expression::Assert(e)
            | Expression::Return(e) => vec![&**e],
            Expression::AppGlobalGet { key } | Expression::AppGlobalDel { key } => vec![&**key],
            Expression::AppGlobalPut { key, value } => vec![&**key, &**value],
            Expression::If { condition, then_branch, else_branch } => {
                let mut out = vec![&**condition, &**then_branch];
                if let Some(e) = else_branch {
                    out.push(&**e);
                }
                out
            }
            Expression::Cond(branches) => branches
                .iter()
                .flat_map(|b| [&b.guard, &b.body])
                .collect(),
        }
    }

    /// Pre-order iterator over this expression and all descendants
    pub fn iter(&self) -> ExpressionIter<'_> {
        ExpressionIter { stack: vec![self] }
    }

    /// Whether control never falls through this expression
    pub fn always_exits(&self) -> bool {
        match self {
            Expression::Return(_) | Expression::Err => true,
            Expression::Seq(items) => items.iter().any(Expression::always_exits),
            Expression::If { then_branch, else_branch: Some(else_branch), .. } => {
                then_branch.always_exits() && else_branch.always_exits()
            }
            // an unmatched Cond ends in `err`, so all bodies exiting is enough
            Expression::Cond(branches) => branches.iter().all(|b| b.body.always_exits()),
            _ => false,
        }
    }
}

pub struct ExpressionIter<'a> {
    stack: Vec<&'a Expression>,
}

impl<'a> Iterator for ExpressionIter<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children().into_iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ret_one() -> Expression {
        Expression::Return(Box::new(Expression::Int(1)))
    }

    #[test]
    fn iter_is_preorder() {
        let expr = Expression::BinOp {
            op: BinOp::Eq,
            lhs: Box::new(Expression::Int(1)),
            rhs: Box::new(Expression::Btoi(Box::new(Expression::TxnArray {
                field: TxnArrayField::ApplicationArgs,
                index: 0,
            }))),
        };
        let kinds: Vec<_> = expr.iter().map(std::mem::discriminant).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[1], std::mem::discriminant(&Expression::Int(0)));
        assert!(matches!(expr.iter().last(), Some(Expression::TxnArray { .. })));
    }

    #[test]
    fn exit_analysis() {
        assert!(ret_one().always_exits());
        assert!(Expression::Seq(vec![Expression::Int(1), ret_one()]).always_exits());
        assert!(!Expression::If {
            condition: Box::new(Expression::Int(1)),
            then_branch: Box::new(ret_one()),
            else_branch: None,
        }
        .always_exits());
        assert!(Expression::Cond(vec![Branch { guard: Expression::Int(1), body: ret_one() }]).always_exits());
    }
}
