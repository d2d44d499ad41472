// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Constructors for building expression trees.
//!
//! These mirror the surface of the usual contract DSLs (`int(1)`,
//! `txn(TxnField::Sender)`, `cond(...)`) so programs read close to how they
//! are written on-chain. Constructors that take literals or operand lists
//! validate them and return `BuildError`.

use crate::data::expressions::{BinOp, Branch, Expression};
use crate::data::fields::{GlobalField, NamedInt, OnComplete, TxnArrayField, TxnField, TxnType};
use crate::data::literals::{Address, ByteLiteral, BytesEncoding, LiteralError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error("{0} requires at least one operand")]
    EmptyOperands(&'static str),
}

pub fn int(value: u64) -> Expression {
    Expression::Int(value)
}

pub fn on_complete(value: OnComplete) -> Expression {
    Expression::NamedInt(NamedInt::OnComplete(value))
}

pub fn txn_type(value: TxnType) -> Expression {
    Expression::NamedInt(NamedInt::TxnType(value))
}

pub fn bytes(text: &str) -> Expression {
    Expression::Bytes(ByteLiteral::utf8(text))
}

pub fn bytes_encoded(encoding: BytesEncoding, text: &str) -> Result<Expression, BuildError> {
    Ok(Expression::Bytes(ByteLiteral::encoded(encoding, text)?))
}

pub fn addr(text: &str) -> Result<Expression, BuildError> {
    Ok(Expression::Addr(Address::parse(text)?))
}

pub fn txn(field: TxnField) -> Expression {
    Expression::Txn(field)
}

/// `Txn.application_args[index]`
pub fn application_arg(index: u8) -> Expression {
    Expression::TxnArray {
        field: TxnArrayField::ApplicationArgs,
        index,
    }
}

/// `Txn.accounts[index]`
pub fn account(index: u8) -> Expression {
    Expression::TxnArray {
        field: TxnArrayField::Accounts,
        index,
    }
}

pub fn global(field: GlobalField) -> Expression {
    Expression::Global(field)
}

pub fn binop(op: BinOp, lhs: Expression, rhs: Expression) -> Expression {
    Expression::BinOp {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn eq(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Eq, lhs, rhs)
}

pub fn neq(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Neq, lhs, rhs)
}

pub fn lt(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Lt, lhs, rhs)
}

pub fn le(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Le, lhs, rhs)
}

pub fn gt(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Gt, lhs, rhs)
}

pub fn ge(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Ge, lhs, rhs)
}

pub fn add(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Add, lhs, rhs)
}

pub fn sub(lhs: Expression, rhs: Expression) -> Expression {
    binop(BinOp::Sub, lhs, rhs)
}

pub fn and(args: Vec<Expression>) -> Result<Expression, BuildError> {
    if args.is_empty() {
        return Err(BuildError::EmptyOperands("And"));
    }
    Ok(Expression::And(args))
}

pub fn or(args: Vec<Expression>) -> Result<Expression, BuildError> {
    if args.is_empty() {
        return Err(BuildError::EmptyOperands("Or"));
    }
    Ok(Expression::Or(args))
}

pub fn not(arg: Expression) -> Expression {
    Expression::Not(Box::new(arg))
}

pub fn btoi(arg: Expression) -> Expression {
    Expression::Btoi(Box::new(arg))
}

pub fn itob(arg: Expression) -> Expression {
    Expression::Itob(Box::new(arg))
}

pub fn len(arg: Expression) -> Expression {
    Expression::Len(Box::new(arg))
}

pub fn app_global_get(key: Expression) -> Expression {
    Expression::AppGlobalGet { key: Box::new(key) }
}

pub fn app_global_put(key: Expression, value: Expression) -> Expression {
    Expression::AppGlobalPut {
        key: Box::new(key),
        value: Box::new(value),
    }
}

pub fn app_global_del(key: Expression) -> Expression {
    Expression::AppGlobalDel { key: Box::new(key) }
}

pub fn assert(condition: Expression) -> Expression {
    Expression::Assert(Box::new(condition))
}

pub fn ret(value: Expression) -> Expression {
    Expression::Return(Box::new(value))
}

/// `Return(Int(1))`
pub fn approve() -> Expression {
    ret(int(1))
}

/// `Return(Int(0))`
pub fn reject() -> Expression {
    ret(int(0))
}

pub fn err() -> Expression {
    Expression::Err
}

pub fn seq(items: Vec<Expression>) -> Expression {
    Expression::Seq(items)
}

pub fn if_then(condition: Expression, then_branch: Expression) -> Expression {
    Expression::If {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

pub fn if_then_else(condition: Expression, then_branch: Expression, else_branch: Expression) -> Expression {
    Expression::If {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
}

/// Ordered dispatch over `(guard, body)` pairs
pub fn cond(branches: Vec<(Expression, Expression)>) -> Result<Expression, BuildError> {
    if branches.is_empty() {
        return Err(BuildError::EmptyOperands("Cond"));
    }
    Ok(Expression::Cond(
        branches
            .into_iter()
            .map(|(guard, body)| Branch { guard, body })
            .collect(),
    ))
}
