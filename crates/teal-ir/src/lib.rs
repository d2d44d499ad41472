// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Expression tree for TEAL programs
//!
//! This crate provides the typed tree that approval and signature programs are
//! built from, the static checks run on it, and a tree-level evaluator. It does
//! NOT generate TEAL - that responsibility belongs to `teal-backend`.

mod data;
pub mod analysis;
pub mod construction;
pub mod evaluation;

// Versions
pub use data::{DEFAULT_VERSION, MAX_VERSION, MIN_VERSION};

// Expression definitions (from data/expressions.rs)
pub use data::expressions::{BinOp, Branch, Expression, ExpressionIter};

// Fields and named constants (from data/fields.rs)
pub use data::fields::{GlobalField, NamedInt, OnComplete, TxnArrayField, TxnField, TxnType};

// Literals (from data/literals.rs)
pub use data::literals::{Address, ByteLiteral, BytesEncoding, LiteralError, ADDRESS_LENGTH};

// Type definitions (from data/types.rs)
pub use data::types::{Mode, TealType};

pub use analysis::AnalysisError;
pub use construction::BuildError;
