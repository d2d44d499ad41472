// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! TEAL backend.
//!
//! Takes a `teal_ir::Expression` and renders it to TEAL assembly text.
//! The backend is intentionally "dumb" - it pattern matches tree nodes and
//! emits the corresponding opcodes; all checking lives in `teal_ir::analysis`.

pub mod compiler;
mod error;
mod escape;
mod options;

pub use compiler::{compile_teal, compile_with_options, lower_program};
pub use error::CompileError;
pub use options::CompileOptions;
