// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Static checks run before code generation

mod availability;
mod type_check;

pub use availability::check_availability;
pub use type_check::{check_types, type_of};

use crate::data::expressions::Expression;
use crate::data::types::{Mode, TealType};
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        context: String,
        expected: TealType,
        actual: TealType,
    },
    #[error("{operation} is not available in {mode} mode")]
    ModeMismatch { operation: String, mode: Mode },
    #[error("{operation} requires TEAL version {required} or higher, targeting {version}")]
    VersionTooLow {
        operation: String,
        required: u8,
        version: u8,
    },
}

/// Run all checks; returns the type of the program's final value
pub fn validate(expr: &Expression, mode: Mode, version: u8) -> Result<TealType, AnalysisError> {
    let program_type = check_types(expr)?;
    debug!("program type checked as {}", program_type);
    check_availability(expr, mode, version)?;
    Ok(program_type)
}
