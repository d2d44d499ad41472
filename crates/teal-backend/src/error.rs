// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use teal_ir::{AnalysisError, TealType, MAX_VERSION, MIN_VERSION};
use thiserror::Error;

/// Errors returned by [`crate::compile_teal`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unsupported TEAL version {version}, expected {min} to {max}", min = MIN_VERSION, max = MAX_VERSION)]
    UnsupportedVersion { version: u8 },
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("program of type {program_type} {reason}")]
    InvalidProgram {
        program_type: TealType,
        reason: &'static str,
    },
}
