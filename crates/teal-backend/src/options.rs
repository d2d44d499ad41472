// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use teal_ir::{Mode, DEFAULT_VERSION};

/// Target of a compilation: how the program will be run and which TEAL it must be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Execution mode
    pub mode: Mode,
    /// TEAL version written into the `#pragma version` header
    pub version: u8,
}

impl CompileOptions {
    pub fn new(mode: Mode, version: u8) -> Self {
        Self { mode, version }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Application,
            version: DEFAULT_VERSION,
        }
    }
}
