// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of the value an expression leaves on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TealType {
    /// 64-bit unsigned integer
    Uint64,
    /// Byte slice
    Bytes,
    /// Either of the above, decided at runtime
    Anytype,
    /// Leaves nothing on the stack
    None,
}

impl TealType {
    /// Whether a value of type `self` can be used where `expected` is required.
    /// `Anytype` is compatible with both value types but never with `None`.
    pub fn satisfies(self, expected: TealType) -> bool {
        match (self, expected) {
            (a, b) if a == b => true,
            (TealType::Anytype, TealType::Uint64 | TealType::Bytes) => true,
            (TealType::Uint64 | TealType::Bytes, TealType::Anytype) => true,
            _ => false,
        }
    }

    /// Whether values of the two types can be compared with `==`/`!=`
    pub fn comparable_with(self, other: TealType) -> bool {
        self != TealType::None && other != TealType::None && (self.satisfies(other) || other.satisfies(self))
    }
}

impl fmt::Display for TealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TealType::Uint64 => "uint64",
            TealType::Bytes => "bytes",
            TealType::Anytype => "any",
            TealType::None => "none",
        };
        f.write_str(name)
    }
}

/// Execution mode a program is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Stateless logic signature
    Signature,
    /// Stateful application (approval or clear-state program)
    Application,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Signature, Mode::Application];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Signature => f.write_str("Signature"),
            Mode::Application => f.write_str("Application"),
        }
    }
}
