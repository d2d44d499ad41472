// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Tree-level evaluation against an in-memory ledger

mod interpreter;
mod state;

pub use interpreter::{evaluate, Outcome};
pub use state::{GlobalState, Invocation, StackValue};
