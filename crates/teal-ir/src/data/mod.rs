// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

pub mod expressions;
pub mod fields;
pub mod literals;
pub mod types;

/// Lowest TEAL version the toolchain understands
pub const MIN_VERSION: u8 = 1;

/// Highest TEAL version the toolchain understands
pub const MAX_VERSION: u8 = 8;

/// Version used when the caller does not ask for one
pub const DEFAULT_VERSION: u8 = 2;
