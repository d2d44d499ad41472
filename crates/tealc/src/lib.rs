//! Compiler driver for the bundled TEAL programs.

pub mod commands;
pub mod options;
pub mod programs;
