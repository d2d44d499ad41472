// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Simple line-based writer for generating TEAL source.

use std::fmt::Display;

/// Writer context for generating TEAL.
/// TEAL is one instruction per line with no nesting, so the only state kept
/// is whether the next write starts a fresh line.
pub struct TealWriter {
    out: String,
    at_line_start: bool,
}

impl TealWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            at_line_start: true,
        }
    }

    /// Write a string. Lines are separated, not terminated, so the newline
    /// is only emitted when the next line begins.
    pub fn write(&mut self, s: &str) {
        for (i, part) in s.split('\n').enumerate() {
            if i > 0 {
                self.at_line_start = true;
            }
            if part.is_empty() {
                continue;
            }
            if self.at_line_start && !self.out.is_empty() {
                self.out.push('\n');
            }
            self.at_line_start = false;
            self.out.push_str(part);
        }
    }

    /// Write a complete line.
    pub fn line(&mut self, s: &str) {
        self.write(s);
        self.at_line_start = true;
    }

    /// Write a formatted line.
    /// Convenience method to avoid `w.line(&format!(...))`.
    pub fn line_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        self.line(&args.to_string());
    }

    /// Write items separated by a separator string.
    /// Example: `w.sep(" ", &["txna", "ApplicationArgs", "0"])` writes "txna ApplicationArgs 0"
    pub fn sep<I, T>(&mut self, separator: &str, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let mut first = true;
        for item in items {
            if !first {
                self.write(separator);
            }
            first = false;
            self.write(&item.to_string());
        }
    }

    /// Get the underlying string (consumes self).
    pub fn into_inner(self) -> String {
        self.out
    }
}

impl Default for TealWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render to a string.
pub fn render_to_string<F>(f: F) -> String
where
    F: FnOnce(&mut TealWriter),
{
    let mut writer = TealWriter::new();
    f(&mut writer);
    writer.into_inner()
}
