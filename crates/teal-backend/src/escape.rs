// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Escaping for string literals in TEAL source

/// Quote `text` as a TEAL string literal.
///
/// Printable ASCII passes through; quotes, backslashes and the usual control
/// characters get backslash escapes; every other byte is written as `\xNN`
/// so the assembler reproduces the exact UTF-8 encoding.
pub fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for byte in text.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(char::from(byte)),
            other => out.push_str(&format!("\\x{:02x}", other)),
        }
    }
    out.push('"');
    out
}
