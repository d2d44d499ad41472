// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Byte-string and address literals.
//!
//! Literals keep the text the program author wrote (so the backend can emit
//! it unchanged) together with the decoded bytes (so the evaluator can run it).

use base64::Engine;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};
use thiserror::Error;

/// Length of an encoded account address
pub const ADDRESS_LENGTH: usize = 58;
const PUBLIC_KEY_LENGTH: usize = 32;
const CHECKSUM_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid {encoding} byte literal: {text:?}")]
    InvalidBytes { encoding: BytesEncoding, text: String },
    #[error("address {0:?} must be {len} characters long", len = ADDRESS_LENGTH)]
    AddressLength(String),
    #[error("address {0:?} is not valid base32")]
    AddressEncoding(String),
    #[error("address {0:?} has a bad checksum")]
    AddressChecksum(String),
}

/// How a byte literal is spelled in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BytesEncoding {
    Utf8,
    Base16,
    Base32,
    Base64,
}

impl std::fmt::Display for BytesEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BytesEncoding::Utf8 => "utf8",
            BytesEncoding::Base16 => "base16",
            BytesEncoding::Base32 => "base32",
            BytesEncoding::Base64 => "base64",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteLiteral {
    pub encoding: BytesEncoding,
    /// Source text without any `0x` prefix
    pub text: String,
    pub value: Vec<u8>,
}

impl ByteLiteral {
    pub fn utf8(text: &str) -> Self {
        Self {
            encoding: BytesEncoding::Utf8,
            text: text.to_string(),
            value: text.as_bytes().to_vec(),
        }
    }

    pub fn encoded(encoding: BytesEncoding, text: &str) -> Result<Self, LiteralError> {
        let invalid = || LiteralError::InvalidBytes {
            encoding,
            text: text.to_string(),
        };
        let (text, value) = match encoding {
            BytesEncoding::Utf8 => return Ok(Self::utf8(text)),
            BytesEncoding::Base16 => {
                let digits = text.strip_prefix("0x").unwrap_or(text);
                let value = hex::decode(digits).map_err(|_| invalid())?;
                (digits, value)
            }
            BytesEncoding::Base32 => (text, decode_base32(text).ok_or_else(invalid)?),
            BytesEncoding::Base64 => {
                let value = base64::engine::general_purpose::STANDARD
                    .decode(text)
                    .map_err(|_| invalid())?;
                (text, value)
            }
        };
        Ok(Self {
            encoding,
            text: text.to_string(),
            value,
        })
    }
}

/// Account address literal, validated against its embedded checksum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub text: String,
    pub public_key: [u8; PUBLIC_KEY_LENGTH],
}

impl Address {
    pub fn parse(text: &str) -> Result<Self, LiteralError> {
        if text.len() != ADDRESS_LENGTH {
            return Err(LiteralError::AddressLength(text.to_string()));
        }
        let decoded = decode_base32(text)
            .filter(|bytes| bytes.len() == PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH)
            .ok_or_else(|| LiteralError::AddressEncoding(text.to_string()))?;
        let (key, checksum) = decoded.split_at(PUBLIC_KEY_LENGTH);

        let digest = Sha512_256::digest(key);
        if &digest[digest.len() - CHECKSUM_LENGTH..] != checksum {
            return Err(LiteralError::AddressChecksum(text.to_string()));
        }

        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
        public_key.copy_from_slice(key);
        Ok(Self {
            text: text.to_string(),
            public_key,
        })
    }
}

/// RFC 4648 base32; trailing `=` padding is optional
fn decode_base32(text: &str) -> Option<Vec<u8>> {
    BASE32_NOPAD.decode(text.trim_end_matches('=').as_bytes()).ok()
}
