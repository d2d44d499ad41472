// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Ledger context an expression tree is evaluated against

use crate::data::fields::{GlobalField, OnComplete, TxnArrayField, TxnField, TxnType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value on the evaluation stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Uint(v) => write!(f, "{}", v),
            StackValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

/// Global key/value state of a single application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    entries: BTreeMap<Vec<u8>, StackValue>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &[u8]) -> Option<&StackValue> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: Vec<u8>, value: StackValue) {
        self.entries.insert(key, value);
    }

    pub fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &StackValue)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }
}

/// The transaction being approved, plus the ledger values a program can read.
/// Fields a test does not care about default to zero or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub application_id: u64,
    pub on_completion: OnComplete,
    pub application_args: Vec<Vec<u8>>,
    pub accounts: Vec<[u8; 32]>,
    pub sender: [u8; 32],
    pub receiver: [u8; 32],
    pub type_enum: u64,
    pub fee: u64,
    pub amount: u64,
    pub xfer_asset: u64,
    pub asset_amount: u64,
    pub group_index: u64,
    pub note: Vec<u8>,
    pub group_size: u64,
    pub round: u64,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            application_id: 0,
            on_completion: OnComplete::NoOp,
            application_args: vec![],
            accounts: vec![],
            sender: [0; 32],
            receiver: [0; 32],
            type_enum: TxnType::ApplicationCall.value(),
            fee: 1000,
            amount: 0,
            xfer_asset: 0,
            asset_amount: 0,
            group_index: 0,
            note: vec![],
            group_size: 1,
            round: 1,
        }
    }
}

impl Invocation {
    /// Application-creating call carrying `args`
    pub fn create(args: Vec<Vec<u8>>) -> Self {
        Self {
            application_args: args,
            ..Self::default()
        }
    }

    /// Call against an existing application
    pub fn call(application_id: u64, on_completion: OnComplete) -> Self {
        Self {
            application_id,
            on_completion,
            ..Self::default()
        }
    }

    /// Single asset transfer, as seen by a logic signature
    pub fn asset_transfer(sender: [u8; 32], asset_amount: u64) -> Self {
        Self {
            sender,
            asset_amount,
            type_enum: TxnType::AssetTransfer.value(),
            ..Self::default()
        }
    }

    pub fn txn_field(&self, field: TxnField) -> StackValue {
        use StackValue::{Bytes, Uint};
        match field {
            TxnField::Sender => Bytes(self.sender.to_vec()),
            TxnField::Receiver => Bytes(self.receiver.to_vec()),
            TxnField::Note => Bytes(self.note.clone()),
            TxnField::CloseRemainderTo
            | TxnField::AssetSender
            | TxnField::AssetReceiver
            | TxnField::AssetCloseTo
            | TxnField::RekeyTo => Bytes(vec![0; 32]),
            TxnField::TxID => Bytes(vec![0; 32]),
            TxnField::Fee => Uint(self.fee),
            TxnField::FirstValid => Uint(self.round),
            TxnField::LastValid => Uint(self.round.saturating_add(1000)),
            TxnField::Amount => Uint(self.amount),
            TxnField::TypeEnum => Uint(self.type_enum),
            TxnField::XferAsset => Uint(self.xfer_asset),
            TxnField::AssetAmount => Uint(self.asset_amount),
            TxnField::GroupIndex => Uint(self.group_index),
            TxnField::ApplicationID => Uint(self.application_id),
            TxnField::OnCompletion => Uint(self.on_completion.value()),
            TxnField::NumAppArgs => Uint(self.application_args.len() as u64),
            TxnField::NumAccounts => Uint(self.accounts.len() as u64),
        }
    }

    pub fn txn_array_field(&self, field: TxnArrayField, index: u8) -> Option<StackValue> {
        let index = usize::from(index);
        match field {
            TxnArrayField::ApplicationArgs => self.application_args.get(index).cloned().map(StackValue::Bytes),
            // index 0 is the sender; explicit accounts start at 1
            TxnArrayField::Accounts => match index {
                0 => Some(StackValue::Bytes(self.sender.to_vec())),
                i => self.accounts.get(i - 1).map(|a| StackValue::Bytes(a.to_vec())),
            },
        }
    }

    pub fn global_field(&self, field: GlobalField) -> StackValue {
        use StackValue::{Bytes, Uint};
        match field {
            GlobalField::MinTxnFee => Uint(1000),
            GlobalField::MinBalance => Uint(100_000),
            GlobalField::MaxTxnLife => Uint(1000),
            GlobalField::ZeroAddress => Bytes(vec![0; 32]),
            GlobalField::GroupSize => Uint(self.group_size),
            GlobalField::LogicSigVersion => Uint(u64::from(crate::MAX_VERSION)),
            GlobalField::Round => Uint(self.round),
            GlobalField::LatestTimestamp => Uint(0),
            GlobalField::CurrentApplicationID => Uint(self.application_id),
            GlobalField::CreatorAddress => Bytes(self.sender.to_vec()),
        }
    }
}
