// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Transaction and global fields readable by a program, with the metadata
//! needed to type check them and to gate them by mode and version.

use crate::data::types::{Mode, TealType};
use serde::{Deserialize, Serialize};

const BOTH_MODES: &[Mode] = &[Mode::Signature, Mode::Application];
const APPLICATION_ONLY: &[Mode] = &[Mode::Application];

/// Fields of the current transaction (`txn <Field>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnField {
    Sender,
    Fee,
    FirstValid,
    LastValid,
    Note,
    Receiver,
    Amount,
    CloseRemainderTo,
    TypeEnum,
    XferAsset,
    AssetAmount,
    AssetSender,
    AssetReceiver,
    AssetCloseTo,
    GroupIndex,
    TxID,
    ApplicationID,
    OnCompletion,
    NumAppArgs,
    NumAccounts,
    RekeyTo,
}

impl TxnField {
    /// Name used in TEAL source
    pub fn name(self) -> &'static str {
        match self {
            TxnField::Sender => "Sender",
            TxnField::Fee => "Fee",
            TxnField::FirstValid => "FirstValid",
            TxnField::LastValid => "LastValid",
            TxnField::Note => "Note",
            TxnField::Receiver => "Receiver",
            TxnField::Amount => "Amount",
            TxnField::CloseRemainderTo => "CloseRemainderTo",
            TxnField::TypeEnum => "TypeEnum",
            TxnField::XferAsset => "XferAsset",
            TxnField::AssetAmount => "AssetAmount",
            TxnField::AssetSender => "AssetSender",
            TxnField::AssetReceiver => "AssetReceiver",
            TxnField::AssetCloseTo => "AssetCloseTo",
            TxnField::GroupIndex => "GroupIndex",
            TxnField::TxID => "TxID",
            TxnField::ApplicationID => "ApplicationID",
            TxnField::OnCompletion => "OnCompletion",
            TxnField::NumAppArgs => "NumAppArgs",
            TxnField::NumAccounts => "NumAccounts",
            TxnField::RekeyTo => "RekeyTo",
        }
    }

    pub fn value_type(self) -> TealType {
        match self {
            TxnField::Sender
            | TxnField::Note
            | TxnField::Receiver
            | TxnField::CloseRemainderTo
            | TxnField::AssetSender
            | TxnField::AssetReceiver
            | TxnField::AssetCloseTo
            | TxnField::TxID
            | TxnField::RekeyTo => TealType::Bytes,
            _ => TealType::Uint64,
        }
    }

    /// First TEAL version that knows this field
    pub fn min_version(self) -> u8 {
        match self {
            TxnField::ApplicationID
            | TxnField::OnCompletion
            | TxnField::NumAppArgs
            | TxnField::NumAccounts
            | TxnField::RekeyTo => 2,
            _ => 1,
        }
    }

    pub fn modes(self) -> &'static [Mode] {
        BOTH_MODES
    }
}

/// Array fields of the current transaction (`txna <Field> <index>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnArrayField {
    ApplicationArgs,
    Accounts,
}

impl TxnArrayField {
    pub fn name(self) -> &'static str {
        match self {
            TxnArrayField::ApplicationArgs => "ApplicationArgs",
            TxnArrayField::Accounts => "Accounts",
        }
    }

    pub fn value_type(self) -> TealType {
        TealType::Bytes
    }

    pub fn min_version(self) -> u8 {
        2
    }

    pub fn modes(self) -> &'static [Mode] {
        BOTH_MODES
    }
}

/// Ledger-wide values (`global <Field>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalField {
    MinTxnFee,
    MinBalance,
    MaxTxnLife,
    ZeroAddress,
    GroupSize,
    LogicSigVersion,
    Round,
    LatestTimestamp,
    CurrentApplicationID,
    CreatorAddress,
}

impl GlobalField {
    pub fn name(self) -> &'static str {
        match self {
            GlobalField::MinTxnFee => "MinTxnFee",
            GlobalField::MinBalance => "MinBalance",
            GlobalField::MaxTxnLife => "MaxTxnLife",
            GlobalField::ZeroAddress => "ZeroAddress",
            GlobalField::GroupSize => "GroupSize",
            GlobalField::LogicSigVersion => "LogicSigVersion",
            GlobalField::Round => "Round",
            GlobalField::LatestTimestamp => "LatestTimestamp",
            GlobalField::CurrentApplicationID => "CurrentApplicationID",
            GlobalField::CreatorAddress => "CreatorAddress",
        }
    }

    pub fn value_type(self) -> TealType {
        match self {
            GlobalField::ZeroAddress | GlobalField::CreatorAddress => TealType::Bytes,
            _ => TealType::Uint64,
        }
    }

    pub fn min_version(self) -> u8 {
        match self {
            GlobalField::MinTxnFee
            | GlobalField::MinBalance
            | GlobalField::MaxTxnLife
            | GlobalField::ZeroAddress
            | GlobalField::GroupSize => 1,
            GlobalField::CreatorAddress => 3,
            _ => 2,
        }
    }

    /// Round, timestamp and application context only exist for stateful programs
    pub fn modes(self) -> &'static [Mode] {
        match self {
            GlobalField::Round
            | GlobalField::LatestTimestamp
            | GlobalField::CurrentApplicationID
            | GlobalField::CreatorAddress => APPLICATION_ONLY,
            _ => BOTH_MODES,
        }
    }
}

/// Action taken by an application call after the approval program succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnComplete {
    NoOp,
    OptIn,
    CloseOut,
    ClearState,
    UpdateApplication,
    DeleteApplication,
}

impl OnComplete {
    pub fn name(self) -> &'static str {
        match self {
            OnComplete::NoOp => "NoOp",
            OnComplete::OptIn => "OptIn",
            OnComplete::CloseOut => "CloseOut",
            OnComplete::ClearState => "ClearState",
            OnComplete::UpdateApplication => "UpdateApplication",
            OnComplete::DeleteApplication => "DeleteApplication",
        }
    }

    pub fn value(self) -> u64 {
        match self {
            OnComplete::NoOp => 0,
            OnComplete::OptIn => 1,
            OnComplete::CloseOut => 2,
            OnComplete::ClearState => 3,
            OnComplete::UpdateApplication => 4,
            OnComplete::DeleteApplication => 5,
        }
    }
}

/// Transaction type, as exposed by `txn TypeEnum`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    Payment,
    KeyRegistration,
    AssetConfig,
    AssetTransfer,
    AssetFreeze,
    ApplicationCall,
}

impl TxnType {
    pub fn name(self) -> &'static str {
        match self {
            TxnType::Payment => "pay",
            TxnType::KeyRegistration => "keyreg",
            TxnType::AssetConfig => "acfg",
            TxnType::AssetTransfer => "axfer",
            TxnType::AssetFreeze => "afrz",
            TxnType::ApplicationCall => "appl",
        }
    }

    pub fn value(self) -> u64 {
        match self {
            TxnType::Payment => 1,
            TxnType::KeyRegistration => 2,
            TxnType::AssetConfig => 3,
            TxnType::AssetTransfer => 4,
            TxnType::AssetFreeze => 5,
            TxnType::ApplicationCall => 6,
        }
    }
}

/// Integer constant that TEAL lets us spell by name (`int NoOp`, `int axfer`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedInt {
    OnComplete(OnComplete),
    TxnType(TxnType),
}

impl NamedInt {
    pub fn name(self) -> &'static str {
        match self {
            NamedInt::OnComplete(oc) => oc.name(),
            NamedInt::TxnType(tt) => tt.name(),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            NamedInt::OnComplete(oc) => oc.value(),
            NamedInt::TxnType(tt) => tt.value(),
        }
    }

    /// OnComplete names and `appl` arrived together with stateful applications
    pub fn min_version(self) -> u8 {
        match self {
            NamedInt::OnComplete(_) | NamedInt::TxnType(TxnType::ApplicationCall) => 2,
            NamedInt::TxnType(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_fields_need_version_two() {
        assert_eq!(TxnField::ApplicationID.min_version(), 2);
        assert_eq!(TxnField::OnCompletion.min_version(), 2);
        assert_eq!(TxnField::Sender.min_version(), 1);
        assert_eq!(TxnArrayField::ApplicationArgs.min_version(), 2);
    }

    #[test]
    fn stateful_globals_are_application_only() {
        assert_eq!(GlobalField::Round.modes(), &[Mode::Application]);
        assert!(GlobalField::GroupSize.modes().contains(&Mode::Signature));
    }

    #[test]
    fn named_ints_match_protocol_values() {
        assert_eq!(NamedInt::OnComplete(OnComplete::NoOp).value(), 0);
        assert_eq!(NamedInt::OnComplete(OnComplete::DeleteApplication).value(), 5);
        assert_eq!(NamedInt::TxnType(TxnType::AssetTransfer).value(), 4);
        assert_eq!(NamedInt::TxnType(TxnType::AssetTransfer).name(), "axfer");
    }
}
