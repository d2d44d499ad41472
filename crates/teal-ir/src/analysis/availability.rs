// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Mode and version gating.
//!
//! Each node is checked against the execution mode and the target TEAL
//! version. Operations that can be lowered to older opcodes (`Assert` below
//! version 3) are not gated here; that is the backend's business.

use super::AnalysisError;
use crate::data::expressions::Expression;
use crate::data::types::Mode;

/// Requirements of a single node: (operation name, minimum version, allowed modes)
fn requirements(expr: &Expression) -> Option<(String, u8, &'static [Mode])> {
    const BOTH: &[Mode] = &Mode::ALL;
    const APPLICATION: &[Mode] = &[Mode::Application];

    match expr {
        Expression::NamedInt(named) => Some((format!("int {}", named.name()), named.min_version(), BOTH)),
        Expression::Txn(field) => Some((format!("txn {}", field.name()), field.min_version(), field.modes())),
        Expression::TxnArray { field, .. } => {
            Some((format!("txna {}", field.name()), field.min_version(), field.modes()))
        }
        Expression::Global(field) => {
            Some((format!("global {}", field.name()), field.min_version(), field.modes()))
        }
        Expression::AppGlobalGet { .. } => Some(("app_global_get".to_string(), 2, APPLICATION)),
        Expression::AppGlobalPut { .. } => Some(("app_global_put".to_string(), 2, APPLICATION)),
        Expression::AppGlobalDel { .. } => Some(("app_global_del".to_string(), 2, APPLICATION)),
        Expression::Return(_) => Some(("return".to_string(), 2, BOTH)),
        _ => None,
    }
}

/// Check that every operation in `expr` is legal for `mode` at `version`
pub fn check_availability(expr: &Expression, mode: Mode, version: u8) -> Result<(), AnalysisError> {
    for node in expr.iter() {
        let Some((operation, min_version, modes)) = requirements(node) else {
            continue;
        };
        if !modes.contains(&mode) {
            return Err(AnalysisError::ModeMismatch { operation, mode });
        }
        if version < min_version {
            return Err(AnalysisError::VersionTooLow {
                operation,
                required: min_version,
                version,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::*;
    use crate::data::fields::{GlobalField, TxnField, TxnType};

    #[test]
    fn global_state_requires_application_mode() {
        let expr = seq(vec![app_global_put(bytes("k"), int(1)), approve()]);
        assert_eq!(
            check_availability(&expr, Mode::Signature, 3),
            Err(AnalysisError::ModeMismatch {
                operation: "app_global_put".to_string(),
                mode: Mode::Signature,
            })
        );
        assert_eq!(check_availability(&expr, Mode::Application, 3), Ok(()));
    }

    #[test]
    fn application_fields_require_version_two() {
        let expr = eq(txn(TxnField::ApplicationID), int(0));
        assert_eq!(
            check_availability(&expr, Mode::Application, 1),
            Err(AnalysisError::VersionTooLow {
                operation: "txn ApplicationID".to_string(),
                required: 2,
                version: 1,
            })
        );
    }

    #[test]
    fn signature_programs_compile_at_version_one() {
        let expr = and(vec![
            eq(global(GlobalField::GroupSize), int(1)),
            eq(txn(TxnField::TypeEnum), int(4)),
        ])
        .unwrap();
        assert_eq!(check_availability(&expr, Mode::Signature, 1), Ok(()));
        assert!(check_availability(&global(GlobalField::Round), Mode::Signature, 2).is_err());
    }

    #[test]
    fn application_call_type_requires_version_two() {
        let expr = eq(txn(TxnField::TypeEnum), txn_type(TxnType::ApplicationCall));
        assert_eq!(
            check_availability(&expr, Mode::Signature, 1),
            Err(AnalysisError::VersionTooLow {
                operation: "int appl".to_string(),
                required: 2,
                version: 1,
            })
        );
        assert_eq!(check_availability(&expr, Mode::Signature, 2), Ok(()));

        let transfer = eq(txn(TxnField::TypeEnum), txn_type(TxnType::AssetTransfer));
        assert_eq!(check_availability(&transfer, Mode::Signature, 1), Ok(()));
    }

    #[test]
    fn assert_is_not_gated() {
        assert_eq!(check_availability(&assert(int(1)), Mode::Signature, 1), Ok(()));
    }
}
