// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Static typing of expression trees.
//!
//! Every node leaves a value of a known `TealType` on the stack (or nothing,
//! `TealType::None`). Checking is bottom-up and stops at the first violation.

use super::AnalysisError;
use crate::data::expressions::Expression;
use crate::data::types::TealType;

/// Compute the type of `expr`, checking all operands on the way
pub fn type_of(expr: &Expression) -> Result<TealType, AnalysisError> {
    match expr {
        Expression::Int(_) | Expression::NamedInt(_) => Ok(TealType::Uint64),
        Expression::Bytes(_) | Expression::Addr(_) => Ok(TealType::Bytes),
        Expression::Txn(field) => Ok(field.value_type()),
        Expression::TxnArray { field, .. } => Ok(field.value_type()),
        Expression::Global(field) => Ok(field.value_type()),

        Expression::BinOp { op, lhs, rhs } => {
            let lhs_type = type_of(lhs)?;
            let rhs_type = type_of(rhs)?;
            if op.is_equality() {
                if !lhs_type.comparable_with(rhs_type) {
                    return Err(AnalysisError::TypeMismatch {
                        context: format!("right operand of {}", op.opcode()),
                        expected: lhs_type,
                        actual: rhs_type,
                    });
                }
            } else {
                expect(lhs_type, TealType::Uint64, || format!("left operand of {}", op.opcode()))?;
                expect(rhs_type, TealType::Uint64, || format!("right operand of {}", op.opcode()))?;
            }
            Ok(TealType::Uint64)
        }

        Expression::And(args) | Expression::Or(args) => {
            let name = if matches!(expr, Expression::And(_)) { "And" } else { "Or" };
            for (i, arg) in args.iter().enumerate() {
                expect(type_of(arg)?, TealType::Uint64, || format!("operand {} of {}", i, name))?;
            }
            Ok(TealType::Uint64)
        }

        Expression::Not(arg) => {
            expect(type_of(arg)?, TealType::Uint64, || "operand of Not".to_string())?;
            Ok(TealType::Uint64)
        }
        Expression::Btoi(arg) => {
            expect(type_of(arg)?, TealType::Bytes, || "operand of btoi".to_string())?;
            Ok(TealType::Uint64)
        }
        Expression::Itob(arg) => {
            expect(type_of(arg)?, TealType::Uint64, || "operand of itob".to_string())?;
            Ok(TealType::Bytes)
        }
        Expression::Len(arg) => {
            expect(type_of(arg)?, TealType::Bytes, || "operand of len".to_string())?;
            Ok(TealType::Uint64)
        }

        Expression::AppGlobalGet { key } => {
            expect(type_of(key)?, TealType::Bytes, || "key of app_global_get".to_string())?;
            Ok(TealType::Anytype)
        }
        Expression::AppGlobalPut { key, value } => {
            expect(type_of(key)?, TealType::Bytes, || "key of app_global_put".to_string())?;
            expect(type_of(value)?, TealType::Anytype, || "value of app_global_put".to_string())?;
            Ok(TealType::None)
        }
        Expression::AppGlobalDel { key } => {
            expect(type_of(key)?, TealType::Bytes, || "key of app_global_del".to_string())?;
            Ok(TealType::None)
        }

        Expression::Assert(arg) => {
            expect(type_of(arg)?, TealType::Uint64, || "condition of Assert".to_string())?;
            Ok(TealType::None)
        }
        Expression::Return(arg) => {
            expect(type_of(arg)?, TealType::Uint64, || "value of Return".to_string())?;
            Ok(TealType::None)
        }
        Expression::Err => Ok(TealType::None),

        Expression::Seq(items) => {
            let Some((last, init)) = items.split_last() else {
                return Ok(TealType::None);
            };
            for (i, item) in init.iter().enumerate() {
                expect(type_of(item)?, TealType::None, || format!("element {} of Seq", i))?;
            }
            type_of(last)
        }

        Expression::If { condition, then_branch, else_branch } => {
            expect(type_of(condition)?, TealType::Uint64, || "condition of If".to_string())?;
            let then_type = type_of(then_branch)?;
            match else_branch {
                None => {
                    expect(then_type, TealType::None, || "then branch of If without else".to_string())?;
                    Ok(TealType::None)
                }
                Some(else_branch) => unify(then_type, type_of(else_branch)?, "else branch of If"),
            }
        }

        Expression::Cond(branches) => {
            let mut result: Option<TealType> = None;
            for (i, branch) in branches.iter().enumerate() {
                expect(type_of(&branch.guard)?, TealType::Uint64, || format!("guard of Cond branch {}", i))?;
                let body_type = type_of(&branch.body)?;
                result = Some(match result {
                    None => body_type,
                    Some(previous) => unify(previous, body_type, &format!("body of Cond branch {}", i))?,
                });
            }
            Ok(result.unwrap_or(TealType::None))
        }
    }
}

/// Type check the whole tree
pub fn check_types(expr: &Expression) -> Result<TealType, AnalysisError> {
    type_of(expr)
}

fn expect<F>(actual: TealType, expected: TealType, context: F) -> Result<(), AnalysisError>
where
    F: FnOnce() -> String,
{
    if actual.satisfies(expected) {
        Ok(())
    } else {
        Err(AnalysisError::TypeMismatch {
            context: context(),
            expected,
            actual,
        })
    }
}

/// Branches of a conditional must agree; pairing with `Anytype` widens to `Anytype`
fn unify(expected: TealType, actual: TealType, context: &str) -> Result<TealType, AnalysisError> {
    if expected == actual {
        Ok(expected)
    } else if actual.satisfies(expected) {
        Ok(TealType::Anytype)
    } else {
        Err(AnalysisError::TypeMismatch {
            context: context.to_string(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::*;
    use crate::data::fields::{OnComplete, TxnField};

    #[test]
    fn approval_branches_type_as_none() {
        let deploy = seq(vec![app_global_put(bytes("mynumber"), application_arg(0)), approve()]);
        assert_eq!(type_of(&deploy), Ok(TealType::None));

        let call = seq(vec![
            assert(eq(int(50), btoi(app_global_get(bytes("mynumber"))))),
            approve(),
        ]);
        assert_eq!(type_of(&call), Ok(TealType::None));

        let program = cond(vec![
            (eq(txn(TxnField::ApplicationID), int(0)), deploy),
            (eq(txn(TxnField::OnCompletion), on_complete(OnComplete::NoOp)), call),
        ])
        .unwrap();
        assert_eq!(check_types(&program), Ok(TealType::None));
    }

    #[test]
    fn global_get_is_anytype() {
        assert_eq!(type_of(&app_global_get(bytes("k"))), Ok(TealType::Anytype));
        // comparing anytype against an int is allowed without btoi
        assert_eq!(type_of(&eq(app_global_get(bytes("k")), int(1))), Ok(TealType::Uint64));
    }

    #[test]
    fn rejects_bytes_compared_to_int() {
        let err = type_of(&eq(int(50), application_arg(0))).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                context: "right operand of ==".to_string(),
                expected: TealType::Uint64,
                actual: TealType::Bytes,
            }
        );
    }

    #[test]
    fn rejects_value_in_middle_of_seq() {
        let err = type_of(&seq(vec![int(1), approve()])).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeMismatch { expected: TealType::None, .. }));
    }

    #[test]
    fn rejects_ordering_on_bytes_and_btoi_on_int() {
        assert!(type_of(&lt(bytes("a"), int(1))).is_err());
        assert!(type_of(&btoi(int(1))).is_err());
        assert!(type_of(&app_global_put(int(1), int(2))).is_err());
    }

    #[test]
    fn cond_bodies_must_agree() {
        let mixed = cond(vec![(int(1), int(2)), (int(1), approve())]).unwrap();
        assert!(type_of(&mixed).is_err());

        let widened = cond(vec![(int(1), int(2)), (int(1), app_global_get(bytes("k")))]).unwrap();
        assert_eq!(type_of(&widened), Ok(TealType::Anytype));
    }
}
