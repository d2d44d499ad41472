//! Approval program that stores a number at deployment and checks it on every call.

use teal_ir::construction::*;
use teal_ir::{BuildError, Expression, OnComplete, TxnField};

/// Global state slot holding the deployed number
pub const NUMBER_KEY: &str = "mynumber";

/// Value a no-op call expects to find in [`NUMBER_KEY`]
pub const EXPECTED_NUMBER: u64 = 50;

/// TEAL version the approval program is compiled for
pub const APPROVAL_VERSION: u8 = 3;

/// Store the first application argument verbatim, then approve.
pub fn build_deployment_branch() -> Expression {
    seq(vec![
        app_global_put(bytes(NUMBER_KEY), application_arg(0)),
        approve(),
    ])
}

/// Assert the stored number equals [`EXPECTED_NUMBER`], then approve.
pub fn build_call_branch() -> Expression {
    seq(vec![
        assert(eq(int(EXPECTED_NUMBER), btoi(app_global_get(bytes(NUMBER_KEY))))),
        approve(),
    ])
}

/// Dispatch on creation first, then on no-op calls. There is no fallback
/// branch, so any other call fails.
pub fn build_program() -> Result<Expression, BuildError> {
    cond(vec![
        (eq(txn(TxnField::ApplicationID), int(0)), build_deployment_branch()),
        (
            eq(txn(TxnField::OnCompletion), on_complete(OnComplete::NoOp)),
            build_call_branch(),
        ),
    ])
}
