//! Logic signature guarding a GOLD asset account.
//!
//! Approves either a lone zero-amount opt-in transfer, or a transfer of at
//! most `asset_amount` units sent by the template sender.

use teal_ir::construction::*;
use teal_ir::{BuildError, Expression, GlobalField, TxnField, TxnType};

pub const GOLD_ASSET_AMOUNT: u64 = 1000;
pub const GOLD_TEMPLATE_SENDER: &str = "M7VR2MGHI35EG2NMYOF3X337636PIOFVSP2HNIFUKAG7WW6BDWDCA3E2DA";

pub fn build_gold_transfer(asset_amount: u64, template_sender: &str) -> Result<Expression, BuildError> {
    let asset_transfer = || eq(txn(TxnField::TypeEnum), int(TxnType::AssetTransfer.value()));

    let asa_opt_in = and(vec![
        eq(global(GlobalField::GroupSize), int(1)),
        eq(txn(TxnField::GroupIndex), int(0)),
        asset_transfer(),
        eq(txn(TxnField::AssetAmount), int(0)),
    ])?;

    let pay_gold = and(vec![
        asset_transfer(),
        eq(txn(TxnField::Sender), addr(template_sender)?),
        le(txn(TxnField::AssetAmount), int(asset_amount)),
    ])?;

    or(vec![asa_opt_in, pay_gold])
}

pub fn build_program() -> Result<Expression, BuildError> {
    build_gold_transfer(GOLD_ASSET_AMOUNT, GOLD_TEMPLATE_SENDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teal_ir::evaluation::{evaluate, GlobalState, Invocation, Outcome};
    use teal_ir::Address;

    fn run(invocation: &Invocation) -> Outcome {
        evaluate(&build_program().unwrap(), invocation, &mut GlobalState::new())
    }

    fn gold_sender() -> [u8; 32] {
        Address::parse(GOLD_TEMPLATE_SENDER).unwrap().public_key
    }

    #[test]
    fn lone_opt_in_is_approved_from_anyone() {
        assert_eq!(run(&Invocation::asset_transfer([9; 32], 0)), Outcome::Approved);
    }

    #[test]
    fn opt_in_inside_a_group_is_rejected() {
        let mut invocation = Invocation::asset_transfer([9; 32], 0);
        invocation.group_size = 2;
        assert_eq!(run(&invocation), Outcome::Rejected);
    }

    #[test]
    fn template_sender_can_pay_up_to_limit() {
        assert_eq!(run(&Invocation::asset_transfer(gold_sender(), 1000)), Outcome::Approved);
        assert_eq!(run(&Invocation::asset_transfer(gold_sender(), 1001)), Outcome::Rejected);
    }

    #[test]
    fn other_senders_cannot_pay() {
        assert_eq!(run(&Invocation::asset_transfer([9; 32], 10)), Outcome::Rejected);
    }

    #[test]
    fn payments_are_not_asset_transfers() {
        let mut invocation = Invocation::asset_transfer(gold_sender(), 10);
        invocation.type_enum = TxnType::Payment.value();
        assert_eq!(run(&invocation), Outcome::Rejected);
    }

    #[test]
    fn bad_sender_address_is_a_build_error() {
        assert!(build_gold_transfer(1, "NOT-AN-ADDRESS").is_err());
    }
}
