use num_bigint::BigUint;

use liquidity_core::order::PeggedReference;
use liquidity_core::provision::{LiquidityOrder, LiquidityProvisionSubmission};

pub fn buy_shape() -> Vec<LiquidityOrder> {
    vec![
        LiquidityOrder::new(PeggedReference::Mid, 1u32, 20),
        LiquidityOrder::new(PeggedReference::Mid, 2u32, 10),
    ]
}

pub fn sell_shape() -> Vec<LiquidityOrder> {
    vec![LiquidityOrder::new(PeggedReference::Mid, 1u32, 10)]
}

pub fn submission(commitment: u32, fee: &str) -> LiquidityProvisionSubmission {
    submission_with(commitment, fee, buy_shape(), sell_shape())
}

pub fn submission_of(commitment: BigUint, fee: &str) -> LiquidityProvisionSubmission {
    LiquidityProvisionSubmission {
        commitment_amount: commitment,
        ..submission(0, fee)
    }
}

pub fn submission_with(
    commitment: u32,
    fee: &str,
    buys: Vec<LiquidityOrder>,
    sells: Vec<LiquidityOrder>,
) -> LiquidityProvisionSubmission {
    LiquidityProvisionSubmission {
        commitment_amount: BigUint::from(commitment),
        fee: fee.to_owned(),
        buys,
        sells,
        reference: String::new(),
    }
}
