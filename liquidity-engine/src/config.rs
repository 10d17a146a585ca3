use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use serde::Deserialize;

use liquidity_core::num::{serde_str, Decimal};

/// Market-level liquidity parameters. All of them can later be changed
/// through the engine's `on_*_update` hooks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiquidityConfig {
    #[serde(deserialize_with = "serde_str::decimal")]
    pub stake_to_obligation_factor: Decimal,
    /// Max number of slots on each side of a shape.
    pub max_shape_size: u64,
    #[serde(deserialize_with = "serde_str::decimal")]
    pub max_fee: Decimal,
    /// Floor applied to every probability of trading. Must stay above zero.
    #[serde(deserialize_with = "serde_str::decimal")]
    pub min_probability_of_trading: Decimal,
    #[serde(deserialize_with = "serde_str::decimal")]
    pub probability_of_trading_tau_scaling: Decimal,
}

pub const DEFAULT_MAX_SHAPE_SIZE: u64 = 100;

/// 1e-8
pub fn default_min_probability_of_trading() -> Decimal {
    BigRational::new(BigInt::one(), BigInt::from(100_000_000u32))
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            stake_to_obligation_factor: Decimal::one(),
            max_shape_size: DEFAULT_MAX_SHAPE_SIZE,
            max_fee: Decimal::one(),
            min_probability_of_trading: default_min_probability_of_trading(),
            probability_of_trading_tau_scaling: Decimal::one(),
        }
    }
}
