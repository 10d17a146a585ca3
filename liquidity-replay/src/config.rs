use serde::Deserialize;

use liquidity_core::num::{serde_str, Decimal};
use liquidity_engine::config::LiquidityConfig;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub market_id: String,
    /// Seeds the order id hash chain. Every replica replaying the same log must share it.
    pub id_seed: String,
    #[serde(default)]
    pub liquidity: LiquidityConfig,
    pub valid_price_range: PriceRangeConfig,
    pub risk_model: RiskModelConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeConfig {
    #[serde(deserialize_with = "serde_str::decimal")]
    pub min: Decimal,
    #[serde(deserialize_with = "serde_str::decimal")]
    pub max: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskModelConfig {
    #[serde(deserialize_with = "serde_str::decimal")]
    pub horizon: Decimal,
    /// Probability lost per unit of relative distance from the current price.
    #[serde(deserialize_with = "serde_str::decimal")]
    pub decay: Decimal,
}
