use num_traits::{One, Signed, Zero};

use liquidity_core::num::{clamp, Decimal};
use liquidity_core::risk::{PriceMonitor, RiskModel};

use crate::config::{PriceRangeConfig, RiskModelConfig};

/// Probability of trading falls linearly with the relative distance to the current price.
#[derive(Debug, Clone)]
pub struct LinearRiskModel {
    horizon: Decimal,
    decay: Decimal,
}

impl From<RiskModelConfig> for LinearRiskModel {
    fn from(conf: RiskModelConfig) -> Self {
        Self {
            horizon: conf.horizon,
            decay: conf.decay,
        }
    }
}

impl RiskModel for LinearRiskModel {
    fn probability_of_trading(
        &self,
        current_price: &Decimal,
        horizon: &Decimal,
        order_price: &Decimal,
        _is_bid: bool,
        apply_min_max: bool,
        min_price: &Decimal,
        max_price: &Decimal,
    ) -> Decimal {
        if apply_min_max && (order_price < min_price || order_price > max_price) {
            return Decimal::zero();
        }
        if current_price.is_zero() {
            return Decimal::one();
        }
        let distance = (order_price - current_price).abs() / current_price;
        let scaled = if horizon.is_positive() { distance / horizon } else { distance };
        clamp(Decimal::one() - &self.decay * scaled, &Decimal::zero(), &Decimal::one())
    }

    fn projection_horizon(&self) -> Decimal {
        self.horizon.clone()
    }
}

#[derive(Debug, Clone)]
pub struct StaticPriceMonitor {
    min: Decimal,
    max: Decimal,
}

impl From<PriceRangeConfig> for StaticPriceMonitor {
    fn from(conf: PriceRangeConfig) -> Self {
        Self {
            min: conf.min,
            max: conf.max,
        }
    }
}

impl PriceMonitor for StaticPriceMonitor {
    fn valid_price_range(&self) -> (Decimal, Decimal) {
        (self.min.clone(), self.max.clone())
    }
}
