use liquidity_core::num::Decimal;
use liquidity_core::risk::{PriceMonitor, RiskModel};
use num_bigint::BigInt;
use num_rational::BigRational;

/// Same probability of trading at every price.
#[derive(Debug, Clone)]
pub struct ConstantRiskModel {
    probability: Decimal,
    horizon: Decimal,
}

impl ConstantRiskModel {
    pub fn new(probability: Decimal) -> Self {
        Self {
            probability,
            horizon: BigRational::from_integer(BigInt::from(1)),
        }
    }

    pub fn half() -> Self {
        Self::new(BigRational::new(BigInt::from(1), BigInt::from(2)))
    }
}

impl RiskModel for ConstantRiskModel {
    fn probability_of_trading(
        &self,
        _current_price: &Decimal,
        _horizon: &Decimal,
        _order_price: &Decimal,
        _is_bid: bool,
        _apply_min_max: bool,
        _min_price: &Decimal,
        _max_price: &Decimal,
    ) -> Decimal {
        self.probability.clone()
    }

    fn projection_horizon(&self) -> Decimal {
        self.horizon.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FixedPriceMonitor {
    min: Decimal,
    max: Decimal,
}

impl FixedPriceMonitor {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// `[0, 100]`
    pub fn wide() -> Self {
        Self::new(
            BigRational::from_integer(BigInt::from(0)),
            BigRational::from_integer(BigInt::from(100)),
        )
    }
}

impl PriceMonitor for FixedPriceMonitor {
    fn valid_price_range(&self) -> (Decimal, Decimal) {
        (self.min.clone(), self.max.clone())
    }
}
