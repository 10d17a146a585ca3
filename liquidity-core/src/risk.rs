use crate::num::Decimal;

/// Risk model of the market.
pub trait RiskModel {
    /// Probability that an order at `order_price` trades within `horizon`.
    #[allow(clippy::too_many_arguments)]
    fn probability_of_trading(
        &self,
        current_price: &Decimal,
        horizon: &Decimal,
        order_price: &Decimal,
        is_bid: bool,
        apply_min_max: bool,
        min_price: &Decimal,
        max_price: &Decimal,
    ) -> Decimal;

    /// Projection horizon (year fraction) the model was calibrated for.
    fn projection_horizon(&self) -> Decimal;
}

/// Provides the range of prices that would not trigger a price-monitoring auction.
pub trait PriceMonitor {
    fn valid_price_range(&self) -> (Decimal, Decimal);
}

impl<R: RiskModel + ?Sized> RiskModel for Box<R> {
    fn probability_of_trading(
        &self,
        current_price: &Decimal,
        horizon: &Decimal,
        order_price: &Decimal,
        is_bid: bool,
        apply_min_max: bool,
        min_price: &Decimal,
        max_price: &Decimal,
    ) -> Decimal {
        (**self).probability_of_trading(
            current_price,
            horizon,
            order_price,
            is_bid,
            apply_min_max,
            min_price,
            max_price,
        )
    }

    fn projection_horizon(&self) -> Decimal {
        (**self).projection_horizon()
    }
}

impl<P: PriceMonitor + ?Sized> PriceMonitor for Box<P> {
    fn valid_price_range(&self) -> (Decimal, Decimal) {
        (**self).valid_price_range()
    }
}
