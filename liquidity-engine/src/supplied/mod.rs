//! Supplied-liquidity calculator: turns obligations into order sizes and order books into
//! probability-weighted liquidity, on top of an injected risk model and price monitor.

use std::sync::Arc;

use log::{debug, trace};
use num_traits::{One, Zero};

use algebra_core::monoid::concat;
use liquidity_core::book::BookPrices;
use liquidity_core::num::{clamp, to_decimal, truncate_to_u64, u64_to_decimal, Decimal, Price};
use liquidity_core::order::{Order, PeggedOrder};
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::side::{PerSide, Side};

use crate::supplied::curve::ProbabilityCurve;

pub mod curve;

/// Order sizes are `u64`; larger implied volumes are capped here.
pub const MAX_ORDER_SIZE: u64 = u64::MAX;

/// A shape slot priced for the current book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedSlot {
    pub proportion: u64,
    pub peg: PeggedOrder,
    /// `None` when the slot could not be repriced this pass.
    pub price: Option<Price>,
    pub implied_volume: u64,
}

#[derive(Debug, Clone)]
pub struct SuppliedEngine<R, P> {
    risk_model: R,
    price_monitor: P,
    min_probability: Decimal,
    tau_scaling: Decimal,
    curve: Option<Arc<ProbabilityCurve>>,
}

impl<R, P> SuppliedEngine<R, P> {
    pub fn new(risk_model: R, price_monitor: P, min_probability: Decimal, tau_scaling: Decimal) -> Self {
        Self {
            risk_model,
            price_monitor,
            min_probability,
            tau_scaling,
            curve: None,
        }
    }

    pub fn min_probability(&self) -> &Decimal {
        &self.min_probability
    }

    pub fn tau_scaling(&self) -> &Decimal {
        &self.tau_scaling
    }

    pub fn probability_curve(&self) -> Option<&ProbabilityCurve> {
        self.curve.as_deref()
    }

    pub fn on_min_probability_of_trading_update(&mut self, value: Decimal) {
        self.min_probability = value;
    }

    pub fn on_tau_scaling_update(&mut self, value: Decimal) {
        self.tau_scaling = value;
    }

    /// Replace the cached curve as a whole. Passes already holding the previous curve keep it.
    pub fn on_probability_curve_update(&mut self, curve: Option<ProbabilityCurve>) {
        self.curve = curve.map(Arc::new);
    }
}

impl<R, P> SuppliedEngine<R, P>
where
    R: RiskModel,
    P: PriceMonitor,
{
    /// Freeze everything a pass needs: one curve, one valid range, one horizon.
    pub fn pricer(&self, prices: &BookPrices) -> ProbabilityPricer<'_, R> {
        let (min, max) = self.price_monitor.valid_price_range();
        let range = if min < max && !max.is_zero() {
            Some((min, max))
        } else {
            trace!("Invalid valid price range, using min probability of trading");
            None
        };
        ProbabilityPricer {
            risk_model: &self.risk_model,
            curve: self.curve.clone(),
            range,
            horizon: self.risk_model.projection_horizon() * &self.tau_scaling,
            floor: self.min_probability.clone(),
            best: PerSide::new(
                to_decimal(prices.best_or_mark(Side::Buy)),
                to_decimal(prices.best_or_mark(Side::Sell)),
            ),
        }
    }

    /// `min(bid, ask)` of `Σ price × remaining × probability` over `orders`.
    pub fn supplied_liquidity<'a, I>(&self, pricer: &ProbabilityPricer<'_, R>, orders: I) -> Decimal
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut liquidity = PerSide::new(Decimal::zero(), Decimal::zero());
        for order in orders {
            *liquidity.get_mut(order.side) += pricer.weighted_notional(order);
        }
        if liquidity.buy < liquidity.sell {
            liquidity.buy
        } else {
            liquidity.sell
        }
    }

    /// Size each priced slot so that, per side, the slots together with the party's own
    /// resting orders supply `obligation`. Volumes truncate toward zero; the remainder is dropped.
    pub fn calculate_liquidity_implied_volumes(
        &self,
        pricer: &ProbabilityPricer<'_, R>,
        obligation: &Decimal,
        manual_orders: &[&Order],
        buys: &mut [PricedSlot],
        sells: &mut [PricedSlot],
    ) {
        for (side, slots) in [(Side::Buy, buys), (Side::Sell, sells)] {
            // Exact arithmetic, summation order does not matter.
            let manual: Decimal = concat(
                manual_orders
                    .iter()
                    .filter(|o| o.side == side && o.is_active() && o.remaining > 0)
                    .map(|o| pricer.weighted_notional(o)),
            );
            let residual = if *obligation > manual {
                obligation - &manual
            } else {
                Decimal::zero()
            };
            let total_proportion: u64 = slots.iter().filter(|s| s.price.is_some()).map(|s| s.proportion).sum();
            trace!(
                "Side {}: obligation {}, manual {}, residual {}, total proportion {}",
                side,
                obligation,
                manual,
                residual,
                total_proportion
            );
            for slot in slots.iter_mut() {
                slot.implied_volume = match &slot.price {
                    Some(price) if total_proportion > 0 && !price.is_zero() => {
                        let share = &residual * u64_to_decimal(slot.proportion) / u64_to_decimal(total_proportion);
                        let unit_liquidity = to_decimal(price) * pricer.probability(price, side);
                        if unit_liquidity.is_zero() {
                            0
                        } else {
                            let volume = share / unit_liquidity;
                            truncate_to_u64(&volume).unwrap_or_else(|| {
                                debug!(
                                    "Implied volume {} of {} slot at {} exceeds max order size, capped",
                                    volume.to_integer(),
                                    side,
                                    price
                                );
                                MAX_ORDER_SIZE
                            })
                        }
                    }
                    _ => 0,
                };
            }
        }
    }
}

/// Immutable view used for the duration of one pass.
pub struct ProbabilityPricer<'a, R> {
    risk_model: &'a R,
    curve: Option<Arc<ProbabilityCurve>>,
    range: Option<(Decimal, Decimal)>,
    horizon: Decimal,
    floor: Decimal,
    best: PerSide<Decimal>,
}

impl<'a, R: RiskModel> ProbabilityPricer<'a, R> {
    /// Probability of trading at `price` on `side`, clamped to `[floor, 1]`.
    pub fn probability(&self, price: &Price, side: Side) -> Decimal {
        let Some((min, max)) = &self.range else {
            return self.floor.clone();
        };
        let price = to_decimal(price);
        if price < *min || price > *max {
            return self.floor.clone();
        }
        let best = self.best.get(side);
        let from_curve = self.curve.as_deref().and_then(|curve| {
            let distance = match side {
                Side::Buy if price < *best => best - &price,
                Side::Sell if price > *best => &price - best,
                _ => Decimal::zero(),
            };
            curve.probability_at(side, &distance)
        });
        let probability = from_curve.unwrap_or_else(|| {
            self.risk_model
                .probability_of_trading(best, &self.horizon, &price, side.is_bid(), true, min, max)
        });
        clamp(probability, &self.floor, &Decimal::one())
    }

    fn weighted_notional(&self, order: &Order) -> Decimal {
        to_decimal(&order.price) * u64_to_decimal(order.remaining) * self.probability(&order.price, order.side)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};
    use num_rational::BigRational;

    use liquidity_core::book::BookPrices;
    use liquidity_core::num::{u64_to_decimal, Decimal};
    use liquidity_core::order::{Order, PeggedOrder, PeggedReference};
    use liquidity_core::side::Side;
    use test_utils::orders::resting_order;
    use test_utils::risk::{ConstantRiskModel, FixedPriceMonitor};

    use crate::config::default_min_probability_of_trading;
    use crate::supplied::curve::{CurvePoint, ProbabilityCurve};
    use crate::supplied::{PricedSlot, SuppliedEngine};

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn engine(probability: Decimal, min: u64, max: u64) -> SuppliedEngine<ConstantRiskModel, FixedPriceMonitor> {
        SuppliedEngine::new(
            ConstantRiskModel::new(probability),
            FixedPriceMonitor::new(u64_to_decimal(min), u64_to_decimal(max)),
            default_min_probability_of_trading(),
            ratio(1, 1),
        )
    }

    fn book(mark: u32) -> BookPrices {
        BookPrices::new(BigUint::from(mark), BigUint::from(mark), BigUint::from(mark))
    }

    fn slot(proportion: u64, price: Option<u32>) -> PricedSlot {
        PricedSlot {
            proportion,
            peg: PeggedOrder {
                reference: PeggedReference::Mid,
                offset: BigUint::from(1u32),
            },
            price: price.map(BigUint::from),
            implied_volume: 0,
        }
    }

    #[test]
    fn volumes_follow_proportions_and_truncate() {
        let se = engine(ratio(1, 2), 0, 100);
        let pricer = se.pricer(&book(10));
        let mut buys = vec![slot(20, Some(9)), slot(10, Some(8))];
        let mut sells = vec![slot(1, Some(11))];
        se.calculate_liquidity_implied_volumes(&pricer, &u64_to_decimal(100), &[], &mut buys, &mut sells);
        // 100 * 20/30 / (9 * 0.5) = 14.81..
        assert_eq!(buys[0].implied_volume, 14);
        // 100 * 10/30 / (8 * 0.5) = 8.33..
        assert_eq!(buys[1].implied_volume, 8);
        // 100 / (11 * 0.5) = 18.18..
        assert_eq!(sells[0].implied_volume, 18);
    }

    #[test]
    fn skipped_slots_get_nothing_and_do_not_dilute() {
        let se = engine(ratio(1, 2), 0, 100);
        let pricer = se.pricer(&book(10));
        let mut buys = vec![slot(1, None), slot(1, Some(10))];
        let mut sells = vec![slot(1, Some(10))];
        se.calculate_liquidity_implied_volumes(&pricer, &u64_to_decimal(100), &[], &mut buys, &mut sells);
        assert_eq!(buys[0].implied_volume, 0);
        assert_eq!(buys[1].implied_volume, 20);
        assert_eq!(sells[0].implied_volume, 20);
    }

    #[test]
    fn manual_orders_reduce_obligation() {
        let se = engine(ratio(1, 2), 0, 100);
        let pricer = se.pricer(&book(10));
        // 10 * 10 * 0.5 = 50 already supplied on the buy side.
        let manual: Order = resting_order("m-1", "party-1", Side::Buy, 10, 10);
        let mut buys = vec![slot(1, Some(10))];
        let mut sells = vec![slot(1, Some(10))];
        se.calculate_liquidity_implied_volumes(
            &pricer,
            &u64_to_decimal(100),
            &[&manual],
            &mut buys,
            &mut sells,
        );
        assert_eq!(buys[0].implied_volume, 10);
        assert_eq!(sells[0].implied_volume, 20);
    }

    #[test]
    fn manual_orders_covering_obligation_zero_the_shape() {
        let se = engine(ratio(1, 2), 0, 100);
        let pricer = se.pricer(&book(10));
        let manual = resting_order("m-1", "party-1", Side::Sell, 10, 1000);
        let mut buys = vec![slot(1, Some(10))];
        let mut sells = vec![slot(1, Some(10))];
        se.calculate_liquidity_implied_volumes(
            &pricer,
            &u64_to_decimal(100),
            &[&manual],
            &mut buys,
            &mut sells,
        );
        assert_eq!(sells[0].implied_volume, 0);
        assert_eq!(buys[0].implied_volume, 20);
    }

    #[test]
    fn invalid_range_degrades_to_floor() {
        let se = engine(ratio(1, 2), 100, 100);
        let pricer = se.pricer(&book(10));
        assert_eq!(pricer.probability(&BigUint::from(10u32), Side::Buy), default_min_probability_of_trading());
    }

    #[test]
    fn outside_range_gets_floor() {
        let se = engine(ratio(1, 2), 5, 50);
        let pricer = se.pricer(&book(10));
        assert_eq!(pricer.probability(&BigUint::from(60u32), Side::Sell), default_min_probability_of_trading());
        assert_eq!(pricer.probability(&BigUint::from(20u32), Side::Sell), ratio(1, 2));
    }

    #[test]
    fn cached_curve_takes_precedence() {
        let mut se = engine(ratio(1, 2), 0, 100);
        se.on_probability_curve_update(Some(ProbabilityCurve::new(
            vec![CurvePoint::new(0u32, ratio(9, 10)), CurvePoint::new(4u32, ratio(1, 10))],
            vec![],
        )));
        let pricer = se.pricer(&book(10));
        assert_eq!(pricer.probability(&BigUint::from(8u32), Side::Buy), ratio(5, 10));
        // No ask points, the risk model answers.
        assert_eq!(pricer.probability(&BigUint::from(12u32), Side::Sell), ratio(1, 2));
    }

    #[test]
    fn pricer_keeps_the_curve_it_started_with() {
        let mut se = engine(ratio(1, 2), 0, 100);
        se.on_probability_curve_update(Some(ProbabilityCurve::new(vec![CurvePoint::new(0u32, ratio(1, 4))], vec![])));
        let frozen = se.curve.clone();
        se.on_probability_curve_update(None);
        assert!(se.probability_curve().is_none());
        assert_eq!(frozen.unwrap().probability_at(Side::Buy, &u64_to_decimal(3)), Some(ratio(1, 4)));
    }

    #[test]
    fn supplied_liquidity_is_side_balanced() {
        let se = engine(ratio(1, 2), 0, 100);
        let pricer = se.pricer(&book(10));
        let orders = vec![
            resting_order("1", "p", Side::Buy, 10, 100),
            resting_order("2", "p", Side::Sell, 10, 4),
        ];
        assert_eq!(se.supplied_liquidity(&pricer, &orders), u64_to_decimal(20));
    }
}
