use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use liquidity_core::num::{to_decimal, Decimal};
use liquidity_core::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Distance from the best price on the same side, away from the spread.
    pub offset: BigUint,
    pub probability: Decimal,
}

impl CurvePoint {
    pub fn new(offset: impl Into<BigUint>, probability: Decimal) -> Self {
        Self {
            offset: offset.into(),
            probability,
        }
    }
}

/// Probability of trading sampled at increasing distances from the best bid and the best ask.
/// Produced out of band and swapped in as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityCurve {
    bid: Vec<CurvePoint>,
    ask: Vec<CurvePoint>,
}

impl ProbabilityCurve {
    pub fn new(mut bid: Vec<CurvePoint>, mut ask: Vec<CurvePoint>) -> Self {
        bid.sort_by(|a, b| a.offset.cmp(&b.offset));
        ask.sort_by(|a, b| a.offset.cmp(&b.offset));
        Self { bid, ask }
    }

    pub fn points(&self, side: Side) -> &[CurvePoint] {
        match side {
            Side::Buy => &self.bid,
            Side::Sell => &self.ask,
        }
    }

    /// Linear interpolation at `distance`. Points beyond either end are flat.
    /// `None` when no point is known for `side`.
    pub fn probability_at(&self, side: Side, distance: &Decimal) -> Option<Decimal> {
        let points = self.points(side);
        let first = points.first()?;
        if *distance <= to_decimal(&first.offset) {
            return Some(first.probability.clone());
        }
        for pair in points.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            let hi_offset = to_decimal(&hi.offset);
            if *distance <= hi_offset {
                let lo_offset = to_decimal(&lo.offset);
                let span = &hi_offset - &lo_offset;
                let weight = (distance - &lo_offset) / span;
                return Some(&lo.probability + (&hi.probability - &lo.probability) * weight);
            }
        }
        points.last().map(|p| p.probability.clone())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_rational::BigRational;

    use liquidity_core::num::u64_to_decimal;
    use liquidity_core::side::Side;

    use crate::supplied::curve::{CurvePoint, ProbabilityCurve};

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn curve() -> ProbabilityCurve {
        ProbabilityCurve::new(
            vec![
                CurvePoint::new(10u32, ratio(1, 2)),
                CurvePoint::new(0u32, ratio(1, 1)),
            ],
            vec![],
        )
    }

    #[test]
    fn points_are_kept_sorted() {
        let c = curve();
        assert_eq!(c.points(Side::Buy)[0].offset, 0u32.into());
    }

    #[test]
    fn interpolates_between_points() {
        let c = curve();
        assert_eq!(c.probability_at(Side::Buy, &u64_to_decimal(5)), Some(ratio(3, 4)));
        assert_eq!(c.probability_at(Side::Buy, &u64_to_decimal(0)), Some(ratio(1, 1)));
    }

    #[test]
    fn flat_beyond_last_point() {
        let c = curve();
        assert_eq!(c.probability_at(Side::Buy, &u64_to_decimal(1000)), Some(ratio(1, 2)));
    }

    #[test]
    fn unknown_side_yields_nothing() {
        assert_eq!(curve().probability_at(Side::Sell, &u64_to_decimal(1)), None);
    }
}
