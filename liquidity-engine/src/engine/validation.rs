use num_traits::{Signed, Zero};

use liquidity_core::num::{display_decimal, parse_decimal, Decimal};
use liquidity_core::order::PeggedReference;
use liquidity_core::provision::LiquidityOrder;
use liquidity_core::side::Side;

use crate::error::Error;

pub fn validate_fee(fee: &str, max_fee: &Decimal) -> Result<Decimal, Error> {
    let value = parse_decimal(fee).map_err(|_| Error::InvalidFee(fee.to_owned()))?;
    if value.is_negative() || value > *max_fee {
        return Err(Error::InvalidFee(display_decimal(&value)));
    }
    Ok(value)
}

pub fn validate_shape(orders: &[LiquidityOrder], side: Side, max_size: u64) -> Result<(), Error> {
    if orders.is_empty() {
        return Err(Error::EmptyShape(side));
    }
    if orders.len() as u64 > max_size {
        return Err(Error::ShapeTooLarge { side, max: max_size });
    }
    for order in orders {
        if order.proportion == 0 {
            return Err(Error::ShapeOrderWithoutProportion(side));
        }
        match (side, order.reference) {
            (Side::Buy, PeggedReference::BestAsk) | (Side::Sell, PeggedReference::BestBid) => {
                return Err(Error::InvalidShapeReference {
                    side,
                    reference: order.reference,
                })
            }
            (_, PeggedReference::Mid) if order.offset.is_zero() => {
                return Err(Error::InvalidShapeOffset {
                    side,
                    reference: order.reference,
                })
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_rational::BigRational;

    use liquidity_core::order::PeggedReference;
    use liquidity_core::provision::LiquidityOrder;
    use liquidity_core::side::Side;

    use crate::engine::validation::{validate_fee, validate_shape};
    use crate::error::Error;

    fn max_fee() -> BigRational {
        BigRational::from_integer(BigInt::from(1))
    }

    #[test]
    fn fee_bounds() {
        assert_eq!(
            validate_fee("0.01", &max_fee()).unwrap(),
            BigRational::new(BigInt::from(1), BigInt::from(100))
        );
        assert!(validate_fee("0", &max_fee()).is_ok());
        assert!(matches!(validate_fee("-0.1", &max_fee()), Err(Error::InvalidFee(_))));
        assert!(matches!(validate_fee("1.5", &max_fee()), Err(Error::InvalidFee(_))));
        assert!(matches!(validate_fee("abc", &max_fee()), Err(Error::InvalidFee(_))));
    }

    #[test]
    fn shape_rules() {
        let ok = vec![LiquidityOrder::new(PeggedReference::BestBid, 0u32, 1)];
        assert!(validate_shape(&ok, Side::Buy, 10).is_ok());
        assert!(matches!(validate_shape(&[], Side::Buy, 10), Err(Error::EmptyShape(Side::Buy))));
        assert!(matches!(
            validate_shape(&vec![ok[0].clone(); 3], Side::Buy, 2),
            Err(Error::ShapeTooLarge { max: 2, .. })
        ));
        assert!(matches!(
            validate_shape(&[LiquidityOrder::new(PeggedReference::BestBid, 1u32, 0)], Side::Buy, 10),
            Err(Error::ShapeOrderWithoutProportion(Side::Buy))
        ));
        assert!(matches!(
            validate_shape(&[LiquidityOrder::new(PeggedReference::BestAsk, 1u32, 1)], Side::Buy, 10),
            Err(Error::InvalidShapeReference { .. })
        ));
        assert!(matches!(
            validate_shape(&[LiquidityOrder::new(PeggedReference::BestBid, 1u32, 1)], Side::Sell, 10),
            Err(Error::InvalidShapeReference { .. })
        ));
        assert!(matches!(
            validate_shape(&[LiquidityOrder::new(PeggedReference::Mid, 0u32, 1)], Side::Sell, 10),
            Err(Error::InvalidShapeOffset { .. })
        ));
    }
}
