use num_bigint::BigUint;

use liquidity_core::book::RepriceError;
use liquidity_core::num::Price;
use liquidity_core::order::{Order, OrderStatus, OrderType, PeggedOrder, TimeInForce};
use liquidity_core::side::Side;
use liquidity_core::types::{MarketId, OrderId, PartyId, Timestamp};

pub const MARKET: &str = "market-id";

/// Plain active limit order resting on the book.
pub fn resting_order(id: &str, party: &str, side: Side, price: u32, size: u64) -> Order {
    Order {
        id: OrderId::from(id),
        market_id: MarketId::from(MARKET),
        party_id: PartyId::from(party),
        side,
        price: BigUint::from(price),
        size,
        remaining: size,
        order_type: OrderType::Limit,
        time_in_force: TimeInForce::Gtc,
        status: OrderStatus::Active,
        pegged_order: None,
        liquidity_provision_id: None,
        reference: String::new(),
        created_at: Timestamp::from(0),
        version: 1,
    }
}

/// Prices every peg off `mark`: buys at `mark - offset`, sells at `mark + offset`.
pub fn mark_reprice(mark: u32) -> impl FnMut(&PeggedOrder, Side) -> Result<Price, RepriceError> {
    let mark = BigUint::from(mark);
    move |peg, side| match side {
        Side::Buy if peg.offset >= mark => Err(RepriceError::OffsetExceedsReference {
            reference: peg.reference,
            offset: peg.offset.clone(),
            price: mark.clone(),
        }),
        Side::Buy => Ok(&mark - &peg.offset),
        Side::Sell => Ok(&mark + &peg.offset),
    }
}
