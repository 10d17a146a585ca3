use derive_more::Display;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::num::Price;
use crate::side::Side;
use crate::types::{MarketId, OrderId, PartyId, ProvisionId, Timestamp};

/// Book price a pegged order tracks.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeggedReference {
    BestBid,
    BestAsk,
    Mid,
}

/// Peg target plus an unsigned offset. Buys price below the reference, sells above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeggedOrder {
    pub reference: PeggedReference,
    pub offset: BigUint,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Active,
    Parked,
    Filled,
    Cancelled,
    Expired,
    Stopped,
    Rejected,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    Gtc,
    Gtt,
    Ioc,
    Fok,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub market_id: MarketId,
    pub party_id: PartyId,
    pub side: Side,
    pub price: Price,
    pub size: u64,
    pub remaining: u64,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub status: OrderStatus,
    /// Kept on generated orders so the book can reprice them.
    pub pegged_order: Option<PeggedOrder>,
    /// Set on orders generated for a liquidity provision.
    pub liquidity_provision_id: Option<ProvisionId>,
    pub reference: String,
    pub created_at: Timestamp,
    pub version: u64,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    pub fn is_liquidity_order(&self) -> bool {
        self.liquidity_provision_id.is_some()
    }
}
