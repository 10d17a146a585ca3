use derive_more::Display;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::num::Decimal;
use crate::order::{PeggedOrder, PeggedReference};
use crate::side::Side;
use crate::types::{MarketId, OrderId, PartyId, ProvisionId, Timestamp};

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidityProvisionStatus {
    Pending,
    Active,
    Undeployed,
    Cancelled,
    Rejected,
    Stopped,
}

/// Shape element: where to post (peg) and how much relative to the rest of its side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityOrder {
    pub reference: PeggedReference,
    pub offset: BigUint,
    pub proportion: u32,
}

impl LiquidityOrder {
    pub fn new(reference: PeggedReference, offset: impl Into<BigUint>, proportion: u32) -> Self {
        Self {
            reference,
            offset: offset.into(),
            proportion,
        }
    }

    pub fn peg(&self) -> PeggedOrder {
        PeggedOrder {
            reference: self.reference,
            offset: self.offset.clone(),
        }
    }
}

/// A shape slot and the live order currently deployed for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityOrderReference {
    pub order_id: Option<OrderId>,
    pub liquidity_order: LiquidityOrder,
}

impl From<LiquidityOrder> for LiquidityOrderReference {
    fn from(liquidity_order: LiquidityOrder) -> Self {
        Self {
            order_id: None,
            liquidity_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityProvision {
    pub id: ProvisionId,
    pub market_id: MarketId,
    pub party_id: PartyId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub commitment_amount: BigUint,
    pub fee: Decimal,
    pub buys: Vec<LiquidityOrderReference>,
    pub sells: Vec<LiquidityOrderReference>,
    pub version: u64,
    pub status: LiquidityProvisionStatus,
    pub reference: String,
}

impl LiquidityProvision {
    pub fn shape(&self, side: Side) -> &[LiquidityOrderReference] {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    pub fn shape_mut(&mut self, side: Side) -> &mut Vec<LiquidityOrderReference> {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// Replace both sides with fresh, undeployed slots.
    pub fn reshape(&mut self, buys: Vec<LiquidityOrder>, sells: Vec<LiquidityOrder>) {
        self.buys = buys.into_iter().map(LiquidityOrderReference::from).collect();
        self.sells = sells.into_iter().map(LiquidityOrderReference::from).collect();
    }

    pub fn deployed_order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.buys.iter().chain(self.sells.iter()).filter_map(|r| r.order_id.as_ref())
    }
}

/// Create, update or (with a zero commitment) cancel a provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityProvisionSubmission {
    pub commitment_amount: BigUint,
    /// Decimal literal, validated against the market's maximum fee.
    pub fee: String,
    pub buys: Vec<LiquidityOrder>,
    pub sells: Vec<LiquidityOrder>,
    pub reference: String,
}

/// Partial update of an existing provision. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityProvisionAmendment {
    pub commitment_amount: Option<BigUint>,
    pub fee: Option<String>,
    pub buys: Option<Vec<LiquidityOrder>>,
    pub sells: Option<Vec<LiquidityOrder>>,
    pub reference: Option<String>,
}
