use serde::Deserialize;

use liquidity_core::num::{parse_decimal, parse_uint, ParseDecimalError};
use liquidity_core::order::{Order, OrderStatus, OrderType, PeggedReference, TimeInForce};
use liquidity_core::provision::{LiquidityOrder, LiquidityProvisionAmendment, LiquidityProvisionSubmission};
use liquidity_core::side::Side;
use liquidity_core::types::{MarketId, OrderId, PartyId, ProvisionId, Timestamp};
use liquidity_engine::supplied::curve::{CurvePoint, ProbabilityCurve};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u64,
    /// Block time, nanoseconds.
    pub time: i64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transaction {
    Submit(SubmitTx),
    Amend(AmendTx),
    Cancel(PartyTx),
    Stop(PartyTx),
    BookUpdate(BookUpdateTx),
    ProbabilityCurve(CurveTx),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeEntry {
    pub reference: PeggedReference,
    pub offset: String,
    pub proportion: u32,
}

impl TryFrom<ShapeEntry> for LiquidityOrder {
    type Error = ParseDecimalError;
    fn try_from(entry: ShapeEntry) -> Result<Self, Self::Error> {
        Ok(LiquidityOrder::new(entry.reference, parse_uint(&entry.offset)?, entry.proportion))
    }
}

fn shape(entries: Vec<ShapeEntry>) -> Result<Vec<LiquidityOrder>, ParseDecimalError> {
    entries.into_iter().map(LiquidityOrder::try_from).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTx {
    pub party: PartyId,
    pub id: ProvisionId,
    pub commitment_amount: String,
    pub fee: String,
    pub buys: Vec<ShapeEntry>,
    pub sells: Vec<ShapeEntry>,
    #[serde(default)]
    pub reference: String,
}

impl TryFrom<SubmitTx> for LiquidityProvisionSubmission {
    type Error = ParseDecimalError;
    fn try_from(tx: SubmitTx) -> Result<Self, Self::Error> {
        Ok(LiquidityProvisionSubmission {
            commitment_amount: parse_uint(&tx.commitment_amount)?,
            fee: tx.fee,
            buys: shape(tx.buys)?,
            sells: shape(tx.sells)?,
            reference: tx.reference,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmendTx {
    pub party: PartyId,
    pub commitment_amount: Option<String>,
    pub fee: Option<String>,
    pub buys: Option<Vec<ShapeEntry>>,
    pub sells: Option<Vec<ShapeEntry>>,
    pub reference: Option<String>,
}

impl TryFrom<AmendTx> for LiquidityProvisionAmendment {
    type Error = ParseDecimalError;
    fn try_from(tx: AmendTx) -> Result<Self, Self::Error> {
        Ok(LiquidityProvisionAmendment {
            commitment_amount: tx.commitment_amount.as_deref().map(parse_uint).transpose()?,
            fee: tx.fee,
            buys: tx.buys.map(shape).transpose()?,
            sells: tx.sells.map(shape).transpose()?,
            reference: tx.reference,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyTx {
    pub party: PartyId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookOrder {
    pub id: OrderId,
    pub party: PartyId,
    pub side: Side,
    pub price: String,
    pub size: u64,
    pub remaining: u64,
    #[serde(default = "active")]
    pub status: OrderStatus,
    pub liquidity_provision_id: Option<ProvisionId>,
}

fn active() -> OrderStatus {
    OrderStatus::Active
}

impl BookOrder {
    pub fn into_order(self, market_id: &MarketId, now: Timestamp) -> Result<Order, ParseDecimalError> {
        Ok(Order {
            id: self.id,
            market_id: market_id.clone(),
            party_id: self.party,
            side: self.side,
            price: parse_uint(&self.price)?,
            size: self.size,
            remaining: self.remaining,
            order_type: OrderType::Limit,
            time_in_force: TimeInForce::Gtc,
            status: self.status,
            pegged_order: None,
            liquidity_provision_id: self.liquidity_provision_id,
            reference: String::new(),
            created_at: now,
            version: 1,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateTx {
    pub mark: String,
    pub best_bid: String,
    pub best_ask: String,
    pub orders: Vec<BookOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveEntry {
    pub offset: String,
    pub probability: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveTx {
    pub bid: Vec<CurveEntry>,
    pub ask: Vec<CurveEntry>,
}

impl TryFrom<CurveTx> for ProbabilityCurve {
    type Error = ParseDecimalError;
    fn try_from(tx: CurveTx) -> Result<Self, Self::Error> {
        let points = |entries: Vec<CurveEntry>| -> Result<Vec<CurvePoint>, ParseDecimalError> {
            entries
                .into_iter()
                .map(|e| Ok(CurvePoint::new(parse_uint(&e.offset)?, parse_decimal(&e.probability)?)))
                .collect()
        };
        Ok(ProbabilityCurve::new(points(tx.bid)?, points(tx.ask)?))
    }
}
