use std::collections::BTreeMap;

use log::{debug, warn};

use liquidity_core::book::BookPrices;
use liquidity_core::broker::Broker;
use liquidity_core::display::display_vec;
use liquidity_core::idgen::IdGen;
use liquidity_core::num::{parse_uint, ParseDecimalError};
use liquidity_core::order::Order;
use liquidity_core::provision::{LiquidityProvisionAmendment, LiquidityProvisionSubmission};
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::types::{OrderId, Timestamp};
use liquidity_engine::engine::reconcile::Reconciliation;
use liquidity_engine::snapshot::SnapshotEngine;
use liquidity_engine::supplied::curve::ProbabilityCurve;

use crate::block::{Block, BookUpdateTx, Transaction};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Engine(#[from] liquidity_engine::error::Error),
    #[error(transparent)]
    Numeric(#[from] ParseDecimalError),
}

/// Hashes of every snapshot key after a block.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlockDigest {
    pub height: u64,
    pub hashes: BTreeMap<String, String>,
}

/// Drives one market through a block log.
pub struct Replayer<B, G, R, P> {
    snapshot: SnapshotEngine<B, G, R, P>,
    prices: Option<BookPrices>,
    rejected: usize,
}

impl<B, G, R, P> Replayer<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    pub fn new(snapshot: SnapshotEngine<B, G, R, P>) -> Self {
        Self {
            snapshot,
            prices: None,
            rejected: 0,
        }
    }

    pub fn snapshot(&self) -> &SnapshotEngine<B, G, R, P> {
        &self.snapshot
    }

    /// Transactions refused so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn apply_block(&mut self, block: Block) -> Result<BlockDigest, ReplayError> {
        self.snapshot
            .engine_mut()
            .on_chain_time_update(Timestamp::from(block.time));
        for tx in block.transactions {
            if let Err(err) = self.apply(tx) {
                warn!("Block #{}: transaction rejected: {}", block.height, err);
                self.rejected += 1;
            }
        }
        let mut hashes = BTreeMap::new();
        for key in self.snapshot.keys().to_vec() {
            let hash = self.snapshot.get_hash(&key)?;
            hashes.insert(key, hash.to_string());
        }
        Ok(BlockDigest {
            height: block.height,
            hashes,
        })
    }

    fn apply(&mut self, tx: Transaction) -> Result<(), ReplayError> {
        match tx {
            Transaction::Submit(tx) => {
                let party = tx.party.clone();
                let id = tx.id.clone();
                let submission = LiquidityProvisionSubmission::try_from(tx)?;
                let cancelled = self
                    .snapshot
                    .engine_mut()
                    .submit_liquidity_provision(submission, &party, id)?;
                log_cancelled(&cancelled);
                if let Some(prices) = self.prices.clone() {
                    let result = self.snapshot.engine_mut().create_initial_orders(
                        &prices,
                        &party,
                        &[],
                        |peg, side| prices.reprice(peg, side),
                    );
                    log_reconciliation(&result);
                }
            }
            Transaction::Amend(tx) => {
                let party = tx.party.clone();
                let amendment = LiquidityProvisionAmendment::try_from(tx)?;
                let cancelled = self
                    .snapshot
                    .engine_mut()
                    .amend_liquidity_provision(amendment, &party)?;
                log_cancelled(&cancelled);
            }
            Transaction::Cancel(tx) => {
                let cancelled = self.snapshot.engine_mut().cancel_liquidity_provision(&tx.party)?;
                log_cancelled(&cancelled);
            }
            Transaction::Stop(tx) => {
                let cancelled = self.snapshot.engine_mut().stop_liquidity_provision(&tx.party)?;
                log_cancelled(&cancelled);
            }
            Transaction::BookUpdate(tx) => self.book_update(tx)?,
            Transaction::ProbabilityCurve(tx) => {
                let curve = ProbabilityCurve::try_from(tx)?;
                self.snapshot.engine_mut().on_probability_curve_update(curve);
            }
        }
        Ok(())
    }

    fn book_update(&mut self, tx: BookUpdateTx) -> Result<(), ReplayError> {
        let prices = BookPrices::new(
            parse_uint(&tx.mark)?,
            parse_uint(&tx.best_bid)?,
            parse_uint(&tx.best_ask)?,
        );
        let engine = self.snapshot.engine_mut();
        let market_id = engine.market_id().clone();
        let now = engine.current_time();
        let orders = tx
            .orders
            .into_iter()
            .map(|o| o.into_order(&market_id, now))
            .collect::<Result<Vec<Order>, _>>()?;
        let result = engine.update(&prices, |peg, side| prices.reprice(peg, side), &orders);
        log_reconciliation(&result);
        self.prices = Some(prices);
        Ok(())
    }
}

fn log_cancelled(ids: &[OrderId]) {
    if !ids.is_empty() {
        debug!("Cancelling {} generated orders: {}", ids.len(), display_vec(ids));
    }
}

fn log_reconciliation(result: &Reconciliation) {
    for order in &result.new_orders {
        debug!(
            "New order {} of {}: {} {} @ {}",
            order.id, order.party_id, order.side, order.size, order.price
        );
    }
    for amendment in &result.amendments {
        debug!(
            "Amend order {} of {}: {} @ {} ({:+})",
            amendment.order_id, amendment.party_id, amendment.size, amendment.price, amendment.size_delta
        );
    }
    log_cancelled(&result.cancellations);
}
