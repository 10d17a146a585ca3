use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use liquidity_core::broker::Broker;
use liquidity_core::idgen::IdGen;
use liquidity_core::num::Decimal;
use liquidity_core::order::Order;
use liquidity_core::provision::LiquidityProvision;
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::types::{MarketId, PartyId};

use crate::engine::store::{OrdersByParty, Tracked};
use crate::engine::{Engine, Parameters};
use crate::error::Error;
use crate::snapshot::SnapshotKey;
use crate::supplied::curve::ProbabilityCurve;

// Payloads hold nothing but sequences sorted by stable keys, so bincode output is canonical.

#[derive(Debug, Serialize, Deserialize)]
struct ParametersPayload {
    market_id: MarketId,
    stake_to_obligation_factor: Decimal,
    max_shape_size: u64,
    max_fee: Decimal,
    min_probability_of_trading: Decimal,
    probability_of_trading_tau_scaling: Decimal,
    probability_curve: Option<ProbabilityCurve>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrdersPayload {
    market_id: MarketId,
    /// By party, then by order id.
    orders: Vec<Order>,
}

/// Generated orders travel with the id chain that produced them: every new id is
/// inserted into this index, so both change together.
#[derive(Debug, Serialize, Deserialize)]
struct LiquidityOrdersPayload {
    market_id: MarketId,
    id_gen_checkpoint: Vec<u8>,
    /// By party, then by order id.
    orders: Vec<Order>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PendingPayload {
    market_id: MarketId,
    parties: Vec<PartyId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProvisionsPayload {
    market_id: MarketId,
    /// By party.
    provisions: Vec<LiquidityProvision>,
}

impl<B, G, R, P> Engine<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    pub(crate) fn has_updates(&self, key: SnapshotKey) -> bool {
        match key {
            SnapshotKey::Parameters => self.parameters.has_updates(),
            SnapshotKey::PartiesLiquidityOrders => self.store.liquidity_orders.has_updates(),
            SnapshotKey::PartiesOrders => self.store.manual_orders.has_updates(),
            SnapshotKey::PendingProvisions => self.store.pending.has_updates(),
            SnapshotKey::Provisions => self.store.provisions.has_updates(),
        }
    }

    pub(crate) fn reset_updated(&mut self, key: SnapshotKey) {
        match key {
            SnapshotKey::Parameters => self.parameters.reset_updated(),
            SnapshotKey::PartiesLiquidityOrders => self.store.liquidity_orders.reset_updated(),
            SnapshotKey::PartiesOrders => self.store.manual_orders.reset_updated(),
            SnapshotKey::PendingProvisions => self.store.pending.reset_updated(),
            SnapshotKey::Provisions => self.store.provisions.reset_updated(),
        }
    }

    pub(crate) fn serialize_state(&self, key: SnapshotKey) -> Result<Vec<u8>, Error> {
        let market_id = self.market_id().clone();
        let bytes = match key {
            SnapshotKey::Parameters => {
                let params = self.parameters();
                bincode::serialize(&ParametersPayload {
                    market_id,
                    stake_to_obligation_factor: params.stake_to_obligation_factor.clone(),
                    max_shape_size: params.max_shape_size,
                    max_fee: params.max_fee.clone(),
                    min_probability_of_trading: self.supplied.min_probability().clone(),
                    probability_of_trading_tau_scaling: self.supplied.tau_scaling().clone(),
                    probability_curve: self.supplied.probability_curve().cloned(),
                })?
            }
            SnapshotKey::PartiesLiquidityOrders => bincode::serialize(&LiquidityOrdersPayload {
                market_id,
                id_gen_checkpoint: self.id_gen.checkpoint(),
                orders: sorted_orders(&self.store.liquidity_orders),
            })?,
            SnapshotKey::PartiesOrders => bincode::serialize(&OrdersPayload {
                market_id,
                orders: sorted_orders(&self.store.manual_orders),
            })?,
            SnapshotKey::PendingProvisions => bincode::serialize(&PendingPayload {
                market_id,
                parties: self.store.sorted_pending(),
            })?,
            SnapshotKey::Provisions => bincode::serialize(&ProvisionsPayload {
                market_id,
                provisions: self.store.sorted_provisions().into_iter().cloned().collect(),
            })?,
        };
        Ok(bytes)
    }

    /// Replace the state behind `key`. The index is left flagged as updated.
    pub(crate) fn restore_state(&mut self, key: SnapshotKey, bytes: &[u8]) -> Result<(), Error> {
        match key {
            SnapshotKey::Parameters => {
                let payload: ParametersPayload = bincode::deserialize(bytes)?;
                self.check_market(&payload.market_id)?;
                self.parameters.replace(Parameters {
                    stake_to_obligation_factor: payload.stake_to_obligation_factor,
                    max_shape_size: payload.max_shape_size,
                    max_fee: payload.max_fee,
                });
                self.supplied
                    .on_min_probability_of_trading_update(payload.min_probability_of_trading);
                self.supplied
                    .on_tau_scaling_update(payload.probability_of_trading_tau_scaling);
                self.supplied.on_probability_curve_update(payload.probability_curve);
            }
            SnapshotKey::PartiesLiquidityOrders => {
                let payload: LiquidityOrdersPayload = bincode::deserialize(bytes)?;
                self.check_market(&payload.market_id)?;
                self.id_gen.restore(&payload.id_gen_checkpoint)?;
                self.store.liquidity_orders.replace(group_by_party(payload.orders));
            }
            SnapshotKey::PartiesOrders => {
                let payload: OrdersPayload = bincode::deserialize(bytes)?;
                self.check_market(&payload.market_id)?;
                self.store.manual_orders.replace(group_by_party(payload.orders));
            }
            SnapshotKey::PendingProvisions => {
                let payload: PendingPayload = bincode::deserialize(bytes)?;
                self.check_market(&payload.market_id)?;
                self.store
                    .pending
                    .replace(payload.parties.into_iter().collect::<HashSet<_>>());
            }
            SnapshotKey::Provisions => {
                let payload: ProvisionsPayload = bincode::deserialize(bytes)?;
                self.check_market(&payload.market_id)?;
                let provisions = payload
                    .provisions
                    .into_iter()
                    .map(|lp| (lp.party_id.clone(), lp))
                    .collect::<HashMap<_, _>>();
                self.store.provisions.replace(provisions);
            }
        }
        Ok(())
    }

    fn check_market(&self, found: &MarketId) -> Result<(), Error> {
        if found != self.market_id() {
            return Err(Error::SnapshotMarketMismatch {
                expected: self.market_id().clone(),
                found: found.clone(),
            });
        }
        Ok(())
    }
}

fn sorted_orders(index: &Tracked<OrdersByParty>) -> Vec<Order> {
    let mut orders: Vec<_> = index.values().flat_map(|orders| orders.values().cloned()).collect();
    orders.sort_by(|a, b| (&a.party_id, &a.id).cmp(&(&b.party_id, &b.id)));
    orders
}

fn group_by_party(orders: Vec<Order>) -> OrdersByParty {
    let mut index = OrdersByParty::new();
    for order in orders {
        index
            .entry(order.party_id.clone())
            .or_default()
            .insert(order.id.clone(), order);
    }
    index
}
