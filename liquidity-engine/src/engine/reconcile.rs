use log::{debug, trace};

use liquidity_core::book::{BookPrices, RepriceError};
use liquidity_core::broker::Broker;
use liquidity_core::display::display_option;
use liquidity_core::event::Event;
use liquidity_core::idgen::IdGen;
use liquidity_core::num::{Decimal, Price};
use liquidity_core::order::{Order, OrderStatus, OrderType, PeggedOrder, TimeInForce};
use liquidity_core::provision::{LiquidityOrderReference, LiquidityProvision, LiquidityProvisionStatus};
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::side::Side;
use liquidity_core::types::{OrderId, PartyId, ProvisionId};

use crate::engine::Engine;
use crate::supplied::{PricedSlot, ProbabilityPricer};

/// Size and/or price change of a generated order that stays on the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAmendment {
    pub order_id: OrderId,
    pub party_id: PartyId,
    pub price: Price,
    pub size: u64,
    /// New size minus old size.
    pub size_delta: i128,
}

/// Everything the book has to apply after a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub new_orders: Vec<Order>,
    pub amendments: Vec<OrderAmendment>,
    /// Generated orders whose slot no longer carries volume.
    pub cancellations: Vec<OrderId>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.new_orders.is_empty() && self.amendments.is_empty() && self.cancellations.is_empty()
    }

    fn merge(&mut self, other: Reconciliation) {
        self.new_orders.extend(other.new_orders);
        self.amendments.extend(other.amendments);
        self.cancellations.extend(other.cancellations);
    }
}

struct PartyPlan {
    party: PartyId,
    buys: Vec<PricedSlot>,
    sells: Vec<PricedSlot>,
}

/// Identity every generated order of one provision carries.
struct Origin<'a> {
    party: &'a PartyId,
    provision: &'a ProvisionId,
    reference: &'a str,
}

impl<B, G, R, P> Engine<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    /// Bring generated orders of every provider in line with the book.
    pub fn update<F>(&mut self, prices: &BookPrices, mut reprice: F, book_orders: &[Order]) -> Reconciliation
    where
        F: FnMut(&PeggedOrder, Side) -> Result<Price, RepriceError>,
    {
        for order in book_orders {
            self.store.update_party_order(order);
        }
        let plans = {
            let pricer = self.supplied.pricer(prices);
            self.store
                .sorted_provisions()
                .into_iter()
                .map(|lp| self.plan(&pricer, lp, &mut reprice))
                .collect::<Vec<_>>()
        };
        let mut result = Reconciliation::default();
        for plan in plans {
            result.merge(self.apply(plan));
        }
        trace!(
            "Reconciliation at mark {}: {} new, {} amended, {} cancelled",
            prices.mark,
            result.new_orders.len(),
            result.amendments.len(),
            result.cancellations.len()
        );
        result
    }

    /// Single-party pass, used right after a provision is (re)submitted.
    pub fn create_initial_orders<F>(
        &mut self,
        prices: &BookPrices,
        party: &PartyId,
        orders: &[Order],
        mut reprice: F,
    ) -> Reconciliation
    where
        F: FnMut(&PeggedOrder, Side) -> Result<Price, RepriceError>,
    {
        for order in orders.iter().filter(|o| o.party_id == *party) {
            self.store.update_party_order(order);
        }
        let plan = {
            let pricer = self.supplied.pricer(prices);
            self.store
                .provisions
                .get(party)
                .map(|lp| self.plan(&pricer, lp, &mut reprice))
        };
        plan.map(|plan| self.apply(plan)).unwrap_or_default()
    }

    /// Deployed generated orders of all providers, valued the same way obligations are.
    pub fn supplied_liquidity(&self, prices: &BookPrices) -> Decimal {
        let pricer = self.supplied.pricer(prices);
        let orders = self
            .store
            .sorted_parties()
            .into_iter()
            .flat_map(|party| self.store.liquidity_orders_of(&party));
        self.supplied.supplied_liquidity(&pricer, orders)
    }

    fn plan<F>(&self, pricer: &ProbabilityPricer<'_, R>, lp: &LiquidityProvision, reprice: &mut F) -> PartyPlan
    where
        F: FnMut(&PeggedOrder, Side) -> Result<Price, RepriceError>,
    {
        let mut price_shape = |side: Side| -> Vec<PricedSlot> {
            lp.shape(side)
                .iter()
                .map(|slot| {
                    let peg = slot.liquidity_order.peg();
                    let price = match reprice(&peg, side) {
                        Ok(price) => Some(price),
                        Err(err) => {
                            debug!(
                                "Skipping {} slot of {} (order: {}) this pass: {}",
                                side,
                                lp.party_id,
                                display_option(slot.order_id.as_ref()),
                                err
                            );
                            None
                        }
                    };
                    PricedSlot {
                        proportion: u64::from(slot.liquidity_order.proportion),
                        peg,
                        price,
                        implied_volume: 0,
                    }
                })
                .collect()
        };
        let mut buys = price_shape(Side::Buy);
        let mut sells = price_shape(Side::Sell);
        let manual = self.store.manual_orders_of(&lp.party_id);
        self.supplied.calculate_liquidity_implied_volumes(
            pricer,
            &self.obligation_of(lp),
            &manual,
            &mut buys,
            &mut sells,
        );
        PartyPlan {
            party: lp.party_id.clone(),
            buys,
            sells,
        }
    }

    fn apply(&mut self, plan: PartyPlan) -> Reconciliation {
        let mut result = Reconciliation::default();
        let Some(before) = self.store.provisions.get(&plan.party).cloned() else {
            return result;
        };
        let mut lp = before.clone();
        let origin = Origin {
            party: &before.party_id,
            provision: &before.id,
            reference: &before.reference,
        };
        for (side, slots) in [(Side::Buy, plan.buys), (Side::Sell, plan.sells)] {
            for (link, slot) in lp.shape_mut(side).iter_mut().zip(slots) {
                self.reconcile_slot(&origin, side, link, slot, &mut result);
            }
        }

        if lp.deployed_order_ids().next().is_some() {
            lp.status = LiquidityProvisionStatus::Active;
            if self.store.pending.contains(&plan.party) {
                self.store.pending.modify().remove(&plan.party);
            }
        } else {
            lp.status = LiquidityProvisionStatus::Undeployed;
        }

        if lp != before {
            self.store.provisions.modify().insert(plan.party, lp.clone());
            self.broker.send(Event::LiquidityProvision(lp));
        }
        result
    }

    fn reconcile_slot(
        &mut self,
        origin: &Origin<'_>,
        side: Side,
        link: &mut LiquidityOrderReference,
        slot: PricedSlot,
        result: &mut Reconciliation,
    ) {
        let existing = link
            .order_id
            .as_ref()
            .and_then(|id| self.store.liquidity_orders.get(origin.party)?.get(id))
            .cloned();
        if existing.is_none() && link.order_id.is_some() {
            // Filled or cancelled on the book since the last pass.
            link.order_id = None;
        }
        let Some(price) = slot.price else {
            return;
        };
        let volume = slot.implied_volume;
        match existing {
            None if volume > 0 => {
                let mut order = Order {
                    id: OrderId::default(),
                    market_id: self.market_id().clone(),
                    party_id: origin.party.clone(),
                    side,
                    price,
                    size: volume,
                    remaining: volume,
                    order_type: OrderType::Limit,
                    time_in_force: TimeInForce::Gtc,
                    status: OrderStatus::Active,
                    pegged_order: Some(slot.peg),
                    liquidity_provision_id: Some(origin.provision.clone()),
                    reference: origin.reference.to_owned(),
                    created_at: self.current_time(),
                    version: 1,
                };
                self.id_gen.set_id(&mut order);
                link.order_id = Some(order.id.clone());
                self.store
                    .liquidity_orders
                    .modify()
                    .entry(origin.party.clone())
                    .or_default()
                    .insert(order.id.clone(), order.clone());
                result.new_orders.push(order);
            }
            None => {}
            Some(order) if volume == 0 => {
                let orders = self.store.liquidity_orders.modify();
                if let Some(party_orders) = orders.get_mut(origin.party) {
                    party_orders.remove(&order.id);
                    if party_orders.is_empty() {
                        orders.remove(origin.party);
                    }
                }
                link.order_id = None;
                if order.remaining > 0 {
                    result.cancellations.push(order.id);
                }
            }
            Some(order) if order.size != volume || order.price != price => {
                let traded = order.size.saturating_sub(order.remaining);
                if let Some(stored) = self
                    .store
                    .liquidity_orders
                    .modify()
                    .get_mut(origin.party)
                    .and_then(|orders| orders.get_mut(&order.id))
                {
                    stored.size = volume;
                    stored.remaining = volume.saturating_sub(traded);
                    stored.price = price.clone();
                    stored.version += 1;
                }
                result.amendments.push(OrderAmendment {
                    order_id: order.id,
                    party_id: origin.party.clone(),
                    price,
                    size: volume,
                    size_delta: i128::from(volume) - i128::from(order.size),
                });
            }
            Some(_) => {}
        }
    }
}
