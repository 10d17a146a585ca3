use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;

use log::trace;

use liquidity_core::order::Order;
use liquidity_core::provision::LiquidityProvision;
use liquidity_core::types::{OrderId, PartyId};

/// Value paired with a flag raised on every mutation since the last snapshot.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    inner: T,
    updated: bool,
}

impl<T> Tracked<T> {
    /// Fresh state always counts as changed.
    pub fn new(inner: T) -> Self {
        Self { inner, updated: true }
    }

    pub fn value(&self) -> &T {
        &self.inner
    }

    pub fn modify(&mut self) -> &mut T {
        self.updated = true;
        &mut self.inner
    }

    pub fn replace(&mut self, inner: T) {
        self.inner = inner;
        self.updated = true;
    }

    pub fn touch(&mut self) {
        self.updated = true;
    }

    pub fn has_updates(&self) -> bool {
        self.updated
    }

    pub fn reset_updated(&mut self) {
        self.updated = false;
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub type OrdersByParty = HashMap<PartyId, HashMap<OrderId, Order>>;

/// Per-market indices. Iteration over the maps themselves is unordered,
/// anything order-sensitive goes through the `sorted_*` views.
#[derive(Debug, Clone)]
pub struct ProvisionStore {
    pub(crate) provisions: Tracked<HashMap<PartyId, LiquidityProvision>>,
    pub(crate) liquidity_orders: Tracked<OrdersByParty>,
    pub(crate) manual_orders: Tracked<OrdersByParty>,
    pub(crate) pending: Tracked<HashSet<PartyId>>,
}

impl ProvisionStore {
    pub fn new() -> Self {
        Self {
            provisions: Tracked::new(HashMap::new()),
            liquidity_orders: Tracked::new(HashMap::new()),
            manual_orders: Tracked::new(HashMap::new()),
            pending: Tracked::new(HashSet::new()),
        }
    }

    pub fn sorted_parties(&self) -> Vec<PartyId> {
        let mut parties: Vec<_> = self.provisions.keys().cloned().collect();
        parties.sort();
        parties
    }

    pub fn sorted_provisions(&self) -> Vec<&LiquidityProvision> {
        let mut provisions: Vec<_> = self.provisions.values().collect();
        provisions.sort_by(|a, b| a.party_id.cmp(&b.party_id));
        provisions
    }

    pub fn sorted_pending(&self) -> Vec<PartyId> {
        let mut parties: Vec<_> = self.pending.iter().cloned().collect();
        parties.sort();
        parties
    }

    pub fn manual_orders_of(&self, party: &PartyId) -> Vec<&Order> {
        sorted_orders(self.manual_orders.get(party))
    }

    pub fn liquidity_orders_of(&self, party: &PartyId) -> Vec<&Order> {
        sorted_orders(self.liquidity_orders.get(party))
    }

    /// Remove and return (sorted) ids of every liquidity order `party` has deployed.
    pub fn take_liquidity_orders(&mut self, party: &PartyId) -> Vec<OrderId> {
        if !self.liquidity_orders.contains_key(party) {
            return Vec::new();
        }
        let mut ids: Vec<_> = self
            .liquidity_orders
            .modify()
            .remove(party)
            .map(|orders| orders.into_keys().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Forget everything about `party`. Returns the liquidity order ids it had deployed.
    pub fn drop_party(&mut self, party: &PartyId) -> (Option<LiquidityProvision>, Vec<OrderId>) {
        let provision = if self.provisions.contains_key(party) {
            self.provisions.modify().remove(party)
        } else {
            None
        };
        let ids = self.take_liquidity_orders(party);
        if self.manual_orders.contains_key(party) {
            self.manual_orders.modify().remove(party);
        }
        if self.pending.contains(party) {
            self.pending.modify().remove(party);
        }
        (provision, ids)
    }

    /// Keep the per-party order caches in line with the book.
    /// Only parties holding a provision are tracked.
    pub fn update_party_order(&mut self, order: &Order) {
        let party = &order.party_id;
        if !self.provisions.contains_key(party) {
            return;
        }
        let tracked_as_liquidity = self
            .liquidity_orders
            .get(party)
            .map_or(false, |orders| orders.contains_key(&order.id));
        if tracked_as_liquidity {
            let orders = self.liquidity_orders.modify();
            if let Some(party_orders) = orders.get_mut(party) {
                if order.is_active() {
                    party_orders.insert(order.id.clone(), order.clone());
                } else {
                    trace!("Liquidity order {} of {} left the book", order.id, party);
                    party_orders.remove(&order.id);
                }
            }
            return;
        }
        if order.is_liquidity_order() {
            return;
        }
        if order.is_active() {
            let unchanged = self
                .manual_orders
                .get(party)
                .and_then(|orders| orders.get(&order.id))
                .map_or(false, |known| known == order);
            if !unchanged {
                self.manual_orders
                    .modify()
                    .entry(party.clone())
                    .or_default()
                    .insert(order.id.clone(), order.clone());
            }
        } else {
            let known = self
                .manual_orders
                .get(party)
                .map_or(false, |orders| orders.contains_key(&order.id));
            if known {
                if let Entry::Occupied(mut entry) = self.manual_orders.modify().entry(party.clone()) {
                    entry.get_mut().remove(&order.id);
                    if entry.get().is_empty() {
                        entry.remove();
                    }
                }
            }
        }
    }

    pub fn has_updates(&self) -> bool {
        self.provisions.has_updates()
            || self.liquidity_orders.has_updates()
            || self.manual_orders.has_updates()
            || self.pending.has_updates()
    }
}

impl Default for ProvisionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_orders(orders: Option<&HashMap<OrderId, Order>>) -> Vec<&Order> {
    let mut orders: Vec<_> = orders.map(|o| o.values().collect()).unwrap_or_default();
    orders.sort_by(|a, b| a.id.cmp(&b.id));
    orders
}

#[cfg(test)]
mod tests {
    use liquidity_core::order::OrderStatus;
    use liquidity_core::provision::{LiquidityProvision, LiquidityProvisionStatus};
    use liquidity_core::side::Side;
    use liquidity_core::types::{MarketId, OrderId, PartyId, ProvisionId, Timestamp};
    use num_bigint::BigUint;
    use num_rational::BigRational;
    use test_utils::orders::resting_order;

    use crate::engine::store::{ProvisionStore, Tracked};

    fn provision(party: &str) -> LiquidityProvision {
        LiquidityProvision {
            id: ProvisionId::from(party),
            market_id: MarketId::from("market-id"),
            party_id: PartyId::from(party),
            created_at: Timestamp::from(0),
            updated_at: Timestamp::from(0),
            commitment_amount: BigUint::from(10u32),
            fee: BigRational::from_integer(0.into()),
            buys: vec![],
            sells: vec![],
            version: 1,
            status: LiquidityProvisionStatus::Undeployed,
            reference: String::new(),
        }
    }

    fn store_with(parties: &[&str]) -> ProvisionStore {
        let mut store = ProvisionStore::new();
        for p in parties {
            store.provisions.modify().insert(PartyId::from(*p), provision(p));
        }
        store.manual_orders.reset_updated();
        store.liquidity_orders.reset_updated();
        store.provisions.reset_updated();
        store.pending.reset_updated();
        store
    }

    #[test]
    fn tracked_flags_mutations_only() {
        let mut t = Tracked::new(1);
        assert!(t.has_updates());
        t.reset_updated();
        assert_eq!(*t.value(), 1);
        assert!(!t.has_updates());
        *t.modify() += 1;
        assert!(t.has_updates());
    }

    #[test]
    fn ignores_parties_without_provision() {
        let mut store = store_with(&["a"]);
        store.update_party_order(&resting_order("1", "b", Side::Buy, 10, 5));
        assert!(!store.has_updates());
    }

    #[test]
    fn manual_order_lifecycle() {
        let mut store = store_with(&["a"]);
        let mut order = resting_order("1", "a", Side::Buy, 10, 5);
        store.update_party_order(&order);
        assert_eq!(store.manual_orders_of(&PartyId::from("a")).len(), 1);
        store.manual_orders.reset_updated();
        store.update_party_order(&order);
        assert!(!store.manual_orders.has_updates());
        order.status = OrderStatus::Filled;
        store.update_party_order(&order);
        assert!(store.manual_orders_of(&PartyId::from("a")).is_empty());
        assert!(store.manual_orders.has_updates());
    }

    #[test]
    fn untracked_liquidity_orders_are_skipped() {
        let mut store = store_with(&["a"]);
        let mut order = resting_order("1", "a", Side::Buy, 10, 5);
        order.liquidity_provision_id = Some(ProvisionId::from("a"));
        store.update_party_order(&order);
        assert!(store.manual_orders_of(&PartyId::from("a")).is_empty());
    }

    #[test]
    fn tracked_liquidity_order_follows_fills() {
        let mut store = store_with(&["a"]);
        let mut order = resting_order("1", "a", Side::Buy, 10, 5);
        order.liquidity_provision_id = Some(ProvisionId::from("a"));
        store
            .liquidity_orders
            .modify()
            .entry(PartyId::from("a"))
            .or_default()
            .insert(OrderId::from("1"), order.clone());
        order.remaining = 2;
        store.update_party_order(&order);
        assert_eq!(store.liquidity_orders_of(&PartyId::from("a"))[0].remaining, 2);
        order.status = OrderStatus::Filled;
        store.update_party_order(&order);
        assert!(store.liquidity_orders_of(&PartyId::from("a")).is_empty());
    }

    #[test]
    fn drop_party_clears_every_index() {
        let mut store = store_with(&["a", "b"]);
        store.pending.modify().insert(PartyId::from("a"));
        store.update_party_order(&resting_order("1", "a", Side::Sell, 10, 5));
        let (lp, ids) = store.drop_party(&PartyId::from("a"));
        assert!(lp.is_some());
        assert!(ids.is_empty());
        assert!(store.sorted_pending().is_empty());
        assert!(store.manual_orders_of(&PartyId::from("a")).is_empty());
        assert_eq!(store.sorted_parties(), vec![PartyId::from("b")]);
    }
}
