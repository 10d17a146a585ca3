use num_bigint::BigUint;
use num_traits::Zero;

use algebra_core::monoid::concat;
use liquidity_core::broker::Broker;
use liquidity_core::idgen::IdGen;
use liquidity_core::num::Decimal;
use liquidity_core::risk::{PriceMonitor, RiskModel};

use crate::engine::Engine;

impl<B, G, R, P> Engine<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    /// Total commitment of live provisions.
    pub fn calculate_supplied_stake(&self) -> BigUint {
        concat(self.store.provisions.values().map(|lp| lp.commitment_amount.clone()))
    }

    /// Lowest fee at which the cheapest provisions together commit at least `target`.
    /// Falls back to the highest fee when the whole market falls short.
    pub fn fee_for_target(&self, target: &BigUint) -> Decimal {
        let mut provisions = self.store.sorted_provisions();
        provisions.sort_by(|a, b| a.fee.cmp(&b.fee));
        let mut cumulative = BigUint::zero();
        for lp in &provisions {
            cumulative += &lp.commitment_amount;
            if cumulative >= *target {
                return lp.fee.clone();
            }
        }
        provisions.last().map_or_else(Decimal::zero, |lp| lp.fee.clone())
    }
}
