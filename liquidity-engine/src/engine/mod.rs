use std::collections::hash_map::Entry;

use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;

use liquidity_core::broker::Broker;
use liquidity_core::event::Event;
use liquidity_core::idgen::IdGen;
use liquidity_core::num::{display_decimal, parse_decimal, to_decimal, Decimal};
use liquidity_core::order::Order;
use liquidity_core::provision::{
    LiquidityOrderReference, LiquidityProvision, LiquidityProvisionAmendment, LiquidityProvisionStatus,
    LiquidityProvisionSubmission,
};
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::side::Side;
use liquidity_core::types::{MarketId, OrderId, PartyId, ProvisionId, Timestamp};

use crate::config::LiquidityConfig;
use crate::engine::store::{ProvisionStore, Tracked};
use crate::engine::validation::{validate_fee, validate_shape};
use crate::error::Error;
use crate::supplied::curve::ProbabilityCurve;
use crate::supplied::SuppliedEngine;

pub mod reconcile;
pub mod stake;
pub mod store;
pub mod validation;

/// Market parameters owned by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub stake_to_obligation_factor: Decimal,
    pub max_shape_size: u64,
    pub max_fee: Decimal,
}

/// Liquidity provisioning for a single market.
///
/// Every operation is synchronous and deterministic: the same sequence of calls on two
/// instances yields the same events, the same orders and the same snapshot bytes.
pub struct Engine<B, G, R, P> {
    market_id: MarketId,
    broker: B,
    pub(crate) id_gen: G,
    pub(crate) supplied: SuppliedEngine<R, P>,
    current_time: Timestamp,
    pub(crate) parameters: Tracked<Parameters>,
    pub(crate) store: ProvisionStore,
}

impl<B, G, R, P> Engine<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    pub fn new(
        config: LiquidityConfig,
        market_id: MarketId,
        broker: B,
        id_gen: G,
        risk_model: R,
        price_monitor: P,
    ) -> Self {
        Self {
            market_id,
            broker,
            id_gen,
            supplied: SuppliedEngine::new(
                risk_model,
                price_monitor,
                config.min_probability_of_trading,
                config.probability_of_trading_tau_scaling,
            ),
            current_time: Timestamp::default(),
            parameters: Tracked::new(Parameters {
                stake_to_obligation_factor: config.stake_to_obligation_factor,
                max_shape_size: config.max_shape_size,
                max_fee: config.max_fee,
            }),
            store: ProvisionStore::new(),
        }
    }

    pub fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    pub fn current_time(&self) -> Timestamp {
        self.current_time
    }

    pub fn parameters(&self) -> &Parameters {
        self.parameters.value()
    }

    pub fn supplied(&self) -> &SuppliedEngine<R, P> {
        &self.supplied
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    pub fn on_chain_time_update(&mut self, now: Timestamp) {
        self.current_time = now;
    }

    pub fn on_supplied_stake_to_obligation_factor_update(&mut self, factor: Decimal) {
        self.parameters.modify().stake_to_obligation_factor = factor;
    }

    pub fn on_maximum_liquidity_fee_factor_level_update(&mut self, max_fee: Decimal) {
        self.parameters.modify().max_fee = max_fee;
    }

    pub fn on_market_liquidity_provision_shapes_max_size_update(&mut self, max_size: u64) {
        self.parameters.modify().max_shape_size = max_size;
    }

    pub fn on_min_probability_of_trading_lp_orders_update(&mut self, value: Decimal) {
        self.supplied.on_min_probability_of_trading_update(value);
        self.parameters.touch();
    }

    pub fn on_probability_of_trading_tau_scaling_update(&mut self, value: Decimal) {
        self.supplied.on_tau_scaling_update(value);
        self.parameters.touch();
    }

    pub fn on_probability_curve_update(&mut self, curve: ProbabilityCurve) {
        self.supplied.on_probability_curve_update(Some(curve));
        self.parameters.touch();
    }

    pub fn validate_liquidity_provision_submission(
        &self,
        submission: &LiquidityProvisionSubmission,
        zero_commitment_is_valid: bool,
    ) -> Result<(), Error> {
        self.check_submission(submission, zero_commitment_is_valid).map(|_| ())
    }

    /// Create, update or (on zero commitment) cancel the provision of `party`.
    /// Returns ids of generated orders the caller has to pull from the book.
    pub fn submit_liquidity_provision(
        &mut self,
        submission: LiquidityProvisionSubmission,
        party: &PartyId,
        id: ProvisionId,
    ) -> Result<Vec<OrderId>, Error> {
        let fee = match self.check_submission(&submission, true) {
            Ok(fee) => fee,
            Err(err) => {
                debug!("Rejecting liquidity provision {} of {}: {}", id, party, err);
                self.reject_submission(&submission, party, id);
                return Err(err);
            }
        };

        if submission.commitment_amount.is_zero() {
            if !self.store.provisions.contains_key(party) {
                debug!("Zero commitment from {} without a liquidity provision", party);
                self.reject_submission(&submission, party, id);
                return Err(Error::LiquidityProvisionDoesNotExist);
            }
            return self.teardown(party, LiquidityProvisionStatus::Cancelled, true);
        }

        let now = self.current_time;
        let to_cancel = self.store.take_liquidity_orders(party);
        let LiquidityProvisionSubmission {
            commitment_amount,
            buys,
            sells,
            reference,
            ..
        } = submission;
        let is_new = !self.store.provisions.contains_key(party);
        let provision = {
            let lp = match self.store.provisions.modify().entry(party.clone()) {
                Entry::Occupied(entry) => {
                    let lp = entry.into_mut();
                    lp.version += 1;
                    lp.updated_at = now;
                    if lp.status != LiquidityProvisionStatus::Active {
                        lp.status = LiquidityProvisionStatus::Undeployed;
                    }
                    lp
                }
                Entry::Vacant(entry) => entry.insert(LiquidityProvision {
                    id,
                    market_id: self.market_id.clone(),
                    party_id: party.clone(),
                    created_at: now,
                    updated_at: now,
                    commitment_amount: BigUint::zero(),
                    fee: Decimal::zero(),
                    buys: Vec::new(),
                    sells: Vec::new(),
                    version: 1,
                    status: LiquidityProvisionStatus::Undeployed,
                    reference: String::new(),
                }),
            };
            lp.commitment_amount = commitment_amount;
            lp.fee = fee;
            lp.reference = reference;
            lp.reshape(buys, sells);
            lp.clone()
        };
        if is_new {
            self.store.pending.modify().insert(party.clone());
        }
        debug!(
            "Liquidity provision {} of {} {} (commitment: {}, fee: {})",
            provision.id,
            party,
            if is_new { "created" } else { "updated" },
            provision.commitment_amount,
            display_decimal(&provision.fee)
        );
        self.broker.send(Event::LiquidityProvision(provision));
        Ok(to_cancel)
    }

    pub fn can_amend(&self, amendment: &LiquidityProvisionAmendment, party: &PartyId) -> Result<(), Error> {
        self.check_amendment(amendment, party).map(|_| ())
    }

    /// Apply `amendment` in place. Returns (sorted) ids of every generated order the party had
    /// deployed; the party has none until the next reconciliation pass.
    pub fn amend_liquidity_provision(
        &mut self,
        amendment: LiquidityProvisionAmendment,
        party: &PartyId,
    ) -> Result<Vec<OrderId>, Error> {
        let fee = self.check_amendment(&amendment, party)?;
        if amendment.commitment_amount.as_ref().map_or(false, Zero::is_zero) {
            return self.teardown(party, LiquidityProvisionStatus::Cancelled, true);
        }
        let now = self.current_time;
        let to_cancel = self.store.take_liquidity_orders(party);
        let provision = {
            let provisions = self.store.provisions.modify();
            let lp = provisions
                .get_mut(party)
                .ok_or(Error::PartyHasNoLiquidityProvision)?;
            if let Some(commitment) = amendment.commitment_amount {
                lp.commitment_amount = commitment;
            }
            if let Some(fee) = fee {
                lp.fee = fee;
            }
            if let Some(reference) = amendment.reference {
                lp.reference = reference;
            }
            for side in Side::BOTH {
                let replacement = match side {
                    Side::Buy => amendment.buys.as_ref(),
                    Side::Sell => amendment.sells.as_ref(),
                };
                let slots = lp.shape_mut(side);
                match replacement {
                    Some(shape) => *slots = shape.iter().cloned().map(LiquidityOrderReference::from).collect(),
                    None => slots.iter_mut().for_each(|slot| slot.order_id = None),
                }
            }
            lp.version += 1;
            lp.updated_at = now;
            if lp.status != LiquidityProvisionStatus::Active {
                lp.status = LiquidityProvisionStatus::Undeployed;
            }
            lp.clone()
        };
        debug!(
            "Liquidity provision {} of {} amended to version {}, {} orders to cancel",
            provision.id,
            party,
            provision.version,
            to_cancel.len()
        );
        self.broker.send(Event::LiquidityProvision(provision));
        Ok(to_cancel)
    }

    /// Party walks away from its commitment. Modeled as a rejection.
    pub fn cancel_liquidity_provision(&mut self, party: &PartyId) -> Result<Vec<OrderId>, Error> {
        self.teardown(party, LiquidityProvisionStatus::Rejected, false)
    }

    /// Closed-out party.
    pub fn stop_liquidity_provision(&mut self, party: &PartyId) -> Result<Vec<OrderId>, Error> {
        self.teardown(party, LiquidityProvisionStatus::Stopped, false)
    }

    pub fn is_liquidity_provider(&self, party: &PartyId) -> bool {
        self.store.provisions.contains_key(party)
    }

    pub fn is_liquidity_order(&self, party: &PartyId, order: &OrderId) -> bool {
        self.store
            .liquidity_orders
            .get(party)
            .map_or(false, |orders| orders.contains_key(order))
    }

    /// Generated orders currently deployed for `party`, by order id.
    pub fn liquidity_orders(&self, party: &PartyId) -> Vec<&Order> {
        self.store.liquidity_orders_of(party)
    }

    /// Parties whose provision is not `Active`, sorted.
    pub fn inactive_parties(&self) -> Vec<PartyId> {
        self.store
            .sorted_provisions()
            .into_iter()
            .filter(|lp| lp.status != LiquidityProvisionStatus::Active)
            .map(|lp| lp.party_id.clone())
            .collect()
    }

    pub fn is_pending(&self, party: &PartyId) -> bool {
        self.store.pending.contains(party)
    }

    pub fn remove_pending(&mut self, party: &PartyId) {
        if self.store.pending.contains(party) {
            self.store.pending.modify().remove(party);
        }
    }

    pub fn liquidity_provision_by_party_id(&self, party: &PartyId) -> Option<&LiquidityProvision> {
        self.store.provisions.get(party)
    }

    /// Live provisions ordered by party.
    pub fn provisions(&self) -> Vec<&LiquidityProvision> {
        self.store.sorted_provisions()
    }

    /// `commitment × stake_to_obligation_factor`
    pub fn obligation(&self, party: &PartyId) -> Option<Decimal> {
        self.store
            .provisions
            .get(party)
            .map(|lp| self.obligation_of(lp))
    }

    pub(crate) fn obligation_of(&self, lp: &LiquidityProvision) -> Decimal {
        to_decimal(&lp.commitment_amount) * &self.parameters.stake_to_obligation_factor
    }

    fn check_submission(
        &self,
        submission: &LiquidityProvisionSubmission,
        zero_commitment_is_valid: bool,
    ) -> Result<Decimal, Error> {
        if submission.commitment_amount.is_zero() {
            return if zero_commitment_is_valid {
                Ok(Decimal::zero())
            } else {
                Err(Error::CommitmentAmountIsZero)
            };
        }
        let fee = validate_fee(&submission.fee, &self.parameters.max_fee)?;
        validate_shape(&submission.buys, Side::Buy, self.parameters.max_shape_size)?;
        validate_shape(&submission.sells, Side::Sell, self.parameters.max_shape_size)?;
        Ok(fee)
    }

    fn check_amendment(
        &self,
        amendment: &LiquidityProvisionAmendment,
        party: &PartyId,
    ) -> Result<Option<Decimal>, Error> {
        if !self.store.provisions.contains_key(party) {
            return Err(Error::PartyHasNoLiquidityProvision);
        }
        if amendment.commitment_amount.as_ref().map_or(false, Zero::is_zero) {
            return Ok(None);
        }
        let fee = amendment
            .fee
            .as_deref()
            .map(|fee| validate_fee(fee, &self.parameters.max_fee))
            .transpose()?;
        if let Some(buys) = &amendment.buys {
            validate_shape(buys, Side::Buy, self.parameters.max_shape_size)?;
        }
        if let Some(sells) = &amendment.sells {
            validate_shape(sells, Side::Sell, self.parameters.max_shape_size)?;
        }
        Ok(fee)
    }

    fn teardown(
        &mut self,
        party: &PartyId,
        status: LiquidityProvisionStatus,
        zero_commitment: bool,
    ) -> Result<Vec<OrderId>, Error> {
        if !self.store.provisions.contains_key(party) {
            return Err(Error::PartyHasNoLiquidityProvision);
        }
        let (provision, to_cancel) = self.store.drop_party(party);
        let mut lp = provision.ok_or(Error::PartyHasNoLiquidityProvision)?;
        lp.status = status;
        lp.updated_at = self.current_time;
        if zero_commitment {
            lp.commitment_amount = BigUint::zero();
        }
        debug!(
            "Liquidity provision {} of {} is {}, {} orders to cancel",
            lp.id,
            party,
            status,
            to_cancel.len()
        );
        self.broker.send(Event::LiquidityProvision(lp));
        Ok(to_cancel)
    }

    /// Nothing is stored, the event is the only trace of the attempt.
    fn reject_submission(&mut self, submission: &LiquidityProvisionSubmission, party: &PartyId, id: ProvisionId) {
        let mut lp = LiquidityProvision {
            id,
            market_id: self.market_id.clone(),
            party_id: party.clone(),
            created_at: self.current_time,
            updated_at: self.current_time,
            commitment_amount: submission.commitment_amount.clone(),
            fee: parse_decimal(&submission.fee).unwrap_or_else(|_| Decimal::zero()),
            buys: Vec::new(),
            sells: Vec::new(),
            version: 1,
            status: LiquidityProvisionStatus::Rejected,
            reference: submission.reference.clone(),
        };
        lp.reshape(submission.buys.clone(), submission.sells.clone());
        self.broker.send(Event::LiquidityProvision(lp));
    }
}


#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};
    use num_rational::BigRational;

    use liquidity_core::order::PeggedReference;
    use liquidity_core::provision::{LiquidityOrder, LiquidityProvisionAmendment, LiquidityProvisionStatus};
    use liquidity_core::types::{PartyId, ProvisionId, Timestamp};
    use test_utils::broker::RecordingBroker;
    use test_utils::shapes::{buy_shape, sell_shape, submission, submission_with};

    use crate::engine::testing::test_engine;
    use crate::error::Error;

    #[test]
    fn submission_crud() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");
        let id = ProvisionId::from("some-id");
        engine.on_chain_time_update(Timestamp::from(100));

        assert!(engine.liquidity_provision_by_party_id(&party).is_none());
        assert!(!engine.is_liquidity_provider(&party));

        assert_eq!(
            engine.submit_liquidity_provision(submission(100, "0.5"), &party, id.clone()).unwrap(),
            vec![]
        );
        let lp = engine.liquidity_provision_by_party_id(&party).unwrap();
        assert_eq!(lp.id, id);
        assert_eq!(lp.status, LiquidityProvisionStatus::Undeployed);
        assert_eq!(lp.buys.len(), 2);
        assert_eq!(lp.sells.len(), 1);
        assert_eq!(lp.created_at, Timestamp::from(100));
        assert!(engine.is_liquidity_provider(&party));
        assert!(engine.is_pending(&party));
        assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Undeployed);

        engine.on_chain_time_update(Timestamp::from(200));
        engine
            .submit_liquidity_provision(submission(200, "0.5"), &party, ProvisionId::from("ignored"))
            .unwrap();
        let lp = engine.liquidity_provision_by_party_id(&party).unwrap();
        assert_eq!(lp.id, id);
        assert_eq!(lp.version, 2);
        assert_eq!(lp.updated_at, Timestamp::from(200));
        assert_eq!(lp.commitment_amount, BigUint::from(200u32));

        engine
            .submit_liquidity_provision(submission(0, "0.5"), &party, id.clone())
            .unwrap();
        let cancelled = broker.last_provision().unwrap();
        assert_eq!(cancelled.status, LiquidityProvisionStatus::Cancelled);
        assert_eq!(cancelled.commitment_amount, BigUint::from(0u32));
        assert!(engine.liquidity_provision_by_party_id(&party).is_none());
        assert!(!engine.is_pending(&party));
        assert_eq!(broker.len(), 3);
    }

    #[test]
    fn zero_commitment_without_provision_is_rejected() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");
        let res = engine.submit_liquidity_provision(submission(0, "0.5"), &party, ProvisionId::from("id"));
        assert!(matches!(res, Err(Error::LiquidityProvisionDoesNotExist)));
        assert_eq!(broker.len(), 1);
        assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Rejected);
        assert!(engine.provisions().is_empty());
    }

    #[test]
    fn missing_shape_is_rejected_and_recorded() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");

        for (buys, sells) in [(vec![], sell_shape()), (buy_shape(), vec![]), (vec![], vec![])] {
            let res = engine.submit_liquidity_provision(
                submission_with(10, "0.01", buys, sells),
                &party,
                ProvisionId::from("id"),
            );
            assert!(matches!(res, Err(Error::EmptyShape(_))));
            assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Rejected);
        }
        assert_eq!(broker.len(), 3);
        assert!(engine.liquidity_provision_by_party_id(&party).is_none());
    }

    #[test]
    fn rejected_update_keeps_live_provision() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");
        engine
            .submit_liquidity_provision(submission(10, "0.01"), &party, ProvisionId::from("id"))
            .unwrap();
        let res = engine.submit_liquidity_provision(submission(10, "2"), &party, ProvisionId::from("id"));
        assert!(matches!(res, Err(Error::InvalidFee(_))));
        let lp = engine.liquidity_provision_by_party_id(&party).unwrap();
        assert_eq!(lp.version, 1);
        assert_eq!(lp.fee, BigRational::new(BigInt::from(1), BigInt::from(100)));
    }

    #[test]
    fn zero_commitment_only_valid_when_allowed() {
        let engine = test_engine(RecordingBroker::new());
        assert!(engine
            .validate_liquidity_provision_submission(&submission(0, ""), true)
            .is_ok());
        assert!(matches!(
            engine.validate_liquidity_provision_submission(&submission(0, ""), false),
            Err(Error::CommitmentAmountIsZero)
        ));
    }

    #[test]
    fn amend_and_cancel_need_a_provision() {
        let mut engine = test_engine(RecordingBroker::new());
        let party = PartyId::from("party-1");
        assert!(matches!(
            engine.amend_liquidity_provision(LiquidityProvisionAmendment::default(), &party),
            Err(Error::PartyHasNoLiquidityProvision)
        ));
        assert!(matches!(
            engine.cancel_liquidity_provision(&party),
            Err(Error::PartyHasNoLiquidityProvision)
        ));
        assert!(matches!(
            engine.stop_liquidity_provision(&party),
            Err(Error::PartyHasNoLiquidityProvision)
        ));
    }

    #[test]
    fn amendment_applies_only_given_fields() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");
        engine
            .submit_liquidity_provision(submission(10, "0.01"), &party, ProvisionId::from("id"))
            .unwrap();
        let bad = LiquidityProvisionAmendment {
            sells: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(engine.can_amend(&bad, &party), Err(Error::EmptyShape(_))));

        let amendment = LiquidityProvisionAmendment {
            fee: Some("0.2".to_owned()),
            buys: Some(vec![LiquidityOrder::new(PeggedReference::BestBid, 3u32, 1)]),
            ..Default::default()
        };
        assert!(engine.can_amend(&amendment, &party).is_ok());
        assert_eq!(engine.amend_liquidity_provision(amendment, &party).unwrap(), vec![]);
        let lp = engine.liquidity_provision_by_party_id(&party).unwrap();
        assert_eq!(lp.fee, BigRational::new(BigInt::from(1), BigInt::from(5)));
        assert_eq!(lp.commitment_amount, BigUint::from(10u32));
        assert_eq!(lp.buys.len(), 1);
        assert_eq!(lp.sells.len(), 1);
        assert_eq!(lp.version, 2);
        assert_eq!(broker.len(), 2);
    }

    #[test]
    fn amendment_to_zero_commitment_cancels() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let party = PartyId::from("party-1");
        engine
            .submit_liquidity_provision(submission(10, "0.01"), &party, ProvisionId::from("id"))
            .unwrap();
        let amendment = LiquidityProvisionAmendment {
            commitment_amount: Some(BigUint::from(0u32)),
            ..Default::default()
        };
        engine.amend_liquidity_provision(amendment, &party).unwrap();
        assert!(!engine.is_liquidity_provider(&party));
        assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Cancelled);
    }

    #[test]
    fn cancel_and_stop_drop_the_party() {
        let broker = RecordingBroker::new();
        let mut engine = test_engine(broker.clone());
        let (p1, p2) = (PartyId::from("party-1"), PartyId::from("party-2"));
        for p in [&p1, &p2] {
            engine
                .submit_liquidity_provision(submission(10, "0.01"), p, ProvisionId::from(p.as_str()))
                .unwrap();
        }
        assert_eq!(engine.inactive_parties(), vec![p1.clone(), p2.clone()]);

        engine.cancel_liquidity_provision(&p1).unwrap();
        assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Rejected);
        engine.stop_liquidity_provision(&p2).unwrap();
        assert_eq!(broker.last_provision().unwrap().status, LiquidityProvisionStatus::Stopped);
        assert!(engine.provisions().is_empty());
        assert!(!engine.is_pending(&p1));
    }

    #[test]
    fn remove_pending_is_idempotent() {
        let mut engine = test_engine(RecordingBroker::new());
        let party = PartyId::from("party-1");
        engine
            .submit_liquidity_provision(submission(10, "0.01"), &party, ProvisionId::from("id"))
            .unwrap();
        engine.remove_pending(&party);
        engine.remove_pending(&party);
        assert!(!engine.is_pending(&party));
        assert!(engine.is_liquidity_provider(&party));
    }

    #[test]
    fn obligation_scales_commitment() {
        let mut engine = test_engine(RecordingBroker::new());
        let party = PartyId::from("party-1");
        engine
            .submit_liquidity_provision(submission(10, "0.01"), &party, ProvisionId::from("id"))
            .unwrap();
        engine.on_supplied_stake_to_obligation_factor_update(BigRational::new(BigInt::from(3), BigInt::from(2)));
        assert_eq!(engine.obligation(&party), Some(BigRational::from_integer(BigInt::from(15))));
        assert_eq!(engine.obligation(&PartyId::from("nobody")), None);
    }

    #[test]
    fn shape_size_limit_follows_parameter() {
        let mut engine = test_engine(RecordingBroker::new());
        engine.on_market_liquidity_provision_shapes_max_size_update(1);
        assert!(matches!(
            engine.validate_liquidity_provision_submission(&submission(10, "0.01"), false),
            Err(Error::ShapeTooLarge { max: 1, .. })
        ));
    }
}
