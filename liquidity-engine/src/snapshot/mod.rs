//! Deterministic checkpointing of an [Engine].
//!
//! State is split in five keys, each namespaced by market. Bytes for a key are rebuilt only
//! after the data behind it changed; otherwise the previous bytes (and hash) are returned as is.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::trace;
use sha2::{Digest, Sha256};

use liquidity_core::broker::Broker;
use liquidity_core::idgen::IdGen;
use liquidity_core::risk::{PriceMonitor, RiskModel};
use liquidity_core::types::MarketId;

use crate::engine::Engine;
use crate::error::Error;

mod payload;

pub const NAMESPACE: &str = "liquidity";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Parameters,
    PartiesLiquidityOrders,
    PartiesOrders,
    PendingProvisions,
    Provisions,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 5] = [
        SnapshotKey::Parameters,
        SnapshotKey::PartiesLiquidityOrders,
        SnapshotKey::PartiesOrders,
        SnapshotKey::PendingProvisions,
        SnapshotKey::Provisions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SnapshotKey::Parameters => "parameters",
            SnapshotKey::PartiesLiquidityOrders => "partiesLiquidityOrders",
            SnapshotKey::PartiesOrders => "partiesOrders",
            SnapshotKey::PendingProvisions => "pendingProvisions",
            SnapshotKey::Provisions => "provisions",
        }
    }

    pub fn for_market(self, market_id: &MarketId) -> String {
        format!("{}:{}", self.name(), market_id)
    }
}

impl Display for SnapshotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// SHA-256 of serialized state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StateHash([u8; 32]);

impl StateHash {
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for StateHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Debug, Clone)]
struct CachedState {
    bytes: Vec<u8>,
    hash: StateHash,
}

pub struct SnapshotEngine<B, G, R, P> {
    engine: Engine<B, G, R, P>,
    keys: Vec<String>,
    cache: HashMap<SnapshotKey, CachedState>,
}

impl<B, G, R, P> SnapshotEngine<B, G, R, P>
where
    B: Broker,
    G: IdGen,
    R: RiskModel,
    P: PriceMonitor,
{
    pub fn new(engine: Engine<B, G, R, P>) -> Self {
        let keys = SnapshotKey::ALL
            .iter()
            .map(|key| key.for_market(engine.market_id()))
            .collect();
        Self {
            engine,
            keys,
            cache: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &Engine<B, G, R, P> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<B, G, R, P> {
        &mut self.engine
    }

    pub fn into_inner(self) -> Engine<B, G, R, P> {
        self.engine
    }

    pub fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    /// All keys of this market, in fixed order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn get_hash(&mut self, key: &str) -> Result<StateHash, Error> {
        let key = self.resolve(key)?;
        Ok(self.refresh(key)?.hash)
    }

    pub fn get_state(&mut self, key: &str) -> Result<Vec<u8>, Error> {
        let key = self.resolve(key)?;
        Ok(self.refresh(key)?.bytes.clone())
    }

    /// Rebuild the index behind `key` from `state`. Only meant for a freshly built engine.
    pub fn load_state(&mut self, key: &str, state: &[u8]) -> Result<(), Error> {
        let key = self.resolve(key)?;
        self.engine.restore_state(key, state)?;
        self.cache.remove(&key);
        trace!("Snapshot::load_state({}) <- {} bytes", key, state.len());
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<SnapshotKey, Error> {
        self.keys
            .iter()
            .position(|known| known == key)
            .map(|ix| SnapshotKey::ALL[ix])
            .ok_or_else(|| Error::SnapshotKeyNotFound(key.to_owned()))
    }

    fn refresh(&mut self, key: SnapshotKey) -> Result<&CachedState, Error> {
        let stale = self.engine.has_updates(key) || !self.cache.contains_key(&key);
        if stale {
            let bytes = self.engine.serialize_state(key)?;
            let hash = StateHash::of(&bytes);
            trace!("Snapshot::refresh({}) -> {} bytes, {}", key, bytes.len(), hash);
            self.engine.reset_updated(key);
            self.cache.insert(key, CachedState { bytes, hash });
        }
        self.cache
            .get(&key)
            .ok_or_else(|| Error::SnapshotKeyNotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use liquidity_core::types::MarketId;
    use test_utils::broker::RecordingBroker;

    use crate::engine::testing::test_engine;
    use crate::error::Error;
    use crate::snapshot::{SnapshotEngine, SnapshotKey, StateHash};

    #[test]
    fn keys_are_namespaced_by_market() {
        let snap = SnapshotEngine::new(test_engine(RecordingBroker::new()));
        assert_eq!(snap.namespace(), "liquidity");
        assert_eq!(snap.keys().len(), 5);
        assert_eq!(snap.keys()[0], "parameters:market-id");
        assert_eq!(snap.keys()[4], SnapshotKey::Provisions.for_market(&MarketId::from("market-id")));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut snap = SnapshotEngine::new(test_engine(RecordingBroker::new()));
        assert!(matches!(snap.get_hash("provisions:other"), Err(Error::SnapshotKeyNotFound(_))));
        assert!(matches!(snap.load_state("nope", &[]), Err(Error::SnapshotKeyNotFound(_))));
    }

    #[test]
    fn hash_matches_state() {
        let mut snap = SnapshotEngine::new(test_engine(RecordingBroker::new()));
        let key = snap.keys()[0].clone();
        let state = snap.get_state(&key).unwrap();
        assert_eq!(snap.get_hash(&key).unwrap(), StateHash::of(&state));
        assert_eq!(snap.get_hash(&key).unwrap().to_string().len(), 64);
    }

    #[test]
    fn garbage_state_is_rejected() {
        let mut snap = SnapshotEngine::new(test_engine(RecordingBroker::new()));
        let key = snap.keys()[4].clone();
        assert!(matches!(snap.load_state(&key, &[1, 2, 3]), Err(Error::SnapshotCodec(_))));
    }
}
