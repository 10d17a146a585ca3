use sha2::{Digest, Sha256};

use crate::order::Order;
use crate::types::OrderId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("id generator checkpoint of {found} bytes, expected {expected}")]
pub struct InvalidCheckpoint {
    pub expected: usize,
    pub found: usize,
}

/// Assigns order identifiers. Implementations must be a pure function of their
/// replicated inputs so every node assigns the same ids.
pub trait IdGen {
    fn set_id(&mut self, order: &mut Order);

    /// Position of the generator. Restoring it on another instance makes both continue
    /// with the same ids.
    fn checkpoint(&self) -> Vec<u8>;

    fn restore(&mut self, checkpoint: &[u8]) -> Result<(), InvalidCheckpoint>;
}

impl<G: IdGen + ?Sized> IdGen for Box<G> {
    fn set_id(&mut self, order: &mut Order) {
        (**self).set_id(order)
    }

    fn checkpoint(&self) -> Vec<u8> {
        (**self).checkpoint()
    }

    fn restore(&mut self, checkpoint: &[u8]) -> Result<(), InvalidCheckpoint> {
        (**self).restore(checkpoint)
    }
}

/// SHA-256 hash chain: each id is the hex of the next link.
#[derive(Debug, Clone)]
pub struct DeterministicIdGenerator {
    state: [u8; 32],
}

impl DeterministicIdGenerator {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { state: seed }
    }

    /// Seed from arbitrary bytes, e.g. a block hash.
    pub fn from_seed(seed: &[u8]) -> Self {
        Self::new(Sha256::digest(seed).into())
    }

    /// Last link of the chain.
    pub fn state(&self) -> [u8; 32] {
        self.state
    }

    pub fn next_id(&mut self) -> OrderId {
        self.state = Sha256::digest(self.state).into();
        OrderId::new(hex::encode(self.state))
    }
}

impl IdGen for DeterministicIdGenerator {
    fn set_id(&mut self, order: &mut Order) {
        order.id = self.next_id();
    }

    fn checkpoint(&self) -> Vec<u8> {
        self.state.to_vec()
    }

    fn restore(&mut self, checkpoint: &[u8]) -> Result<(), InvalidCheckpoint> {
        self.state = <[u8; 32]>::try_from(checkpoint).map_err(|_| InvalidCheckpoint {
            expected: 32,
            found: checkpoint.len(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::idgen::{DeterministicIdGenerator, IdGen, InvalidCheckpoint};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = DeterministicIdGenerator::from_seed(b"block-42");
        let mut b = DeterministicIdGenerator::from_seed(b"block-42");
        let xs: Vec<_> = (0..4).map(|_| a.next_id()).collect();
        let ys: Vec<_> = (0..4).map(|_| b.next_id()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs[0], xs[1]);
        assert_eq!(xs[0].as_str().len(), 64);
    }

    #[test]
    fn restored_chain_continues_where_it_stopped() {
        let mut a = DeterministicIdGenerator::from_seed(b"block-42");
        a.next_id();
        a.next_id();
        let mut b = DeterministicIdGenerator::from_seed(b"genesis");
        b.restore(&a.checkpoint()).unwrap();
        assert_eq!(b.state(), a.state());
        assert_eq!(b.next_id(), a.next_id());
    }

    #[test]
    fn short_checkpoint_is_rejected() {
        let mut gen = DeterministicIdGenerator::from_seed(b"block-42");
        let before = gen.state();
        assert_eq!(
            gen.restore(&[1, 2, 3]),
            Err(InvalidCheckpoint {
                expected: 32,
                found: 3
            })
        );
        assert_eq!(gen.state(), before);
    }

    #[test]
    fn different_seed_different_sequence() {
        let mut a = DeterministicIdGenerator::from_seed(b"block-42");
        let mut b = DeterministicIdGenerator::from_seed(b"block-43");
        assert_ne!(a.next_id(), b.next_id());
    }
}
