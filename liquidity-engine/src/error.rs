use liquidity_core::idgen::InvalidCheckpoint;
use liquidity_core::order::PeggedReference;
use liquidity_core::side::Side;
use liquidity_core::types::MarketId;

/// Every variant is deterministic: all nodes fail the same transaction the same way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("party has no liquidity provision")]
    PartyHasNoLiquidityProvision,
    #[error("liquidity provision does not exist")]
    LiquidityProvisionDoesNotExist,
    #[error("commitment amount is zero")]
    CommitmentAmountIsZero,
    #[error("empty {0} shape")]
    EmptyShape(Side),
    #[error("{side} shape size exceeds max ({max})")]
    ShapeTooLarge { side: Side, max: u64 },
    #[error("order in {0} shape without a proportion")]
    ShapeOrderWithoutProportion(Side),
    #[error("order in {side} shape pegged to {reference}")]
    InvalidShapeReference { side: Side, reference: PeggedReference },
    #[error("order in {side} shape pegged to {reference} requires a non-zero offset")]
    InvalidShapeOffset { side: Side, reference: PeggedReference },
    #[error("invalid liquidity provision fee `{0}`")]
    InvalidFee(String),
    #[error("unknown snapshot key `{0}`")]
    SnapshotKeyNotFound(String),
    #[error("snapshot belongs to market {found}, expected {expected}")]
    SnapshotMarketMismatch { expected: MarketId, found: MarketId },
    #[error("snapshot carries an unusable id generator state: {0}")]
    SnapshotIdGen(#[from] InvalidCheckpoint),
    #[error("snapshot codec failure: {0}")]
    SnapshotCodec(#[from] bincode::Error),
}
