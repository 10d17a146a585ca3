use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::num::Price;
use crate::order::{PeggedOrder, PeggedReference};
use crate::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepriceError {
    #[error("no {0} price to peg from")]
    NoReferencePrice(PeggedReference),
    #[error("offset {offset} exceeds {reference} price {price}")]
    OffsetExceedsReference {
        reference: PeggedReference,
        offset: BigUint,
        price: Price,
    },
}

/// Book prices observed by the caller right before a reconciliation pass.
/// A zero price means that side of the book is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPrices {
    pub mark: Price,
    pub best_bid: Price,
    pub best_ask: Price,
}

impl BookPrices {
    pub fn new(mark: Price, best_bid: Price, best_ask: Price) -> Self {
        Self {
            mark,
            best_bid,
            best_ask,
        }
    }

    /// Best price on `side`, falling back to the mark price when that side is empty.
    pub fn best_or_mark(&self, side: Side) -> &Price {
        let best = match side {
            Side::Buy => &self.best_bid,
            Side::Sell => &self.best_ask,
        };
        if best.is_zero() {
            &self.mark
        } else {
            best
        }
    }

    pub fn reference_price(&self, reference: PeggedReference) -> Option<Price> {
        let price = match reference {
            PeggedReference::BestBid => self.best_bid.clone(),
            PeggedReference::BestAsk => self.best_ask.clone(),
            PeggedReference::Mid if self.best_bid.is_zero() || self.best_ask.is_zero() => return None,
            PeggedReference::Mid => (&self.best_bid + &self.best_ask) / 2u32,
        };
        (!price.is_zero()).then_some(price)
    }

    /// Resolve a peg to an absolute price. Fails when the reference side is empty
    /// or when a buy offset would take the price to zero or below.
    pub fn reprice(&self, peg: &PeggedOrder, side: Side) -> Result<Price, RepriceError> {
        let reference = self
            .reference_price(peg.reference)
            .ok_or(RepriceError::NoReferencePrice(peg.reference))?;
        match side {
            Side::Buy if peg.offset >= reference => Err(RepriceError::OffsetExceedsReference {
                reference: peg.reference,
                offset: peg.offset.clone(),
                price: reference,
            }),
            Side::Buy => Ok(reference - &peg.offset),
            Side::Sell => Ok(reference + &peg.offset),
        }
    }
}
