use num_bigint::{BigInt, BigUint};
use num_rational::Ratio;
use num_traits::Zero;

pub trait Monoid {
    fn identity() -> Self;
    fn combine(self, other: Self) -> Self;
}

impl Monoid for BigUint {
    fn identity() -> Self {
        BigUint::zero()
    }
    fn combine(self, other: Self) -> Self {
        self + other
    }
}

impl Monoid for Ratio<BigInt> {
    fn identity() -> Self {
        Ratio::zero()
    }
    fn combine(self, other: Self) -> Self {
        self + other
    }
}

/// Fold any sequence of monoid values, starting from the identity.
pub fn concat<M, I>(items: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    items.into_iter().fold(M::identity(), M::combine)
}
