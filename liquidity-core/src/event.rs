use std::fmt::{Display, Formatter};

use crate::provision::LiquidityProvision;

/// Notifications published to observers. The order of events is the replay log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LiquidityProvision(LiquidityProvision),
}

impl Event {
    pub fn provision(&self) -> &LiquidityProvision {
        match self {
            Event::LiquidityProvision(lp) => lp,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::LiquidityProvision(lp) => write!(
                f,
                "LiquidityProvision(id: {}, party: {}, status: {}, commitment: {}, version: {})",
                lp.id, lp.party_id, lp.status, lp.commitment_amount, lp.version
            ),
        }
    }
}
