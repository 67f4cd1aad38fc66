//! Observable settlement events.
//!
//! The engine emits one event per completed asset movement. Consumers
//! (indexers, UIs) rely on these for off-chain bookkeeping; the only
//! delivery guarantee is "emitted iff the call succeeded".

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, RegistryId, TokenId};

/// What happened: one completed asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementAction {
    /// A non-fungible unit was minted to the recipient.
    NonFungibleMinted {
        recipient: AccountId,
        registry: RegistryId,
        token: TokenId,
    },
    /// A custodied non-fungible unit was delivered to the recipient.
    NonFungibleTransferred {
        recipient: AccountId,
        registry: RegistryId,
        token: TokenId,
    },
    /// A fungible amount was paid out of custody to the recipient.
    FungiblePaid {
        recipient: AccountId,
        registry: RegistryId,
        amount: Decimal,
    },
}

impl std::fmt::Display for SettlementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFungibleMinted { .. } => write!(f, "NON_FUNGIBLE_MINTED"),
            Self::NonFungibleTransferred { .. } => write!(f, "NON_FUNGIBLE_TRANSFERRED"),
            Self::FungiblePaid { .. } => write!(f, "FUNGIBLE_PAID"),
        }
    }
}

/// A settlement event as surfaced to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEvent {
    /// The completed asset movement.
    pub action: SettlementAction,
    /// When the engine completed it.
    pub occurred_at: DateTime<Utc>,
}

impl SettlementEvent {
    #[must_use]
    pub fn now(action: SettlementAction) -> Self {
        Self {
            action,
            occurred_at: Utc::now(),
        }
    }
}
