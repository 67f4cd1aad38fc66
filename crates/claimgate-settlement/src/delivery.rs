//! Delivery tracker — per-token one-way `Held → Delivered` flags.
//!
//! Tracked independently of the replay ledger: a single token must never be
//! deliverable twice, no matter how many distinct signatures reference it.

use std::collections::HashSet;

use claimgate_types::{ClaimgateError, RegistryId, Result, TokenId};

/// Records which custodied tokens have already been delivered.
#[derive(Debug, Default)]
pub struct DeliveryTracker {
    delivered: HashSet<(RegistryId, TokenId)>,
}

impl DeliveryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the token is still deliverable. Mutates nothing.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::TokenAlreadyDelivered`] if it was moved by
    /// a prior authorized claim.
    pub fn check(&self, registry: RegistryId, token: TokenId) -> Result<()> {
        if self.delivered.contains(&(registry, token)) {
            return Err(ClaimgateError::TokenAlreadyDelivered { registry, token });
        }
        Ok(())
    }

    /// Flip the token to `Delivered`. One-way.
    pub fn mark_delivered(&mut self, registry: RegistryId, token: TokenId) {
        self.delivered.insert((registry, token));
    }

    /// Whether the token has been delivered.
    #[must_use]
    pub fn is_delivered(&self, registry: RegistryId, token: TokenId) -> bool {
        self.delivered.contains(&(registry, token))
    }

    /// Number of delivered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delivered.len()
    }

    /// Whether nothing has been delivered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty()
    }
}
