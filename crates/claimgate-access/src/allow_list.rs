//! Allow-list policy: an explicit administrator-maintained entitled set.
//!
//! The entitlement itself, not the action, is the protected resource here:
//! once granted, an account may write any number of times. No replay ledger.

use std::collections::HashSet;

use claimgate_types::{AccountId, ClaimgateError, Result};

use crate::policy::AccessPolicy;

/// Administrator-maintained set of entitled accounts.
///
/// Per-account state machine: `Unentitled → Entitled`, one-way,
/// administrator-triggered.
#[derive(Debug, Clone)]
pub struct AllowListPolicy {
    administrator: AccountId,
    entitled: HashSet<AccountId>,
}

impl AllowListPolicy {
    /// Create an empty allow-list owned by `administrator`.
    #[must_use]
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            entitled: HashSet::new(),
        }
    }

    /// Grant entitlement to `identity`. Administrator-only; granting twice
    /// is a no-op, not an error.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::NotAdministrator`] unless `caller` is the
    /// administrator.
    pub fn grant(&mut self, caller: AccountId, identity: AccountId) -> Result<()> {
        if caller != self.administrator {
            return Err(ClaimgateError::NotAdministrator);
        }
        self.entitled.insert(identity);
        Ok(())
    }

    /// Whether `identity` is currently entitled.
    #[must_use]
    pub fn is_entitled(&self, identity: &AccountId) -> bool {
        self.entitled.contains(identity)
    }

    /// The administrator identity.
    #[must_use]
    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    /// Number of entitled accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entitled.len()
    }

    /// Whether no account has been granted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entitled.is_empty()
    }
}

impl AccessPolicy for AllowListPolicy {
    /// Membership is checked against the caller alone; no artifact needed.
    type Artifact = ();

    fn authorize(&self, caller: AccountId, (): &()) -> Result<()> {
        if self.entitled.contains(&caller) {
            Ok(())
        } else {
            Err(ClaimgateError::NotWhitelisted)
        }
    }
}
