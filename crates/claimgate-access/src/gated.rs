//! The protected value the access-control demos gate.
//!
//! Written once, generic over the policy, instead of duplicating the
//! protected-write logic per variant.

use claimgate_types::{AccountId, Result};

use crate::policy::AccessPolicy;

/// A single integer mutable only through a successful authorization check.
#[derive(Debug, Clone)]
pub struct GatedValue<P: AccessPolicy> {
    policy: P,
    value: u64,
}

impl<P: AccessPolicy> GatedValue<P> {
    /// Gate a zero-initialized value behind `policy`.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self { policy, value: 0 }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.value
    }

    /// Overwrite the value if the policy authorizes `caller`.
    ///
    /// # Errors
    /// Propagates the policy's rejection; the value is left unchanged.
    pub fn set(&mut self, caller: AccountId, artifact: &P::Artifact, new_value: u64) -> Result<()> {
        if let Err(e) = self.policy.authorize(caller, artifact) {
            tracing::warn!(%caller, error = %e, "protected write rejected");
            return Err(e);
        }
        self.value = new_value;
        Ok(())
    }

    /// The policy guarding this value.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the policy (e.g., for allow-list grants).
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}
