//! Engine configuration.
//!
//! An engine is constructed once with the trusted authority's public key and
//! the administrator identity; both are immutable thereafter.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::{AccountId, ClaimgateError, Result};

/// Construction-time configuration of a settlement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Raw bytes of the trusted signer's ed25519 public key.
    pub authority: [u8; 32],
    /// The single identity allowed to make privileged calls.
    pub administrator: AccountId,
}

impl EngineConfig {
    #[must_use]
    pub fn new(authority: [u8; 32], administrator: AccountId) -> Self {
        Self {
            authority,
            administrator,
        }
    }

    /// Parse the configured authority bytes into a verifying key.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::Configuration`] if the bytes are not a
    /// valid curve point.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.authority)
            .map_err(|e| ClaimgateError::Configuration(format!("bad authority key: {e}")))
    }
}

/// Test fixtures. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures {
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    use crate::AccountId;

    /// Fresh ed25519 keypair plus the account identity it derives.
    pub fn keypair() -> (SigningKey, AccountId) {
        let signing = SigningKey::generate(&mut OsRng);
        let account = AccountId::from(&signing.verifying_key());
        (signing, account)
    }
}
