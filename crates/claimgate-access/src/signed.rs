//! Signed-entitlement policy: offline authority signatures.
//!
//! The authority signs `entitlement_digest(identity)` offline and hands the
//! signature to the requester out-of-band. The policy recomputes the digest
//! from the caller's identity and verifies the signature against the
//! configured authority key, so a claim issued for A cannot be replayed
//! for B.
//!
//! Note: entitlement is effectively permanent once a valid signature for an
//! identity exists — this variant has no per-action replay ledger. The
//! settlement engine layers that on top.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

use claimgate_types::{AccountId, ClaimgateError, Result};

use crate::policy::AccessPolicy;

/// Verifies authority-signed entitlement claims.
#[derive(Debug, Clone)]
pub struct SignedEntitlementPolicy {
    authority: VerifyingKey,
}

impl SignedEntitlementPolicy {
    /// Create a policy trusting `authority`.
    #[must_use]
    pub fn new(authority: VerifyingKey) -> Self {
        Self { authority }
    }

    /// The canonical digest the authority must sign for `identity`.
    ///
    /// Pure function: `SHA-256("claimgate:entitle:v1:" || identity(32))`.
    /// Binding the identity is what stops one account's claim from
    /// authorizing another.
    #[must_use]
    pub fn entitlement_digest(identity: AccountId) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"claimgate:entitle:v1:");
        hasher.update(identity.as_bytes());
        hasher.finalize().into()
    }

    /// Parse raw signature bytes.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::MalformedSignature`] if the bytes are not a
    /// 64-byte ed25519 signature.
    pub fn parse_signature(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
            .map_err(|e| ClaimgateError::MalformedSignature { reason: e.to_string() })
    }

    /// The trusted authority key.
    #[must_use]
    pub fn authority(&self) -> &VerifyingKey {
        &self.authority
    }
}

impl AccessPolicy for SignedEntitlementPolicy {
    type Artifact = Signature;

    fn authorize(&self, caller: AccountId, artifact: &Signature) -> Result<()> {
        let digest = Self::entitlement_digest(caller);
        self.authority
            .verify(&digest, artifact)
            .map_err(|_| ClaimgateError::SignatureInvalid)
    }
}
