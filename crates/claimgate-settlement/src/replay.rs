//! Replay ledger — the consumption record behind single-use claims.
//!
//! Two monotone sets: consumed claim fingerprints and consumed raw nonces.
//! A fingerprint covers every parameter of a claim, so replaying the exact
//! (parameters, signature) pair is caught by the fingerprint set; reusing a
//! nonce under a *fresh* signature with different parameters is caught by
//! the nonce set.
//!
//! Insertion is monotone: once consumed, never un-consumed. There is no
//! eviction — dropping an old entry would re-enable the replay it blocks.

use std::collections::HashSet;

use claimgate_types::{ClaimFingerprint, ClaimgateError, Nonce, Result};

/// Records which authorization artifacts have been consumed.
///
/// State machine per entry: `Unused → Consumed`, one-way.
#[derive(Debug, Default)]
pub struct ReplayLedger {
    fingerprints: HashSet<ClaimFingerprint>,
    nonces: HashSet<u64>,
}

impl ReplayLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that neither the fingerprint nor the nonce has been consumed.
    /// Mutates nothing: a failed operation must never mark a claim used.
    ///
    /// # Errors
    /// [`ClaimgateError::ClaimAlreadyUsed`] for a known fingerprint,
    /// [`ClaimgateError::NonceAlreadyUsed`] for a known nonce.
    pub fn check(&self, fingerprint: ClaimFingerprint, nonce: Nonce) -> Result<()> {
        if self.fingerprints.contains(&fingerprint) {
            return Err(ClaimgateError::ClaimAlreadyUsed { fingerprint });
        }
        if self.nonces.contains(&nonce.0) {
            return Err(ClaimgateError::NonceAlreadyUsed { nonce: nonce.0 });
        }
        Ok(())
    }

    /// Mark a claim consumed. Called only after the settlement action
    /// succeeded.
    ///
    /// # Errors
    /// Same as [`check`](Self::check); consuming twice is a defect the
    /// caller must never trigger.
    pub fn consume(&mut self, fingerprint: ClaimFingerprint, nonce: Nonce) -> Result<()> {
        self.check(fingerprint, nonce)?;
        self.fingerprints.insert(fingerprint);
        self.nonces.insert(nonce.0);
        Ok(())
    }

    /// Whether this fingerprint has been consumed.
    #[must_use]
    pub fn is_consumed(&self, fingerprint: &ClaimFingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// Whether this raw nonce has been consumed.
    #[must_use]
    pub fn is_nonce_used(&self, nonce: Nonce) -> bool {
        self.nonces.contains(&nonce.0)
    }

    /// Number of consumed claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// Whether nothing has been consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}
