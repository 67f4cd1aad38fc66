//! The signature-authorized settlement engine.
//!
//! Every operation follows the same sequence:
//!
//! ```text
//! recompute digest → verify signature → check replay ledger
//!   → preflight every precondition → act → mark consumed → emit events
//! ```
//!
//! All checks precede all mutations, so any failure aborts with zero state
//! change — in particular, a failed call never marks its claim consumed.
//! The engine takes `&mut self` on every operation: the substrate serializes
//! calls, and check-then-act within one call is therefore race-free.

use std::collections::HashMap;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use rust_decimal::Decimal;

use claimgate_registry::{FungibleRegistry, NonFungibleRegistry};
use claimgate_types::{
    AccountId, ClaimFingerprint, ClaimgateError, EngineConfig, Nonce, RegistryId, Result,
    SettlementAction, SettlementClaim, SettlementEvent, TokenId,
};

use crate::delivery::DeliveryTracker;
use crate::replay::ReplayLedger;

/// Authorizes and atomically executes asset movements.
///
/// The engine exclusively owns its replay ledger, delivery tracker, and
/// authority configuration. Attached registries are external collaborators
/// reached through capability handles; within each fungible registry the
/// engine custodies a balance under its own `custody` account.
pub struct SettlementEngine {
    authority: VerifyingKey,
    administrator: AccountId,
    /// The engine's own account inside attached registries.
    custody: AccountId,
    replay: ReplayLedger,
    delivery: DeliveryTracker,
    fungibles: HashMap<RegistryId, Box<dyn FungibleRegistry>>,
    non_fungibles: HashMap<RegistryId, Box<dyn NonFungibleRegistry>>,
}

impl SettlementEngine {
    /// Construct an engine from its immutable configuration.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::Configuration`] if the authority bytes are
    /// not a valid public key.
    pub fn new(config: &EngineConfig, custody: AccountId) -> Result<Self> {
        Ok(Self {
            authority: config.verifying_key()?,
            administrator: config.administrator,
            custody,
            replay: ReplayLedger::new(),
            delivery: DeliveryTracker::new(),
            fungibles: HashMap::new(),
            non_fungibles: HashMap::new(),
        })
    }

    // =====================================================================
    // Privileged operations (administrator-gated)
    // =====================================================================

    /// Attach a fungible registry under its own handle. Admin-only.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::RegistryAlreadyAttached`] if the handle is
    /// taken — replacing a live ledger would orphan its balances.
    pub fn attach_fungible(
        &mut self,
        caller: AccountId,
        registry: Box<dyn FungibleRegistry>,
    ) -> Result<RegistryId> {
        self.require_admin(caller)?;
        let id = registry.id();
        if self.fungibles.contains_key(&id) {
            return Err(ClaimgateError::RegistryAlreadyAttached(id));
        }
        self.fungibles.insert(id, registry);
        Ok(id)
    }

    /// Attach a non-fungible registry under its own handle. Admin-only.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::RegistryAlreadyAttached`] if the handle is
    /// taken — replacing a live ledger would orphan its tokens and delivery
    /// flags.
    pub fn attach_non_fungible(
        &mut self,
        caller: AccountId,
        registry: Box<dyn NonFungibleRegistry>,
    ) -> Result<RegistryId> {
        self.require_admin(caller)?;
        let id = registry.id();
        if self.non_fungibles.contains_key(&id) {
            return Err(ClaimgateError::RegistryAlreadyAttached(id));
        }
        self.non_fungibles.insert(id, registry);
        Ok(id)
    }

    /// Deposit into the engine's custody balance in a fungible registry.
    /// Admin-only.
    ///
    /// # Errors
    /// `NotAdministrator`, `NonPositiveAmount`, `RegistryNotFound`.
    pub fn fund_custody(
        &mut self,
        caller: AccountId,
        registry: RegistryId,
        amount: Decimal,
    ) -> Result<()> {
        self.require_admin(caller)?;
        if amount <= Decimal::ZERO {
            return Err(ClaimgateError::NonPositiveAmount { amount });
        }
        let custody = self.custody;
        let ledger = self
            .fungibles
            .get_mut(&registry)
            .ok_or(ClaimgateError::RegistryNotFound(registry))?;
        ledger.deposit(custody, amount)?;
        tracing::debug!(%registry, %amount, "custody funded");
        Ok(())
    }

    fn require_admin(&self, caller: AccountId) -> Result<()> {
        if caller == self.administrator {
            Ok(())
        } else {
            Err(ClaimgateError::NotAdministrator)
        }
    }

    // =====================================================================
    // Authorized settlement operations
    // =====================================================================

    /// Mint one non-fungible unit to `recipient`.
    ///
    /// # Errors
    /// `SignatureInvalid`, `ClaimAlreadyUsed` / `NonceAlreadyUsed`,
    /// `RegistryNotFound`, `TokenAlreadyMinted`. On any error nothing is
    /// mutated and the claim stays unconsumed.
    pub fn mint_non_fungible(
        &mut self,
        recipient: AccountId,
        registry: RegistryId,
        token: TokenId,
        nonce: Nonce,
        signature: &Signature,
    ) -> Result<SettlementEvent> {
        let claim = SettlementClaim::mint(recipient, registry, token, nonce);
        let fingerprint = self.verify_claim(&claim, signature)?;
        self.replay.check(fingerprint, nonce)?;

        let recipient_acct = recipient;
        let ledger = self
            .non_fungibles
            .get_mut(&registry)
            .ok_or(ClaimgateError::RegistryNotFound(registry))?;
        if ledger.is_minted(token) {
            return Err(ClaimgateError::TokenAlreadyMinted { registry, token });
        }

        ledger.mint(recipient_acct, token)?;
        self.replay.consume(fingerprint, nonce)?;

        tracing::info!(%recipient, %registry, %token, %nonce, "non-fungible minted");
        Ok(SettlementEvent::now(SettlementAction::NonFungibleMinted {
            recipient,
            registry,
            token,
        }))
    }

    /// Pay `amount` out of the engine's custodied balance to `recipient`.
    ///
    /// # Errors
    /// `SignatureInvalid`, `ClaimAlreadyUsed` / `NonceAlreadyUsed`,
    /// `NonPositiveAmount`, `RegistryNotFound`, `InsufficientCustody`.
    pub fn transfer_fungible(
        &mut self,
        recipient: AccountId,
        registry: RegistryId,
        amount: Decimal,
        nonce: Nonce,
        signature: &Signature,
    ) -> Result<SettlementEvent> {
        let claim = SettlementClaim::payout(recipient, registry, amount, nonce);
        let fingerprint = self.verify_claim(&claim, signature)?;
        self.replay.check(fingerprint, nonce)?;
        if amount <= Decimal::ZERO {
            return Err(ClaimgateError::NonPositiveAmount { amount });
        }

        let custody = self.custody;
        let ledger = self
            .fungibles
            .get_mut(&registry)
            .ok_or(ClaimgateError::RegistryNotFound(registry))?;
        let available = ledger.balance_of(custody);
        if available < amount {
            return Err(ClaimgateError::InsufficientCustody {
                needed: amount,
                available,
            });
        }

        ledger.transfer(custody, recipient, amount)?;
        self.replay.consume(fingerprint, nonce)?;

        tracing::info!(%recipient, %registry, %amount, %nonce, "fungible paid out");
        Ok(SettlementEvent::now(SettlementAction::FungiblePaid {
            recipient,
            registry,
            amount,
        }))
    }

    /// Deliver a custodied non-fungible unit to `recipient`.
    ///
    /// # Errors
    /// `SignatureInvalid`, `ClaimAlreadyUsed` / `NonceAlreadyUsed`,
    /// `RegistryNotFound`, `TokenAlreadyDelivered` (delivery tracker — a
    /// token moves at most once regardless of how many signatures reference
    /// it), `TokenNotHeld` (custody does not own it).
    pub fn transfer_non_fungible(
        &mut self,
        recipient: AccountId,
        registry: RegistryId,
        token: TokenId,
        nonce: Nonce,
        signature: &Signature,
    ) -> Result<SettlementEvent> {
        let claim = SettlementClaim::delivery(recipient, registry, token, nonce);
        let fingerprint = self.verify_claim(&claim, signature)?;
        self.replay.check(fingerprint, nonce)?;
        self.delivery.check(registry, token)?;

        let custody = self.custody;
        let ledger = self
            .non_fungibles
            .get_mut(&registry)
            .ok_or(ClaimgateError::RegistryNotFound(registry))?;
        if ledger.owner_of(token) != Some(custody) {
            return Err(ClaimgateError::TokenNotHeld { registry, token });
        }

        ledger.transfer(custody, recipient, token)?;
        self.delivery.mark_delivered(registry, token);
        self.replay.consume(fingerprint, nonce)?;

        tracing::info!(%recipient, %registry, %token, %nonce, "non-fungible delivered");
        Ok(SettlementEvent::now(SettlementAction::NonFungibleTransferred {
            recipient,
            registry,
            token,
        }))
    }

    /// Compound settlement: one non-fungible mint plus one fungible payout
    /// under a single signature. Both sub-actions execute or neither does.
    ///
    /// # Errors
    /// The union of [`mint_non_fungible`](Self::mint_non_fungible) and
    /// [`transfer_fungible`](Self::transfer_fungible) errors. Every
    /// precondition of both legs is checked before either leg executes, so
    /// a failing leg leaves balances, ownership, and the replay ledger
    /// untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn mixed_settlement(
        &mut self,
        recipient: AccountId,
        fungible_registry: RegistryId,
        amount: Decimal,
        non_fungible_registry: RegistryId,
        token: TokenId,
        nonce: Nonce,
        signature: &Signature,
    ) -> Result<Vec<SettlementEvent>> {
        let claim = SettlementClaim::mixed(
            recipient,
            fungible_registry,
            amount,
            non_fungible_registry,
            token,
            nonce,
        );
        let fingerprint = self.verify_claim(&claim, signature)?;
        self.replay.check(fingerprint, nonce)?;
        if amount <= Decimal::ZERO {
            return Err(ClaimgateError::NonPositiveAmount { amount });
        }

        // Preflight both legs before mutating anything.
        let token_ledger = self
            .non_fungibles
            .get(&non_fungible_registry)
            .ok_or(ClaimgateError::RegistryNotFound(non_fungible_registry))?;
        if token_ledger.is_minted(token) {
            return Err(ClaimgateError::TokenAlreadyMinted {
                registry: non_fungible_registry,
                token,
            });
        }
        let coin_ledger = self
            .fungibles
            .get(&fungible_registry)
            .ok_or(ClaimgateError::RegistryNotFound(fungible_registry))?;
        let available = coin_ledger.balance_of(self.custody);
        if available < amount {
            return Err(ClaimgateError::InsufficientCustody {
                needed: amount,
                available,
            });
        }

        // Commit: both legs, then consume. Nothing below can fail — every
        // precondition was established above and calls are serialized.
        let custody = self.custody;
        self.non_fungibles
            .get_mut(&non_fungible_registry)
            .ok_or(ClaimgateError::RegistryNotFound(non_fungible_registry))?
            .mint(recipient, token)?;
        self.fungibles
            .get_mut(&fungible_registry)
            .ok_or(ClaimgateError::RegistryNotFound(fungible_registry))?
            .transfer(custody, recipient, amount)?;
        self.replay.consume(fingerprint, nonce)?;

        tracing::info!(
            %recipient, %fungible_registry, %amount,
            %non_fungible_registry, %token, %nonce,
            "mixed settlement completed"
        );
        Ok(vec![
            SettlementEvent::now(SettlementAction::NonFungibleMinted {
                recipient,
                registry: non_fungible_registry,
                token,
            }),
            SettlementEvent::now(SettlementAction::FungiblePaid {
                recipient,
                registry: fungible_registry,
                amount,
            }),
        ])
    }

    // =====================================================================
    // Read-only surface
    // =====================================================================

    /// Pure pre-check: would this (claim, signature) pair pass signature
    /// verification? Consumes nothing and ignores the replay ledger.
    #[must_use]
    pub fn verify(&self, claim: &SettlementClaim, signature: &Signature) -> bool {
        self.verify_claim(claim, signature).is_ok()
    }

    /// The engine's custodied balance in a fungible registry.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::RegistryNotFound`] for an unknown handle.
    pub fn custody_balance(&self, registry: RegistryId) -> Result<Decimal> {
        self.fungibles
            .get(&registry)
            .map(|l| l.balance_of(self.custody))
            .ok_or(ClaimgateError::RegistryNotFound(registry))
    }

    /// Whether a claim fingerprint has been consumed.
    #[must_use]
    pub fn is_consumed(&self, fingerprint: &ClaimFingerprint) -> bool {
        self.replay.is_consumed(fingerprint)
    }

    /// Whether a token has been delivered by a prior claim.
    #[must_use]
    pub fn is_delivered(&self, registry: RegistryId, token: TokenId) -> bool {
        self.delivery.is_delivered(registry, token)
    }

    /// Inspect an attached fungible registry.
    #[must_use]
    pub fn fungible(&self, registry: RegistryId) -> Option<&dyn FungibleRegistry> {
        self.fungibles.get(&registry).map(Box::as_ref)
    }

    /// Inspect an attached non-fungible registry.
    #[must_use]
    pub fn non_fungible(&self, registry: RegistryId) -> Option<&dyn NonFungibleRegistry> {
        self.non_fungibles.get(&registry).map(Box::as_ref)
    }

    /// The trusted authority key.
    #[must_use]
    pub fn authority(&self) -> &VerifyingKey {
        &self.authority
    }

    /// The administrator identity.
    #[must_use]
    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    /// The engine's custody account.
    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        self.custody
    }

    fn verify_claim(
        &self,
        claim: &SettlementClaim,
        signature: &Signature,
    ) -> Result<ClaimFingerprint> {
        let fingerprint = claim.digest();
        self.authority
            .verify(fingerprint.as_bytes(), signature)
            .map_err(|_| {
                tracing::warn!(kind = %claim.kind, %fingerprint, "authorization rejected");
                ClaimgateError::SignatureInvalid
            })?;
        Ok(fingerprint)
    }
}

/// Test fixtures. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures {
    use ed25519_dalek::{Signature, Signer, SigningKey};

    use claimgate_types::SettlementClaim;

    /// Sign a claim's canonical digest the way the offline authority does.
    pub fn sign_claim(key: &SigningKey, claim: &SettlementClaim) -> Signature {
        key.sign(claim.digest().as_bytes())
    }
}
