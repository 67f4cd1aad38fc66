//! # SettlementClaim — the signed authorization artifact
//!
//! A `SettlementClaim` binds **all** mutable parameters of a requested asset
//! movement plus a caller-supplied nonce into one canonical SHA-256 digest.
//! The authority signs the digest offline and hands the signature to the
//! requester out-of-band; the engine recomputes the digest from the submitted
//! parameters and verifies the signature against the authority key.
//!
//! ## Security Properties
//!
//! - **Parameter-bound**: altering any covered parameter (recipient, amount,
//!   token, nonce) changes the digest and invalidates the signature
//! - **Kind-bound**: each operation kind contributes a distinct domain byte,
//!   so a mint signature can never authorize a transfer of the same
//!   parameters
//! - **Nonce-bound**: semantically identical requests need distinct nonces
//!   to be separately payable
//! - **Single-use**: the digest doubles as the replay-ledger key; a consumed
//!   claim carries no residual value

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, ClaimFingerprint, Nonce, RegistryId, TokenId};

/// Operation discriminator. Mixed into the canonical digest so signatures
/// cannot be replayed across operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimKind {
    /// Mint one non-fungible unit to the recipient.
    MintNonFungible,
    /// Pay a fungible amount out of the engine's custody.
    TransferFungible,
    /// Deliver a custodied non-fungible unit to the recipient.
    TransferNonFungible,
    /// Compound: one non-fungible mint plus one fungible payout,
    /// both-or-neither.
    MixedSettlement,
}

impl ClaimKind {
    /// Domain byte mixed into the canonical digest.
    #[must_use]
    pub fn domain_byte(self) -> u8 {
        match self {
            Self::MintNonFungible => 0x01,
            Self::TransferFungible => 0x02,
            Self::TransferNonFungible => 0x03,
            Self::MixedSettlement => 0x04,
        }
    }
}

impl std::fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MintNonFungible => write!(f, "MINT_NON_FUNGIBLE"),
            Self::TransferFungible => write!(f, "TRANSFER_FUNGIBLE"),
            Self::TransferNonFungible => write!(f, "TRANSFER_NON_FUNGIBLE"),
            Self::MixedSettlement => write!(f, "MIXED_SETTLEMENT"),
        }
    }
}

/// The fungible half of a claim: which ledger, how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleLeg {
    pub registry: RegistryId,
    pub amount: Decimal,
}

/// The non-fungible half of a claim: which ledger, which unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFungibleLeg {
    pub registry: RegistryId,
    pub token: TokenId,
}

/// A settlement claim: the full parameter set of one authorized action.
///
/// Constructed per request from caller-supplied parameters. Those parameters
/// are covered by the authority's signature, so a third party cannot alter
/// them without invalidating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementClaim {
    /// Which operation this claim authorizes.
    pub kind: ClaimKind,
    /// Who receives the asset(s).
    pub recipient: AccountId,
    /// Fungible leg, present for payouts and mixed settlements.
    pub fungible: Option<FungibleLeg>,
    /// Non-fungible leg, present for mints, deliveries, and mixed settlements.
    pub non_fungible: Option<NonFungibleLeg>,
    /// Uniqueness nonce.
    pub nonce: Nonce,
}

impl SettlementClaim {
    /// Claim authorizing a non-fungible mint.
    #[must_use]
    pub fn mint(recipient: AccountId, registry: RegistryId, token: TokenId, nonce: Nonce) -> Self {
        Self {
            kind: ClaimKind::MintNonFungible,
            recipient,
            fungible: None,
            non_fungible: Some(NonFungibleLeg { registry, token }),
            nonce,
        }
    }

    /// Claim authorizing a fungible payout from custody.
    #[must_use]
    pub fn payout(
        recipient: AccountId,
        registry: RegistryId,
        amount: Decimal,
        nonce: Nonce,
    ) -> Self {
        Self {
            kind: ClaimKind::TransferFungible,
            recipient,
            fungible: Some(FungibleLeg { registry, amount }),
            non_fungible: None,
            nonce,
        }
    }

    /// Claim authorizing delivery of a custodied non-fungible unit.
    #[must_use]
    pub fn delivery(
        recipient: AccountId,
        registry: RegistryId,
        token: TokenId,
        nonce: Nonce,
    ) -> Self {
        Self {
            kind: ClaimKind::TransferNonFungible,
            recipient,
            fungible: None,
            non_fungible: Some(NonFungibleLeg { registry, token }),
            nonce,
        }
    }

    /// Compound claim: one mint plus one payout under a single signature.
    #[must_use]
    pub fn mixed(
        recipient: AccountId,
        fungible_registry: RegistryId,
        amount: Decimal,
        non_fungible_registry: RegistryId,
        token: TokenId,
        nonce: Nonce,
    ) -> Self {
        Self {
            kind: ClaimKind::MixedSettlement,
            recipient,
            fungible: Some(FungibleLeg {
                registry: fungible_registry,
                amount,
            }),
            non_fungible: Some(NonFungibleLeg {
                registry: non_fungible_registry,
                token,
            }),
            nonce,
        }
    }

    /// Canonical digest over the claim's declared inputs.
    ///
    /// Format: `SHA-256("claimgate:claim:v1:" || kind || recipient(32) ||
    /// flag || [fungible registry(16) || amount(str)] ||
    /// flag || [nft registry(16) || token(8)] || nonce(8))`
    ///
    /// Pure function of the claim fields; depends on no ambient state.
    /// This is both the message the authority signs and the replay key.
    #[must_use]
    pub fn digest(&self) -> ClaimFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"claimgate:claim:v1:");
        hasher.update([self.kind.domain_byte()]);
        hasher.update(self.recipient.as_bytes());

        match &self.fungible {
            Some(leg) => {
                hasher.update([1u8]);
                hasher.update(leg.registry.0.as_bytes());
                hasher.update(leg.amount.to_string().as_bytes());
            }
            None => hasher.update([0u8]),
        }
        match &self.non_fungible {
            Some(leg) => {
                hasher.update([1u8]);
                hasher.update(leg.registry.0.as_bytes());
                hasher.update(leg.token.0.to_le_bytes());
            }
            None => hasher.update([0u8]),
        }

        hasher.update(self.nonce.0.to_le_bytes());
        ClaimFingerprint(hasher.finalize().into())
    }
}
