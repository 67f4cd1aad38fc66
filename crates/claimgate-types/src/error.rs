//! Error types for the claimgate engine.
//!
//! All errors use the `CG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors (signature / proof rejection)
//! - 2xx: Replay errors (consumed claims and nonces)
//! - 3xx: State conflict errors (asset not in the expected state)
//! - 4xx: Permission errors (privileged calls, allow-list)
//! - 9xx: General / internal errors
//!
//! Every error aborts the whole operation with no partial state mutation.
//! The engine never retries internally; retry is the caller's job.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ClaimFingerprint, RegistryId, TokenId};

/// Central error enum for all claimgate operations.
#[derive(Debug, Error)]
pub enum ClaimgateError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The signature did not verify against the authority key.
    #[error("CG_ERR_100: signature invalid: not issued by the authority over this claim")]
    SignatureInvalid,

    /// The signature bytes could not be parsed at all.
    #[error("CG_ERR_101: malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// Walking the Merkle proof did not reproduce the committed root.
    #[error("CG_ERR_102: invalid proof: path does not reach the committed root")]
    ProofInvalid,

    // =================================================================
    // Replay Errors (2xx)
    // =================================================================
    /// The claim fingerprint is already marked consumed.
    #[error("CG_ERR_200: claim already used: {fingerprint}")]
    ClaimAlreadyUsed { fingerprint: ClaimFingerprint },

    /// The raw nonce is already marked consumed.
    #[error("CG_ERR_201: nonce already used: {nonce}")]
    NonceAlreadyUsed { nonce: u64 },

    // =================================================================
    // State Conflict Errors (3xx)
    // =================================================================
    /// The target token already exists in the non-fungible registry.
    #[error("CG_ERR_300: {token} in {registry} is already minted")]
    TokenAlreadyMinted {
        registry: RegistryId,
        token: TokenId,
    },

    /// The target token was already delivered by a prior authorized claim.
    #[error("CG_ERR_301: {token} in {registry} was already delivered")]
    TokenAlreadyDelivered {
        registry: RegistryId,
        token: TokenId,
    },

    /// The engine's custody account does not hold the target token.
    #[error("CG_ERR_302: {token} in {registry} is not held by custody")]
    TokenNotHeld {
        registry: RegistryId,
        token: TokenId,
    },

    /// The engine's custodied balance is less than the requested payout.
    #[error("CG_ERR_303: insufficient custody balance: need {needed}, have {available}")]
    InsufficientCustody { needed: Decimal, available: Decimal },

    /// No registry is attached under this handle.
    #[error("CG_ERR_304: registry not found: {0}")]
    RegistryNotFound(RegistryId),

    /// The requested fungible amount is zero or negative.
    #[error("CG_ERR_305: non-positive amount: {amount}")]
    NonPositiveAmount { amount: Decimal },

    /// A registry is already attached under this handle.
    #[error("CG_ERR_306: registry already attached: {0}")]
    RegistryAlreadyAttached(RegistryId),

    // =================================================================
    // Permission Errors (4xx)
    // =================================================================
    /// Caller is not the engine administrator.
    #[error("CG_ERR_400: caller is not the administrator")]
    NotAdministrator,

    /// Caller is not on the allow-list.
    #[error("CG_ERR_401: not whitelisted")]
    NotWhitelisted,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CG_ERR_900: internal error: {0}")]
    Internal(String),

    /// Configuration error (bad authority key bytes, etc.).
    #[error("CG_ERR_901: configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ClaimgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = ClaimgateError::SignatureInvalid;
        let msg = format!("{err}");
        assert!(msg.starts_with("CG_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_custody_display() {
        let err = ClaimgateError::InsufficientCustody {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("CG_ERR_303"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn replay_display_carries_fingerprint() {
        let err = ClaimgateError::ClaimAlreadyUsed {
            fingerprint: ClaimFingerprint([0xaa; 32]),
        };
        let msg = format!("{err}");
        assert!(msg.contains("CG_ERR_200"));
        assert!(msg.contains("claim:aaaaaaaaaaaaaaaa"));
    }

    #[test]
    fn all_errors_have_cg_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(ClaimgateError::ProofInvalid),
            Box::new(ClaimgateError::NonceAlreadyUsed { nonce: 7 }),
            Box::new(ClaimgateError::NotAdministrator),
            Box::new(ClaimgateError::NotWhitelisted),
            Box::new(ClaimgateError::Internal("test".into())),
            Box::new(ClaimgateError::RegistryNotFound(RegistryId::new())),
            Box::new(ClaimgateError::NonPositiveAmount {
                amount: Decimal::new(-1, 0),
            }),
            Box::new(ClaimgateError::RegistryAlreadyAttached(RegistryId::new())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("CG_ERR_"),
                "Error missing CG_ERR_ prefix: {msg}"
            );
        }
    }
}
