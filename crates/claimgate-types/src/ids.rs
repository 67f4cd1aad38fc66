//! Globally unique identifiers used throughout claimgate.
//!
//! `AccountId` is the raw ed25519 public key of an account (32 bytes).
//! `RegistryId` uses UUIDv7 for time-ordered lexicographic sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Opaque, globally unique identity of a requester, authority, or custody
/// account. This is the raw ed25519 public key (32 bytes).
///
/// Identities never collide and are never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    #[must_use]
    pub fn from_pubkey(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<&ed25519_dalek::VerifyingKey> for AccountId {
    fn from(key: &ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// RegistryId
// ---------------------------------------------------------------------------

/// Capability reference to an asset registry (fungible or non-fungible
/// ledger). The engine holds this handle; it never owns registry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RegistryId(pub Uuid);

impl RegistryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for RegistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of a non-fungible unit within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Caller-supplied uniqueness component of a claim. Two semantically
/// identical requests must carry distinct nonces to be separately payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Nonce(pub u64);

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nonce:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ClaimFingerprint
// ---------------------------------------------------------------------------

/// SHA-256 digest of a claim's canonical encoding. This is both the message
/// the authority signs and the key under which consumption is recorded in
/// the replay ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ClaimFingerprint(pub [u8; 32]);

impl ClaimFingerprint {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ClaimFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_id_uniqueness() {
        let a = RegistryId::new();
        let b = RegistryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn registry_id_orders_by_bytes() {
        let a = RegistryId::from_bytes([1u8; 16]);
        let b = RegistryId::from_bytes([2u8; 16]);
        assert!(a < b);
    }

    #[test]
    fn account_id_display_is_prefixed_hex() {
        let id = AccountId([0xab; 32]);
        assert_eq!(format!("{id}"), "acct:abababababababab");
        assert_eq!(id.short(), "abababab");
    }

    #[test]
    fn serde_roundtrips() {
        let acct = AccountId([7u8; 32]);
        let json = serde_json::to_string(&acct).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);

        let reg = RegistryId::new();
        let json = serde_json::to_string(&reg).unwrap();
        let back: RegistryId = serde_json::from_str(&json).unwrap();
        assert_eq!(reg, back);

        let fp = ClaimFingerprint([3u8; 32]);
        let json = serde_json::to_string(&fp).unwrap();
        let back: ClaimFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }
}
