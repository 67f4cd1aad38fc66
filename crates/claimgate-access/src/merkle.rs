//! Merkle-membership policy and the tree builder behind it.
//!
//! Leaves are `SHA-256(domain || identity)`. Interior nodes hash their two
//! children in **sorted order**, so a proof verifies the same way whether
//! each sibling sat to the left or the right of the path. With an odd node
//! count at any level, the last node is promoted unchanged.
//!
//! The builder lives here so tests and the off-chain authority construct
//! commitments exactly the way the policy verifies them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use claimgate_types::{AccountId, ClaimgateError, Result};

use crate::policy::AccessPolicy;

/// Ordered sequence of sibling hashes from leaf to root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof(pub Vec<[u8; 32]>);

/// Canonical leaf encoding: hash of the identity.
#[must_use]
pub fn leaf_hash(identity: AccountId) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"claimgate:leaf:v1:");
    hasher.update(identity.as_bytes());
    hasher.finalize().into()
}

/// Hash a sibling pair in sorted order.
#[must_use]
pub fn combine(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(b"claimgate:node:v1:");
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// In-memory Merkle tree over a set of identities.
///
/// Built by the administrator (off-chain in the original deployment); only
/// the 32-byte root is handed to the policy.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `levels[0]` = leaves, last level = single root.
    levels: Vec<Vec<[u8; 32]>>,
    identities: Vec<AccountId>,
}

impl MerkleTree {
    /// Build a tree over `identities` in the given order.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::Configuration`] if `identities` is empty —
    /// an empty commitment is meaningless.
    pub fn from_identities(identities: &[AccountId]) -> Result<Self> {
        if identities.is_empty() {
            return Err(ClaimgateError::Configuration(
                "merkle tree needs at least one identity".into(),
            ));
        }

        let mut levels = vec![identities.iter().copied().map(leaf_hash).collect::<Vec<_>>()];
        while levels.last().expect("at least one level").len() > 1 {
            let prev = levels.last().expect("at least one level");
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                match pair {
                    [a, b] => next.push(combine(a, b)),
                    // Odd node promoted unchanged.
                    [a] => next.push(*a),
                    _ => unreachable!("chunks(2) yields 1 or 2 elements"),
                }
            }
            levels.push(next);
        }

        Ok(Self {
            levels,
            identities: identities.to_vec(),
        })
    }

    /// The committed root.
    #[must_use]
    pub fn root(&self) -> [u8; 32] {
        self.levels.last().expect("at least one level")[0]
    }

    /// Inclusion proof for `identity`, or `None` if it is not in the set.
    #[must_use]
    pub fn proof_for(&self, identity: AccountId) -> Option<MerkleProof> {
        let mut index = self.identities.iter().position(|id| *id == identity)?;

        let mut siblings = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = index ^ 1;
            if let Some(sibling) = level.get(sibling_index) {
                siblings.push(*sibling);
            }
            // else: promoted odd node, nothing to prove at this level
            index /= 2;
        }
        Some(MerkleProof(siblings))
    }

    /// Number of committed identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the tree is empty (never true; kept for API symmetry).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

/// Verifies membership proofs against a fixed committed root.
#[derive(Debug, Clone, Copy)]
pub struct MerklePolicy {
    root: [u8; 32],
}

impl MerklePolicy {
    /// Create a policy committed to `root`.
    #[must_use]
    pub fn new(root: [u8; 32]) -> Self {
        Self { root }
    }

    /// The committed root.
    #[must_use]
    pub fn root(&self) -> [u8; 32] {
        self.root
    }
}

impl AccessPolicy for MerklePolicy {
    type Artifact = MerkleProof;

    fn authorize(&self, caller: AccountId, artifact: &MerkleProof) -> Result<()> {
        let mut node = leaf_hash(caller);
        for sibling in &artifact.0 {
            node = combine(&node, sibling);
        }
        if node == self.root {
            Ok(())
        } else {
            Err(ClaimgateError::ProofInvalid)
        }
    }
}
