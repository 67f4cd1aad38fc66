//! The access-control seam shared by all three policy variants.

use claimgate_types::{AccountId, Result};

/// Decides whether a caller is entitled to perform a protected write.
///
/// Each policy variant chooses its own entitlement artifact: the allow-list
/// needs none, the signed variant takes the authority's signature, the
/// Merkle variant takes an inclusion proof. The protected-write logic itself
/// is shared by [`GatedValue`](crate::GatedValue) and written once.
pub trait AccessPolicy {
    /// The proof of entitlement a caller must present.
    type Artifact;

    /// Authorize `caller` to perform one protected write.
    ///
    /// # Errors
    /// Returns a `CG_ERR_1xx` or `CG_ERR_4xx` error when the artifact does
    /// not entitle the caller. Must not mutate any state.
    fn authorize(&self, caller: AccountId, artifact: &Self::Artifact) -> Result<()>;
}
