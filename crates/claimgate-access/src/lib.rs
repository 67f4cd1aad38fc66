//! # claimgate-access
//!
//! Three interchangeable access-control policies behind one trait:
//!
//! 1. **[`AllowListPolicy`]**: administrator maintains an explicit set of
//!    entitled accounts
//! 2. **[`SignedEntitlementPolicy`]**: the authority signs an offline claim
//!    binding one account to entitlement; the policy verifies the signature
//! 3. **[`MerklePolicy`]**: the administrator commits to a large entitled
//!    set via a Merkle root; each requester supplies an inclusion proof
//!
//! ## Entitlement Flow
//!
//! ```text
//! caller → GatedValue.set(artifact) → AccessPolicy.authorize() → write
//! ```
//!
//! All three policies grant **persistent** entitlement: a valid artifact
//! authorizes any number of writes. Single-use semantics live in the
//! settlement engine, not here.

pub mod allow_list;
pub mod gated;
pub mod merkle;
pub mod policy;
pub mod signed;

pub use allow_list::AllowListPolicy;
pub use gated::GatedValue;
pub use merkle::{MerklePolicy, MerkleProof, MerkleTree};
pub use policy::AccessPolicy;
pub use signed::SignedEntitlementPolicy;
