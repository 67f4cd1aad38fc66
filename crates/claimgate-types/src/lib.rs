//! # claimgate-types
//!
//! Shared types, errors, and configuration for the **claimgate**
//! authorization-and-settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`RegistryId`], [`TokenId`], [`Nonce`], [`ClaimFingerprint`]
//! - **Claim model**: [`SettlementClaim`], [`ClaimKind`], [`FungibleLeg`], [`NonFungibleLeg`]
//! - **Event model**: [`SettlementEvent`], [`SettlementAction`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`ClaimgateError`] with `CG_ERR_` prefix codes

pub mod claim;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use claimgate_types::{AccountId, SettlementClaim, ClaimgateError, ...};

pub use claim::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
