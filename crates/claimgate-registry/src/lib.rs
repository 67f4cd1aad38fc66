//! # claimgate-registry
//!
//! Asset registries are **external collaborators** of the settlement engine:
//! the engine holds a capability handle ([`RegistryId`](claimgate_types::RegistryId))
//! and calls mint/transfer through the traits defined here, never owning
//! registry state.
//!
//! Two capability surfaces:
//! - [`FungibleRegistry`]: per-account balances, transfer semantics
//! - [`NonFungibleRegistry`]: unique tokens, at most one owner each
//!
//! [`CoinLedger`] and [`TokenLedger`] are the in-memory reference
//! implementations used by tests and demos in place of the production
//! ledgers.

pub mod fungible;
pub mod non_fungible;

pub use fungible::{CoinLedger, FungibleRegistry};
pub use non_fungible::{NonFungibleRegistry, TokenLedger};
