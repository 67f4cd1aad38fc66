//! # claimgate-settlement
//!
//! The production core: a settlement engine that executes asset movements
//! only under single-use claims signed by an offline authority.
//!
//! ```text
//! authority (offline)          engine (online)
//!   sign(claim digest)  ──►  verify → replay check → preflight → act
//!                                                       │
//!                              consume claim ◄──────────┘
//! ```
//!
//! - [`SettlementEngine`] — verifies, preflights, and atomically executes
//! - [`ReplayLedger`] — monotone consumption record for claims and nonces
//! - [`DeliveryTracker`] — one-way per-token delivery flags

pub mod delivery;
pub mod engine;
pub mod replay;

pub use delivery::DeliveryTracker;
pub use engine::SettlementEngine;
pub use replay::ReplayLedger;

#[cfg(any(test, feature = "test-helpers"))]
pub use engine::fixtures;
