// src/seed/mod.rs

//! Demo agent seeding.
//!
//! `chainup seed` mints a fixed roster of demo agents through the deployed
//! agent contract, strictly one at a time: confirmation of mint *i* is
//! awaited before mint *i+1* is submitted, so the sending account never
//! races its own nonces. A failure for one agent is logged and does not
//! block the rest of the roster.
//!
//! - [`agents`] holds the built-in roster.
//! - [`abi`] encodes the `mintAgent` calldata.
//! - [`contract`] is the JSON-RPC contract client (behind a trait seam).
//! - [`driver`] is the serialized minting loop.

pub mod abi;
pub mod agents;
pub mod contract;
pub mod driver;

pub use agents::{AgentDescriptor, demo_roster};
pub use contract::{AgentContract, RpcAgentContract, TxHash};
pub use driver::{SeedSummary, seed_agents};
