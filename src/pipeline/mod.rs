// src/pipeline/mod.rs

//! The sequential deployment pipeline.
//!
//! `chainup up` drives a linear state machine:
//!
//! `NodeStarting → Deploying → InstallingDeps → AppStarting → Running`
//!
//! Deployment is gated on the node answering RPC (no fixed sleeps), and a
//! non-zero exit at `Deploying` or `InstallingDeps` halts the pipeline:
//! later stages never run.
//!
//! - [`stage`] defines the stage machine and the pipeline outcome.
//! - [`readiness`] is the bounded-retry RPC probe.
//! - [`runner`] executes the stages over real child processes.

pub mod readiness;
pub mod runner;
pub mod stage;

pub use readiness::{ReadinessProbe, RpcProbe};
pub use runner::{StageExecutor, StagePlan, drive, launch};
pub use stage::{PipelineOutcome, Stage};
