// src/proc/mod.rs

//! Process supervision layer.
//!
//! Every pipeline stage is an OS child process spawned through the platform
//! shell with **inherited** stdio, so its output lands directly on the
//! operator's console.
//!
//! - [`step`] runs one-shot stage commands to completion and reports the
//!   exit status.
//! - [`service`] holds long-lived children (the node, the frontend app) and
//!   supports idempotent termination.

pub mod service;
pub mod step;

pub use service::Service;
pub use step::{StepOutcome, StepSpec, run_step};
