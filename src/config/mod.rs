// src/config/mod.rs

//! Configuration handling for `chainup`.
//!
//! - [`model`] defines the serde model of the `Chainup.toml` file.
//! - [`duration`] parses the short duration strings used in the file.
//! - [`loader`] reads and deserializes the file.
//! - [`validate`] runs semantic checks on a loaded config.

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, DeploySection, FrontendSection, NodeSection, ReadinessSection, SeedConfig,
    SeedSection,
};
