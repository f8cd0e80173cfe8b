// src/config/model.rs

use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::config::duration::parse_duration;
use crate::config::validate::check_address;

/// Environment variable that overrides `[seed].contract_address`.
pub const CONTRACT_ADDRESS_ENV: &str = "CHAINUP_CONTRACT_ADDRESS";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [node]
/// cmd = "npx hardhat node"
/// rpc_url = "http://127.0.0.1:8545"
///
/// [node.readiness]
/// interval = "1s"
/// max_attempts = 30
///
/// [deploy]
/// cmd = "npx hardhat run scripts/deploy.js --network localhost"
///
/// [frontend]
/// dir = "frontend"
///
/// [seed]
/// contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
/// owner_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
/// ```
///
/// All sections are optional and default to the conventional hardhat/npm
/// layout, except that `[seed]` must carry addresses before `chainup seed`
/// can run.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// The long-lived local blockchain node, from `[node]`.
    #[serde(default)]
    pub node: NodeSection,

    /// The one-shot contract deployment step, from `[deploy]`.
    #[serde(default)]
    pub deploy: DeploySection,

    /// The frontend install/start steps, from `[frontend]`.
    #[serde(default)]
    pub frontend: FrontendSection,

    /// Demo agent seeding, from `[seed]`.
    #[serde(default)]
    pub seed: SeedSection,
}

impl ConfigFile {
    /// Resolve the `[seed]` section into a ready-to-use [`SeedConfig`].
    ///
    /// The contract address may come from `CHAINUP_CONTRACT_ADDRESS` instead
    /// of the file; there is no default for it.
    pub fn seed_config(&self) -> Result<SeedConfig> {
        self.seed
            .resolve(&self.node.rpc_url, std::env::var(CONTRACT_ADDRESS_ENV).ok())
    }
}

/// `[node]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSection {
    /// Command that starts the node (long-lived).
    #[serde(default = "default_node_cmd")]
    pub cmd: String,

    /// Working directory for the node command.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// RPC endpoint the node exposes; also the target of the readiness probe.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Readiness probe settings from `[node.readiness]`.
    #[serde(default)]
    pub readiness: ReadinessSection,
}

fn default_node_cmd() -> String {
    "npx hardhat node".to_string()
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            cmd: default_node_cmd(),
            dir: default_dir(),
            rpc_url: default_rpc_url(),
            readiness: ReadinessSection::default(),
        }
    }
}

/// `[node.readiness]` section.
///
/// The deployment stage is gated on this probe succeeding, never on a bare
/// timer: deployment must not start concurrently with node startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessSection {
    /// Poll interval between probe attempts, e.g. `"1s"`.
    #[serde(default = "default_probe_interval")]
    pub interval: String,

    /// Give up after this many attempts (>= 1).
    #[serde(default = "default_probe_max_attempts")]
    pub max_attempts: usize,
}

fn default_probe_interval() -> String {
    "1s".to_string()
}

fn default_probe_max_attempts() -> usize {
    30
}

impl Default for ReadinessSection {
    fn default() -> Self {
        Self {
            interval: default_probe_interval(),
            max_attempts: default_probe_max_attempts(),
        }
    }
}

impl ReadinessSection {
    pub fn interval(&self) -> Result<Duration> {
        parse_duration(&self.interval)
    }
}

/// `[deploy]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploySection {
    /// One-shot command that publishes the contracts to the running node.
    #[serde(default = "default_deploy_cmd")]
    pub cmd: String,

    /// Working directory for the deploy command.
    #[serde(default = "default_dir")]
    pub dir: String,
}

fn default_deploy_cmd() -> String {
    "npx hardhat run scripts/deploy.js --network localhost".to_string()
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            cmd: default_deploy_cmd(),
            dir: default_dir(),
        }
    }
}

/// `[frontend]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendSection {
    /// One-shot dependency install command.
    #[serde(default = "default_install_cmd")]
    pub install_cmd: String,

    /// Long-lived app start command.
    #[serde(default = "default_start_cmd")]
    pub start_cmd: String,

    /// Working directory for both frontend commands.
    #[serde(default = "default_frontend_dir")]
    pub dir: String,

    /// Where the app will be reachable; printed in the final instructions.
    #[serde(default = "default_frontend_url")]
    pub url: String,
}

fn default_install_cmd() -> String {
    "npm install".to_string()
}

fn default_start_cmd() -> String {
    "npm start".to_string()
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for FrontendSection {
    fn default() -> Self {
        Self {
            install_cmd: default_install_cmd(),
            start_cmd: default_start_cmd(),
            dir: default_frontend_dir(),
            url: default_frontend_url(),
        }
    }
}

/// `[seed]` section, raw form.
///
/// Addresses are optional here so that `chainup up` works without them; they
/// are required (and shape-checked) when [`SeedSection::resolve`] runs.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSection {
    /// Address of the deployed agent contract. No default.
    #[serde(default)]
    pub contract_address: Option<String>,

    /// Account that receives the minted agents and signs the transactions
    /// (an unlocked dev account on the local node).
    #[serde(default)]
    pub owner_address: Option<String>,

    /// RPC endpoint for minting; falls back to `[node].rpc_url`.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Receipt poll interval, e.g. `"1s"`.
    #[serde(default = "default_confirm_interval")]
    pub confirm_interval: String,

    /// Give up waiting for a receipt after this many attempts (>= 1).
    #[serde(default = "default_confirm_max_attempts")]
    pub confirm_max_attempts: usize,
}

fn default_confirm_interval() -> String {
    "1s".to_string()
}

fn default_confirm_max_attempts() -> usize {
    60
}

impl Default for SeedSection {
    fn default() -> Self {
        Self {
            contract_address: None,
            owner_address: None,
            rpc_url: None,
            confirm_interval: default_confirm_interval(),
            confirm_max_attempts: default_confirm_max_attempts(),
        }
    }
}

impl SeedSection {
    /// Resolve into a [`SeedConfig`], applying the env override and the
    /// `[node].rpc_url` fallback.
    pub fn resolve(&self, node_rpc_url: &str, env_address: Option<String>) -> Result<SeedConfig> {
        let contract_address =
            resolved_contract_address(self.contract_address.as_deref(), env_address)?;
        check_address(&contract_address, "[seed].contract_address")?;

        let owner_address = self
            .owner_address
            .clone()
            .ok_or_else(|| anyhow!("[seed].owner_address is required for seeding"))?;
        check_address(&owner_address, "[seed].owner_address")?;

        Ok(SeedConfig {
            contract_address,
            owner_address,
            rpc_url: self
                .rpc_url
                .clone()
                .unwrap_or_else(|| node_rpc_url.to_string()),
            confirm_interval: parse_duration(&self.confirm_interval)?,
            confirm_max_attempts: self.confirm_max_attempts,
        })
    }
}

/// Fully-resolved seeding configuration consumed by the minting driver.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub contract_address: String,
    pub owner_address: String,
    pub rpc_url: String,
    pub confirm_interval: Duration,
    pub confirm_max_attempts: usize,
}

/// Env override beats the file value; neither present is an error because the
/// deployed contract address is required external configuration.
fn resolved_contract_address(
    file_value: Option<&str>,
    env_value: Option<String>,
) -> Result<String> {
    if let Some(addr) = env_value {
        return Ok(addr);
    }
    if let Some(addr) = file_value {
        return Ok(addr.to_string());
    }
    Err(anyhow!(
        "no contract address configured; set [seed].contract_address or {}",
        CONTRACT_ADDRESS_ENV
    ))
}
