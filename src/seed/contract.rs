// src/seed/contract.rs

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Value, json};
use tokio::time::sleep;
use tracing::debug;

use crate::config::model::SeedConfig;
use crate::seed::abi::encode_mint_call;

/// Hash of a submitted mint transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(pub String);

/// The external agent contract, as the driver sees it.
///
/// The contract itself is an external collaborator; this seam is all the
/// driver depends on, and tests drive it with scripted fakes.
pub trait AgentContract {
    /// Submit a mint transaction for one agent; returns the pending tx hash.
    async fn mint_agent(&self, owner: &str, name: &str, capabilities: &[String])
    -> Result<TxHash>;

    /// Await on-chain confirmation of a previously submitted mint.
    async fn wait_confirmed(&self, tx: &TxHash) -> Result<()>;
}

/// JSON-RPC implementation against the local node.
///
/// Minting is `eth_sendTransaction` from an unlocked dev account with
/// ABI-encoded calldata; confirmation polls `eth_getTransactionReceipt`
/// with a bounded number of attempts.
pub struct RpcAgentContract {
    client: reqwest::Client,
    rpc_url: String,
    contract_address: String,
    confirm_interval: Duration,
    confirm_max_attempts: usize,
}

impl RpcAgentContract {
    pub fn new(cfg: &SeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building RPC HTTP client")?;

        Ok(Self {
            client,
            rpc_url: cfg.rpc_url.clone(),
            contract_address: cfg.contract_address.clone(),
            confirm_interval: cfg.confirm_interval,
            confirm_max_attempts: cfg.confirm_max_attempts,
        })
    }

    /// Check the node answers RPC before any mint is attempted.
    ///
    /// A failure here is a setup error, fatal to the whole run; per-item
    /// tolerance only starts once the roster loop is running.
    pub async fn preflight(&self) -> Result<()> {
        self.rpc_call("eth_chainId", json!([]))
            .await
            .context("node RPC is not reachable; is `chainup up` running?")?;
        Ok(())
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("sending {} to {}", method, self.rpc_url))?;

        let payload: Value = resp
            .json()
            .await
            .with_context(|| format!("decoding {} response", method))?;

        if let Some(err) = payload.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            bail!("{} failed: {}", method, message);
        }

        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }
}

impl AgentContract for RpcAgentContract {
    async fn mint_agent(
        &self,
        owner: &str,
        name: &str,
        capabilities: &[String],
    ) -> Result<TxHash> {
        let data = encode_mint_call(owner, name, capabilities)?;
        let params = json!([{
            "from": owner,
            "to": self.contract_address,
            "data": data,
        }]);

        let result = self.rpc_call("eth_sendTransaction", params).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| anyhow!("eth_sendTransaction returned no transaction hash"))?;

        debug!(tx = hash, agent = name, "mint transaction submitted");
        Ok(TxHash(hash.to_string()))
    }

    async fn wait_confirmed(&self, tx: &TxHash) -> Result<()> {
        for attempt in 1..=self.confirm_max_attempts {
            let receipt = self
                .rpc_call("eth_getTransactionReceipt", json!([tx.0]))
                .await?;

            if !receipt.is_null() {
                // Missing status is treated as success; older nodes omit it.
                let status = receipt
                    .get("status")
                    .and_then(Value::as_str)
                    .unwrap_or("0x1");
                if status == "0x0" {
                    bail!("transaction {} reverted", tx.0);
                }
                debug!(tx = %tx.0, attempt, "transaction confirmed");
                return Ok(());
            }

            if attempt < self.confirm_max_attempts {
                sleep(self.confirm_interval).await;
            }
        }

        bail!(
            "transaction {} was not confirmed after {} attempts",
            tx.0,
            self.confirm_max_attempts
        )
    }
}
