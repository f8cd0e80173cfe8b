// src/pipeline/readiness.rs

//! Node readiness probing.
//!
//! Deployment must never start concurrently with node startup. Instead of a
//! fixed sleep, the pipeline polls the node's JSON-RPC endpoint with a
//! bounded number of attempts; exhausting them is fatal.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::model::NodeSection;

/// Seam for "is the node accepting connections yet".
///
/// Production code uses [`RpcProbe`]; tests substitute scripted probes.
pub trait ReadinessProbe {
    async fn wait_ready(&self) -> Result<()>;
}

/// Bounded-retry probe against the node's JSON-RPC endpoint.
///
/// An attempt counts as ready when the endpoint answers an `eth_chainId`
/// request with an HTTP success status; the body is not inspected, any
/// answering node will do.
pub struct RpcProbe {
    url: String,
    interval: Duration,
    max_attempts: usize,
    client: reqwest::Client,
}

impl RpcProbe {
    pub fn from_config(node: &NodeSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .context("building readiness probe HTTP client")?;

        Ok(Self {
            url: node.rpc_url.clone(),
            interval: node.readiness.interval()?,
            max_attempts: node.readiness.max_attempts,
            client,
        })
    }

    async fn check(&self) -> bool {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_chainId",
            "params": [],
        });

        match self.client.post(&self.url).json(&body).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

impl ReadinessProbe for RpcProbe {
    async fn wait_ready(&self) -> Result<()> {
        for attempt in 1..=self.max_attempts {
            if self.check().await {
                info!(attempt, url = %self.url, "node RPC is ready");
                return Ok(());
            }

            debug!(
                attempt,
                max_attempts = self.max_attempts,
                "node not ready yet"
            );

            if attempt < self.max_attempts {
                sleep(self.interval).await;
            }
        }

        bail!(
            "node RPC at {} did not come up after {} attempts; check the [node].cmd output above",
            self.url,
            self.max_attempts
        )
    }
}
