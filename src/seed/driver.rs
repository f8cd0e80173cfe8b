// src/seed/driver.rs

use anyhow::Result;
use tracing::{debug, warn};

use crate::seed::agents::AgentDescriptor;
use crate::seed::contract::{AgentContract, TxHash};

/// Counts of how the roster went. The driver succeeds as long as every
/// descriptor was *attempted*; individual failures only show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub minted: usize,
    pub failed: usize,
}

impl SeedSummary {
    pub fn attempted(&self) -> usize {
        self.minted + self.failed
    }
}

/// Mint every agent in the roster, strictly in order, one at a time.
///
/// Confirmation of agent *i* is awaited before agent *i+1* is submitted, so
/// the sending account's transactions never race each other. A failure for
/// one agent is logged with its name and does not block the rest.
pub async fn seed_agents<C: AgentContract>(
    contract: &C,
    owner: &str,
    roster: &[AgentDescriptor],
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for agent in roster {
        debug!(agent = %agent.name, capabilities = ?agent.capabilities, "minting agent");

        match mint_one(contract, owner, agent).await {
            Ok(tx) => {
                println!("✅ minted {} ({})", agent.name, tx.0);
                summary.minted += 1;
            }
            Err(err) => {
                println!("❌ failed to mint {}: {err:#}", agent.name);
                warn!(agent = %agent.name, error = %err, "mint failed; continuing");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn mint_one<C: AgentContract>(
    contract: &C,
    owner: &str,
    agent: &AgentDescriptor,
) -> Result<TxHash> {
    let tx = contract
        .mint_agent(owner, &agent.name, &agent.capabilities)
        .await?;
    contract.wait_confirmed(&tx).await?;
    Ok(tx)
}
