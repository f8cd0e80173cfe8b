// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod proc;
pub mod seed;

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::pipeline::PipelineOutcome;
use crate::seed::RpcAgentContract;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the config, then dispatches the subcommand. Every
/// failure propagates back here (and out to `main`, which prints it and
/// exits 1); the final process exit status is decided in exactly one place.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    match args.command {
        Command::Up { dry_run } => run_up(&cfg, dry_run).await,
        Command::Seed => run_seed(&cfg).await,
    }
}

/// `chainup up`: node + deploy + frontend, then park on Ctrl-C.
async fn run_up(cfg: &ConfigFile, dry_run: bool) -> Result<()> {
    if dry_run {
        print_plan(cfg);
        return Ok(());
    }

    match pipeline::launch(cfg).await? {
        PipelineOutcome::Completed => Ok(()),
        PipelineOutcome::Halted { stage, exit_code } => {
            bail!("pipeline halted at stage '{stage}' (exit code {exit_code})")
        }
    }
}

/// `chainup seed`: mint the demo roster against the deployed contract.
///
/// Setup failures (missing contract address, unreachable node) abort the
/// run; once the loop starts, per-agent failures are tolerated and the
/// command still exits 0.
async fn run_seed(cfg: &ConfigFile) -> Result<()> {
    let seed_cfg = cfg.seed_config()?;
    let contract = RpcAgentContract::new(&seed_cfg)?;
    contract.preflight().await?;

    let roster = seed::demo_roster();
    println!(
        "🌱 seeding {} demo agents via {}",
        roster.len(),
        seed_cfg.contract_address
    );

    let summary = seed::seed_agents(&contract, &seed_cfg.owner_address, &roster).await?;

    info!(
        minted = summary.minted,
        failed = summary.failed,
        "seeding finished"
    );
    println!(
        "done: {} minted, {} failed, {} attempted",
        summary.minted,
        summary.failed,
        summary.attempted()
    );

    Ok(())
}

/// Simple dry-run output: print the resolved stage plan without executing.
fn print_plan(cfg: &ConfigFile) {
    println!("chainup dry-run");
    println!();

    println!("stages:");
    println!("  - node (long-lived)");
    println!("      cmd: {}", cfg.node.cmd);
    println!("      dir: {}", cfg.node.dir);
    println!("      rpc_url: {}", cfg.node.rpc_url);
    println!(
        "      readiness: every {} up to {} attempts",
        cfg.node.readiness.interval, cfg.node.readiness.max_attempts
    );
    println!("  - deploy");
    println!("      cmd: {}", cfg.deploy.cmd);
    println!("      dir: {}", cfg.deploy.dir);
    println!("  - install-deps");
    println!("      cmd: {}", cfg.frontend.install_cmd);
    println!("      dir: {}", cfg.frontend.dir);
    println!("  - frontend (long-lived)");
    println!("      cmd: {}", cfg.frontend.start_cmd);
    println!("      dir: {}", cfg.frontend.dir);
    println!("      url: {}", cfg.frontend.url);

    match cfg.seed.contract_address {
        Some(ref addr) => println!("seed contract: {addr}"),
        None => println!("seed contract: (not configured)"),
    }
}
