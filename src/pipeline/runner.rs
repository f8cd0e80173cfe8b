// src/pipeline/runner.rs

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::model::ConfigFile;
use crate::pipeline::readiness::{ReadinessProbe, RpcProbe};
use crate::pipeline::stage::{PipelineOutcome, Stage};
use crate::proc::{Service, StepOutcome, StepSpec, run_step};

/// The concrete commands behind each stage, resolved from config.
#[derive(Debug, Clone)]
pub struct StagePlan {
    pub deploy: StepSpec,
    pub install: StepSpec,
    pub app: StepSpec,
}

impl StagePlan {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            deploy: StepSpec::new("deploy", &cfg.deploy.cmd, &cfg.deploy.dir),
            install: StepSpec::new("install-deps", &cfg.frontend.install_cmd, &cfg.frontend.dir),
            app: StepSpec::new("frontend", &cfg.frontend.start_cmd, &cfg.frontend.dir),
        }
    }
}

/// Seam for executing stages, so the stage machine can be driven with
/// scripted outcomes in tests.
pub trait StageExecutor {
    /// Run a one-shot stage command to completion.
    async fn run_step(&mut self, stage: Stage, spec: &StepSpec) -> Result<StepOutcome>;

    /// Start the long-lived frontend app.
    async fn start_app(&mut self, spec: &StepSpec) -> Result<()>;
}

/// Production executor: real child processes, the app held as a [`Service`].
#[derive(Debug, Default)]
pub struct ProcExecutor {
    app: Option<Service>,
}

impl StageExecutor for ProcExecutor {
    async fn run_step(&mut self, _stage: Stage, spec: &StepSpec) -> Result<StepOutcome> {
        run_step(spec).await
    }

    async fn start_app(&mut self, spec: &StepSpec) -> Result<()> {
        let svc = Service::launch(spec.name.clone(), &spec.cmd, &spec.dir)?;
        self.app = Some(svc);
        Ok(())
    }
}

/// Drive the stage machine from "node is starting" to its outcome.
///
/// Order contract:
/// - the deploy step is not submitted until the probe reports ready
/// - a failed step returns `Halted`; nothing after it is executed
pub async fn drive<P, E>(plan: &StagePlan, probe: &P, exec: &mut E) -> Result<PipelineOutcome>
where
    P: ReadinessProbe,
    E: StageExecutor,
{
    probe.wait_ready().await?;

    let one_shots = [
        (Stage::Deploying, &plan.deploy),
        (Stage::InstallingDeps, &plan.install),
    ];
    for (stage, spec) in one_shots {
        println!("{}", stage.banner());
        match exec.run_step(stage, spec).await? {
            StepOutcome::Success => {}
            StepOutcome::Failed(exit_code) => {
                return Ok(PipelineOutcome::Halted { stage, exit_code });
            }
        }
    }

    println!("{}", Stage::AppStarting.banner());
    exec.start_app(&plan.app).await?;

    println!("{}", Stage::Running.banner());
    Ok(PipelineOutcome::Completed)
}

/// Full `chainup up` flow: launch the node, drive the stages, park on
/// Ctrl-C, and shut the node down.
///
/// The frontend app handle lives inside the executor and is reaped via
/// `kill_on_drop` when this function returns; only the node gets an explicit
/// termination request (at most once, on every path out of here).
pub async fn launch(cfg: &ConfigFile) -> Result<PipelineOutcome> {
    let plan = StagePlan::from_config(cfg);

    println!("{}", Stage::NodeStarting.banner());
    let mut node = Service::launch("node", &cfg.node.cmd, &cfg.node.dir)?;
    let probe = RpcProbe::from_config(&cfg.node)?;
    let mut exec = ProcExecutor::default();

    // Interrupts during startup cancel the in-flight stage; one-shot children
    // are killed on drop.
    let driven = tokio::select! {
        out = drive(&plan, &probe, &mut exec) => Some(out),
        _ = tokio::signal::ctrl_c() => None,
    };

    let outcome = match driven {
        None => {
            println!();
            info!("interrupt received; shutting down node");
            node.terminate().await?;
            return Ok(PipelineOutcome::Completed);
        }
        Some(Err(err)) => {
            if let Err(term_err) = node.terminate().await {
                warn!(error = %term_err, "failed to stop node while handling error");
            }
            return Err(err);
        }
        Some(Ok(outcome)) => outcome,
    };

    if let PipelineOutcome::Halted { stage, exit_code } = outcome {
        warn!(stage = %stage, exit_code, "pipeline halted; shutting down node");
        node.terminate().await?;
        return Ok(outcome);
    }

    print_instructions(cfg);

    tokio::signal::ctrl_c()
        .await
        .context("waiting for interrupt")?;
    println!();
    info!("interrupt received; shutting down node");
    node.terminate().await?;

    Ok(PipelineOutcome::Completed)
}

/// Operator-facing connection instructions, printed once the environment is
/// fully up. Informational only.
fn print_instructions(cfg: &ConfigFile) {
    println!();
    println!("   RPC node:  {}", cfg.node.rpc_url);
    println!("   frontend:  {}", cfg.frontend.url);
    println!();
    println!("   Point your wallet at the RPC endpoint above and import one of");
    println!("   the node's funded dev accounts to interact with the contracts.");
    println!();
    println!("   Press Ctrl-C to stop.");
}
