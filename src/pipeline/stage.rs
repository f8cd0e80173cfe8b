// src/pipeline/stage.rs

use std::fmt;

/// Stages of the dev-environment pipeline, in order.
///
/// The machine is strictly linear; there is no branching back. Each stage is
/// only entered after the previous one signalled success (or, for
/// `Deploying`, after the readiness probe confirmed the node is up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    NodeStarting,
    Deploying,
    InstallingDeps,
    AppStarting,
    Running,
}

impl Stage {
    /// The stage that follows this one, or `None` for the terminal stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::NodeStarting => Some(Stage::Deploying),
            Stage::Deploying => Some(Stage::InstallingDeps),
            Stage::InstallingDeps => Some(Stage::AppStarting),
            Stage::AppStarting => Some(Stage::Running),
            Stage::Running => None,
        }
    }

    /// Operator-facing stage banner.
    pub fn banner(self) -> &'static str {
        match self {
            Stage::NodeStarting => "⛓️  starting local blockchain node...",
            Stage::Deploying => "📜 deploying contracts...",
            Stage::InstallingDeps => "📦 installing frontend dependencies...",
            Stage::AppStarting => "🖥️  starting frontend app...",
            Stage::Running => "🚀 dev environment is up",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::NodeStarting => "node-starting",
            Stage::Deploying => "deploying",
            Stage::InstallingDeps => "installing-deps",
            Stage::AppStarting => "app-starting",
            Stage::Running => "running",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the pipeline reports back to the orchestrator, which decides the
/// final process exit status exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// All stages ran; the environment reached `Running`.
    Completed,
    /// A one-shot stage exited non-zero; nothing after it was run.
    Halted { stage: Stage, exit_code: i32 },
}
