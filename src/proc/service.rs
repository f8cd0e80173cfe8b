// src/proc/service.rs

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Child;
use tracing::{info, warn};

use crate::proc::step::shell_command;

/// A supervised long-lived child process (the node, the frontend app).
///
/// The child inherits the console and is spawned with `kill_on_drop(true)`,
/// so dropping the handle is a hard backstop; orderly shutdown goes through
/// [`Service::terminate`].
#[derive(Debug)]
pub struct Service {
    name: String,
    child: Child,
    terminated: bool,
}

impl Service {
    /// Spawn a long-lived command through the platform shell.
    ///
    /// The spawn itself can fail synchronously (missing shell, bad working
    /// directory); a command that starts but dies immediately is only
    /// observed later, by the readiness probe or by `wait`-ing.
    pub fn launch(name: impl Into<String>, cmd_line: &str, dir: impl AsRef<Path>) -> Result<Self> {
        let name = name.into();
        info!(service = %name, cmd = %cmd_line, "launching service");

        let mut cmd = shell_command(cmd_line);
        cmd.current_dir(dir.as_ref())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .with_context(|| format!("launching service '{}'", name))?;

        Ok(Self {
            name,
            child,
            terminated: false,
        })
    }

    /// Request termination of the child and reap it.
    ///
    /// Idempotent: the kill is issued at most once, later calls are no-ops.
    /// There is no graceful-shutdown handshake with the child.
    pub async fn terminate(&mut self) -> Result<()> {
        if self.terminated {
            return Ok(());
        }
        self.terminated = true;

        info!(service = %self.name, "terminating service");

        if let Err(err) = self.child.start_kill() {
            // Most likely the child already exited on its own.
            warn!(service = %self.name, error = %err, "kill request failed");
        }

        let status = self
            .child
            .wait()
            .await
            .with_context(|| format!("reaping service '{}'", self.name))?;

        info!(service = %self.name, exit = ?status.code(), "service stopped");
        Ok(())
    }

    /// Whether a termination request has been issued.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS pid, if the child is still running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}
