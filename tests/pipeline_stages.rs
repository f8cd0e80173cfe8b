use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, bail};
use chainup::pipeline::{PipelineOutcome, ReadinessProbe, Stage, StageExecutor, StagePlan, drive};
use chainup::proc::{StepOutcome, StepSpec};

type Events = Rc<RefCell<Vec<String>>>;

fn plan() -> StagePlan {
    StagePlan {
        deploy: StepSpec::new("deploy", "echo deploy", "."),
        install: StepSpec::new("install-deps", "echo install", "."),
        app: StepSpec::new("frontend", "echo app", "."),
    }
}

struct FakeProbe {
    events: Events,
    ready: bool,
}

impl ReadinessProbe for FakeProbe {
    async fn wait_ready(&self) -> Result<()> {
        if !self.ready {
            bail!("node never came up");
        }
        self.events.borrow_mut().push("ready".to_string());
        Ok(())
    }
}

struct FakeExecutor {
    events: Events,
    deploy: StepOutcome,
    install: StepOutcome,
}

impl FakeExecutor {
    fn all_green(events: Events) -> Self {
        Self {
            events,
            deploy: StepOutcome::Success,
            install: StepOutcome::Success,
        }
    }
}

impl StageExecutor for FakeExecutor {
    async fn run_step(&mut self, stage: Stage, _spec: &StepSpec) -> Result<StepOutcome> {
        self.events.borrow_mut().push(format!("step:{stage}"));
        Ok(match stage {
            Stage::Deploying => self.deploy,
            Stage::InstallingDeps => self.install,
            _ => StepOutcome::Success,
        })
    }

    async fn start_app(&mut self, _spec: &StepSpec) -> Result<()> {
        self.events.borrow_mut().push("app-start".to_string());
        Ok(())
    }
}

#[tokio::test]
async fn success_path_runs_all_stages_in_order() {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let probe = FakeProbe {
        events: events.clone(),
        ready: true,
    };
    let mut exec = FakeExecutor::all_green(events.clone());

    let outcome = drive(&plan(), &probe, &mut exec).await.unwrap();
    assert_eq!(outcome, PipelineOutcome::Completed);

    // Readiness strictly precedes the deploy step, and the stages run in
    // pipeline order.
    assert_eq!(
        *events.borrow(),
        vec!["ready", "step:deploying", "step:installing-deps", "app-start"]
    );
}

#[tokio::test]
async fn deploy_failure_halts_before_install() {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let probe = FakeProbe {
        events: events.clone(),
        ready: true,
    };
    let mut exec = FakeExecutor {
        events: events.clone(),
        deploy: StepOutcome::Failed(7),
        install: StepOutcome::Success,
    };

    let outcome = drive(&plan(), &probe, &mut exec).await.unwrap();
    assert_eq!(
        outcome,
        PipelineOutcome::Halted {
            stage: Stage::Deploying,
            exit_code: 7
        }
    );

    // Neither the install step nor the app start may have been invoked.
    assert_eq!(*events.borrow(), vec!["ready", "step:deploying"]);
}

#[tokio::test]
async fn install_failure_halts_before_app_start() {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let probe = FakeProbe {
        events: events.clone(),
        ready: true,
    };
    let mut exec = FakeExecutor {
        events: events.clone(),
        deploy: StepOutcome::Success,
        install: StepOutcome::Failed(1),
    };

    let outcome = drive(&plan(), &probe, &mut exec).await.unwrap();
    assert_eq!(
        outcome,
        PipelineOutcome::Halted {
            stage: Stage::InstallingDeps,
            exit_code: 1
        }
    );
    assert_eq!(
        *events.borrow(),
        vec!["ready", "step:deploying", "step:installing-deps"]
    );
}

#[tokio::test]
async fn probe_exhaustion_runs_no_step_at_all() {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let probe = FakeProbe {
        events: events.clone(),
        ready: false,
    };
    let mut exec = FakeExecutor::all_green(events.clone());

    let err = drive(&plan(), &probe, &mut exec).await.unwrap_err();
    assert!(err.to_string().contains("never came up"));
    assert!(events.borrow().is_empty());
}
