//! Sequential crew execution
//!
//! A run moves `Pending → Running{1} → … → Running{n} → Done`, or to
//! `Failed` from whichever stage broke. There is no branching and no
//! loop-back. Every run starts from a fresh [`PipelineRun`].

use crate::prompt::render_stage_input;
use crate::{CrewStep, Result, RoleSpec, TaskSpec, TextGenerationService, WorkflowError};
use agent_core::{Agent, Context};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Lifecycle of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    Pending,
    Running { stage: usize, role: String },
    Done,
    Failed { stage: usize, reason: String },
}

/// Output of one completed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutput {
    pub stage: usize,
    pub role: String,
    pub output: String,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub run_id: Uuid,
    /// Output of the last stage
    pub final_output: String,
    pub stages: Vec<StageOutput>,
}

/// State of one query moving through the crew
///
/// Owned by a single run and dropped once the caller has its answer.
#[derive(Debug)]
pub struct PipelineRun {
    id: Uuid,
    query: String,
    state: RunState,
    history: Vec<RunState>,
    outputs: Vec<StageOutput>,
    context: Context,
}

impl PipelineRun {
    pub fn new(query: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let query = query.into();
        let context = Context::new()
            .with_run_id(id.to_string())
            .with_query(query.clone());
        Self {
            id,
            query,
            state: RunState::Pending,
            history: vec![RunState::Pending],
            outputs: Vec::new(),
            context,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Every state the run has been in, oldest first
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    pub fn outputs(&self) -> &[StageOutput] {
        &self.outputs
    }

    fn transition(&mut self, next: RunState) {
        info!(run_id = %self.id, from = ?self.state, to = ?next, "Pipeline transition");
        self.state = next.clone();
        self.history.push(next);
    }

    fn fail(&mut self, stage: usize, reason: &str) {
        self.transition(RunState::Failed {
            stage,
            reason: reason.to_string(),
        });
    }
}

/// An ordered list of role/task steps run one after another
pub struct Crew {
    steps: Vec<CrewStep>,
    service: Arc<dyn TextGenerationService>,
}

impl Crew {
    pub fn builder(service: Arc<dyn TextGenerationService>) -> CrewBuilder {
        CrewBuilder::new(service)
    }

    pub fn steps(&self) -> &[CrewStep] {
        &self.steps
    }

    /// Run the crew on a fresh pipeline run
    pub async fn kickoff(&self, query: &str) -> Result<CrewOutput> {
        let mut run = PipelineRun::new(query);
        self.run(&mut run).await
    }

    /// Drive `run` through every step
    ///
    /// Credentials are checked and every role is assigned before the first
    /// stage executes, so a misconfigured crew never reaches a tool.
    pub async fn run(&self, run: &mut PipelineRun) -> Result<CrewOutput> {
        if !self.service.is_configured() {
            warn!(run_id = %run.id, "Text generation service not configured");
            run.fail(0, "text generation service is not configured");
            return Err(WorkflowError::NotConfigured);
        }

        let mut agents: Vec<Arc<dyn Agent>> = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            match self.service.assign_role(&step.role) {
                Ok(agent) => agents.push(agent),
                Err(e) => {
                    let reason = e.to_string();
                    run.fail(index + 1, &reason);
                    return Err(WorkflowError::RoleAssignment {
                        role: step.role.name.clone(),
                        reason,
                    });
                }
            }
        }

        for (index, (step, agent)) in self.steps.iter().zip(agents).enumerate() {
            let stage = index + 1;
            let role = step.role.name.clone();
            run.transition(RunState::Running {
                stage,
                role: role.clone(),
            });

            let prior = if step.task.depends_on_prior {
                run.outputs.last().map(|o| o.output.clone())
            } else {
                None
            };

            let input = match render_stage_input(&step.task, &run.query, prior.as_deref()) {
                Ok(input) => input,
                Err(e) => {
                    run.fail(stage, &e.to_string());
                    return Err(e);
                }
            };

            run.context.set_stage(role.clone());
            match &prior {
                Some(prior) => run.context.set_prior_output(prior.clone()),
                None => {
                    run.context.remove(agent_core::context::keys::PRIOR_OUTPUT);
                }
            }

            let started = Instant::now();
            let output = match agent.process(input, &mut run.context).await {
                Ok(output) => output,
                Err(e) => {
                    let reason = e.to_string();
                    warn!(run_id = %run.id, stage, role = %role, error = %reason, "Stage failed");
                    run.fail(stage, &reason);
                    return Err(WorkflowError::StageFailed {
                        stage,
                        role,
                        reason,
                    });
                }
            };

            info!(
                run_id = %run.id,
                stage,
                role = %role,
                duration_ms = started.elapsed().as_millis() as u64,
                output_length = output.len(),
                "Stage completed"
            );

            run.outputs.push(StageOutput {
                stage,
                role,
                output,
            });
        }

        run.transition(RunState::Done);

        Ok(CrewOutput {
            run_id: run.id,
            final_output: run
                .outputs
                .last()
                .map(|o| o.output.clone())
                .unwrap_or_default(),
            stages: run.outputs.clone(),
        })
    }
}

/// Builder for [`Crew`]
pub struct CrewBuilder {
    steps: Vec<CrewStep>,
    service: Arc<dyn TextGenerationService>,
}

impl CrewBuilder {
    pub fn new(service: Arc<dyn TextGenerationService>) -> Self {
        Self {
            steps: Vec::new(),
            service,
        }
    }

    /// Append a step
    pub fn step(mut self, role: RoleSpec, task: TaskSpec) -> Self {
        self.steps.push(CrewStep::new(role, task));
        self
    }

    pub fn build(self) -> Result<Crew> {
        if self.steps.is_empty() {
            return Err(WorkflowError::EmptyCrew);
        }
        Ok(Crew {
            steps: self.steps,
            service: self.service,
        })
    }
}
