use super::shell::{ShellConfig, ShellRunner};
use super::traits::{CommandRunner, ExecutionContext, PipelineExecutor};
use crate::pipeline::{
    Pipeline, PipelineError, PipelineResult, Stage, StageResult, Step, StepType, Validate,
    ValidationError,
};
use std::io::Write;
use std::time::Instant;

/// Local executor that runs stages one after another on the host
///
/// Stages run strictly in declared order. The first failure (a non-zero
/// command, a failed directory change, an unset variable) ends the run and
/// is returned unchanged; nothing after it starts.
#[derive(Debug, Clone)]
pub struct LocalExecutor<R = ShellRunner> {
    runner: R,
}

impl LocalExecutor<ShellRunner> {
    /// Creates a new local executor using `bash`
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(ShellRunner::default())
    }

    /// Sets shell to use
    #[must_use]
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self::with_runner(ShellRunner::new(ShellConfig {
            shell: shell.into(),
            ..ShellConfig::default()
        }))
    }
}

impl Default for LocalExecutor<ShellRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> LocalExecutor<R> {
    /// Creates an executor around any command runner
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the command runner
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Executes a single stage
    fn execute_stage(
        &self,
        stage: &Stage,
        context: &mut ExecutionContext,
    ) -> Result<(), PipelineError> {
        for step in &stage.steps {
            self.execute_step(stage, step, context)?;
        }
        Ok(())
    }

    /// Executes a single step
    fn execute_step(
        &self,
        stage: &Stage,
        step: &Step,
        context: &mut ExecutionContext,
    ) -> Result<(), PipelineError> {
        match &step.step_type {
            StepType::Shell { command } => {
                trace(context, command);

                let result = self.runner.run(command, context)?;
                tracing::debug!(
                    stage = %stage.name,
                    exit_code = result.exit_code,
                    duration_ms = result.duration.as_millis(),
                    "Command finished"
                );

                if result.is_failure() {
                    return Err(PipelineError::CommandFailed {
                        stage: stage.name.clone(),
                        command: command.clone(),
                        code: result.exit_code,
                    });
                }
            }
            StepType::ChangeDir { path } => {
                let path = context.expand(path)?;
                trace(context, &StepType::change_dir(path.as_str()).trace_line());

                let cwd = context
                    .change_dir(&path)
                    .map_err(|e| PipelineError::DirectoryChange {
                        stage: stage.name.clone(),
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                tracing::debug!(stage = %stage.name, cwd = %cwd.display(), "Changed directory");
            }
        }
        Ok(())
    }
}

impl<R: CommandRunner> PipelineExecutor for LocalExecutor<R> {
    fn execute(&self, pipeline: &Pipeline, context: &mut ExecutionContext) -> PipelineResult {
        pipeline.validate()?;

        let pipeline_id = pipeline.name().map_or("unnamed", String::as_str);
        tracing::info!(
            pipeline_id = %pipeline_id,
            run_id = %context.run_id,
            stages_count = pipeline.stage_count(),
            cwd = %context.cwd.display(),
            "Starting pipeline execution"
        );

        for stage in &pipeline.stages {
            tracing::info!(
                stage = %stage.name,
                dir = stage.dir().unwrap_or("."),
                commands = stage.command_count(),
                "Executing stage"
            );
            let start = Instant::now();

            match self.execute_stage(stage, context) {
                Ok(()) => {
                    context.record_stage_result(&stage.name, StageResult::Success);
                    tracing::info!(
                        stage = %stage.name,
                        result = %StageResult::Success,
                        duration_ms = start.elapsed().as_millis(),
                        "Stage completed"
                    );
                }
                Err(e) => {
                    context.record_stage_result(&stage.name, StageResult::Failure);
                    tracing::error!(
                        stage = %stage.name,
                        error = %e,
                        exit_code = e.exit_code(),
                        "Stage failed, stopping pipeline"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(pipeline_id = %pipeline_id, "Pipeline succeeded");
        Ok(StageResult::Success)
    }

    fn validate(&self, pipeline: &Pipeline) -> Result<(), ValidationError> {
        pipeline.validate()
    }

    fn dry_run(&self, pipeline: &Pipeline, out: &mut dyn Write) -> PipelineResult {
        tracing::info!(
            pipeline = %pipeline.name.clone().unwrap_or_default(),
            "Starting dry run"
        );

        pipeline.validate()?;

        for stage in &pipeline.stages {
            for step in &stage.steps {
                writeln!(out, "[{}] + {}", stage.name, step.step_type.trace_line())?;
            }
        }

        Ok(StageResult::Success)
    }
}

/// Echoes a command to stderr before it runs, like `set -x`
fn trace(context: &ExecutionContext, line: &str) {
    if context.options.xtrace {
        eprintln!("+ {line}");
    }
}
