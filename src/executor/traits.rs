//! Pipeline execution traits
//!
//! This module defines the seams of the executor: how a single command is
//! run ([`CommandRunner`]), how a whole pipeline is driven
//! ([`PipelineExecutor`]) and the explicit state threaded through a run
//! ([`ExecutionContext`]).

use super::shell::{CommandResult, ShellOptions, expand_variables, expand_variables_strict};
use crate::pipeline::{Pipeline, PipelineError, PipelineResult, StageResult, ValidationError};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Executes one external command and blocks until it finishes
#[allow(clippy::missing_errors_doc)]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` in `context.cwd` with `context.env`.
    ///
    /// A non-zero exit is reported through [`CommandResult::exit_code`];
    /// `Err` is reserved for commands that could not be started.
    fn run(&self, command: &str, context: &ExecutionContext)
    -> Result<CommandResult, PipelineError>;
}

/// Trait for executing pipelines
#[allow(clippy::missing_errors_doc)]
pub trait PipelineExecutor: Send + Sync {
    /// Executes a pipeline, stopping at the first failing stage
    fn execute(&self, pipeline: &Pipeline, context: &mut ExecutionContext) -> PipelineResult;

    /// Validates a pipeline without executing it
    fn validate(&self, pipeline: &Pipeline) -> Result<(), ValidationError>;

    /// Writes the execution plan to `out` (no side effects)
    fn dry_run(&self, pipeline: &Pipeline, out: &mut dyn Write) -> PipelineResult;
}

/// State shared by every stage of one run
///
/// The working directory lives here instead of in the process, so a
/// directory change made by one stage is visible to all later stages and
/// never reverted.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Environment passed to every command, byte for byte
    pub env: HashMap<OsString, OsString>,

    /// Current working directory
    pub cwd: PathBuf,

    /// Shell strictness
    pub options: ShellOptions,

    /// Identifier for log correlation
    pub run_id: String,

    /// Results of the stages started so far, in order
    pub stage_results: Vec<(String, StageResult)>,
}

impl ExecutionContext {
    /// Creates a context rooted at `cwd` with the inherited environment
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            env: inherited_env(),
            cwd: cwd.into(),
            options: ShellOptions::default(),
            run_id: uuid::Uuid::new_v4().to_string(),
            stage_results: Vec::new(),
        }
    }

    /// Creates a context from the process' current directory
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] when the current directory is unreadable.
    pub fn from_process() -> Result<Self, PipelineError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Replaces the environment snapshot
    #[must_use]
    pub fn with_env(mut self, env: HashMap<OsString, OsString>) -> Self {
        self.env = env;
        self
    }

    /// Sets shell strictness
    #[must_use]
    pub fn with_options(mut self, options: ShellOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets an environment variable
    pub fn set_env(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.env.insert(key.into(), value.into());
    }

    /// Gets an environment variable
    #[must_use]
    pub fn get_env(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.env.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Changes the working directory, relative to the current one.
    ///
    /// # Errors
    ///
    /// Fails when the target does not exist or is not a directory; the
    /// context is left unchanged in that case.
    pub fn change_dir(&mut self, path: impl AsRef<Path>) -> io::Result<&Path> {
        let target = self.cwd.join(path);
        let metadata = std::fs::metadata(&target)?;
        if !metadata.is_dir() {
            return Err(io::Error::other("Not a directory"));
        }
        self.cwd = target;
        Ok(&self.cwd)
    }

    /// Expands `${VAR}` references against this context's environment.
    ///
    /// Only used for paths the executor handles itself; shell commands are
    /// expanded by the shell.
    ///
    /// # Errors
    ///
    /// With `nounset`, returns [`PipelineError::UndefinedVariable`] for
    /// the first unset variable.
    pub fn expand(&self, input: &str) -> Result<String, PipelineError> {
        if self.options.nounset {
            expand_variables_strict(input, &self.env)
        } else {
            Ok(expand_variables(input, &self.env))
        }
    }

    /// Records the result of a stage
    pub fn record_stage_result(&mut self, stage_name: &str, result: StageResult) {
        self.stage_results.push((stage_name.to_string(), result));
    }

    /// Gets the result of a previous stage
    #[must_use]
    pub fn get_stage_result(&self, stage_name: &str) -> Option<&StageResult> {
        self.stage_results
            .iter()
            .find(|(name, _)| name == stage_name)
            .map(|(_, result)| result)
    }

    /// Names of the stages that were started, in order
    #[must_use]
    pub fn started_stages(&self) -> Vec<&str> {
        self.stage_results
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Snapshot of the process environment, including non UTF-8 entries
fn inherited_env() -> HashMap<OsString, OsString> {
    std::env::vars_os().collect()
}
