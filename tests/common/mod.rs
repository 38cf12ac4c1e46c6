// Shared fixtures for integration tests
#![allow(dead_code)]

use ci_pipeline::{CommandResult, CommandRunner, ExecutionContext, PipelineError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub command: String,
    pub cwd: PathBuf,
}

/// Command runner that returns scripted exit codes and records every call
#[derive(Default)]
pub struct ScriptedRunner {
    codes: HashMap<String, i32>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `command` exit with `code`; anything unscripted exits 0
    pub fn exit_with(mut self, command: &str, code: i32) -> Self {
        self.codes.insert(command.to_string(), code);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        command: &str,
        context: &ExecutionContext,
    ) -> Result<CommandResult, PipelineError> {
        self.calls.lock().unwrap().push(Call {
            command: command.to_string(),
            cwd: context.cwd.clone(),
        });
        Ok(CommandResult::from_code(
            self.codes.get(command).copied().unwrap_or(0),
        ))
    }
}

/// Context rooted at `cwd` with an empty environment and no command echo
pub fn quiet_context(cwd: &Path) -> ExecutionContext {
    let mut context = ExecutionContext::new(cwd).with_env(HashMap::new());
    context.options.xtrace = false;
    context
}

/// Temporary anchor directory, optionally containing the `test` sub-project
pub fn workspace(with_subproject: bool) -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    if with_subproject {
        std::fs::create_dir(root.path().join("test")).unwrap();
    }
    root
}
