//! Step types for pipeline execution
//!
//! A step is the atomic unit of work inside a stage: either an external
//! command run through the shell, or a change of the working directory.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of steps available in pipelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepType {
    /// Shell command execution
    Shell {
        /// Command to execute
        command: String,
    },

    /// Change the working directory for this and every later stage.
    ///
    /// The change is never restored.
    #[serde(rename = "cd")]
    ChangeDir {
        /// Directory path, relative to the current working directory
        path: String,
    },
}

impl StepType {
    /// Creates a shell command step
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell {
            command: command.into(),
        }
    }

    /// Creates a directory change step
    pub fn change_dir(path: impl Into<String>) -> Self {
        Self::ChangeDir { path: path.into() }
    }

    /// Command line as it appears in the execution trace
    pub fn trace_line(&self) -> String {
        match self {
            Self::Shell { command } => command.clone(),
            Self::ChangeDir { path } => format!("cd {}", shell_words::quote(path)),
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell { command } => write!(f, "sh({command})"),
            Self::ChangeDir { path } => write!(f, "cd({path})"),
        }
    }
}

/// A single step in a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Type of step
    #[serde(flatten)]
    pub step_type: StepType,
}

impl Step {
    /// Creates a new step
    pub fn new(step_type: StepType) -> Self {
        Self { step_type }
    }

    /// Creates a shell command step
    pub fn shell(command: impl Into<String>) -> Self {
        Self::new(StepType::shell(command))
    }

    /// Creates a directory change step
    pub fn change_dir(path: impl Into<String>) -> Self {
        Self::new(StepType::change_dir(path))
    }

    /// Returns true for directory change steps
    pub fn is_change_dir(&self) -> bool {
        matches!(self.step_type, StepType::ChangeDir { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step: {}", self.step_type)
    }
}
