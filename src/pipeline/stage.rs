//! Stage types for pipeline definition
//!
//! A stage is a named, ordered list of steps. Its optional working
//! directory change is a leading [`StepType::ChangeDir`] step,
//! so the change stacks onto whatever directory earlier stages left behind.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use super::Validate;
use super::errors::ValidationError;
use super::steps::{Step, StepType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a stage name
pub const MAX_STAGE_NAME_LEN: usize = 100;

/// A stage in a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name
    pub name: String,

    /// Steps in this stage, executed in order
    pub steps: Vec<Step>,
}

impl Validate for Stage {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if self.name.len() > MAX_STAGE_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                max: MAX_STAGE_NAME_LEN,
                len: self.name.len(),
            });
        }

        if self.steps.is_empty() {
            return Err(ValidationError::EmptyStage {
                stage: self.name.clone(),
            });
        }

        for step in &self.steps {
            match &step.step_type {
                StepType::Shell { command } if command.trim().is_empty() => {
                    return Err(ValidationError::EmptyCommand {
                        stage: self.name.clone(),
                    });
                }
                StepType::ChangeDir { path } if path.trim().is_empty() => {
                    return Err(ValidationError::EmptyDirectory {
                        stage: self.name.clone(),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl Stage {
    /// Creates a new stage
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Directory this stage changes into first, if any
    pub fn dir(&self) -> Option<&str> {
        match self.steps.first().map(|s| &s.step_type) {
            Some(StepType::ChangeDir { path }) => Some(path.as_str()),
            _ => None,
        }
    }

    /// Number of external commands this stage runs
    pub fn command_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_change_dir()).count()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage({}): {} steps", self.name, self.steps.len())
    }
}
