//! Pipeline execution layer
//!
//! This module contains traits and implementations for executing pipelines.

mod anchor;
mod local;
mod shell;
mod traits;

pub use anchor::{definition_location, resolve_anchor};
pub use local::LocalExecutor;
pub use shell::{
    COMMAND_NOT_FOUND_CODE, CommandResult, NOT_EXECUTABLE_CODE, OutputMode, ShellConfig,
    ShellOptions, ShellRunner, expand_variables, expand_variables_strict, status_code,
};
pub use traits::{CommandRunner, ExecutionContext, PipelineExecutor};
