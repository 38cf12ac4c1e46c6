//! Prelude module for common imports

// Re-export macros
pub use crate::{cd, sh, stage, steps};

// Re-export all pipeline types with full paths
pub use crate::pipeline::errors::{PipelineError, ValidationError};
pub use crate::pipeline::pipeline_def::{Pipeline, PipelineBuilder};
pub use crate::pipeline::stage::Stage;
pub use crate::pipeline::standard::{Toolchains, standard_pipeline};
pub use crate::pipeline::steps::{Step, StepType};
pub use crate::pipeline::types::{PipelineResult, StageResult, Validate};

// Re-export executor types
pub use crate::executor::{
    CommandResult, CommandRunner, ExecutionContext, LocalExecutor, PipelineExecutor, ShellOptions,
};
