//! Pipeline domain types and logic

pub mod errors;
pub mod pipeline_def;
pub mod stage;
pub mod standard;
pub mod steps;
pub mod types;


// Re-export public types from submodules
pub use errors::{GENERIC_FAILURE_CODE, PipelineError, ValidationError};
pub use pipeline_def::{Pipeline, PipelineBuilder};
pub use stage::Stage;
pub use standard::{STAGE_NAMES, Toolchains, standard_pipeline};
pub use steps::{Step, StepType};
pub use types::{PipelineResult, StageResult, Validate};
