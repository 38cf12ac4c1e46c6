//! Pipeline definition and builder

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::pipeline::errors::ValidationError;
use crate::pipeline::stage::Stage;
use crate::pipeline::types::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main pipeline structure: stages run strictly in declared order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stages in pipeline
    pub stages: Vec<Stage>,
}

impl Validate for Pipeline {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.stages.is_empty() {
            return Err(ValidationError::EmptyPipeline);
        }

        for stage in &self.stages {
            stage.validate()?;
        }

        Ok(())
    }
}

impl Pipeline {
    /// Creates a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Returns pipeline name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Returns number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pipeline({}): {} stages",
            self.name.as_deref().unwrap_or("unnamed"),
            self.stages.len()
        )
    }
}

/// Builder for creating pipelines
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline {
                name: None,
                stages: Vec::new(),
            },
        }
    }

    /// Sets pipeline name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.pipeline.name = Some(name.into());
        self
    }

    /// Adds a stage to pipeline
    pub fn stage(mut self, stage: Stage) -> Self {
        self.pipeline.stages.push(stage);
        self
    }

    /// Adds multiple stages to pipeline
    pub fn stages(mut self, mut stages: Vec<Stage>) -> Self {
        self.pipeline.stages.append(&mut stages);
        self
    }

    /// Builds pipeline
    #[allow(clippy::missing_errors_doc)]
    pub fn build(self) -> Result<Pipeline, ValidationError> {
        self.pipeline.validate()?;
        Ok(self.pipeline)
    }

    /// Builds pipeline without validation (for internal use)
    #[must_use]
    pub fn build_unchecked(self) -> Pipeline {
        self.pipeline
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Step;

    #[test]
    fn test_empty_pipeline_is_invalid() {
        let pipeline = Pipeline::builder().build_unchecked();
        assert_eq!(pipeline.validate(), Err(ValidationError::EmptyPipeline));
        assert_eq!(
            pipeline.validate().unwrap_err().to_string(),
            "Pipeline must have at least one stage"
        );
    }

    #[test]
    fn test_builder_keeps_stage_order() {
        let pipeline = Pipeline::builder()
            .name("ordered")
            .stage(Stage::new("first", vec![Step::shell("true")]))
            .stages(vec![
                Stage::new("second", vec![Step::shell("true")]),
                Stage::new("third", vec![Step::shell("true")]),
            ])
            .build()
            .unwrap();

        let names: Vec<_> = pipeline.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(pipeline.stage_count(), 3);
        assert_eq!(pipeline.to_string(), "Pipeline(ordered): 3 stages");
    }

    #[test]
    fn test_build_rejects_invalid_stage() {
        let result = Pipeline::builder()
            .stage(Stage::new("Build", vec![]))
            .build();
        assert!(matches!(result, Err(ValidationError::EmptyStage { .. })));
    }
}
