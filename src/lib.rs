//! # ci-pipeline - fail-fast build-and-test orchestration
//!
//! Drives two independently managed project trees through a fixed
//! sequence of stages: build a primary workspace, run its unit tests,
//! descend into a nested sub-project, install its dependencies and run its
//! test suite.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ci_pipeline::prelude::*;
//!
//! let pipeline = standard_pipeline(&Toolchains::default());
//! let mut context = ExecutionContext::from_process().unwrap();
//!
//! match LocalExecutor::new().execute(&pipeline, &mut context) {
//!     Ok(_) => println!("all green"),
//!     Err(e) => std::process::exit(e.exit_code()),
//! }
//! ```
//!
//! ## Semantics
//!
//! - **Ordered**: stage *k+1* starts only after stage *k* succeeded
//! - **Fail-fast**: the first failure ends the run; its exit code is
//!   propagated unmodified
//! - **Cumulative directories**: a directory change stays in effect for
//!   every later stage
//! - **Strict shell**: commands run with `-e -u -o pipefail` and are echoed
//!   before they run
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod executor;
pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use executor::{
    CommandResult, CommandRunner, ExecutionContext, LocalExecutor, OutputMode, PipelineExecutor,
    ShellConfig, ShellOptions, ShellRunner, definition_location, expand_variables,
    expand_variables_strict, resolve_anchor,
};
pub use infrastructure::{Config, init_logging, level_for_verbosity};
pub use pipeline::{
    GENERIC_FAILURE_CODE, Pipeline, PipelineBuilder, PipelineError, PipelineResult, STAGE_NAMES,
    Stage, StageResult, Step, StepType, Toolchains, Validate, ValidationError,
    standard_pipeline,
};

/// Version of the ci-pipeline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
