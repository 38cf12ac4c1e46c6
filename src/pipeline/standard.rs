//! The fixed build-and-test pipeline
//!
//! Five stages, always in this order:
//!
//! 1. `Build` - build every member of the primary workspace
//! 2. `Test` - run the primary workspace's unit tests
//! 3. `Enter sub-project` - change into the sub-project directory (kept for the rest of the run)
//! 4. `Install sub-project dependencies` - install into the sub-project's local store
//! 5. `Test sub-project` - run the sub-project's test suite
//!
//! The commands default to a Cargo workspace with an npm sub-project in
//! `test/`, and can be swapped through [`Toolchains`].

use super::Pipeline;
use serde::{Deserialize, Serialize};

/// Stage names of the standard pipeline, in execution order
pub const STAGE_NAMES: [&str; 5] = [
    "Build",
    "Test",
    "Enter sub-project",
    "Install sub-project dependencies",
    "Test sub-project",
];

/// Commands used by the standard pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchains {
    /// Builds the primary workspace
    pub build: String,
    /// Runs the primary workspace's tests
    pub test: String,
    /// Sub-project directory, relative to the anchor directory
    pub subproject_dir: String,
    /// Installs the sub-project's dependencies
    pub install: String,
    /// Runs the sub-project's tests
    pub subproject_test: String,
}

impl Default for Toolchains {
    fn default() -> Self {
        Self {
            build: "cargo build --verbose --all".to_string(),
            test: "cargo test --verbose --all".to_string(),
            subproject_dir: "test".to_string(),
            install: "npm install".to_string(),
            subproject_test: "npm test".to_string(),
        }
    }
}

/// Builds the standard five-stage pipeline
#[must_use]
pub fn standard_pipeline(toolchains: &Toolchains) -> Pipeline {
    let [build, test, enter, install, sub_test] = STAGE_NAMES;

    Pipeline::builder()
        .name("ci")
        .stage(crate::stage!(build, crate::steps!(crate::sh!(&toolchains.build))))
        .stage(crate::stage!(test, crate::steps!(crate::sh!(&toolchains.test))))
        .stage(crate::stage!(
            enter,
            crate::steps!(crate::cd!(&toolchains.subproject_dir))
        ))
        .stage(crate::stage!(
            install,
            crate::steps!(crate::sh!(&toolchains.install))
        ))
        .stage(crate::stage!(
            sub_test,
            crate::steps!(crate::sh!(&toolchains.subproject_test))
        ))
        .build_unchecked()
}
