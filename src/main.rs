//! ci-pipeline - fail-fast build-and-test pipeline
//!
//! Runs, in order and stopping at the first failure:
//!
//! ```bash
//! cargo build --verbose --all
//! cargo test --verbose --all
//! cd test
//! npm install
//! npm test
//! ```
//!
//! The exit status is that of the first failing command, or zero.
//!
//! ## Installation
//!
//! Place (or symlink) the binary at `<workspace>/ci/ci-pipeline`; it always
//! runs from `<workspace>`, regardless of the caller's directory.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the pipeline
//! ci/ci-pipeline
//!
//! # Show what would run
//! ci/ci-pipeline --dry-run
//!
//! # Swap the sub-project toolchain
//! ci/ci-pipeline --config ci/pipeline.yaml
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(cli::exit_status(&e))
        }
    }
}
