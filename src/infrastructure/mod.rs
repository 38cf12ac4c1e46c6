//! Infrastructure layer
//!
//! Configuration loading and logging setup.

mod config;
mod logging;

pub use config::Config;
pub use logging::{init_logging, level_for_verbosity};
