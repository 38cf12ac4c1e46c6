//! Declarative macros for pipeline definitions
//!
//! Small helpers that keep hard-coded pipelines close to the shell
//! script they replace.

/// Creates a shell command step
#[macro_export]
macro_rules! sh {
    ($cmd:expr) => {
        $crate::pipeline::Step::shell($cmd)
    };
}

/// Creates a directory change step
#[macro_export]
macro_rules! cd {
    ($path:expr) => {
        $crate::pipeline::Step::change_dir($path)
    };
}

/// Creates a stage
#[macro_export]
macro_rules! stage {
    ($name:expr, $steps:expr) => {
        $crate::pipeline::Stage::new($name, $steps)
    };
}

/// Creates a list of steps
#[macro_export]
macro_rules! steps {
    ($($step:expr),* $(,)?) => {
        vec![$($step),*]
    };
}
