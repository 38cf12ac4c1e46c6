//! Error types for pipeline domain

use thiserror::Error;

/// Exit status used for every failure that has no underlying tool status
/// (the status `cd` and an unbound variable produce in a strict shell).
pub const GENERIC_FAILURE_CODE: i32 = 1;

/// Errors that can occur during pipeline operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Validation failed with specified reason
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A command exited with a non-zero status
    #[error("Stage '{stage}' failed: `{command}` exited with code {code}")]
    CommandFailed {
        /// Name of the stage that failed.
        stage: String,
        /// Command line as it was executed.
        command: String,
        /// Exit code returned by the command.
        code: i32,
    },

    /// The command could not be started at all
    #[error("Failed to spawn `{command}`: {error}")]
    Spawn {
        /// Command line that could not be started.
        command: String,
        /// Reason reported by the operating system.
        error: String,
        /// Exit status a shell reports for the same condition.
        code: i32,
    },

    /// Working directory change failed
    #[error("Stage '{stage}' failed: cannot change directory to '{path}': {reason}")]
    DirectoryChange {
        /// Name of the stage performing the change.
        stage: String,
        /// Requested directory.
        path: String,
        /// Why the change was rejected.
        reason: String,
    },

    /// A `${VAR}` reference names a variable that is not set
    #[error("{name}: unbound variable")]
    UndefinedVariable {
        /// Name of the unset variable.
        name: String,
    },

    /// The pipeline definition or its anchor directory could not be located
    #[error("Cannot resolve base directory from '{path}': {reason}")]
    AnchorResolution {
        /// Definition path that was being resolved.
        path: String,
        /// Reason for the failure.
        reason: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl PipelineError {
    /// Process exit status this error should surface as.
    ///
    /// Command failures propagate the tool's own status unmodified.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } | Self::Spawn { code, .. } => *code,
            Self::Validation(_)
            | Self::DirectoryChange { .. }
            | Self::UndefinedVariable { .. }
            | Self::AnchorResolution { .. }
            | Self::Config(_)
            | Self::Io(_) => GENERIC_FAILURE_CODE,
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Validation errors for pipeline components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name cannot be empty
    #[error("Name cannot be empty")]
    EmptyName,

    /// Name too long
    #[error("Name too long: max {max} characters, got {len}")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length of the name.
        len: usize,
    },

    /// Pipeline must have at least one stage
    #[error("Pipeline must have at least one stage")]
    EmptyPipeline,

    /// Stage must have at least one step
    #[error("Stage '{stage}' must have at least one step")]
    EmptyStage {
        /// Name of the empty stage.
        stage: String,
    },

    /// Shell step without a command
    #[error("Stage '{stage}' contains an empty command")]
    EmptyCommand {
        /// Name of the offending stage.
        stage: String,
    },

    /// Directory step without a path
    #[error("Stage '{stage}' contains a directory change with an empty path")]
    EmptyDirectory {
        /// Name of the offending stage.
        stage: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_propagates_code() {
        let err = PipelineError::CommandFailed {
            stage: "Build".to_string(),
            command: "cargo build".to_string(),
            code: 101,
        };
        assert_eq!(err.exit_code(), 101);
        assert_eq!(
            err.to_string(),
            "Stage 'Build' failed: `cargo build` exited with code 101"
        );
    }

    #[test]
    fn test_non_command_errors_exit_one() {
        let errors = [
            PipelineError::Validation(ValidationError::EmptyPipeline),
            PipelineError::DirectoryChange {
                stage: "Enter".to_string(),
                path: "test".to_string(),
                reason: "not found".to_string(),
            },
            PipelineError::UndefinedVariable {
                name: "HOME".to_string(),
            },
            PipelineError::AnchorResolution {
                path: "/nowhere".to_string(),
                reason: "missing".to_string(),
            },
            PipelineError::Config("bad".to_string()),
            PipelineError::Io("closed".to_string()),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn test_spawn_error_uses_shell_code() {
        let err = PipelineError::Spawn {
            command: "bash".to_string(),
            error: "No such file or directory".to_string(),
            code: 127,
        };
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn test_undefined_variable_message() {
        let err = PipelineError::UndefinedVariable {
            name: "TOKEN".to_string(),
        };
        assert_eq!(err.to_string(), "TOKEN: unbound variable");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io.into();
        assert_eq!(err, PipelineError::Io("gone".to_string()));
    }
}
