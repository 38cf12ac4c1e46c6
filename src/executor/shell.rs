//! Shell execution module
//!
//! Every external command is handed to a shell (`bash` by default) running
//! in strict mode:
//!
//! - `-e` any failing command aborts the script
//! - `-u` referencing an unset variable is an error
//! - `-o pipefail` a pipeline fails if any of its members fails
//!
//! Output is inherited by default, so a tool's stdout/stderr reaches the
//! terminal in real time, interleaved exactly as the tool writes it.
//!
//! Command text is passed to the shell verbatim; the shell expands
//! variables from the context environment.
//!
//! ## Variable Expansion
//!
//! Paths the executor resolves itself (directory changes) never reach a
//! shell, so their `${VAR}` references are expanded here.
//! `${VAR:-default}` falls back to `default`.
//!
//! ```rust
//! use ci_pipeline::expand_variables;
//! use std::collections::HashMap;
//! use std::ffi::OsString;
//!
//! let env = HashMap::from([(OsString::from("SUBDIR"), OsString::from("web"))]);
//! assert_eq!(expand_variables("${SUBDIR}/tests", &env), "web/tests");
//! ```

use super::traits::{CommandRunner, ExecutionContext};
use crate::pipeline::PipelineError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Exit status a shell reports when the program cannot be found
pub const COMMAND_NOT_FOUND_CODE: i32 = 127;

/// Exit status a shell reports when the program cannot be executed
pub const NOT_EXECUTABLE_CODE: i32 = 126;

static VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("variable pattern is valid")
});

/// Strictness flags applied to every shell invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ShellOptions {
    /// Abort on the first failing command (`-e`)
    pub errexit: bool,
    /// Treat unset variables as errors (`-u`)
    pub nounset: bool,
    /// Fail a pipe if any member fails (`-o pipefail`)
    pub pipefail: bool,
    /// Echo each command to stderr before running it
    pub xtrace: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl ShellOptions {
    /// All flags enabled
    #[must_use]
    pub fn strict() -> Self {
        Self {
            errexit: true,
            nounset: true,
            pipefail: true,
            xtrace: true,
        }
    }

    /// Shell arguments that enable these options
    #[must_use]
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.errexit {
            flags.push("-e");
        }
        if self.nounset {
            flags.push("-u");
        }
        if self.pipefail {
            flags.extend(["-o", "pipefail"]);
        }
        flags
    }
}

/// Where a command's output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Inherit the pipeline's stdout/stderr
    #[default]
    Inherit,
    /// Collect output into the [`CommandResult`]
    Capture,
}

/// Shell execution configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shell to use (default: bash)
    pub shell: String,

    /// Output handling
    pub output: OutputMode,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            output: OutputMode::Inherit,
        }
    }
}

/// Result of one executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Standard output (empty unless captured)
    pub stdout: String,

    /// Standard error (empty unless captured)
    pub stderr: String,

    /// Exit code
    pub exit_code: i32,

    /// Duration of execution
    pub duration: Duration,
}

impl CommandResult {
    /// Creates a result with no captured output
    #[must_use]
    pub fn from_code(exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code,
            duration: Duration::ZERO,
        }
    }

    /// Returns true if command succeeded (exit code 0)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns true if command failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.exit_code != 0
    }
}

/// Runs commands through a real shell process
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    config: ShellConfig,
}

impl ShellRunner {
    /// Creates a runner with the given configuration
    #[must_use]
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }

    /// Returns the runner configuration
    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    fn command(&self, command: &str, context: &ExecutionContext) -> Command {
        let mut cmd = Command::new(&self.config.shell);
        cmd.args(context.options.flags());
        cmd.arg("-c");
        cmd.arg(command);
        cmd.current_dir(&context.cwd);
        cmd.env_clear();
        cmd.envs(&context.env);
        cmd.stdin(Stdio::inherit());
        match self.config.output {
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit());
                cmd.stderr(Stdio::inherit());
            }
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped());
                cmd.stderr(Stdio::piped());
            }
        }
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        command: &str,
        context: &ExecutionContext,
    ) -> Result<CommandResult, PipelineError> {
        let start = Instant::now();
        let mut cmd = self.command(command, context);

        tracing::debug!(
            shell = %self.config.shell,
            cwd = %context.cwd.display(),
            command = %command,
            "Executing shell command"
        );

        let spawn_error = |e: io::Error| PipelineError::Spawn {
            command: command.to_string(),
            error: e.to_string(),
            code: spawn_error_code(&e),
        };

        let result = match self.config.output {
            OutputMode::Inherit => {
                let status = cmd.status().map_err(spawn_error)?;
                CommandResult::from_code(status_code(status))
            }
            OutputMode::Capture => {
                let output = cmd.output().map_err(spawn_error)?;
                CommandResult {
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    exit_code: status_code(output.status),
                    duration: Duration::ZERO,
                }
            }
        };

        Ok(CommandResult {
            duration: start.elapsed(),
            ..result
        })
    }
}

/// Exit code of a finished process, using the shell convention
/// `128 + signal` for processes killed by a signal.
#[must_use]
pub fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    crate::pipeline::GENERIC_FAILURE_CODE
}

fn spawn_error_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => COMMAND_NOT_FOUND_CODE,
        io::ErrorKind::PermissionDenied => NOT_EXECUTABLE_CODE,
        _ => crate::pipeline::GENERIC_FAILURE_CODE,
    }
}

/// Expands `${VAR}` references in a path
///
/// A variable that is not found and has no `:-default` remains unchanged.
/// Values that are not UTF-8 are converted lossily.
pub fn expand_variables(input: &str, env: &HashMap<OsString, OsString>) -> String {
    VAR_PATTERN
        .replace_all(input, |caps: &Captures| {
            lookup(caps, env).unwrap_or_else(|| caps[0].to_string())
        })
        .to_string()
}

/// Expands `${VAR}` references, failing on the first unset variable
///
/// # Errors
///
/// Returns [`PipelineError::UndefinedVariable`] naming the first variable
/// that is neither set nor given a `:-default`.
pub fn expand_variables_strict(
    input: &str,
    env: &HashMap<OsString, OsString>,
) -> Result<String, PipelineError> {
    if let Some(caps) = VAR_PATTERN
        .captures_iter(input)
        .find(|caps| lookup(caps, env).is_none())
    {
        return Err(PipelineError::UndefinedVariable {
            name: caps[1].to_string(),
        });
    }

    Ok(expand_variables(input, env))
}

fn lookup(caps: &Captures, env: &HashMap<OsString, OsString>) -> Option<String> {
    env.get(OsStr::new(&caps[1]))
        .map(|value| value.to_string_lossy().into_owned())
        .or_else(|| caps.get(3).map(|m| m.as_str().to_string()))
}
