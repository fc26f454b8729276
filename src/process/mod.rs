//! Subprocess invocation layer
//!
//! Every external tool pypublish drives (git, gh, the Python build frontend,
//! twine) is started through the [CommandRunner] trait. The real
//! implementation is [SystemRunner]; [mock::RecordingRunner] records
//! invocations so workflows can be tested without touching the network or a
//! Python toolchain.

pub mod mock;
pub mod system;

pub use mock::RecordingRunner;
pub use system::SystemRunner;

use std::path::{Path, PathBuf};

use crate::error::{PypublishError, Result};
use crate::ui;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Human readable command line, arguments with spaces are quoted
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Exit status and captured stderr of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        CommandOutput {
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
///
/// Implementations block until the process exits. A spawn failure is an
/// `Err`; a non-zero exit is a successful `Ok` carrying the status, and is
/// turned into an error by [run_step].
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput>;
}

/// Run `spec` as part of `step`, failing on spawn errors and non-zero exits.
pub fn run_step<R: CommandRunner + ?Sized>(
    runner: &R,
    step: &str,
    spec: &CommandSpec,
) -> Result<CommandOutput> {
    let command = spec.command_line();
    ui::display_command(&command);
    log::debug!("[{}] running `{}` in {}", step, command, spec.cwd.display());

    let output = runner.run(spec).map_err(|source| PypublishError::Spawn {
        step: step.to_string(),
        program: spec.program.clone(),
        source,
    })?;

    if !output.is_success() {
        log::debug!("[{}] `{}` exited with {:?}", step, command, output.code);
        return Err(PypublishError::Subprocess {
            step: step.to_string(),
            command,
            code: output.code,
            stderr: output.stderr,
        });
    }

    Ok(output)
}
