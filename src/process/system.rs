use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::process::{CommandOutput, CommandRunner, CommandSpec};

/// Runs commands as real child processes.
///
/// stdin and stdout are inherited so build progress and any credential
/// prompts from the tools stay interactive. stderr is captured for error
/// reporting and echoed once the process exits successfully.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() && !stderr.is_empty() {
            io::stderr().write_all(stderr.as_bytes())?;
        }

        Ok(CommandOutput {
            code: output.status.code(),
            stderr,
        })
    }
}
