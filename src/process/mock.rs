use std::cell::RefCell;
use std::io;

use crate::process::{CommandOutput, CommandRunner, CommandSpec};

type Effect = Box<dyn Fn(&CommandSpec)>;

/// Records every command instead of spawning it.
///
/// Commands succeed unless a registered failure matches. Matching is by
/// prefix of [CommandSpec::command_line], so `"git push"` matches every push.
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: Vec<(String, CommandOutput)>,
    missing: Vec<String>,
    effects: Vec<(String, Effect)>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds
    pub fn new() -> Self {
        RecordingRunner {
            calls: RefCell::new(Vec::new()),
            failures: Vec::new(),
            missing: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Make commands starting with `prefix` exit with `code`
    pub fn fail_on(mut self, prefix: &str, code: i32, stderr: &str) -> Self {
        self.failures
            .push((prefix.to_string(), CommandOutput::failure(code, stderr)));
        self
    }

    /// Make `program` fail to spawn, as if it were not installed
    pub fn missing_program(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Run `effect` whenever a command starting with `prefix` runs successfully
    pub fn on_run(mut self, prefix: &str, effect: impl Fn(&CommandSpec) + 'static) -> Self {
        self.effects.push((prefix.to_string(), Box::new(effect)));
        self
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::command_line).collect()
    }

    /// Whether any recorded command starts with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|spec| spec.command_line().starts_with(prefix))
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());

        if self.missing.iter().any(|program| *program == spec.program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", spec.program),
            ));
        }

        let line = spec.command_line();
        if let Some((_, output)) = self
            .failures
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
        {
            return Ok(output.clone());
        }

        for (prefix, effect) in &self.effects {
            if line.starts_with(prefix.as_str()) {
                effect(spec);
            }
        }

        Ok(CommandOutput::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_records_in_order() {
        let runner = RecordingRunner::new();
        runner.run(&CommandSpec::new("git", ".").arg("init")).unwrap();
        runner
            .run(&CommandSpec::new("git", ".").args(["add", "."]))
            .unwrap();
        assert_eq!(runner.command_lines(), vec!["git init", "git add ."]);
        assert!(runner.ran("git add"));
        assert!(!runner.ran("gh"));
    }

    #[test]
    fn test_failure_matches_prefix() {
        let runner = RecordingRunner::new().fail_on("git push", 1, "rejected");
        let output = runner
            .run(&CommandSpec::new("git", ".").args(["push", "origin", "HEAD"]))
            .unwrap();
        assert_eq!(output.code, Some(1));
        assert_eq!(output.stderr, "rejected");

        let output = runner.run(&CommandSpec::new("git", ".").arg("init")).unwrap();
        assert!(output.is_success());
    }

    #[test]
    fn test_effect_runs_only_on_success() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let runner = RecordingRunner::new()
            .fail_on("python -m build --sdist", 1, "")
            .on_run("python -m build", move |_| counter.set(counter.get() + 1));

        runner
            .run(&CommandSpec::new("python", ".").args(["-m", "build"]))
            .unwrap();
        runner
            .run(&CommandSpec::new("python", ".").args(["-m", "build", "--sdist"]))
            .unwrap();
        assert_eq!(hits.get(), 1);
    }
}
