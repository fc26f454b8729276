use thiserror::Error;

/// Exit code for invalid or incomplete arguments, matching clap's own usage errors.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Unified error type for pypublish operations
#[derive(Error, Debug)]
pub enum PypublishError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("{step} failed: `{command}` exited with {}{}", describe_code(.code), describe_stderr(.stderr))]
    Subprocess {
        step: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{step} failed: could not start `{program}`: {source}")]
    Spawn {
        step: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pypublish
pub type Result<T> = std::result::Result<T, PypublishError>;

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl PypublishError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        PypublishError::Usage(msg.into())
    }

    /// Create a precondition error with context
    pub fn precondition(msg: impl Into<String>) -> Self {
        PypublishError::Precondition(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Subprocess failures propagate the child's status so callers scripting
    /// around pypublish see the same code the failing tool returned.
    pub fn exit_code(&self) -> i32 {
        match self {
            PypublishError::Usage(_) => USAGE_EXIT_CODE,
            PypublishError::Subprocess { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, PypublishError::Usage(_))
    }
}
