//! User interface module - terminal output for workflow progress.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_error, display_plan, display_status,
    display_success, format_steps,
};
