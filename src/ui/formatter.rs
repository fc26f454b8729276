//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the terminal.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the command line about to be executed.
pub fn display_command(command_line: &str) {
    println!("{} {}", style("Executing:").dim(), style(command_line).cyan());
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the ordered steps a workflow is about to run.
///
/// # Arguments
/// * `title` - Headline, e.g. "Publishing v1.2.3"
/// * `steps` - Step names in execution order
pub fn display_plan(title: &str, steps: &[&str]) {
    println!("\n{}", style(title).bold());
    println!("  {}", format_steps(steps));
}

/// Join step names into a single arrow-separated line
pub fn format_steps(steps: &[&str]) -> String {
    if steps.is_empty() {
        return "(nothing to do)".to_string();
    }
    steps.join(" → ")
}
