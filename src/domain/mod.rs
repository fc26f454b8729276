//! Domain logic - release inputs independent of any external tool

pub mod options;
pub mod version;

pub use options::{Workflow, WorkflowKind, WorkflowOptions};
pub use version::Version;
