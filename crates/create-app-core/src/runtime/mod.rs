//! External tool handling
//!
//! This module provides:
//! - Captured process execution
//! - git detection, cloning and history reset
//! - Dependency installation

pub mod installer;
pub mod process;
pub mod vcs;

pub use installer::{DependencyInstaller, InstallCommand, InstallError};
pub use process::{run_captured, ProcessOutcome};
pub use vcs::{GitClient, GitError, ToolAvailability, MIN_GIT_VERSION};
