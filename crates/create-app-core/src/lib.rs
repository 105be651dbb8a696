//! create-app core - shared library for the create-app CLIs
//!
//! Scaffolds a front-end project by cloning a template repository into a new
//! directory, replacing its history with a single commit and installing its
//! dependencies. Two binaries share this library: one takes the template as
//! a flag, the other always asks for it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - name validation, the template catalog, git and installer processes
//! - **Layer 2: Workflow Orchestration** - `ScaffoldConfig` trait and `ProjectInitializer`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use create_app_core::{config::Settings, project, templates::TemplateCatalog};
//!
//! let catalog = TemplateCatalog::builtin()?;
//! let selection = catalog.resolve("react-starter", None, None)?;
//! let target = project::ProjectTarget::resolve("my-app")?;
//!
//! let initializer = project::ProjectInitializer::new(&Settings::from_config(&MyConfig));
//! let outcome = initializer
//!     .run(&target, &selection, &mut project::SilentObserver)
//!     .await?;
//! ```

pub mod config;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use product::ScaffoldConfig;
pub use project::{InitOutcome, ProjectInitializer, ProjectTarget};
pub use runtime::{GitClient, ToolAvailability};
pub use templates::{TemplateCatalog, TemplateSelection};

#[cfg(feature = "tui")]
pub use tui::run;
