//! Template catalog and source handling
//!
//! This module provides:
//! - The built-in template catalog, embedded at compile time
//! - Resolution of a user's choice into a concrete template selection
//! - Name suggestions for custom template locations

pub mod catalog;
pub mod source;

pub use catalog::{CatalogEntry, ConfigError, TemplateCatalog, TemplateSelection, CUSTOM_TEMPLATE};
pub use source::suggest_identifier;
