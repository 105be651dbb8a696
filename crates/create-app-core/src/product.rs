//! Product configuration trait for CLI binaries
//!
//! Each binary (flag form, interactive form) implements this trait to
//! configure naming, help text and the defaults used by the workflow.

/// Configuration trait for the scaffolding binaries
///
/// Implementors define:
/// - Product identity (name, display name)
/// - The baseline template used when none is given
/// - The commit message written after the history reset
/// - The dependency install command and its override variable
pub trait ScaffoldConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Catalog key used when no template is specified
    fn default_template(&self) -> &'static str {
        "react-starter"
    }

    /// Message of the single commit created after the history reset
    fn commit_message(&self) -> &'static str {
        "create front-end app"
    }

    /// Program and arguments used to install dependencies
    fn install_command(&self) -> &'static [&'static str] {
        &["npm", "install"]
    }

    /// Environment variable name for overriding the install command
    fn install_command_env(&self) -> &'static str {
        "CREATE_APP_INSTALL_COMMAND"
    }

    /// Example invocation printed when the project directory is missing
    fn usage_example(&self) -> String {
        format!("{} my-app", self.name())
    }
}
