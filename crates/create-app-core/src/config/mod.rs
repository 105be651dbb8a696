//! Runtime settings derived from the product configuration
//!
//! Product defaults come from [`ScaffoldConfig`]; the install command can be
//! overridden through the environment variable the product names.

use crate::product::ScaffoldConfig;
use crate::runtime::InstallCommand;

/// Settings consumed by the project initializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub commit_message: String,
    pub install: InstallCommand,
}

impl Settings {
    /// Build settings from the product config and the process environment
    pub fn from_config<C: ScaffoldConfig>(config: &C) -> Self {
        let overridden = std::env::var(config.install_command_env()).ok();
        Self::with_install_override(config, overridden.as_deref())
    }

    /// Build settings with an explicit install-command override
    pub fn with_install_override<C: ScaffoldConfig>(config: &C, install: Option<&str>) -> Self {
        let default_install = || match config.install_command().split_first() {
            Some((program, args)) => InstallCommand::new(*program, args),
            None => InstallCommand::new("npm", &["install"]),
        };

        Self {
            commit_message: config.commit_message().to_string(),
            install: install
                .and_then(InstallCommand::parse)
                .unwrap_or_else(default_install),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::TestConfig;

    #[test]
    fn test_defaults_from_config() {
        let settings = Settings::with_install_override(&TestConfig, None);
        assert_eq!(settings.commit_message, "create front-end app");
        assert_eq!(settings.install, InstallCommand::new("npm", &["install"]));
    }

    #[test]
    fn test_install_override() {
        let settings = Settings::with_install_override(&TestConfig, Some("yarn install --silent"));
        assert_eq!(settings.install.render(), "yarn install --silent");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let settings = Settings::with_install_override(&TestConfig, Some("  "));
        assert_eq!(settings.install.render(), "npm install");
    }
}
