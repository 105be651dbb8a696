//! Dependency installation for a freshly created project

use crate::runtime::process::render_command;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command as TokioCommand;

/// The installer could not be run or exited non-zero
///
/// Carries only the attempted command line; output went straight to the
/// user's terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{command}` failed")]
pub struct InstallError {
    pub command: String,
}

/// Command used to install dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Split a whitespace-separated command line; `None` when blank
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(Self {
            program: program.to_string(),
            args: words.map(str::to_string).collect(),
        })
    }

    pub fn render(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        render_command(&self.program, &args)
    }
}

/// Spawns the install command with the terminal attached
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    command: InstallCommand,
    quiet: bool,
}

impl DependencyInstaller {
    pub fn new(command: InstallCommand) -> Self {
        Self {
            command,
            quiet: false,
        }
    }

    /// Suppress the "Running:" banner
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the install command inside `project_dir`
    pub async fn install(&self, project_dir: &Path) -> Result<(), InstallError> {
        let rendered = self.command.render();
        let failed = || InstallError {
            command: rendered.clone(),
        };

        if !self.quiet {
            println!();
            println!("{} {}", "Running:".dimmed(), rendered.yellow());
            println!();
        }

        let status = TokioCommand::new(&self.command.program)
            .args(&self.command.args)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|_| failed())?;

        if status.success() {
            Ok(())
        } else {
            Err(failed())
        }
    }
}
