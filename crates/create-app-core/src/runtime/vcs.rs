//! Version control detection and git operations
//!
//! All git work goes through [`GitClient`], which captures output so failures
//! can be reported with git's own diagnostics.

use crate::runtime::process::{render_command, run_captured, ProcessOutcome};
use semver::Version;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker printed by `git --version` on success
const VERSION_MARKER: &str = "git version";

/// Oldest git release known to work with the commands used here
pub const MIN_GIT_VERSION: Version = Version::new(2, 0, 0);

/// Errors raised by git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("`{command}` failed: {message}")]
    Command { command: String, message: String },

    #[error("failed to remove {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of probing for a usable git installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAvailability {
    Available {
        /// First line of `git --version`
        version_line: String,
        version: Option<Version>,
        /// Anything git wrote to stderr while answering
        warning: Option<String>,
    },
    Unavailable {
        reason: String,
    },
}

impl ToolAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, ToolAvailability::Available { .. })
    }

    /// True when the detected version is older than [`MIN_GIT_VERSION`]
    pub fn is_outdated(&self) -> bool {
        match self {
            ToolAvailability::Available {
                version: Some(v), ..
            } => *v < MIN_GIT_VERSION,
            _ => false,
        }
    }
}

/// Thin async wrapper over the git command line
#[derive(Debug, Clone)]
pub struct GitClient {
    program: String,
    envs: Vec<(String, String)>,
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
        }
    }

    /// Extra environment passed to every git invocation
    pub fn with_envs(mut self, envs: Vec<(String, String)>) -> Self {
        self.envs = envs;
        self
    }

    /// Check whether git is installed and answering
    ///
    /// Only a missing success marker on stdout makes git unavailable;
    /// stderr output alone is passed back as a warning.
    pub async fn probe(&self) -> ToolAvailability {
        let outcome = match run_captured(&self.program, &["--version"], None, &self.envs).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return ToolAvailability::Unavailable {
                    reason: format!("{:#}", e),
                }
            }
        };

        interpret_probe(&self.program, &outcome)
    }

    /// Clone `location` into `destination`, running from `cwd`
    pub async fn clone_repo(
        &self,
        location: &str,
        destination: &Path,
        cwd: &Path,
    ) -> Result<(), GitError> {
        let dest = destination.to_string_lossy();
        self.run(&["clone", "--", location, &*dest], cwd).await?;
        Ok(())
    }

    /// Drop existing history and record the tree as a single commit
    pub async fn reset_history(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        let metadata = dir.join(".git");
        match tokio::fs::remove_dir_all(&metadata).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(GitError::Metadata {
                    path: metadata,
                    source,
                })
            }
        }

        self.run(&["init"], dir).await?;
        self.run(&["add", "-A"], dir).await?;
        self.run(&["commit", "-m", message], dir).await?;
        Ok(())
    }

    async fn run(&self, args: &[&str], cwd: &Path) -> Result<ProcessOutcome, GitError> {
        let command = render_command(&self.program, args);
        let outcome = run_captured(&self.program, args, Some(cwd), &self.envs)
            .await
            .map_err(|e| GitError::Spawn {
                command: command.clone(),
                message: format!("{:#}", e),
            })?;

        if !outcome.success() {
            return Err(GitError::Command {
                command,
                message: outcome.diagnostic(),
            });
        }
        Ok(outcome)
    }
}

/// Decide availability from a finished `git --version`
fn interpret_probe(program: &str, outcome: &ProcessOutcome) -> ToolAvailability {
    let warning = Some(outcome.stderr.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    match outcome
        .stdout
        .lines()
        .find(|line| line.contains(VERSION_MARKER))
    {
        Some(line) => ToolAvailability::Available {
            version_line: line.trim().to_string(),
            version: parse_git_version(line),
            warning,
        },
        None => ToolAvailability::Unavailable {
            reason: format!(
                "`{} --version` did not report a version ({})",
                program,
                outcome.diagnostic()
            ),
        },
    }
}

/// Pull a semantic version out of `git version 2.39.2 (Apple Git-143)`
/// or `git version 2.45.1.windows.1`
fn parse_git_version(line: &str) -> Option<Version> {
    let rest = line.split(VERSION_MARKER).nth(1)?.trim();
    let token = rest.split_whitespace().next()?;
    let cleaned = token.strip_prefix('v').unwrap_or(token);

    let mut parts = cleaned.split('.').map(|p| p.parse::<u64>());
    let major = parts.next()?.ok()?;
    let minor = parts.next().and_then(|p| p.ok()).unwrap_or(0);
    let patch = parts.next().and_then(|p| p.ok()).unwrap_or(0);
    Some(Version::new(major, minor, patch))
}
