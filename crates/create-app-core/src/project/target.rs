//! Target directory resolution

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the project is created, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    requested_name: String,
    resolved_path: PathBuf,
    base_name: String,
}

impl ProjectTarget {
    /// Resolve a requested directory against the current working directory
    pub fn resolve(requested_name: &str) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::resolve_in(requested_name, &cwd))
    }

    /// Resolve a requested directory against an explicit base directory
    pub fn resolve_in(requested_name: &str, base: &Path) -> Self {
        let requested = PathBuf::from(requested_name);
        let joined = if requested.is_absolute() {
            requested
        } else {
            base.join(requested)
        };
        let resolved_path = normalize(&joined);

        let base_name = resolved_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            requested_name: requested_name.to_string(),
            resolved_path,
            base_name,
        }
    }

    pub fn requested_name(&self) -> &str {
        &self.requested_name
    }

    pub fn path(&self) -> &Path {
        &self.resolved_path
    }

    /// Final path segment, used as the package name
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Directory the template is cloned into
    pub fn project_dir(&self, identifier: &str) -> PathBuf {
        self.resolved_path.join(identifier)
    }
}

/// Lexically drop `.` and fold `..` segments without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_name() {
        let target = ProjectTarget::resolve_in("my-app", Path::new("/work"));
        assert_eq!(target.requested_name(), "my-app");
        assert_eq!(target.path(), Path::new("/work/my-app"));
        assert_eq!(target.base_name(), "my-app");
        assert_eq!(
            target.project_dir("react-starter"),
            PathBuf::from("/work/my-app/react-starter")
        );
    }

    #[test]
    fn test_nested_and_dotted_paths() {
        let target = ProjectTarget::resolve_in("./apps/../sites/web/", Path::new("/work"));
        assert_eq!(target.path(), Path::new("/work/sites/web"));
        assert_eq!(target.base_name(), "web");
    }

    #[test]
    fn test_absolute_name_ignores_base() {
        let target = ProjectTarget::resolve_in("/srv/site", Path::new("/work"));
        assert_eq!(target.path(), Path::new("/srv/site"));
        assert_eq!(target.base_name(), "site");
    }

    #[test]
    fn test_base_name_keeps_invalid_characters() {
        let target = ProjectTarget::resolve_in("My App", Path::new("/work"));
        assert_eq!(target.base_name(), "My App");
    }
}
