//! Project initialization workflow
//!
//! Runs strictly in order, stopping at the first failure:
//!
//! 1. validate the project name
//! 2. create the target directory and empty it
//! 3. probe for git
//! 4. clone the template into `<target>/<identifier>`
//! 5. replace the clone's history with a single commit
//! 6. install dependencies inside the clone
//!
//! Every step reports through a typed error, so callers decide how loudly a
//! failure is surfaced. A missing git is not an error: it is returned as
//! [`InitOutcome::VcsUnavailable`].

use crate::config::Settings;
use crate::project::name::{self, ValidationErrors};
use crate::project::target::ProjectTarget;
use crate::runtime::{
    DependencyInstaller, GitClient, GitError, InstallError, ToolAvailability, MIN_GIT_VERSION,
};
use crate::templates::TemplateSelection;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use walkdir::WalkDir;

/// Workflow steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ValidateName,
    PrepareDirectory,
    ProbeVcs,
    Clone,
    ResetHistory,
    InstallDependencies,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::ValidateName => "Validating project name",
            Step::PrepareDirectory => "Preparing project directory",
            Step::ProbeVcs => "Checking for git",
            Step::Clone => "Cloning template",
            Step::ResetHistory => "Creating fresh git history",
            Step::InstallDependencies => "Installing dependencies",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Failures after the directory has been prepared
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to clone {location}")]
    Clone {
        location: String,
        #[source]
        source: GitError,
    },

    #[error("expected the cloned template at {}, but it is not a directory", .path.display())]
    LayoutMismatch { path: PathBuf },

    #[error("failed to reset git history in {}", .path.display())]
    HistoryReset {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("failed to install dependencies")]
    Install(#[from] InstallError),
}

/// Everything that stops the workflow
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    InvalidName(#[from] ValidationErrors),

    #[error("template name '{0}' must be a single directory name")]
    InvalidIdentifier(String),

    #[error("failed to prepare {}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Step(#[from] StepError),
}

/// A project that made it through the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    /// The directory the user asked for
    pub root: PathBuf,
    /// `<root>/<identifier>`, holding the template
    pub project_dir: PathBuf,
    /// Files in the project, excluding git metadata
    pub file_count: usize,
    pub installed: bool,
}

/// How the workflow ended when nothing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(CreatedProject),
    /// git was not usable; nothing was cloned or installed
    VcsUnavailable { reason: String },
}

/// Progress callbacks for a running workflow
pub trait InitObserver {
    fn step_started(&mut self, _step: Step) {}
    fn step_finished(&mut self, _step: Step) {}
    fn warning(&mut self, _message: &str) {}
}

/// Observer that ignores every event
pub struct SilentObserver;

impl InitObserver for SilentObserver {}

/// Orchestrates template cloning and project setup
#[derive(Debug, Clone)]
pub struct ProjectInitializer {
    git: GitClient,
    installer: DependencyInstaller,
    commit_message: String,
    skip_install: bool,
}

impl ProjectInitializer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            git: GitClient::default(),
            installer: DependencyInstaller::new(settings.install.clone()),
            commit_message: settings.commit_message.clone(),
            skip_install: false,
        }
    }

    pub fn with_git(mut self, git: GitClient) -> Self {
        self.git = git;
        self
    }

    pub fn with_installer(mut self, installer: DependencyInstaller) -> Self {
        self.installer = installer;
        self
    }

    /// Stop after the history reset
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Run the whole workflow for one target
    pub async fn run(
        &self,
        target: &ProjectTarget,
        selection: &TemplateSelection,
        observer: &mut dyn InitObserver,
    ) -> Result<InitOutcome, InitError> {
        observer.step_started(Step::ValidateName);
        name::validate(target.base_name())?;
        if !is_single_component(&selection.identifier) {
            return Err(InitError::InvalidIdentifier(selection.identifier.clone()));
        }
        observer.step_finished(Step::ValidateName);

        observer.step_started(Step::PrepareDirectory);
        prepare_directory(target.path())
            .await
            .map_err(|source| InitError::Directory {
                path: target.path().to_path_buf(),
                source,
            })?;
        observer.step_finished(Step::PrepareDirectory);

        observer.step_started(Step::ProbeVcs);
        let availability = self.git.probe().await;
        let (version_line, warning) = match &availability {
            ToolAvailability::Unavailable { reason } => {
                return Ok(InitOutcome::VcsUnavailable {
                    reason: reason.clone(),
                });
            }
            ToolAvailability::Available {
                version_line,
                warning,
                ..
            } => (version_line, warning),
        };
        if let Some(warning) = warning {
            observer.warning(warning);
        }
        if availability.is_outdated() {
            observer.warning(&format!(
                "{} is older than {}; cloning may fail",
                version_line, MIN_GIT_VERSION
            ));
        }
        observer.step_finished(Step::ProbeVcs);

        let project_dir = target.project_dir(&selection.identifier);

        observer.step_started(Step::Clone);
        self.git
            .clone_repo(&selection.source_location, &project_dir, target.path())
            .await
            .map_err(|source| StepError::Clone {
                location: selection.source_location.clone(),
                source,
            })?;
        observer.step_finished(Step::Clone);

        observer.step_started(Step::ResetHistory);
        if !project_dir.is_dir() {
            return Err(StepError::LayoutMismatch { path: project_dir }.into());
        }
        self.git
            .reset_history(&project_dir, &self.commit_message)
            .await
            .map_err(|source| StepError::HistoryReset {
                path: project_dir.clone(),
                source,
            })?;
        observer.step_finished(Step::ResetHistory);

        let file_count = count_files(&project_dir);

        if !self.skip_install {
            observer.step_started(Step::InstallDependencies);
            self.installer
                .install(&project_dir)
                .await
                .map_err(StepError::from)?;
            observer.step_finished(Step::InstallDependencies);
        }

        Ok(InitOutcome::Created(CreatedProject {
            root: target.path().to_path_buf(),
            project_dir,
            file_count,
            installed: !self.skip_install,
        }))
    }
}

/// Create `dir` if needed, then remove everything inside it
///
/// Existing contents are discarded without prompting.
pub async fn prepare_directory(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir).await?;

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // file_type does not follow symlinks, so linked directories are unlinked, not emptied
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&path).await?;
        } else {
            fs::remove_file(&path).await?;
        }
    }
    Ok(())
}

fn is_single_component(identifier: &str) -> bool {
    let mut components = Path::new(identifier).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::vcs::tests::{commit_messages, seed_template_repo, test_git};
    use crate::runtime::InstallCommand;

    /// Records every event in order
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl InitObserver for Recorder {
        fn step_started(&mut self, step: Step) {
            self.events.push(format!("start {:?}", step));
        }
        fn step_finished(&mut self, step: Step) {
            self.events.push(format!("done {:?}", step));
        }
        fn warning(&mut self, message: &str) {
            self.events.push(format!("warn {}", message));
        }
    }

    fn settings() -> Settings {
        Settings {
            commit_message: "create front-end app".to_string(),
            install: InstallCommand::new("sh", &["-c", "pwd > installed-from"]),
        }
    }

    fn initializer() -> ProjectInitializer {
        let settings = settings();
        ProjectInitializer::new(&settings)
            .with_git(test_git())
            .with_installer(DependencyInstaller::new(settings.install.clone()).quiet(true))
    }

    fn selection(identifier: &str, location: &Path) -> TemplateSelection {
        TemplateSelection {
            identifier: identifier.to_string(),
            source_location: location.to_string_lossy().into_owned(),
        }
    }

    async fn git_available() -> bool {
        test_git().probe().await.is_available()
    }

    #[tokio::test]
    async fn test_invalid_name_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve_in("My App", tmp.path());
        let mut recorder = Recorder::default();

        let result = initializer()
            .run(
                &target,
                &selection("react-starter", Path::new("/nowhere")),
                &mut recorder,
            )
            .await;

        match result {
            Err(InitError::InvalidName(errors)) => assert!(!errors.problems.is_empty()),
            other => panic!("expected invalid name: {:?}", other),
        }
        assert!(!target.path().exists());
        assert_eq!(recorder.events, vec!["start ValidateName"]);
    }

    #[tokio::test]
    async fn test_identifier_must_stay_inside_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve_in("my-app", tmp.path());

        let result = initializer()
            .run(
                &target,
                &selection("../escape", Path::new("/nowhere")),
                &mut SilentObserver,
            )
            .await;

        assert!(matches!(result, Err(InitError::InvalidIdentifier(_))));
        assert!(!target.path().exists());
    }

    #[tokio::test]
    async fn test_prepare_existing_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("my-app");
        std::fs::create_dir(&dir).unwrap();

        prepare_directory(&dir).await.unwrap();
        prepare_directory(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_prepare_discards_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("my-app");
        std::fs::create_dir_all(dir.join("nested/deeper")).unwrap();
        std::fs::write(dir.join("sentinel.txt"), "old").unwrap();
        std::fs::write(dir.join("nested/deeper/file.txt"), "old").unwrap();

        prepare_directory(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_git_stops_quietly() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve_in("my-app", tmp.path());
        let init = initializer().with_git(GitClient::new("create-app-no-such-git"));

        let outcome = init
            .run(
                &target,
                &selection("react-starter", Path::new("/nowhere")),
                &mut SilentObserver,
            )
            .await
            .unwrap();

        assert!(matches!(outcome, InitOutcome::VcsUnavailable { .. }));
        assert!(target.path().is_dir());
        assert!(!target.project_dir("react-starter").exists());
    }

    #[tokio::test]
    async fn test_creates_project_from_catalog_template() {
        if !git_available().await {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("templates/react-starter");
        seed_template_repo(&template).await;

        let target = ProjectTarget::resolve_in("my-app", tmp.path());
        std::fs::create_dir_all(target.path()).unwrap();
        std::fs::write(target.path().join("sentinel.txt"), "old").unwrap();

        let mut recorder = Recorder::default();
        let outcome = initializer()
            .run(&target, &selection("react-starter", &template), &mut recorder)
            .await
            .unwrap();

        let project_dir = target.project_dir("react-starter");
        match outcome {
            InitOutcome::Created(created) => {
                assert_eq!(created.project_dir, project_dir);
                assert_eq!(created.file_count, 2);
                assert!(created.installed);
            }
            other => panic!("expected a created project: {:?}", other),
        }

        assert!(!target.path().join("sentinel.txt").exists());
        assert!(project_dir.join("package.json").exists());
        assert_eq!(
            commit_messages(&project_dir).await,
            vec!["create front-end app"]
        );

        let installed_from = std::fs::read_to_string(project_dir.join("installed-from")).unwrap();
        assert_eq!(
            Path::new(installed_from.trim()).canonicalize().unwrap(),
            project_dir.canonicalize().unwrap()
        );

        let started: Vec<&String> = recorder
            .events
            .iter()
            .filter(|e| e.starts_with("start"))
            .collect();
        assert_eq!(
            started,
            vec![
                "start ValidateName",
                "start PrepareDirectory",
                "start ProbeVcs",
                "start Clone",
                "start ResetHistory",
                "start InstallDependencies",
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_template_uses_chosen_name() {
        if !git_available().await {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("upstream-repo");
        seed_template_repo(&template).await;

        let target = ProjectTarget::resolve_in("my-app", tmp.path());
        let outcome = initializer()
            .skip_install(true)
            .run(&target, &selection("foo", &template), &mut SilentObserver)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            InitOutcome::Created(CreatedProject {
                installed: false,
                ..
            })
        ));
        let project_dir = target.project_dir("foo");
        assert!(project_dir.join("README.md").exists());
        assert!(!project_dir.join("installed-from").exists());
        assert!(!target.path().join("upstream-repo").exists());
    }

    #[tokio::test]
    async fn test_clone_failure_skips_install() {
        if !git_available().await {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve_in("my-app", tmp.path());

        let result = initializer()
            .run(
                &target,
                &selection("react-starter", &tmp.path().join("missing-repo")),
                &mut SilentObserver,
            )
            .await;

        assert!(matches!(
            result,
            Err(InitError::Step(StepError::Clone { .. }))
        ));
        assert!(!target.project_dir("react-starter").join("installed-from").exists());
    }

    #[tokio::test]
    async fn test_install_failure_carries_command() {
        if !git_available().await {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("templates/vue-starter");
        seed_template_repo(&template).await;
        let target = ProjectTarget::resolve_in("my-app", tmp.path());

        let failing = DependencyInstaller::new(InstallCommand::new("sh", &["-c", "exit 7"])).quiet(true);
        let result = initializer()
            .with_installer(failing)
            .run(&target, &selection("vue-starter", &template), &mut SilentObserver)
            .await;

        match result {
            Err(InitError::Step(StepError::Install(err))) => {
                assert_eq!(err.command, "sh -c exit 7");
            }
            other => panic!("expected an install failure: {:?}", other),
        }
        // History was still reset before the installer ran
        assert_eq!(
            commit_messages(&target.project_dir("vue-starter")).await,
            vec!["create front-end app"]
        );
    }

    #[test]
    fn test_step_display_matches_label() {
        assert_eq!(Step::Clone.to_string(), "Cloning template");
        assert_eq!(
            format!("{}...", Step::InstallDependencies),
            "Installing dependencies..."
        );
    }

    #[test]
    fn test_single_component_identifiers() {
        assert!(is_single_component("react-starter"));
        assert!(!is_single_component(""));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("/abs"));
    }
}
