//! Charm-style CLI prompts using cliclack

use crate::config::Settings;
use crate::product::ScaffoldConfig;
use crate::project::{
    self, CreatedProject, InitError, InitObserver, InitOutcome, ProjectInitializer, ProjectTarget,
    Step, ValidationErrors,
};
use crate::templates::{
    suggest_identifier, ConfigError, TemplateCatalog, TemplateSelection, CUSTOM_TEMPLATE,
};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// How the template is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChoice {
    /// Given on the command line (`--template`, plus custom fields)
    Flag {
        template: String,
        custom_name: Option<String>,
        custom_url: Option<String>,
    },
    /// Always ask
    Prompt,
}

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<String>,

    /// Template selection mode
    pub template: TemplateChoice,

    /// Stop after the fresh commit
    pub skip_install: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            directory: None,
            template: TemplateChoice::Prompt,
            skip_install: false,
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ScaffoldConfig>(config: &C, args: CreateArgs) -> Result<()> {
    // Step 1: Require a project directory
    let Some(directory) = args.directory.as_deref() else {
        print_missing_directory(config);
        return Ok(());
    };

    cliclack::intro(config.display_name())?;

    // Step 2: Reject unusable names before asking anything else
    let target = ProjectTarget::resolve(directory)?;
    if let Err(errors) = project::validate(target.base_name()) {
        exit_invalid_name(&errors);
    }

    // Step 3: Select template
    let catalog = TemplateCatalog::builtin()?;
    let selection = select_template(config, &catalog, &args.template)?;

    if let Some(upstream) = suggest_identifier(&selection.source_location) {
        if upstream != selection.identifier {
            cliclack::log::info(format!(
                "Cloning {} into {}/{}",
                upstream,
                target.requested_name(),
                selection.identifier
            ))?;
        }
    }

    // Step 4: Create project
    let settings = Settings::from_config(config);
    let initializer = ProjectInitializer::new(&settings).skip_install(args.skip_install);
    let mut progress = Progress::default();
    let result = initializer.run(&target, &selection, &mut progress).await;

    match result {
        Ok(InitOutcome::Created(created)) => {
            progress.finish();
            print_next_steps(&target, &created, &settings)?;
            Ok(())
        }
        Ok(InitOutcome::VcsUnavailable { reason }) => {
            progress.fail("git not found");
            cliclack::log::warning(format!("git is not available: {}", reason))?;
            cliclack::outro_cancel("Install git and run this command again.")?;
            Ok(())
        }
        Err(InitError::InvalidName(errors)) => {
            progress.fail("Invalid project name");
            exit_invalid_name(&errors)
        }
        Err(e) => {
            progress.fail("Failed");
            cliclack::log::error(format!("{:#}", anyhow::Error::from(e)))?;
            anyhow::bail!("Project setup failed.");
        }
    }
}

/// Print naming violations and terminate with status 1
fn exit_invalid_name(errors: &ValidationErrors) -> ! {
    let _ = cliclack::log::error(errors.report());
    let _ = cliclack::outro_cancel("Please choose a different project name.");
    std::process::exit(1);
}

fn print_missing_directory<C: ScaffoldConfig>(config: &C) {
    println!("Please specify the project directory:");
    println!(
        "  {} {}",
        config.name().cyan(),
        "<project-directory>".green()
    );
    println!();
    println!("For example:");
    println!("  {}", config.usage_example().cyan());
    println!();
    println!(
        "Run {} to see all options.",
        format!("{} --help", config.name()).cyan()
    );
}

fn select_template<C: ScaffoldConfig>(
    config: &C,
    catalog: &TemplateCatalog,
    choice: &TemplateChoice,
) -> Result<TemplateSelection> {
    let resolved = match choice {
        TemplateChoice::Flag {
            template,
            custom_name,
            custom_url,
        } => catalog.resolve(template, custom_name.as_deref(), custom_url.as_deref()),
        TemplateChoice::Prompt => {
            let mut select = cliclack::select("Select a template");
            for entry in catalog.entries() {
                select = select.item(
                    entry.identifier.clone(),
                    &entry.identifier,
                    &entry.description,
                );
            }
            if catalog.get(config.default_template()).is_some() {
                select = select.initial_value(config.default_template().to_string());
            }
            let selected: String = select
                .item(
                    CUSTOM_TEMPLATE.to_string(),
                    "custom template",
                    "clone your own repository",
                )
                .interact()?;

            if selected == CUSTOM_TEMPLATE {
                let (name, url) = prompt_custom_template()?;
                catalog.resolve(CUSTOM_TEMPLATE, Some(&name), Some(&url))
            } else {
                catalog.resolve(&selected, None, None)
            }
        }
    };

    match resolved {
        Ok(selection) => {
            cliclack::log::success(format!(
                "Template: {} ({})",
                selection.identifier, selection.source_location
            ))?;
            Ok(selection)
        }
        Err(ConfigError::MissingCustomTemplate) => {
            // Not a failure: the user is told what to supply and nothing is created
            cliclack::log::warning(
                "Both a template name and a template url are required for a custom template.",
            )?;
            cliclack::outro_cancel("No project was created.")?;
            std::process::exit(0);
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt_custom_template() -> Result<(String, String)> {
    let name: String = cliclack::input("Template name")
        .placeholder("my-template")
        .required(false)
        .interact()?;

    let url: String = cliclack::input("Template url")
        .placeholder("https://github.com/org/my-template.git")
        .required(false)
        .interact()?;

    Ok((name, url))
}

/// Drives spinners and log lines from workflow events
#[derive(Default)]
struct Progress {
    spinner: Option<cliclack::ProgressBar>,
}

impl Progress {
    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop("Done");
        }
    }

    fn fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        }
    }
}

impl InitObserver for Progress {
    fn step_started(&mut self, step: Step) {
        match step {
            Step::Clone | Step::ResetHistory => {
                let spinner = cliclack::spinner();
                spinner.start(format!("{}...", step));
                self.spinner = Some(spinner);
            }
            // The installer owns the terminal while it runs
            Step::InstallDependencies => {
                let _ = cliclack::log::step(format!("{}...", step));
            }
            Step::ValidateName | Step::PrepareDirectory | Step::ProbeVcs => {}
        }
    }

    fn step_finished(&mut self, step: Step) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(match step {
                Step::Clone => "Template cloned",
                Step::ResetHistory => "Created a fresh git history",
                _ => step.label(),
            });
        }
        match step {
            Step::PrepareDirectory => {
                let _ = cliclack::log::info("Project directory is ready");
            }
            Step::InstallDependencies => {
                let _ = cliclack::log::success("Dependencies installed");
            }
            _ => {}
        }
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}

fn print_next_steps(
    target: &ProjectTarget,
    created: &CreatedProject,
    settings: &Settings,
) -> Result<()> {
    cliclack::log::success(file_summary(created.file_count, &created.project_dir))?;

    let relative = created
        .project_dir
        .strip_prefix(std::env::current_dir().unwrap_or_default())
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| created.project_dir.clone());

    let mut steps = vec![format!("cd {}", relative.display())];
    if !created.installed {
        steps.push(settings.install.render());
    }

    println!();
    println!("  Next steps for {}", target.requested_name().bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn file_summary(count: usize, dir: &Path) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("Created {} {} in {}", count, noun, dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_prompt() {
        let args = CreateArgs::default();
        assert_eq!(args.directory, None);
        assert_eq!(args.template, TemplateChoice::Prompt);
        assert!(!args.skip_install);
    }

    #[test]
    fn test_file_summary_pluralizes() {
        let dir = Path::new("/work/my-app/react-starter");
        assert_eq!(
            file_summary(1, dir),
            "Created 1 file in /work/my-app/react-starter"
        );
        assert_eq!(
            file_summary(12, dir),
            "Created 12 files in /work/my-app/react-starter"
        );
        assert_eq!(
            file_summary(0, dir),
            "Created 0 files in /work/my-app/react-starter"
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_an_error() {
        let config = crate::product::tests::TestConfig;
        assert!(run(&config, CreateArgs::default()).await.is_ok());
    }
}
