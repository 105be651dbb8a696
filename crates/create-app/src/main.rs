//! create-app - scaffold a front-end project from a template given as a flag

use anyhow::Result;
use clap::Parser;
use create_app_core::tui::{CreateArgs, TemplateChoice};
use create_app_core::ScaffoldConfig;

/// Catalog key used when `--template` is omitted
const DEFAULT_TEMPLATE: &str = "react-starter";

/// Flag-driven product configuration
#[derive(Clone)]
pub struct CreateAppConfig;

impl ScaffoldConfig for CreateAppConfig {
    fn name(&self) -> &'static str {
        "create-app"
    }

    fn display_name(&self) -> &'static str {
        "create-app"
    }

    fn default_template(&self) -> &'static str {
        DEFAULT_TEMPLATE
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-app")]
#[command(about = "Create a front-end project from a template repository")]
#[command(version)]
#[command(
    after_help = "Note: without --template the \"react-starter\" template is used.\n\
                  Use --template custom with --template-name and --template-url to clone your own repository."
)]
pub struct Args {
    /// Project directory to create
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub directory: Option<String>,

    /// Template to use (a catalog key, or "custom")
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Name of a custom template (with --template custom)
    #[arg(long = "template-name")]
    pub template_name: Option<String>,

    /// Repository location of a custom template (with --template custom)
    #[arg(long = "template-url")]
    pub template_url: Option<String>,

    /// Skip installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            template: TemplateChoice::Flag {
                template: args.template,
                custom_name: args.template_name,
                custom_url: args.template_url,
            },
            skip_install: args.skip_install,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = CreateAppConfig;

    let result = create_app_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
