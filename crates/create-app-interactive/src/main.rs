//! create-app-interactive - scaffold a front-end project, always asking for the template

use anyhow::Result;
use clap::Parser;
use create_app_core::tui::{CreateArgs, TemplateChoice};
use create_app_core::ScaffoldConfig;

/// Prompt-driven product configuration
#[derive(Clone)]
pub struct InteractiveConfig;

impl ScaffoldConfig for InteractiveConfig {
    fn name(&self) -> &'static str {
        "create-app-interactive"
    }

    fn display_name(&self) -> &'static str {
        "create-app"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-app-interactive")]
#[command(about = "Create a front-end project, choosing the template interactively")]
#[command(version)]
#[command(
    after_help = "Note: the template menu starts on \"react-starter\"; pick \"custom template\" to clone your own repository."
)]
pub struct Args {
    /// Project directory to create
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub directory: Option<String>,

    /// Skip installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            template: TemplateChoice::Prompt,
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
    let config = InteractiveConfig;

    let result = create_app_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
