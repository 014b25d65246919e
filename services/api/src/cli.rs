use casework::error::AppError;
use casework::forms::domain::SectionId;
use casework::forms::registry::pages_for;
use clap::{Args, Parser, Subcommand};

use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Casework API",
    about = "Serve the approved premises placement application journey",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the registered journey: sections, tasks, and ordered pages
    Pages,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Pages => {
            print_journey();
            Ok(())
        }
    }
}

fn print_journey() {
    for section in SectionId::ordered() {
        println!("{}", section.label());
        for task in section.tasks() {
            println!("  {} ({})", task.label(), task.slug());
            for page in pages_for(*task) {
                println!("    - {page}");
            }
        }
    }
}
