mod commands;
mod config;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, preview, show, EditArgs, InitArgs, PreviewArgs, ShowArgs};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - compose a practitioner's profile page
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the default page for a practitioner
    Init(InitArgs),

    /// Print the page's sections and services
    Show(ShowArgs),

    /// Apply a script of edit commands and save
    Edit(EditArgs),

    /// Render the page to static HTML
    Preview(PreviewArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd).await,
        Command::Show(args) => show(args, &cwd).await,
        Command::Edit(args) => edit(args, &cwd).await,
        Command::Preview(args) => preview(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
