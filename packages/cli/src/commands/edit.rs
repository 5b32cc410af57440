use super::{describe, open_store};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{
    DispatchOutcome, EditSession, Mutation, SaveOutcome, SessionOptions, SessionStatus,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Practitioner id the page belongs to
    pub owner: String,

    /// JSON array of edit commands to apply in order
    pub script: PathBuf,

    /// Apply the commands and report, but do not save
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid edit script {}", args.script.display()))?;

    let session = EditSession::with_options(
        args.owner.clone(),
        store,
        SessionOptions {
            save_timeout: config.save_timeout(),
            ..SessionOptions::default()
        },
    );
    session.open().await.map_err(describe)?;

    println!(
        "{}",
        format!("✏️  Applying {} edits to {}...", mutations.len(), args.owner)
            .bright_blue()
            .bold()
    );

    for mutation in mutations {
        let name = mutation.name();
        match session.dispatch(mutation).map_err(describe)? {
            DispatchOutcome::Applied { .. } => println!("  {} {}", "✓".green(), name),
            DispatchOutcome::Unchanged => {
                println!("  {} {} {}", "=".dimmed(), name, "(no change)".dimmed())
            }
            DispatchOutcome::Ignored { reason } => {
                println!("  {} {} - {}", "⚠️".yellow(), name, reason.to_string().yellow())
            }
        }
    }

    println!();
    if session.status() == SessionStatus::Clean {
        println!("{}", "Nothing to save".dimmed());
        return Ok(());
    }

    if args.dry_run {
        println!("{}", "Dry run: changes discarded".yellow());
        session.discard().map_err(describe)?;
        return Ok(());
    }

    match session.save().await.map_err(describe)? {
        SaveOutcome::Saved { .. } => println!("{}", "✅ Changes saved!".green().bold()),
        SaveOutcome::NothingToSave => println!("{}", "Nothing to save".dimmed()),
    }

    Ok(())
}
