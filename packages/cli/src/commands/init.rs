use super::{describe, open_store};
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::{InfoContent, PageDocument};
use pagecraft_editor::PersistenceService;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Practitioner id the page belongs to
    pub owner: String,

    /// Display name for the info section
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub address: String,

    /// Force overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);

    // Check if a page already exists
    if store.exists(&args.owner).await? && !args.force {
        println!(
            "{} page for {} already exists",
            "⚠️".yellow(),
            args.owner.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        format!("📝 Creating page for {}...", args.owner)
            .bright_blue()
            .bold()
    );

    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let document = PageDocument::seed_with_contact(InfoContent {
        name: args.name,
        phone: args.phone,
        email: args.email,
        address: args.address,
    });
    store
        .update_document(&args.owner, &document)
        .await
        .map_err(|e| describe(e.into()))?;

    let path = store.document_path(&args.owner)?;
    println!("  {} Created {}", "✓".green(), path.display());
    println!();
    println!("{}", "✅ Page initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft show {}", args.owner);
    println!("  2. Run: pagecraft edit {} <script.json>", args.owner);
    println!("  3. Run: pagecraft preview {}", args.owner);

    Ok(())
}
