use super::{describe, open_store};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::{PageDocument, SectionContent};
use pagecraft_editor::PersistenceService;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Practitioner id the page belongs to
    pub owner: String,

    /// Print the stored JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);

    let document = store
        .fetch_document(&args.owner)
        .await
        .map_err(|e| describe(e.into()))?;

    if args.json {
        println!("{}", document.to_json_pretty());
    } else {
        print_summary(&args.owner, &document);
    }

    Ok(())
}

fn print_summary(owner: &str, document: &PageDocument) {
    println!("{} {}", "Page for".bright_blue().bold(), owner.bright_white());
    println!();

    println!("Sections:");
    for (index, section) in document.sections().values().enumerate() {
        let detail = match section.content() {
            SectionContent::Info(info) if !info.name.is_empty() => info.name.clone(),
            SectionContent::Banner(banner) if !banner.text.is_empty() => {
                format!("\"{}\"", banner.text)
            }
            SectionContent::Services => format!("{} services", document.services().len()),
            _ => String::new(),
        };
        println!(
            "  {}. {} {:<10} {} {}",
            index + 1,
            visibility(section.is_visible()),
            section.key().as_str(),
            section.title(),
            detail.dimmed()
        );
    }

    println!();
    println!("Services:");
    if document.services().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (index, service) in document.services().values().enumerate() {
        println!(
            "  {}. {} {:<14} {}",
            index + 1,
            visibility(service.is_visible()),
            service.key().as_str(),
            service.title()
        );
    }
}

fn visibility(visible: bool) -> colored::ColoredString {
    if visible {
        "✓".green()
    } else {
        "✗".red()
    }
}
