use super::{describe, open_store};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{compile_to_html, CompileOptions, RenderMode};
use pagecraft_editor::PersistenceService;
use std::fs;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Practitioner id the page belongs to
    pub owner: String,

    /// Render the public page instead of the preview
    #[arg(long)]
    pub public: bool,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub async fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);

    let document = store
        .fetch_document(&args.owner)
        .await
        .map_err(|e| describe(e.into()))?;

    let options = CompileOptions {
        mode: if args.public {
            RenderMode::Public
        } else {
            RenderMode::Preview
        },
        ..Default::default()
    };
    let html = compile_to_html(&document, options).map_err(|e| anyhow!(e))?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => std::path::PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;

    let output_file = out_dir.join(format!("{}.html", args.owner));
    fs::write(&output_file, html)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        args.owner,
        output_file.display()
    );

    Ok(())
}
