//! repolens command-line interface.
//!
//! `repolens <url>` runs the full pipeline and prints the LLM summary;
//! `repolens <url> --selection` stops after planning and shows which files
//! would be sent, with their tiers and the rendered tree.

use clap::Parser;
use colored::Colorize;
use repolens_core::render::render_tree;
use repolens_core::{pipeline, Config, IgnoreRuleSet, Tier};
use repolens_github::{GitHubClient, RepoRef};
use repolens_llm::LlmClient;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "repolens",
    version,
    about = "Summarize a GitHub repository from its highest-value files"
)]
struct Cli {
    /// GitHub repository URL (e.g. https://github.com/owner/repo)
    url: String,

    /// Show the scored file selection and tree without fetching or summarizing
    #[arg(long)]
    selection: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = if cli.selection {
        cmd_selection(&cli).await
    } else {
        cmd_summarize(&cli).await
    };

    if let Err(e) = result {
        if cli.json {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            eprintln!("{}: {}", "Error".red(), e);
        }
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn fetch_listing(
    cli: &Cli,
) -> Result<(RepoRef, GitHubClient, String, Vec<repolens_core::TreeNode>), Box<dyn Error>> {
    let repo = RepoRef::parse(&cli.url)?;
    let github = GitHubClient::new();
    let branch = github.default_branch(&repo).await?;
    let nodes = github.tree(&repo, &branch).await?;
    Ok((repo, github, branch, nodes))
}

async fn cmd_selection(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli)?;
    let rules = IgnoreRuleSet::from_config(&config.ignore)?;
    let (repo, _github, branch, nodes) = fetch_listing(cli).await?;
    let selection = pipeline::plan(&nodes, &rules, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
        return Ok(());
    }

    println!("{} {} @ {}", "Repository:".bold(), repo, branch);
    println!();
    for (rank, candidate) in selection.chosen.iter().enumerate() {
        let size = match candidate.node.size {
            Some(bytes) => format!("{} B", bytes),
            None => "?".to_string(),
        };
        println!(
            "{:>3}. {} {:>10}  {}",
            rank + 1,
            tier_label(candidate.tier),
            size,
            candidate.node.path
        );
    }
    println!();
    println!(
        "{}: {} files, {} bytes",
        "Selected".green(),
        selection.total_files,
        selection.total_bytes
    );
    println!();
    print!("{}", render_tree(&selection.tree, config.render.max_tree_chars));
    Ok(())
}

async fn cmd_summarize(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli)?;
    let rules = IgnoreRuleSet::from_config(&config.ignore)?;
    let llm = LlmClient::from_env()?;
    let (repo, github, branch, nodes) = fetch_listing(cli).await?;

    let fetcher = Arc::new(github.content_fetcher(&repo, &branch));
    let bundle = pipeline::run(&nodes, &rules, &config, fetcher).await?;
    if bundle.degraded {
        eprintln!(
            "{}: no file contents could be fetched; summary is based on the tree only",
            "Warning".yellow()
        );
    }

    let summary = llm.summarize(&repo.name, &bundle).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} {}", "Repository:".bold(), repo);
    println!();
    println!("{}", summary.summary);
    if !summary.technologies.is_empty() {
        println!();
        println!(
            "{}: {}",
            "Technologies".green(),
            summary.technologies.join(", ")
        );
    }
    if !summary.structure.is_empty() {
        println!();
        println!("{}: {}", "Structure".green(), summary.structure);
    }
    Ok(())
}

fn tier_label(tier: Tier) -> colored::ColoredString {
    match tier {
        Tier::RootDoc => "root-doc  ".green().bold(),
        Tier::Manifest => "manifest  ".green(),
        Tier::Entrypoint => "entrypoint".yellow(),
        Tier::OtherText => "other     ".dimmed(),
    }
}
