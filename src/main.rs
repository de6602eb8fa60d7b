use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::*;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use orthoflow::cli::output::{self, OutputFormat};
use orthoflow::history::HistoryStore;
use orthoflow::{server, splice, Config, Corrector, CorrectionResult};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orthoflow")]
#[command(version, about = "Assistant de correction pour le français", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if corrections are found
    #[arg(long)]
    no_fail: bool,

    /// Grammar provider endpoint
    #[arg(long)]
    provider_url: Option<String>,

    /// Language tag sent to the provider (e.g., fr, fr-CA)
    #[arg(short, long)]
    language: Option<String>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Run the correction HTTP server
    Serve {
        /// Bind address (host:port)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Check a text and list suggested corrections
    Check {
        /// File to check (stdin when omitted)
        file: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,
    },
    /// Apply corrections to a text
    Fix {
        /// File to fix in place (stdin to stdout when omitted)
        file: Option<PathBuf>,

        /// Pick each correction interactively
        #[arg(short, long)]
        interactive: bool,
    },
    /// Correction history
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}

#[derive(Parser, Debug)]
enum HistoryCommands {
    /// List recorded correction runs
    List,
    /// Delete the recorded history
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "orthoflow", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.provider_url.clone(), cli.language.clone())?;

    match cli.command {
        Some(Commands::Serve { bind }) => {
            let mut config = config;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            server::start_server(&config).await
        }
        Some(Commands::Check { file, format }) => {
            let text = read_input(file.as_deref())?;
            let corrector = Corrector::new(&config);
            let result = analyze(&corrector, &text).await?;
            output::print_result(&result, !cli.no_color, &format);

            if !result.corrections.is_empty() && !cli.no_fail {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Fix { file, interactive }) => {
            let text = read_input(file.as_deref())?;
            let corrected = if interactive {
                fix_interactive(&config, &text).await?
            } else {
                fix_auto(&config, &text).await?
            };

            match file {
                Some(path) => {
                    std::fs::write(&path, &corrected)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                    if !cli.no_color {
                        println!("{} {}", "✓".green().bold(), path.display());
                    }
                }
                None => print!("{corrected}"),
            }
            Ok(())
        }
        Some(Commands::History { action }) => handle_history(&config, action, !cli.no_color),
        None => {
            anyhow::bail!("No command specified. Use --help for usage information.");
        }
    }
}

fn read_input(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn analyze(corrector: &Corrector, text: &str) -> Result<CorrectionResult> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Analyse en cours...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = corrector.correct(text).await;
    pb.finish_and_clear();

    Ok(result?)
}

async fn fix_auto(config: &Config, text: &str) -> Result<String> {
    let corrector = Corrector::new(config);
    let result = analyze(&corrector, text).await?;
    if result.corrections.is_empty() {
        return Ok(text.to_string());
    }
    Ok(splice::apply_all(text, &result.corrections))
}

async fn fix_interactive(config: &Config, text: &str) -> Result<String> {
    let corrector = Corrector::new(config);
    let result = analyze(&corrector, text).await?;
    if result.corrections.is_empty() {
        eprintln!("Aucune correction nécessaire.");
        return Ok(text.to_string());
    }

    // Highest offset first, so earlier spans stay valid as picks are applied.
    let mut ordered = result.corrections.clone();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut corrected = text.to_string();
    for finding in &ordered {
        let flagged = output::span_text(&corrected, finding.offset, finding.length);

        let mut items: Vec<String> = finding.suggestions.clone();
        items.push("Ignorer".to_string());

        let choice = Select::new()
            .with_prompt(format!("« {} » — {}", flagged, finding.message))
            .items(&items)
            .default(0)
            .interact()?;

        if choice < finding.suggestions.len() {
            corrected = splice::apply_one(&corrected, finding, &finding.suggestions[choice]);
        }
    }

    // Second pass: the applied picks invalidated the old offsets, so any
    // remaining issues come from a fresh run over the corrected text.
    let second = analyze(&corrector, &corrected).await?;
    if !second.corrections.is_empty() {
        eprintln!(
            "{} corrections restantes après application.",
            second.corrections.len()
        );
    }

    Ok(corrected)
}

fn handle_history(config: &Config, action: HistoryCommands, colored_output: bool) -> Result<()> {
    let path = config
        .history_path
        .clone()
        .or_else(Config::default_history_path)
        .context("Failed to resolve history location")?;
    let store = HistoryStore::new(path, config.history_limit);

    match action {
        HistoryCommands::List => {
            let entries = store.list()?;
            if entries.is_empty() {
                println!("Aucun historique.");
                return Ok(());
            }
            for entry in entries {
                let preview: String = entry.content.chars().take(60).collect();
                if colored_output {
                    println!(
                        "{} {} ({} corrections, lisibilité {:.0})",
                        entry.id.dimmed(),
                        preview,
                        entry.findings.len().to_string().yellow(),
                        entry.readability
                    );
                } else {
                    println!(
                        "{} {} ({} corrections, lisibilité {:.0})",
                        entry.id,
                        preview,
                        entry.findings.len(),
                        entry.readability
                    );
                }
            }
            Ok(())
        }
        HistoryCommands::Clear => {
            store.clear()?;
            println!("Historique supprimé.");
            Ok(())
        }
    }
}
