use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use agendai::config::Config;
use agendai::gemini::GeminiClient;
use agendai::ingest::{describe_file, load_file};
use agendai::render::{render_analysis, render_message};
use agendai::workspace::{ChatOutcome, UploadOutcome, Workspace};

const QUIT_COMMANDS: [&str; 3] = ["/quit", "/exit", "/q"];

/// Turn a document into a timed meeting agenda, then ask questions about it.
#[derive(Parser, Debug)]
#[command(name = "agendai", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and print an agenda for a PDF, text or image file
    Generate {
        file: PathBuf,
        /// Print the agenda as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Generate an agenda, then chat about the document
    Chat { file: PathBuf },
    /// Print the JSON Schema of the config file
    ConfigSchema,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::ConfigSchema => {
            println!("{}", Config::json_schema()?);
            Ok(())
        }
        Command::Generate { file, json } => {
            let config = Config::load(cli.config.as_deref())?;
            let workspace = build_workspace(&config)?;
            let analysis = generate(&workspace, &config, &file).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(analysis.as_ref())?);
            } else {
                print!("{}", render_analysis(&analysis, config.agenda.meeting_start_time()?));
            }
            Ok(())
        }
        Command::Chat { file } => {
            let config = Config::load(cli.config.as_deref())?;
            let workspace = build_workspace(&config)?;
            let analysis = generate(&workspace, &config, &file).await?;
            print!("{}", render_analysis(&analysis, config.agenda.meeting_start_time()?));
            chat_loop(&workspace).await
        }
    }
}

fn build_workspace(config: &Config) -> Result<Workspace> {
    let client = GeminiClient::from_config(&config.gemini)
        .context("Set GEMINI_API_KEY or [gemini] api_key in the config file")?;
    Ok(Workspace::from_config(Arc::new(client), &config.gemini))
}

async fn generate(
    workspace: &Workspace,
    config: &Config,
    path: &std::path::Path,
) -> Result<Arc<agendai::AnalysisResult>> {
    let file = load_file(path, config.agenda.max_file_bytes).await?;
    eprintln!("{} {}", style("Analyzing").cyan().bold(), describe_file(&file));

    match workspace.upload(file).await? {
        UploadOutcome::Ready(analysis) => Ok(analysis),
        UploadOutcome::Failed(err) => {
            let message = workspace.snapshot().error.unwrap_or_default();
            bail!("{message}\n  cause: {err}")
        }
        UploadOutcome::Discarded => bail!("Document was cleared before analysis finished"),
    }
}

async fn chat_loop(workspace: &Workspace) -> Result<()> {
    if let Some(welcome) = workspace.transcript().messages().last() {
        println!("\n{}", render_message(welcome));
    }
    println!("{}", style("Type /quit to leave.").dim());

    loop {
        let line: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if QUIT_COMMANDS.contains(&line) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match workspace.send_message(line).await {
            Ok(ChatOutcome::Replied(_) | ChatOutcome::Failed(_)) => {
                if let Some(reply) = workspace.transcript().messages().last() {
                    println!("{}", render_message(reply));
                }
            }
            Ok(ChatOutcome::NoReply | ChatOutcome::Discarded) => {}
            Err(err) => eprintln!("{} {err}", style("error:").red().bold()),
        }
    }
    Ok(())
}
