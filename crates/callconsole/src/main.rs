use anyhow::{Context, Result};
use callconsole_common::{available_ai_models, logger, AppConfig, ConsoleError};
use callconsole_llm::{CallSummarizer, CancellationToken, SummaryRequest};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "callconsole")]
#[command(about = "CallConsole - AI call summarization service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize one transcript and print the summary
    Summarize {
        /// Transcript file; read from stdin when omitted
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// List the AI model catalog
    Models,
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("CallConsole starting...");
    tracing::info!("Configuration loaded: {:?}", config);

    println!("Server listening on http://{}", config.server_bind_address());

    callconsole_server::start_server(config).await?;
    Ok(())
}

fn read_transcript(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript {}", path.display())),
        None => {
            let mut transcript = String::new();
            std::io::stdin()
                .read_to_string(&mut transcript)
                .context("Failed to read transcript from stdin")?;
            Ok(transcript)
        }
    }
}

async fn summarize(config: AppConfig, file: Option<PathBuf>) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;
    config.validate()?;

    let transcript = read_transcript(file)?;
    let summarizer = CallSummarizer::from_config(&config)?;

    // Ctrl-C withdraws the request instead of killing the process mid-call
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let response = summarizer
        .summarize_with_cancel(&SummaryRequest::new(transcript), &cancel)
        .await
        .map_err(|e| {
            eprintln!("{}", e.user_message());
            ConsoleError::from(e)
        })?;

    println!("{}", response.summary());
    Ok(())
}

fn print_models(config: &AppConfig) {
    for model in available_ai_models() {
        let marker = if model.id == config.default_ai_model { "*" } else { " " };
        println!(
            "{} {:<18} {:<18} {:<10} {}",
            marker,
            model.id,
            model.name,
            model.provider,
            model.capabilities.join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() also loads .env, but the project-root file must
    // win over one in the current directory
    load_dotenv_from_project_root();

    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await?,
        Some(Commands::Summarize { file }) => summarize(config, file).await?,
        Some(Commands::Models) => print_models(&config),
        None => serve(config, None, None).await?,
    }

    Ok(())
}
