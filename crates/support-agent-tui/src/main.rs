use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use support_agent_core::{ChatClient, Config};
use tracing::{error, info};

mod app;
mod handler;
mod logging;
mod markdown;
mod oneshot;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "support-agent")]
#[command(about = "Terminal chat client for the AI support agent", version)]
struct Cli {
    /// Chat endpoint URL (overrides SUPPORT_AGENT_ENDPOINT and the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Where to write the log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question, print the reply and exit
    Ask {
        /// Your question
        text: String,
    },
    /// Show the resolved configuration, or persist a new endpoint
    Config {
        /// Save this endpoint to the config file
        #[arg(long)]
        set_endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let endpoint = config.resolve_endpoint(cli.endpoint.as_deref());
    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(logging::default_log_path);

    if let Err(e) = logging::init(&log_path) {
        eprintln!("Logging disabled: {}", e);
    }
    info!(%endpoint, log_file = %log_path.display(), "Starting support-agent");

    match cli.command {
        None => {
            run_tui(ChatClient::new(&endpoint)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Ask { text }) => {
            let message = oneshot::ask(&ChatClient::new(&endpoint), &text).await?;
            println!("{}", oneshot::format_message(&message));
            if message.is_error() || message.is_rate_limited() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Some(Commands::Config { set_endpoint }) => {
            if let Some(new_endpoint) = set_endpoint {
                Config::save_endpoint(&new_endpoint)?;
                println!("Saved endpoint: {}", new_endpoint);
            } else {
                println!("endpoint:    {}", endpoint);
                println!("log file:    {}", log_path.display());
                println!("config file: {}", Config::config_path()?.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_tui(client: ChatClient) -> Result<()> {
    let mut app = App::new(client);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }
    info!(messages = app.conversation.messages().len(), "Session ended");
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    let tx = events.sender();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event, &tx),
            None => break,
        }
    }

    Ok(())
}
