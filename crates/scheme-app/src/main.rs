//! Scheme assistant binary - composition root.
//!
//! 1. Parse CLI args and load configuration (file, env, CLI)
//! 2. Initialise tracing
//! 3. Pick the search backend once
//! 4. Build the dialogue orchestrator
//! 5. Serve the HTTP API, or chat on stdin with `--interactive`

mod cli;

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use scheme_api::routes;
use scheme_api::state::AppState;
use scheme_catalog::SearchBackend;
use scheme_chat::DialogueOrchestrator;
use scheme_core::AppConfig;

use cli::CliArgs;

/// Chat with the orchestrator over stdin/stdout using one session.
fn run_interactive(orchestrator: &DialogueOrchestrator) -> std::io::Result<()> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("Scheme assistant. Ask about farming or business support.");
    println!("Commands: :more (next page), :reset (new conversation), :quit");

    let mut lines = stdin.lock().lines();
    loop {
        print!("\n> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        let result = match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":reset" => {
                if let Err(e) = orchestrator.delete_session(&session_id) {
                    tracing::warn!(error = %e, "Failed to reset session");
                }
                println!("Conversation reset.");
                continue;
            }
            ":more" => orchestrator.handle_query("show more", Some(&session_id), true),
            query => orchestrator.handle_query(query, Some(&session_id), false),
        };

        match result {
            Ok(response) => println!("\n{}", response.response),
            Err(e) => println!("\n{}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config_exists = config_file.exists();
    let mut config = if config_exists {
        AppConfig::load(&config_file)?
    } else {
        AppConfig::default()
    };
    config.apply_env_overrides();
    args.apply_to(&mut config);
    config.validate()?;

    // Tracing: RUST_LOG wins, else the resolved log level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.general.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting scheme assistant v{}", env!("CARGO_PKG_VERSION"));
    if config_exists {
        tracing::info!(path = %config_file.display(), "Configuration loaded");
    } else {
        tracing::info!(path = %config_file.display(), "No configuration file, using defaults");
    }

    // Search backend, decided once.
    let backend = SearchBackend::from_config(&config);
    let backend_name = backend.name();
    tracing::info!(backend = backend_name, "Search backend ready");

    let orchestrator = DialogueOrchestrator::new(&config, Arc::new(backend));

    if args.interactive {
        // The Vertex client blocks, so the REPL stays off the async workers.
        tokio::task::spawn_blocking(move || run_interactive(&orchestrator)).await??;
        return Ok(());
    }

    let state = AppState::new(orchestrator, backend_name);
    routes::start_server(&config.general.host, config.general.port, state).await?;

    Ok(())
}
