//! CLI entrypoint for Travel Assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use travel_application::{
    CheckStatusUseCase, ConnectionSearchService, LiveBoardUseCase, NoTranscriptLogger,
    OperationStatus, PlanningStore, PrePlanService, SessionManager, SessionStorage,
    StationLookupService, TranscriptLogger,
};
use travel_domain::OutputFormat;
use travel_infrastructure::{
    ConfigLoader, FileConfig, FileSessionStorage, HttpBackend, InMemorySessionStorage,
    JsonlTranscriptLogger,
};
use travel_presentation::{Cli, ConsoleFormatter, PlanningRepl, ProgressReporter, ReplConfig};

/// Install the tracing subscriber. The guard must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Could not create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn session_storage(cli: &Cli, config: &FileConfig) -> Arc<dyn SessionStorage> {
    if cli.ephemeral || !config.session.persist {
        return Arc::new(InMemorySessionStorage::new());
    }
    match config
        .session
        .store_path
        .clone()
        .or_else(FileSessionStorage::default_path)
    {
        Some(path) => {
            info!("Session file: {}", path.display());
            Arc::new(FileSessionStorage::new(path))
        }
        None => {
            warn!("No data directory available; session will not persist");
            Arc::new(InMemorySessionStorage::new())
        }
    }
}

fn transcript_logger(config: &FileConfig) -> Arc<dyn TranscriptLogger> {
    config
        .logging
        .transcript_path
        .as_ref()
        .and_then(JsonlTranscriptLogger::open)
        .map(|logger| {
            info!("Transcript: {}", logger.path().display());
            Arc::new(logger) as Arc<dyn TranscriptLogger>
        })
        .unwrap_or_else(|| Arc::new(NoTranscriptLogger))
}

fn exit_code(status: OperationStatus) -> ExitCode {
    match status {
        OperationStatus::Failed => ExitCode::FAILURE,
        OperationStatus::Completed | OperationStatus::Superseded => ExitCode::SUCCESS,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Travel Assistant");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && format != OutputFormat::Json;

    // === Dependency Injection ===
    let backend = Arc::new(
        HttpBackend::from_config(&config.backend).context("Failed to create HTTP client")?,
    );
    info!("Backend: {}{}", config.backend.base_url, config.backend.api_prefix);

    if cli.status {
        let status = {
            let _progress = ProgressReporter::start("Checking backend...", show_progress);
            CheckStatusUseCase::new(backend.clone()).execute().await
        };
        return match status {
            Ok(status) => {
                print!("{}", ConsoleFormatter::format_status(&status));
                Ok(if status.is_ok() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let transcript = transcript_logger(&config);
    let live_board = Arc::new(
        LiveBoardUseCase::new(backend.clone()).with_transcript_logger(transcript.clone()),
    );

    // Live departure board mode
    if let Some(station) = &cli.live {
        let result = {
            let _progress = ProgressReporter::start("Fetching departures...", show_progress);
            live_board.execute(station).await
        };
        return match result {
            Ok(board) => {
                print!("{}", ConsoleFormatter::format_board(&board, format));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let session = Arc::new(SessionManager::new(session_storage(&cli, &config)));
    let store = Arc::new(PlanningStore::new(
        PrePlanService::new(backend.clone(), session.clone())
            .with_transcript_logger(transcript.clone()),
        ConnectionSearchService::new(backend.clone()).with_transcript_logger(transcript.clone()),
        StationLookupService::new(backend.clone()).with_transcript_logger(transcript),
        session,
    ));

    // Station lookup mode
    if let Some(query) = &cli.stations {
        store.lookup_stations(query).await;
        let stations = store.snapshot().stations;
        if format == OutputFormat::Json {
            println!("{}", ConsoleFormatter::format_json(&store.snapshot()));
        } else {
            print!("{}", ConsoleFormatter::format_stations(&stations));
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Direct search mode
    if let Some(params) = cli.search_params() {
        let status = {
            let _progress = ProgressReporter::start("Searching connections...", show_progress);
            store.search_by_params(params).await
        };
        print!("{}", ConsoleFormatter::format_state(&store.snapshot(), format));
        return Ok(exit_code(status));
    }

    // Chat mode
    if cli.chat {
        let repl = PlanningRepl::new(store)
            .with_format(format)
            .with_live_board(live_board)
            .with_config(ReplConfig {
                show_progress,
                auto_search: !cli.no_search,
                ..ReplConfig::default()
            });
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single request mode - request is required
    let request = match cli.request {
        Some(r) => r,
        None => bail!("A trip request is required. Use --chat for interactive mode."),
    };

    let status = {
        let _progress = ProgressReporter::start("Thinking...", show_progress);
        store.request_pre_plan(&request).await
    };
    let state = store.snapshot();
    let pre_plan = match (status, state.pre_plan) {
        (OperationStatus::Completed, Some(pre_plan)) => pre_plan,
        (_, pre_plan) => {
            if format == OutputFormat::Json {
                println!("{}", ConsoleFormatter::format_json(&store.snapshot()));
            } else {
                let message = pre_plan
                    .map(|p| p.message)
                    .or_else(|| state.error.map(|e| e.message))
                    .unwrap_or_default();
                eprintln!("{}", ConsoleFormatter::format_error(&message));
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    if format != OutputFormat::Json {
        println!("{}", ConsoleFormatter::format_pre_plan(&pre_plan));
    }

    if cli.no_search || !pre_plan.is_searchable() {
        if format == OutputFormat::Json {
            println!("{}", ConsoleFormatter::format_json(&store.snapshot()));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let status = {
        let _progress = ProgressReporter::start("Searching connections...", show_progress);
        store.search_by_pre_plan(pre_plan).await
    };
    print!("{}", ConsoleFormatter::format_state(&store.snapshot(), format));
    Ok(exit_code(status))
}
