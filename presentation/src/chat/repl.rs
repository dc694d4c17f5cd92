//! REPL (Read-Eval-Print Loop) for interactive trip planning

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::config::ReplConfig;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::warn;
use travel_application::{LiveBoardUseCase, OperationStatus, PlanningStore};
use travel_domain::OutputFormat;

const HISTORY_SIZE: usize = 1000;

/// Slash command entered at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search,
    Params,
    Stations(String),
    Live(String),
    Session,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a `/command`. Returns `None` for plain chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        Some(match name {
            "search" | "s" => Self::Search,
            "params" | "p" => Self::Params,
            "stations" | "station" => Self::Stations(argument.to_string()),
            "live" | "board" => Self::Live(argument.to_string()),
            "session" => Self::Session,
            "logout" | "new" => Self::Logout,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        })
    }
}

/// Interactive planning REPL
pub struct PlanningRepl {
    store: Arc<PlanningStore>,
    live_board: Option<Arc<LiveBoardUseCase>>,
    format: OutputFormat,
    config: ReplConfig,
}

impl PlanningRepl {
    /// Create a new PlanningRepl
    pub fn new(store: Arc<PlanningStore>) -> Self {
        Self {
            store,
            live_board: None,
            format: OutputFormat::Summary,
            config: ReplConfig::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable the `/live` command
    pub fn with_live_board(mut self, live_board: Arc<LiveBoardUseCase>) -> Self {
        self.live_board = Some(live_board);
        self
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("travel".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(buffer)) => {
                    let line = buffer.trim();
                    if line.is_empty() {
                        continue;
                    }

                    match ReplCommand::parse(line) {
                        Some(command) => {
                            if self.handle_command(command).await {
                                break;
                            }
                        }
                        None => self.process_utterance(line).await,
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(_) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Travel Assistant - Planning Mode     │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        match &self.store.snapshot().session_token {
            Some(token) => println!("Resuming session {}", token.as_str().dimmed()),
            None => println!("Describe your trip, e.g. \"Berlin to Hamburg tomorrow at 9\"."),
        }
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  {}           - Search with the current parameters", "/search".cyan());
        println!("  {}           - Show what has been understood so far", "/params".cyan());
        println!("  {} - Look up station names", "/stations <text>".cyan());
        println!("  {}  - Show live departures", "/live <station>".cyan());
        println!("  {}          - Show the current session", "/session".cyan());
        println!("  {}           - Forget the session and start over", "/logout".cyan());
        println!("  {}             - Show this help", "/help".cyan());
        println!("  {}             - Exit", "/quit".cyan());
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Search => self.search_current().await,
            ReplCommand::Params => {
                let state = self.store.snapshot();
                match &state.search_params {
                    Some(params) if !params.is_empty() => {
                        print!("{}", ConsoleFormatter::format_params(params))
                    }
                    _ => println!("Nothing planned yet."),
                }
            }
            ReplCommand::Stations(query) => {
                if query.is_empty() {
                    println!("Usage: /stations <text>");
                } else {
                    self.store.lookup_stations(&query).await;
                    print!(
                        "{}",
                        ConsoleFormatter::format_stations(&self.store.snapshot().stations)
                    );
                }
            }
            ReplCommand::Live(station) => self.show_live_board(&station).await,
            ReplCommand::Session => match &self.store.snapshot().session_token {
                Some(token) => println!("Session: {}", token),
                None => println!("No active session."),
            },
            ReplCommand::Logout => {
                self.store.clear_session();
                println!("{}", "Session cleared. The next message starts a new trip.".green());
            }
            ReplCommand::Unknown(input) => {
                println!("Unknown command: {}", input);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn show_live_board(&self, station: &str) {
        let Some(live_board) = &self.live_board else {
            println!("Live departures are not available.");
            return;
        };
        if station.is_empty() {
            println!("Usage: /live <station>");
            return;
        }

        let result = {
            let _progress =
                ProgressReporter::start("Fetching departures...", self.config.show_progress);
            live_board.execute(station).await
        };
        match result {
            Ok(board) => print!("{}", ConsoleFormatter::format_board(&board, self.format)),
            Err(e) => println!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    async fn process_utterance(&self, utterance: &str) {
        println!();
        let status = {
            let _progress = ProgressReporter::start("Thinking...", self.config.show_progress);
            self.store.request_pre_plan(utterance).await
        };

        let state = self.store.snapshot();
        match (&state.pre_plan, status) {
            (Some(pre_plan), OperationStatus::Completed) => {
                println!("{}", ConsoleFormatter::format_pre_plan(pre_plan));
                if self.config.auto_search && pre_plan.is_searchable() {
                    self.search_pre_plan(pre_plan.clone()).await;
                }
            }
            (Some(pre_plan), _) if pre_plan.is_failure() => {
                println!("{}", ConsoleFormatter::format_pre_plan(pre_plan));
            }
            _ => {
                if let Some(error) = state.error_message() {
                    println!("{}", ConsoleFormatter::format_error(error));
                }
            }
        }
        println!();
    }

    async fn search_current(&self) {
        let state = self.store.snapshot();
        match (state.search_params, state.pre_plan) {
            (Some(params), _) if params.is_complete() => {
                let status = {
                    let _progress = ProgressReporter::start(
                        "Searching connections...",
                        self.config.show_progress,
                    );
                    self.store.search_by_params(params).await
                };
                self.print_search(status);
            }
            (_, Some(pre_plan)) if pre_plan.is_searchable() => self.search_pre_plan(pre_plan).await,
            _ => println!("Origin and destination are needed before searching."),
        }
    }

    async fn search_pre_plan(&self, pre_plan: travel_domain::PrePlan) {
        let status = {
            let _progress =
                ProgressReporter::start("Searching connections...", self.config.show_progress);
            self.store.search_by_pre_plan(pre_plan).await
        };
        self.print_search(status);
    }

    fn print_search(&self, status: OperationStatus) {
        if status == OperationStatus::Superseded {
            return;
        }
        print!(
            "{}",
            ConsoleFormatter::format_state(&self.store.snapshot(), self.format)
        );
    }
}
