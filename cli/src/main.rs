//! CLI entrypoint for docent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use docent_application::{
    AnswerQuestionUseCase, AskQuestionInput, AskQuestionUseCase, HistoryParams, HistoryStore,
    ListHistoryUseCase,
};
use docent_domain::{Question, UserId};
use docent_infrastructure::{
    AnthropicProvider, ConfigLoader, FileConfig, FileKnowledgeSource, InMemoryHistoryStore,
    JsonlConversationLogger, JsonlHistoryStore, OpenAiProvider,
};
use docent_presentation::{
    AnswerSpinner, AppState, Cli, Command, ConsoleFormatter, OutputFormat, server,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run `docent --help` for usage.");
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;
    ConsoleFormatter::set_color(config.output.color);

    info!("Starting docent");

    // === Dependency Injection ===
    let services = Services::build(&config)?;

    match command {
        Command::Ask {
            question,
            user,
            output,
        } => {
            let question = Question::try_new(Command::joined_question(&question))
                .context("Invalid question")?;
            let mut input = AskQuestionInput::new(question);
            if let Some(user) = user {
                input = input.with_user(UserId::try_new(user).context("Invalid --user")?);
            }

            let answer = if cli.quiet {
                services.ask.execute(input).await
            } else {
                let spinner = AnswerSpinner::new();
                services.ask.execute_with_progress(input, &spinner).await
            };

            let rendered = match resolve_format(output, &config) {
                docent_domain::OutputFormat::Json => ConsoleFormatter::format_json(&answer),
                docent_domain::OutputFormat::Text => ConsoleFormatter::format_answer(&answer),
            };
            println!("{}", rendered.trim_end());

            Ok(if answer.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::History {
            user,
            limit,
            output,
        } => {
            let user = UserId::try_new(user).context("Invalid --user")?;
            let records = services
                .history
                .execute(&user, limit)
                .await
                .context("Failed to read history")?;

            let rendered = match resolve_format(output, &config) {
                docent_domain::OutputFormat::Json => ConsoleFormatter::format_json(&records),
                docent_domain::OutputFormat::Text => ConsoleFormatter::format_history(&records),
            };
            println!("{}", rendered.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = AppState::new(services.ask, services.history);
            server::run(state, &bind, &config.server.cors_origins).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` takes precedence.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Log every config issue; abort if any is an error.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
            errors += 1;
        } else {
            warn!("{}", issue.message);
        }
    }
    if errors > 0 {
        bail!("Configuration has {} error(s); see messages above", errors);
    }
    Ok(())
}

/// `--output` flag, then `[output] format`, then text.
fn resolve_format(flag: Option<OutputFormat>, config: &FileConfig) -> docent_domain::OutputFormat {
    flag.map(Into::into)
        .or(config.output.format)
        .unwrap_or_default()
}

/// Use cases wired to their adapters
struct Services {
    ask: AskQuestionUseCase,
    history: ListHistoryUseCase,
}

impl Services {
    fn build(config: &FileConfig) -> Result<Self> {
        let budget = config.knowledge.max_chars;
        let knowledge = Arc::new(FileKnowledgeSource::load(config.knowledge.path.as_deref()));

        let primary = AnthropicProvider::from_config(&config.providers.primary, budget)
            .context("Failed to create primary provider")?;
        let mut answerer = AnswerQuestionUseCase::new(Arc::new(primary), knowledge);

        if config.providers.secondary.enabled {
            let secondary = OpenAiProvider::from_config(&config.providers.secondary, budget)
                .context("Failed to create fallback provider")?;
            answerer = answerer.with_secondary(Arc::new(secondary));
        }

        if let Some(path) = &config.logging.conversation_log {
            match JsonlConversationLogger::open(path) {
                Ok(logger) => {
                    info!("Conversation transcript: {}", logger.path().display());
                    answerer = answerer.with_conversation_logger(Arc::new(logger));
                }
                Err(e) => warn!(
                    "Could not open conversation log {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        let store: Arc<dyn HistoryStore> = match (config.history.enabled, config.history.resolved_path()) {
            (true, Some(path)) => {
                info!("History file: {}", path.display());
                Arc::new(JsonlHistoryStore::new(path))
            }
            (true, None) => {
                warn!("No data directory found; history will not persist");
                Arc::new(InMemoryHistoryStore::new())
            }
            (false, _) => Arc::new(InMemoryHistoryStore::new()),
        };

        let params = HistoryParams::default().with_max_records(config.history.limit);

        Ok(Self {
            ask: AskQuestionUseCase::new(answerer, store.clone()),
            history: ListHistoryUseCase::new(store).with_params(params),
        })
    }
}
