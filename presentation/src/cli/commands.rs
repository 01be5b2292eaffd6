//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for answers and history
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Text,
    /// The StructuredAnswer JSON exactly as the HTTP API returns it
    Json,
}

impl From<OutputFormat> for docent_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => docent_domain::OutputFormat::Text,
            OutputFormat::Json => docent_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for docent
#[derive(Parser, Debug)]
#[command(name = "docent")]
#[command(author, version, about = "Answer questions from a single knowledge document")]
#[command(long_about = r#"
Docent answers questions strictly from one knowledge document.

Each question goes to the primary provider (Anthropic). If that call fails
or returns something unusable, the fallback provider (OpenAI) is tried once.
Answers are always one of: text, list, or error.

Configuration files are loaded from (in priority order):
1. DOCENT_* environment variables (e.g. DOCENT_KNOWLEDGE__PATH)
2. --config <path>     Explicit config file
3. ./docent.toml       Project-level config
4. ~/.config/docent/config.toml   Global config

Example:
  docent ask "What is a valuation cap?"
  docent ask --user alice --output json "List the key terms of a SAFE"
  docent history --user alice --limit 5
  docent serve --bind 0.0.0.0:8080
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a question about the knowledge document
    Ask {
        /// The question (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Record the exchange in this user's history
        #[arg(short, long, value_name = "ID")]
        user: Option<String>,

        /// Output format (defaults to [output] format, then text)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Show a user's recent questions and answers
    History {
        /// User whose history to show
        #[arg(short, long, value_name = "ID")]
        user: String,

        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (defaults to [output] format, then text)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Serve the HTTP API
    Serve {
        /// Listen address (overrides [server] bind)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

impl Command {
    /// Question text for `ask`, words joined with single spaces.
    pub fn joined_question(words: &[String]) -> String {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from([
            "docent", "-vv", "ask", "--user", "alice", "--output", "json", "What", "is", "a",
            "SAFE?",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Ask {
                question,
                user,
                output,
            }) => {
                assert_eq!(Command::joined_question(&question), "What is a SAFE?");
                assert_eq!(user.as_deref(), Some("alice"));
                assert_eq!(output, Some(OutputFormat::Json));
            }
            other => panic!("Expected Ask, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_and_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["docent", "history", "--user", "bob", "--limit", "3", "-q"]);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Some(Command::History { ref user, limit: Some(3), output: None }) if user == "bob"
        ));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["docent", "serve", "--bind", "0.0.0.0:9000"]);
        assert!(matches!(
            cli.command,
            Some(Command::Serve { bind: Some(ref b) }) if b == "0.0.0.0:9000"
        ));
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["docent", "ask"]).is_err());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::parse_from(["docent", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
