//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod ask;
pub mod settings;


use std::error::Error;
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::cli::ask::run_ask;
use crate::cli::settings::SettingError;
use crate::core::app::AppInitConfig;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;
use crate::utils::logging::{init_file_logging, init_stderr_logging};
use crate::utils::url::normalize_base_url;

#[derive(Parser)]
#[command(name = "copilot-chat", version)]
#[command(about = "A terminal chat client for a personal AI copilot backend")]
#[command(
    long_about = "copilot-chat is a full-screen terminal client for a question-answering \
backend. Questions are sent with the conversation so far to <base-url>/api/query; \
answers are rendered as markdown with their source citations.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt/Shift+Enter   Insert a newline\n\
  F1-F4             Use a suggested prompt (empty conversation)\n\
  Ctrl+N            Start a new conversation\n\
  Ctrl+Y            Copy the most recent code block\n\
  Alt+1..9          Copy code block N\n\
  Up/Down/Mouse     Scroll through the conversation\n\
  PgUp/PgDn/Home/End  Scroll by page or to either end\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides the config file)
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Write diagnostics to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// UI theme (dark or light)
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,

    /// Show bot replies as plain text
    #[arg(long, global = true)]
    pub no_markdown: bool,

    /// Disable syntax highlighting in code blocks
    #[arg(long, global = true)]
    pub no_syntax: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the effective configuration
    Config,
}

/// Layer command-line flags over the file configuration.
pub fn apply_overrides(args: &Args, mut config: Config) -> Result<Config, SettingError> {
    if let Some(endpoint) = &args.endpoint {
        let url = normalize_base_url(endpoint);
        if !url.is_empty() {
            config.base_url = Some(url);
        }
    }
    if let Some(theme) = &args.theme {
        let name = theme.trim().to_ascii_lowercase();
        if !Theme::is_known(&name) {
            return Err(SettingError::UnknownTheme {
                input: theme.clone(),
            });
        }
        config.theme = Some(name);
    }
    if args.no_markdown {
        config.markdown = Some(false);
    }
    if args.no_syntax {
        config.syntax = Some(false);
    }
    if let Some(log) = &args.log {
        config.log_file = Some(log.clone());
    }
    Ok(config)
}

fn effective_config(args: &Args) -> Result<Config, Box<dyn Error>> {
    let config = Config::load()?;
    match apply_overrides(args, config) {
        Ok(config) => Ok(config),
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

fn report_setting(result: Result<String, SettingError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Some(Commands::Set { ref key, ref value }) => {
            report_setting(settings::set(key, value));
            Ok(())
        }
        Some(Commands::Unset { ref key }) => {
            report_setting(settings::unset(key));
            Ok(())
        }
        Some(Commands::Config) => {
            let config = effective_config(&args)?;
            settings::print_all(&config);
            Ok(())
        }
        Some(Commands::Ask { ref query }) => {
            let config = effective_config(&args)?;
            match config.log_file.as_deref() {
                Some(path) => init_file_logging(Path::new(path))?,
                None => init_stderr_logging()?,
            }
            let code = run_ask(query.clone(), &config).await;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Some(Commands::Chat) | None => {
            let config = effective_config(&args)?;
            if let Some(path) = config.log_file.as_deref() {
                init_file_logging(Path::new(path))?;
            }
            run_chat(AppInitConfig::from_config(&config)).await
        }
    }
}
