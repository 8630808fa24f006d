//! Course Materials Assistant chat client - Entry Point

use clap::Parser;
use coursechat::bridge::{ChatApi, HttpChatApi};
use coursechat::config::{self, CliOverrides};
use coursechat::model::AppError;
use coursechat::store::{FileStore, KeyValueStore, MemoryStore};
use coursechat::view::{self, TuiError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Course Materials Assistant - terminal chat client
#[derive(Parser, Debug)]
#[command(name = "coursechat")]
#[command(version)]
#[command(about = "Ask questions about course materials from the terminal")]
pub struct Args {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory holding the chat history
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Number of chats kept in history (oldest are evicted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_chats: Option<u32>,

    /// Keep chat history in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            data_dir: self.data_dir.clone(),
            max_chats: self.max_chats.map(|n| n as usize),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Exiting with error");
            eprintln!("coursechat: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.overrides())
    };
    config::validate(&config)?;

    coursechat::logging::init(&config.log_file_path)?;
    info!(config = ?config, ephemeral = args.ephemeral, "Configuration loaded and resolved");

    let store: Box<dyn KeyValueStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(config.data_dir.clone()))
    };

    let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(config.api_url.clone())?);

    view::run(&config, store, api, args.no_color).map_err(|err| match err {
        TuiError::Io(io) => AppError::Terminal(io),
    })
}
