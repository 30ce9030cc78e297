//! CLI interface for codementor

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app::{App, AppContext};
use crate::config::{self, Config};
use crate::latency::Latency;
use crate::store::{JsonFileStore, RecordState};
use crate::tutor;
use crate::types::DEFAULT_USER_ID;

#[derive(Parser, Debug)]
#[command(name = "codementor")]
#[command(about = "Learn to code with guided lessons and an AI tutor", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for stored learner records (overrides the config file)
    #[arg(long, global = true, env = "CODEMENTOR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive tutor (default when no command given)
    Interactive,
    /// Ask the AI tutor a single question
    Ask {
        /// The question
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print stored progress as JSON
    Progress {
        /// User id (defaults to the signed-in user, then "default")
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show or reset the configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
        /// Print the configuration file path
        #[arg(long)]
        path: bool,
        /// Print the default configuration as TOML
        #[arg(long)]
        defaults: bool,
    },
}

/// Shared collaborators backed by the on-disk store
fn open_context(mut config: Config, data_dir: Option<PathBuf>, latency: Latency) -> Result<AppContext> {
    if let Some(dir) = data_dir {
        config.storage.data_dir = Some(dir);
    }
    let store = JsonFileStore::open(&config).context("Failed to open learner storage")?;
    Ok(AppContext::new(Arc::new(store), latency, config))
}

/// Progress record as pretty JSON, with what was found in storage
fn progress_json(ctx: &AppContext, user: Option<String>) -> Result<(String, RecordState)> {
    let user_id = user
        .or_else(|| ctx.profiles.load_user().map(|u| u.id))
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let (progress, state) = ctx.profiles.load_with_state(&user_id);
    let json = serde_json::to_string_pretty(&progress).context("Failed to serialize progress")?;
    Ok((json, state))
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Interactive) => {
            let config = Config::load()?;
            let latency = Latency::from_config(&config.simulation);
            let ctx = open_context(config, cli.data_dir, latency)?;
            crate::shell::run(App::start(ctx)).await?;
        }
        Some(Commands::Ask { text }) => {
            let question = text.join(" ");
            let reply = tutor::reply(&question);
            println!("{}", reply.content);
        }
        Some(Commands::Progress { user }) => {
            let config = Config::load()?;
            let ctx = open_context(config, cli.data_dir, Latency::immediate())?;
            let (json, state) = progress_json(&ctx, user)?;
            if state != RecordState::Stored {
                eprintln!("No usable progress record ({}), showing defaults.", state);
            }
            println!("{}", json);
        }
        Some(Commands::Config { show, reset, path, defaults }) => {
            let config_file = config::config_path()?;
            if defaults {
                print!("{}", config::default_config_toml());
            } else if path {
                println!("{}", config_file.display());
            } else if reset {
                config::reset_config(&config_file)?;
            } else if show {
                let config = Config::load_from(&config_file)?;
                config::show_config(&config)?;
            } else {
                println!("Use --show, --reset, --path or --defaults");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserProgress;
    use tempfile::TempDir;

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::try_parse_from(["codementor"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["codementor", "ask", "how", "do", "lists", "work"]).unwrap();
        match cli.command {
            Some(Commands::Ask { text }) => assert_eq!(text.join(" "), "how do lists work"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::try_parse_from(["codementor", "progress", "--data-dir", "/tmp/cm", "-u", "42"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cm")));
        assert!(matches!(cli.command, Some(Commands::Progress { user: Some(ref u) }) if u == "42"));
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::try_parse_from(["codementor", "config", "--defaults"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { defaults: true, show: false, reset: false, path: false })
        ));
    }

    #[test]
    fn test_progress_json_from_data_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = open_context(Config::default(), Some(dir.path().to_path_buf()), Latency::immediate()).unwrap();

        let (json, state) = progress_json(&ctx, None).unwrap();
        assert_eq!(state, RecordState::Missing);
        assert!(json.contains("\"xpToNext\": 1000"));

        ctx.profiles
            .save("42", &UserProgress { streak: 7, ..Default::default() })
            .unwrap();
        let (json, state) = progress_json(&ctx, Some("42".to_string())).unwrap();
        assert_eq!(state, RecordState::Stored);
        assert!(json.contains("\"streak\": 7"));
    }
}
