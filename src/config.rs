use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discord::DEFAULT_API_BASE;
use crate::error::ConfigError;

pub const DEFAULT_CLIPPINGS_FILE: &str = "My Clippings.txt";
pub const DEFAULT_HIGHLIGHT_COUNT: usize = 3;
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "readunwise")]
#[command(about = "A simple alternative to Readwise", long_about = None)]
pub struct Cli {
    /// Clippings file from a Kindle device
    #[arg(short = 'f', long = "clippings-file", global = true)]
    pub clippings_file: Option<PathBuf>,

    #[arg(short = 'c', long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List books
    #[command(alias = "list-books")]
    List,
    /// Export a book's highlights as markdown
    Export {
        /// Book title or index
        book: String,
        /// Export directory
        export_dir: PathBuf,
    },
    /// Print a random highlight
    Random {
        /// Book titles or indices to ignore
        #[arg(short = 'i', long = "ignore", num_args = 1..)]
        ignored_books: Vec<String>,
    },
    /// Send random highlights to a Discord channel
    #[command(alias = "send-to-channel")]
    Discord {
        /// Discord channel ID
        channel_id: u64,
        /// Discord bot authentication token
        #[arg(long)]
        token: Option<String>,
        /// Book titles or indices to ignore
        #[arg(short = 'i', long = "ignore", num_args = 1..)]
        ignored_books: Vec<String>,
        /// Number of highlights to select
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,
    },
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".readunwise")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Discord {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub clippings_file: Option<PathBuf>,
    #[serde(default)]
    pub ignored_books: Vec<String>,
    #[serde(default)]
    pub discord: Discord,
}

impl Config {
    /// Load the config file. An explicit path must exist; the default one
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Config::from_path(path),
            None => {
                let path = default_config_path();
                if path.is_file() {
                    Config::from_path(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let yaml_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml(&yaml_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self, serde_yaml::Error> {
        let yaml_with_env = substitute_env_vars(yaml_str);
        // An empty document deserializes to unit, not a map.
        if yaml_with_env.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&yaml_with_env)
    }
}

/// Replace `${VAR}` and `${VAR:-default}` with values from the environment.
pub fn substitute_env_vars(yaml_str: &str) -> String {
    let mut result = yaml_str.to_string();
    let mut offset = 0;

    while let Some(start) = result[offset..].find("${") {
        let actual_start = offset + start;
        let Some(end) = result[actual_start..].find('}') else {
            break;
        };
        let var_name = &result[actual_start + 2..actual_start + end];

        let env_value = if let Some(default_start) = var_name.find(":-") {
            let actual_var = &var_name[..default_start];
            let default_val = &var_name[default_start + 2..];
            env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
        } else {
            env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(var = var_name, "environment variable not found");
                String::new()
            })
        };

        result.replace_range(actual_start..actual_start + end + 1, &env_value);
        offset = actual_start + env_value.len();
    }

    result
}

/// Everything a command needs, resolved from flags, config file and defaults
/// in that order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub clippings_file: PathBuf,
    pub ignored_books: Vec<String>,
    pub discord_token: Option<String>,
    pub discord_count: usize,
    pub discord_api_base: String,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let clippings_file = cli
            .clippings_file
            .clone()
            .or(config.clippings_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIPPINGS_FILE));

        let mut ignored_books = config.ignored_books;
        let mut discord_token = config.discord.token.filter(|t| !t.is_empty());
        let mut discord_count = config.discord.count.unwrap_or(DEFAULT_HIGHLIGHT_COUNT);

        match &cli.command {
            Command::Random { ignored_books: extra } => ignored_books.extend(extra.iter().cloned()),
            Command::Discord {
                token,
                ignored_books: extra,
                count,
                ..
            } => {
                ignored_books.extend(extra.iter().cloned());
                if let Some(token) = token {
                    discord_token = Some(token.clone());
                }
                if let Some(count) = count {
                    discord_count = *count;
                }
            }
            Command::List | Command::Export { .. } => {}
        }

        if discord_token.is_none() {
            discord_token = env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
        }

        Settings {
            clippings_file,
            ignored_books,
            discord_token,
            discord_count,
            discord_api_base: config
                .discord
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    pub fn token(&self) -> Result<&str, ConfigError> {
        self.discord_token.as_deref().ok_or(ConfigError::MissingToken)
    }
}
