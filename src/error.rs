use std::path::PathBuf;
use std::{error::Error, fmt};

#[derive(Debug, thiserror::Error)]
pub enum ClippingsError {
    #[error("failed to read clippings file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no books left to choose from")]
    NothingToSelect,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("no discord token: pass --token, set discord.token or DISCORD_TOKEN")]
    MissingToken,
}

#[derive(Debug)]
pub enum DeliveryError {
    Status(u16, String),
    Transport(Box<dyn Error + Send + Sync + 'static>),
    EmptyMessage,
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use DeliveryError::*;
        match self {
            Transport(e) => Some(e.as_ref() as &dyn Error),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DeliveryError::*;
        match self {
            Status(code, body) => write!(f, "Status {}: {}", code, body),
            Transport(e) => write!(f, "Transport: {}", e),
            EmptyMessage => write!(f, "EmptyMessage"),
        }
    }
}

impl From<ureq::Error> for DeliveryError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, response) => {
                DeliveryError::Status(code, response.into_string().unwrap_or_default())
            }
            ureq::Error::Transport(transport) => DeliveryError::Transport(Box::new(transport)),
        }
    }
}
