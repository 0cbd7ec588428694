use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind_addr: String,
    pub bind_port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATA_JSON_URI is required and must not be empty")]
    MissingDataPath,
    #[error("--port must be a valid u16")]
    InvalidPort,
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Builds the config from command-line arguments (without the program name)
    /// and an environment lookup.
    pub fn parse<I, F>(args: I, lookup: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("DATA_JSON_URI")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingDataPath)?;

        let bind_addr = lookup("BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let bind_port = parse_port_flag(args)?.unwrap_or(DEFAULT_PORT);

        let config = Self {
            data_path,
            bind_addr,
            bind_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

// Accepts `--port N`, `--port=N` and the single-dash forms.
fn parse_port_flag<I>(args: I) -> Result<Option<u16>, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut port = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let flag = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .ok_or_else(|| ConfigError::UnknownArgument(arg.clone()))?;

        let value = match flag.split_once('=') {
            Some(("port", value)) => value.to_string(),
            None if flag == "port" => args.next().ok_or(ConfigError::InvalidPort)?,
            _ => return Err(ConfigError::UnknownArgument(arg.clone())),
        };

        port = Some(
            value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
        );
    }

    Ok(port)
}
