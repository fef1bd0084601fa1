// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    Decode(String),
    Network(String),
    Load(LoadError),
}

/// Reasons an image identifier could not be turned into pixels.
///
/// Load failures never reach the guest: the cell simply stays empty. The
/// variants exist so the log line says something useful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The asset does not exist at the resolved location.
    NotFound(String),

    /// The remote server answered with a non-success status.
    HttpStatus(u16),

    /// The background decode task was cancelled or panicked.
    TaskAborted(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(id) => write!(f, "Asset not found: {}", id),
            LoadError::HttpStatus(code) => write!(f, "Unexpected HTTP status {}", code),
            LoadError::TaskAborted(msg) => write!(f, "Load task aborted: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Load(e) => write!(f, "Load Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return Error::Load(LoadError::NotFound(err.to_string()));
        }
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Error::Load(LoadError::HttpStatus(status.as_u16()));
        }
        Error::Network(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Load(LoadError::TaskAborted(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
