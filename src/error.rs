use reqwest::StatusCode;
use std::io;
use thiserror::Error;
use zip::result::ZipError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("test data is not a valid zip archive")]
    Archive(#[from] ZipError),
    #[error("test data has no `{name}` entry")]
    MissingTestFile { name: String },
    #[error("failed to read `{name}` from test data")]
    ArchiveEntry {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("unexpected page structure: {0}")]
    Parse(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("scrape task did not finish")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// True for the failures of the transport layer: connection errors and
    /// non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Status { .. })
    }
}
