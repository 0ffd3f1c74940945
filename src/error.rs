//! Error handling for spotify-cli.
//!
//! Every fallible operation in the crate returns [`Res`], whose error side is
//! the [`Error`] enum below. Variants are grouped by where the failure comes
//! from:
//!
//! * configuration problems, detected before any network call
//! * token endpoint failures during authorization
//! * playback API failures, classified by HTTP status code
//! * lookups that came back empty (search, devices)
//! * local I/O and transport errors
//!
//! All of them are fatal for the current command: `main` prints the message
//! and exits non-zero.

use std::{path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required config field is empty. Holds the field's JSON name.
    #[error("{0} must not be empty")]
    MissingConfig(&'static str),

    #[error("invalid config file {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The token endpoint answered something other than 200 OK.
    #[error("error encountered during authorization ({grant}, {status}). INFO: {body}")]
    AuthExchange {
        grant: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} operation encountered unexpected client error. INFO: {body}")]
    BadRequest {
        operation: &'static str,
        body: String,
    },

    #[error("{operation} operation encountered 403 Forbidden. Is this operation allowed right now?")]
    NotPermitted { operation: &'static str },

    #[error("{operation} operation encountered 404 Not Found. Are there active devices?")]
    NoActiveDevice { operation: &'static str },

    #[error("{operation} operation failed with status {status}. INFO: {body}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("no devices available")]
    NoDevices,

    #[error("could not find any devices matching '{0}'")]
    DeviceNotFound(String),

    #[error("search failed to find any '{kind}' matching '{query}'")]
    NotFound { query: String, kind: String },

    #[error("authorization callback listener stopped before a code was received")]
    CallbackClosed,

    /// The consent redirect carried `error`, e.g. `access_denied`.
    #[error("user authorization failed: {0}")]
    ConsentDenied(String),

    #[error("no authorization code received within {}s", .0.as_secs())]
    ConsentTimeout(Duration),

    #[error("desktop player: {0}")]
    Desktop(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
