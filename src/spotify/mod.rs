//! # Spotify Integration Module
//!
//! The authenticated side of the CLI: obtaining tokens and using them against
//! the Spotify Web API.
//!
//! ```text
//! CLI
//!  ├── auth::Authorizer      reuse / refresh / consent, token exchange
//!  └── SpotifyClient
//!       ├── player           playback control and state
//!       ├── search           query -> PlayableReference
//!       └── devices          device listing and target selection
//! ```
//!
//! ## Error Classification
//!
//! Playback-mutating calls go through [`classify`]: any 2xx is success, 400 is
//! a client error carrying the remote body, 403 means the operation is not
//! allowed right now (pausing while paused), 404 means no device is reachable.
//! Nothing is retried; the user re-runs the command.

pub mod auth;
pub mod devices;
pub mod player;
pub mod search;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::CONTENT_LENGTH};

use crate::{
    config::Endpoints,
    error::{Error, Res},
};

/// Web API client bound to one user access token.
pub struct SpotifyClient {
    http: Client,
    endpoints: Endpoints,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(endpoints: Endpoints, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            access_token: access_token.into(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.endpoints.api(path))
            .bearer_auth(&self.access_token)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http
            .put(self.endpoints.api(path))
            .bearer_auth(&self.access_token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.endpoints.api(path))
            .bearer_auth(&self.access_token)
    }

    /// Sends a request that carries no body and classifies the response.
    async fn send_empty(&self, operation: &'static str, request: RequestBuilder) -> Res<()> {
        let res = request.header(CONTENT_LENGTH, 0).send().await?;
        classify(operation, res).await
    }

    /// Sends a read request and hands back the response once it is known to be
    /// successful.
    async fn fetch(&self, operation: &'static str, request: RequestBuilder) -> Res<Response> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Err(Error::Api {
            operation,
            status,
            body,
        })
    }
}

/// Maps a playback response onto success or one of the playback errors.
pub async fn classify(operation: &'static str, res: Response) -> Res<()> {
    let status = res.status();
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::BAD_REQUEST => Err(Error::BadRequest {
            operation,
            body: res.text().await.unwrap_or_default(),
        }),
        StatusCode::FORBIDDEN => Err(Error::NotPermitted { operation }),
        StatusCode::NOT_FOUND => Err(Error::NoActiveDevice { operation }),
        _ => Err(Error::Api {
            operation,
            status,
            body: res.text().await.unwrap_or_default(),
        }),
    }
}
