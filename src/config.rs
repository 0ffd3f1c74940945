//! Configuration management for spotify-cli.
//!
//! Two sources feed the application:
//!
//! 1. `config.json` in the local data directory, holding the Spotify
//!    application identity (client id, client secret, redirect port) and the
//!    playback backend. It is created as an empty template on first use.
//! 2. Environment variables, optionally loaded from a `.env` file in the same
//!    directory. They only override the remote endpoints, which is mostly
//!    useful for pointing the CLI at a test server.
//!
//! # Directory Structure
//!
//! - Linux: `~/.local/share/spotify-cli/`
//! - macOS: `~/Library/Application Support/spotify-cli/`
//! - Windows: `%LOCALAPPDATA%/spotify-cli/`

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Res};

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Returns the program directory, `<data_local_dir>/spotify-cli`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-cli");
    path
}

pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

pub fn tokens_path() -> PathBuf {
    data_dir().join("tokens.json")
}

/// Loads environment variables from `<data_dir>/.env`, if that file exists.
///
/// Creates the data directory on the way so later writes of `config.json`
/// and `tokens.json` do not have to.
///
/// # Errors
///
/// Fails when the directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    }
    Ok(())
}

/// Base URLs of the two Spotify hosts the CLI talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Accounts service, serving `/authorize` and `/api/token`.
    pub accounts_url: String,
    /// Web API root, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Reads `SPOTIFY_ACCOUNTS_URL` and `SPOTIFY_API_URL`, falling back to the
    /// public Spotify hosts.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            accounts_url: env::var("SPOTIFY_ACCOUNTS_URL").unwrap_or(defaults.accounts_url),
            api_url: env::var("SPOTIFY_API_URL").unwrap_or(defaults.api_url),
        }
    }

    /// Points both hosts at the same base URL.
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            accounts_url: base_url.clone(),
            api_url: base_url,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_url.trim_end_matches('/'))
    }

    /// Joins an API path such as `/me/player/pause` onto the API root.
    pub fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}

/// Which implementation of [`crate::player::Player`] drives playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Spotify Web API.
    #[default]
    Web,
    /// The local Spotify desktop application, scripted through `osascript`.
    Desktop,
}

impl std::str::FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(PlayerKind::Web),
            "desktop" => Ok(PlayerKind::Desktop),
            other => Err(format!("unknown player '{other}', expected 'web' or 'desktop'")),
        }
    }
}

/// Contents of `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub app_client_id: String,
    pub app_client_secret: String,
    pub redirect_port: String,
    pub player: PlayerKind,
    /// Seconds to wait for the consent redirect. Absent means forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the config at `path`.
    ///
    /// Returns the record and whether the file was missing. A missing file is
    /// not an error and yields the empty record; a file that is present but not
    /// valid JSON is reported as [`Error::InvalidConfig`].
    pub async fn load(path: &Path) -> Res<(Self, bool)> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::default(), true));
            }
            Err(e) => return Err(e.into()),
        };

        let config = serde_json::from_str(&content).map_err(|source| Error::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((config, false))
    }

    /// Writes the empty template to `path` unless a config file is already
    /// there. Returns whether the template was written.
    pub async fn create_if_missing(path: &Path) -> Res<bool> {
        let (config, created) = Self::load(path).await?;
        if created {
            config.save(path).await?;
        }
        Ok(created)
    }

    pub async fn save(&self, path: &Path) -> Res<()> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Checks the required fields in the order client id, client secret,
    /// redirect port and names the first empty one.
    pub fn validate(&self) -> Res<()> {
        if self.app_client_id.is_empty() {
            return Err(Error::MissingConfig("appClientId"));
        }
        if self.app_client_secret.is_empty() {
            return Err(Error::MissingConfig("appClientSecret"));
        }
        if self.redirect_port.is_empty() {
            return Err(Error::MissingConfig("redirectPort"));
        }
        Ok(())
    }

    /// `http://localhost:<redirectPort>`, registered with the Spotify application.
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}", self.redirect_port)
    }

    pub fn consent_timeout(&self) -> Option<Duration> {
        self.consent_timeout_secs.map(Duration::from_secs)
    }
}
