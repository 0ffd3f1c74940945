//! # CLI Module
//!
//! Command implementations behind `spotify-cli`'s subcommands. Argument
//! parsing lives in `main.rs`; every function here takes already-parsed values,
//! performs the work and prints plain-text results with the crate's output
//! macros.
//!
//! ## Commands
//!
//! - [`auth`] - run the authorization flow and cache the tokens
//! - [`play`] - resume, play on a device, or search and play
//! - [`transport`] - pause, next, previous
//! - [`volume`], [`shuffle`] - playback settings
//! - [`devices`] - table of known playback devices
//! - [`now_playing`] - what is playing right now
//! - [`configure`] - edit `config.json`
//!
//! ## Flow
//!
//! Every networked command follows the same path:
//!
//! ```text
//! load_config ─► validate ─► Authorizer::authorize ─► SpotifyClient ─► output
//! ```
//!
//! Errors are returned to `main`, which prints them and exits non-zero.

mod auth;
mod config;
mod devices;
mod playback;

pub use auth::auth;
pub use config::{ConfigUpdate, configure};
pub use devices::devices;
pub use playback::{PlayTarget, Transport, now_playing, play, shuffle, transport, volume};

use crate::{
    config::{self as settings, AppConfig, Endpoints},
    error::Res,
    info,
    management::CredentialStore,
    spotify::{SpotifyClient, auth::Authorizer},
    types::Credentials,
};

/// Loads and validates `config.json`.
///
/// On first use the file does not exist yet. An empty template is written so
/// the user has something to fill in, and the process exits successfully
/// without running the command.
async fn load_config() -> Res<AppConfig> {
    let path = settings::config_path();
    if AppConfig::create_if_missing(&path).await? {
        info!("No config file was found, so one was created at {}.", path.display());
        info!("Fill in your Spotify application credentials or use the `config` command.");
        std::process::exit(0);
    }

    let (config, _) = AppConfig::load(&path).await?;
    config.validate()?;
    Ok(config)
}

async fn authorize(config: &AppConfig) -> Res<Credentials> {
    let authorizer = Authorizer::new(
        config.clone(),
        Endpoints::from_env(),
        CredentialStore::new(settings::tokens_path()),
    );
    authorizer.authorize().await
}

/// Authorizes and returns a Web API client for the user.
async fn connect(config: &AppConfig) -> Res<SpotifyClient> {
    let credentials = authorize(config).await?;
    Ok(SpotifyClient::new(
        Endpoints::from_env(),
        credentials.user_access_token,
    ))
}
