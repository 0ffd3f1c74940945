//! Playback backends.
//!
//! [`Player`] is the capability shared by every way of controlling Spotify.
//! The backend is picked once, from [`crate::config::PlayerKind`], when a
//! command starts:
//!
//! - [`crate::spotify::SpotifyClient`] talks to the Web API and can target any
//!   registered device.
//! - [`DesktopPlayer`] scripts the Spotify desktop application on macOS.

mod desktop;

pub use desktop::DesktopPlayer;

use crate::{error::Res, spotify::SpotifyClient, types::PlaybackState};

#[allow(async_fn_in_trait)]
pub trait Player {
    async fn play(&self) -> Res<()>;
    async fn pause(&self) -> Res<()>;
    async fn next(&self) -> Res<()>;
    async fn previous(&self) -> Res<()>;
    async fn state(&self) -> Res<PlaybackState>;
}

impl Player for SpotifyClient {
    async fn play(&self) -> Res<()> {
        SpotifyClient::play(self).await
    }

    async fn pause(&self) -> Res<()> {
        SpotifyClient::pause(self).await
    }

    async fn next(&self) -> Res<()> {
        self.next_track().await
    }

    async fn previous(&self) -> Res<()> {
        self.previous_track().await
    }

    async fn state(&self) -> Res<PlaybackState> {
        self.current_state().await
    }
}
