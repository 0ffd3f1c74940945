use tokio::process::Command;

use crate::{
    error::{Error, Res},
    types::{AlbumRef, ArtistRef, PlayableReference, PlaybackState, Track},
};

use super::Player;

const PLAY: &str = "Application('Spotify').play()";
const PAUSE: &str = "Application('Spotify').pause()";
const NEXT_TRACK: &str = "Application('Spotify').nextTrack()";
const PREVIOUS_TRACK: &str = "Application('Spotify').previousTrack()";
const PLAY_TRACK: &str = "Application('Spotify').playTrack";
const PLAYER_STATE: &str = "Application('Spotify').playerState()";
const TRACK_NAME: &str = "Application('Spotify').currentTrack().name()";
const TRACK_ARTIST: &str = "Application('Spotify').currentTrack().artist()";
const TRACK_ALBUM: &str = "Application('Spotify').currentTrack().album()";
const TRACK_URI: &str = "Application('Spotify').currentTrack().spotifyUrl()";

/// Controls the Spotify desktop application through JavaScript for
/// Automation (`osascript -l JavaScript`). macOS only.
#[derive(Debug, Default)]
pub struct DesktopPlayer;

impl DesktopPlayer {
    pub fn new() -> Self {
        DesktopPlayer
    }

    /// Plays any Spotify URI: tracks, albums, artists and playlists alike.
    pub async fn play_reference(&self, reference: &PlayableReference) -> Res<()> {
        let uri = serde_json::to_string(reference.as_str())?;
        self.run(&format!("{PLAY_TRACK}({uri})")).await.map(drop)
    }

    async fn run(&self, script: &str) -> Res<String> {
        let output = Command::new("osascript")
            .args(["-l", "JavaScript", "-e", script])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Desktop(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Player for DesktopPlayer {
    async fn play(&self) -> Res<()> {
        self.run(PLAY).await.map(drop)
    }

    async fn pause(&self) -> Res<()> {
        self.run(PAUSE).await.map(drop)
    }

    async fn next(&self) -> Res<()> {
        self.run(NEXT_TRACK).await.map(drop)
    }

    async fn previous(&self) -> Res<()> {
        self.run(PREVIOUS_TRACK).await.map(drop)
    }

    async fn state(&self) -> Res<PlaybackState> {
        let state = self.run(PLAYER_STATE).await?;
        let name = self.run(TRACK_NAME).await?;
        let track = if name.is_empty() {
            None
        } else {
            Some(Track {
                name,
                uri: self.run(TRACK_URI).await?,
                album: AlbumRef {
                    name: self.run(TRACK_ALBUM).await?,
                },
                artists: vec![ArtistRef {
                    name: self.run(TRACK_ARTIST).await?,
                }],
            })
        };

        Ok(PlaybackState {
            is_playing: state == "playing",
            track,
        })
    }
}
