use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// Token record persisted between invocations.
///
/// An empty token is treated exactly like an expired one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub app_access_token: String,
    pub app_token_expiration: i64,
    pub user_access_token: String,
    pub user_refresh_token: String,
    pub user_token_expiration: i64,
}

impl Credentials {
    pub fn app_token_expired(&self, now: i64) -> bool {
        self.app_access_token.is_empty() || now > self.app_token_expiration
    }

    pub fn user_token_expired(&self, now: i64) -> bool {
        self.user_access_token.is_empty() || now > self.user_token_expiration
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.user_refresh_token.is_empty()
    }
}

/// Body returned by the token endpoint. Only the fields we keep are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    // Restricted devices may report a null id.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_restricted: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub id: String,
    #[tabled(rename = "type")]
    pub kind: String,
    pub name: String,
    pub active: String,
}

impl From<Device> for DeviceTableRow {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            kind: device.kind,
            name: device.name,
            active: if device.is_active { "yes" } else { "" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// What is playing right now and whether playback is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(rename = "item", default)]
    pub track: Option<Track>,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_playing { "Playing" } else { "Paused" };
        write!(f, "=> {status}")?;
        if let Some(track) = self.track.as_ref().filter(|t| !t.name.is_empty()) {
            let artists = track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " :: {} - {}", track.name, artists)?;
        }
        Ok(())
    }
}

/// Opaque identifier of something playable, e.g. `spotify:album:4aawyAB9vmqN3uQ7FjRGTy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayableReference(pub String);

impl PlayableReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Track references are queued via `uris`; everything else is a context.
    pub fn is_track(&self) -> bool {
        self.0.split(':').nth(1) == Some("track")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Album,
    Artist,
    Playlist,
    Show,
    Episode,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
            SearchKind::Playlist => "playlist",
            SearchKind::Show => "show",
            SearchKind::Episode => "episode",
        }
    }

    /// Key of the result page in the search response, e.g. `tracks`.
    pub fn result_field(&self) -> String {
        format!("{}s", self.as_str())
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<Option<SearchItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    // Absent or null on some malformed items; those are skipped like empty ones.
    #[serde(default)]
    pub uri: Option<PlayableReference>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlaybackRequest {
    pub device_ids: Vec<String>,
    pub play: bool,
}

/// Body of `PUT /me/player/play` for a specific reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StartPlaybackRequest {
    Tracks { uris: Vec<PlayableReference> },
    Context { context_uri: PlayableReference },
}

impl From<&PlayableReference> for StartPlaybackRequest {
    fn from(reference: &PlayableReference) -> Self {
        if reference.is_track() {
            StartPlaybackRequest::Tracks {
                uris: vec![reference.clone()],
            }
        } else {
            StartPlaybackRequest::Context {
                context_uri: reference.clone(),
            }
        }
    }
}
