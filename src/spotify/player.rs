use reqwest::StatusCode;

use crate::{
    error::Res,
    types::{Device, PlaybackState, PlayableReference, StartPlaybackRequest, TransferPlaybackRequest},
};

use super::{SpotifyClient, classify, devices::choose_device};

impl SpotifyClient {
    /// Resumes playback on the active device, or on the first known device
    /// when none is active.
    ///
    /// Spotify answers 403 when it is already playing.
    pub async fn play(&self) -> Res<()> {
        let device_id = self.target_device_id().await?;
        let request = self
            .put("/me/player/play")
            .query(&[("device_id", device_id.as_str())]);
        self.send_empty("Play", request).await
    }

    /// Transfers playback to `device` and starts playing there.
    pub async fn play_on_device(&self, device: &Device) -> Res<()> {
        let body = TransferPlaybackRequest {
            device_ids: vec![device.id.clone()],
            play: true,
        };
        let res = self.put("/me/player/").json(&body).send().await?;
        classify("PlayOnDevice", res).await
    }

    /// Starts playing `reference` on the resolved device.
    ///
    /// Tracks are sent as `{"uris":[..]}`, albums, artists and playlists as
    /// `{"context_uri":..}`.
    pub async fn play_reference(&self, reference: &PlayableReference) -> Res<()> {
        let device_id = self.target_device_id().await?;
        let res = self
            .put("/me/player/play")
            .query(&[("device_id", device_id.as_str())])
            .json(&StartPlaybackRequest::from(reference))
            .send()
            .await?;
        classify("PlayReference", res).await
    }

    /// Spotify answers 403 when nothing is playing.
    pub async fn pause(&self) -> Res<()> {
        self.send_empty("Pause", self.put("/me/player/pause")).await
    }

    pub async fn next_track(&self) -> Res<()> {
        self.send_empty("NextTrack", self.post("/me/player/next"))
            .await
    }

    pub async fn previous_track(&self) -> Res<()> {
        self.send_empty("PreviousTrack", self.post("/me/player/previous"))
            .await
    }

    /// Sets the volume. Values outside 0..=100 are left for Spotify to reject.
    pub async fn volume(&self, percent: i32) -> Res<()> {
        let request = self
            .put("/me/player/volume")
            .query(&[("volume_percent", percent)]);
        self.send_empty("Volume", request).await
    }

    pub async fn toggle_shuffle(&self, active: bool) -> Res<()> {
        let request = self
            .put("/me/player/shuffle")
            .query(&[("state", active)]);
        self.send_empty("Shuffle", request).await
    }

    /// `GET /me/player/currently-playing`. A 204 means nothing is loaded.
    pub async fn current_state(&self) -> Res<PlaybackState> {
        let res = self
            .fetch("CurrentState", self.get("/me/player/currently-playing"))
            .await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(PlaybackState::default());
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Ok(PlaybackState::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn target_device_id(&self) -> Res<String> {
        let devices = self.list_devices().await?;
        Ok(choose_device(&devices)?.id.clone())
    }
}
