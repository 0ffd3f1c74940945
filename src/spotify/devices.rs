use crate::{
    error::{Error, Res},
    types::{Device, DevicesResponse},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// `GET /me/player/devices`. Never cached; every call asks the service.
    pub async fn list_devices(&self) -> Res<Vec<Device>> {
        let res = self
            .fetch("Devices", self.get("/me/player/devices"))
            .await?;
        let payload: DevicesResponse = res.json().await?;
        Ok(payload.devices)
    }

    /// Moves playback to the first device matching `needle` (see
    /// [`find_device`]) and returns that device.
    ///
    /// # Errors
    ///
    /// [`Error::DeviceNotFound`] when nothing matches.
    pub async fn transfer_to(&self, needle: &str) -> Res<Device> {
        let devices = self.list_devices().await?;
        let device = find_device(&devices, needle)
            .cloned()
            .ok_or_else(|| Error::DeviceNotFound(needle.to_string()))?;
        self.play_on_device(&device).await?;
        Ok(device)
    }
}

/// Picks the device playback should target.
///
/// The last active device in list order wins; with no active device the first
/// one is used.
///
/// # Errors
///
/// [`Error::NoDevices`] when `devices` is empty.
pub fn choose_device(devices: &[Device]) -> Res<&Device> {
    let first = devices.first().ok_or(Error::NoDevices)?;
    Ok(devices.iter().rev().find(|d| d.is_active).unwrap_or(first))
}

/// Finds the first device whose id, name or type contains `needle`,
/// ignoring case. Accepts partial identifiers such as `mbp` or `smartphone`.
pub fn find_device<'a>(devices: &'a [Device], needle: &str) -> Option<&'a Device> {
    let needle = needle.to_lowercase();
    devices.iter().find(|d| {
        d.id.to_lowercase().contains(&needle)
            || d.name.to_lowercase().contains(&needle)
            || d.kind.to_lowercase().contains(&needle)
    })
}
