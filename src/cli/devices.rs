use tabled::Table;

use crate::{error::Res, info, types::DeviceTableRow};

use super::{connect, load_config};

/// Lists every device Spotify currently knows for the user.
pub async fn devices() -> Res<()> {
    let config = load_config().await?;
    let client = connect(&config).await?;

    let devices = client.list_devices().await?;
    if devices.is_empty() {
        info!("No devices available. Open Spotify on a device first.");
        return Ok(());
    }

    let rows: Vec<DeviceTableRow> = devices.into_iter().map(DeviceTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
