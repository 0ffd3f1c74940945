use std::time::Duration;

use tokio::time::sleep;

use crate::{
    config::PlayerKind,
    error::Res,
    info,
    player::{DesktopPlayer, Player},
    success,
    types::SearchKind,
};

use super::{connect, load_config};

/// Delay before reading back the state, giving Spotify time to switch tracks.
const STATE_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// What `play` should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayTarget {
    /// Resume on the active (or first) device.
    Resume,
    /// Transfer playback to the device matching this partial identifier.
    Device(String),
    /// Search for `query` and play the best match.
    Search { query: String, kind: SearchKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Pause,
    Next,
    Previous,
}

pub async fn play(target: PlayTarget) -> Res<()> {
    let config = load_config().await?;

    match target {
        PlayTarget::Resume => match config.player {
            PlayerKind::Web => {
                let client = connect(&config).await?;
                client.play().await?;
                report_state(&client).await
            }
            PlayerKind::Desktop => {
                let player = DesktopPlayer::new();
                player.play().await?;
                report_state(&player).await
            }
        },
        PlayTarget::Device(needle) => {
            let client = connect(&config).await?;
            let device = client.transfer_to(&needle).await?;
            success!("Playing on {} ({}).", device.name, device.kind);
            Ok(())
        }
        PlayTarget::Search { query, kind } => {
            // Searching always needs the Web API, whichever backend plays.
            let client = connect(&config).await?;
            let reference = client.search(&query, kind).await?;
            match config.player {
                PlayerKind::Web => {
                    client.play_reference(&reference).await?;
                    report_state(&client).await
                }
                PlayerKind::Desktop => {
                    let player = DesktopPlayer::new();
                    player.play_reference(&reference).await?;
                    report_state(&player).await
                }
            }
        }
    }
}

pub async fn transport(action: Transport) -> Res<()> {
    let config = load_config().await?;
    match config.player {
        PlayerKind::Web => {
            let client = connect(&config).await?;
            run_transport(&client, action).await
        }
        PlayerKind::Desktop => run_transport(&DesktopPlayer::new(), action).await,
    }
}

async fn run_transport<P: Player>(player: &P, action: Transport) -> Res<()> {
    match action {
        Transport::Pause => return player.pause().await,
        Transport::Next => player.next().await?,
        Transport::Previous => player.previous().await?,
    }
    report_state(player).await
}

pub async fn volume(percent: i32) -> Res<()> {
    let config = load_config().await?;
    let client = connect(&config).await?;
    client.volume(percent).await?;
    success!("Volume set to {}%.", percent);
    Ok(())
}

pub async fn shuffle(active: bool) -> Res<()> {
    let config = load_config().await?;
    let client = connect(&config).await?;
    client.toggle_shuffle(active).await?;
    success!("Shuffle toggled {}.", if active { "on" } else { "off" });
    Ok(())
}

/// Prints what is playing right now.
pub async fn now_playing() -> Res<()> {
    let config = load_config().await?;
    match config.player {
        PlayerKind::Web => show_state(&connect(&config).await?).await,
        PlayerKind::Desktop => show_state(&DesktopPlayer::new()).await,
    }
}

async fn report_state<P: Player>(player: &P) -> Res<()> {
    sleep(STATE_SETTLE_DELAY).await;
    show_state(player).await
}

async fn show_state<P: Player>(player: &P) -> Res<()> {
    let state = player.state().await?;
    info!("{}", state);
    Ok(())
}
