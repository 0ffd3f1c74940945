use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify_cli::{
    cli::{self, ConfigUpdate, PlayTarget, Transport},
    config::{self, PlayerKind},
    error,
    types::SearchKind,
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play/Resume playback. Can also pick something to play or switch device.
    #[clap(visible_alias = "pl")]
    Play(PlayOptions),

    /// Pause playback
    #[clap(visible_alias = "ps")]
    Pause,

    /// Skip to next track
    #[clap(visible_alias = "nx")]
    Next,

    /// Skip to previous track
    #[clap(visible_alias = "pv")]
    Prev,

    /// Adjust the volume
    #[clap(visible_alias = "v")]
    Volume(VolumeOptions),

    /// Toggle shuffle
    #[clap(visible_alias = "s")]
    Shuffle(ShuffleOptions),

    /// Show playable devices
    #[clap(visible_alias = "d")]
    Devices,

    /// Show what's currently playing and the playback state
    #[clap(visible_alias = "i")]
    Info,

    /// Configure spotify-cli settings
    #[clap(visible_alias = "c")]
    Config(ConfigOptions),

    /// Authorize with the Spotify API
    Auth,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    clap::ArgGroup::new("target")
        .args(["device", "track", "album", "artist", "playlist"])
        .multiple(false)
))]
pub struct PlayOptions {
    /// Play on a device. Any partial identifier works, e.g. 'mbp', '064a', 'smartphone'
    #[clap(long, short = 'd')]
    device: Option<String>,

    /// A track to play
    #[clap(long, short = 't')]
    track: Option<String>,

    /// An album to play
    #[clap(long, short = 'm')]
    album: Option<String>,

    /// An artist to play
    #[clap(long, short = 'r')]
    artist: Option<String>,

    /// A playlist to play
    #[clap(long, short = 'l')]
    playlist: Option<String>,
}

impl PlayOptions {
    fn target(self) -> PlayTarget {
        let search = |query: String, kind| PlayTarget::Search { query, kind };
        match self {
            PlayOptions {
                device: Some(device),
                ..
            } => PlayTarget::Device(device),
            PlayOptions {
                track: Some(q), ..
            } => search(q, SearchKind::Track),
            PlayOptions {
                album: Some(q), ..
            } => search(q, SearchKind::Album),
            PlayOptions {
                artist: Some(q), ..
            } => search(q, SearchKind::Artist),
            PlayOptions {
                playlist: Some(q),
                ..
            } => search(q, SearchKind::Playlist),
            _ => PlayTarget::Resume,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct VolumeOptions {
    /// Volume in percent; Spotify accepts 0 to 100
    #[clap(allow_negative_numbers = true)]
    volume_percent: i32,
}

#[derive(Parser, Debug, Clone)]
pub struct ShuffleOptions {
    /// on | off
    #[clap(value_parser = utils::parse_toggle, action = ArgAction::Set)]
    toggle: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigOptions {
    /// Set 'appClientId'
    #[clap(long)]
    set_app_client_id: Option<String>,

    /// Set 'appClientSecret'
    #[clap(long)]
    set_app_client_secret: Option<String>,

    /// Set 'redirectPort'
    #[clap(long)]
    set_redirect_port: Option<String>,

    /// Set the playback backend: web | desktop
    #[clap(long, value_parser = utils::parse_player_kind)]
    set_player: Option<PlayerKind>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play(opt) => cli::play(opt.target()).await,
        Command::Pause => cli::transport(Transport::Pause).await,
        Command::Next => cli::transport(Transport::Next).await,
        Command::Prev => cli::transport(Transport::Previous).await,
        Command::Volume(opt) => cli::volume(opt.volume_percent).await,
        Command::Shuffle(opt) => cli::shuffle(opt.toggle).await,
        Command::Devices => cli::devices().await,
        Command::Info => cli::now_playing().await,
        Command::Config(opt) => {
            cli::configure(ConfigUpdate {
                app_client_id: opt.set_app_client_id,
                app_client_secret: opt.set_app_client_secret,
                redirect_port: opt.set_redirect_port,
                player: opt.set_player,
            })
            .await
        }
        Command::Auth => cli::auth().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
