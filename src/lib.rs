//! spotify-cli library
//!
//! Controls Spotify playback from the command line. The library holds
//! everything but argument parsing: the OAuth token lifecycle, the local
//! listener that captures the user's authorization code, the authenticated Web
//! API client and the playback backends.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local authorization listener
//! - `cli` - Command implementations
//! - `config` - `config.json`, environment overrides and data paths
//! - `error` - Crate-wide error type
//! - `management` - On-disk token cache
//! - `player` - Playback backends behind one trait
//! - `server` - One-shot authorization code listener
//! - `spotify` - Authorization engine and Web API client
//! - `types` - Data structures and wire types
//! - `utils` - Argument parsing helpers
//!
//! # Example
//!
//! ```
//! use spotify_cli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotify_cli::Res<()> {
//!     config::load_env().await?;
//!     cli::now_playing().await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod player;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Res};

/// Prints an informational line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Please navigate to this URL to authorize Spotify:");
/// info!("{}", state);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a confirmation line prefixed with a green `✓`.
///
/// # Example
///
/// ```
/// success!("Volume set to {}%.", percent);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Only `main` uses this; library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("{}", err);
/// // never reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr for problems that do not stop the
/// command.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser. Open the URL above manually.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
