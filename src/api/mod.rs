//! # API Module
//!
//! HTTP handlers served by the local authorization listener (see
//! [`crate::server`]).
//!
//! - [`callback`] - receives the browser redirect that carries the user's
//!   authorization code (or the reason consent was refused) and hands it to
//!   the waiting authorization flow.
//! - [`fallback`] - answers any other request with a fixed failure page.
//!
//! Both are plain [Axum](https://docs.rs/axum) handlers and can be routed
//! directly:
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotify_cli::api::{callback, fallback};
//!
//! let app = Router::new().route("/", get(callback)).fallback(fallback);
//! ```

mod callback;

pub use callback::{CodeSender, ConsentOutcome, FAILURE_PAGE, SUCCESS_PAGE, callback, fallback};
