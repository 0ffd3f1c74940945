use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

/// What the consent redirect carried: the code, or the provider's `error`.
pub type ConsentOutcome = Result<String, String>;

/// Sending half of the code handoff. `None` once an outcome has been delivered.
pub type CodeSender = Arc<Mutex<Option<oneshot::Sender<ConsentOutcome>>>>;

pub const SUCCESS_PAGE: &str =
    "<h2>Authorization successful.</h2><p>You can close this browser window.</p>";
pub const FAILURE_PAGE: &str = "<h4>User authorization failed.</h4>";

/// Handles the consent redirect `GET /?code=<code>`.
///
/// The first non-empty code, or an `error` such as `access_denied` when the
/// user declined, is pushed into the one-shot channel. The send does not wait
/// for the receiver, so the page is returned immediately. Anything that
/// arrives after that is dropped, and requests carrying neither parameter are
/// answered without touching the channel.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(sender): Extension<CodeSender>,
) -> Html<&'static str> {
    let (outcome, page) = match (params.get("code"), params.get("error")) {
        (Some(code), _) if !code.is_empty() => (Ok(code.clone()), SUCCESS_PAGE),
        (_, Some(error)) => {
            let reason = if error.is_empty() { "unknown error" } else { error.as_str() };
            (Err(reason.to_string()), FAILURE_PAGE)
        }
        _ => return Html(FAILURE_PAGE),
    };

    if let Some(tx) = sender.lock().await.take() {
        // The receiver is gone only if the waiting side already gave up.
        let _ = tx.send(outcome);
    }
    Html(page)
}

/// Answers every request that is not a consent redirect.
pub async fn fallback() -> Html<&'static str> {
    Html(FAILURE_PAGE)
}
