use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{Extension, Router, routing::get};
use tokio::sync::{Mutex, oneshot};

use crate::{
    api,
    error::{Error, Res},
    warning,
};

/// One-shot local listener for the consent redirect.
///
/// [`CallbackListener::start`] binds the port and serves in a background task;
/// the server lives until the process exits. [`CallbackListener::await_code`]
/// consumes the listener, so each instance yields at most one code.
pub struct CallbackListener {
    addr: SocketAddr,
    code_rx: oneshot::Receiver<api::ConsentOutcome>,
}

impl CallbackListener {
    /// Binds `127.0.0.1:<port>` and starts serving without blocking the caller.
    pub async fn start(port: &str) -> Res<Self> {
        let port: u16 = port.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid redirect port '{port}'"),
            )
        })?;

        let listener =
            tokio::net::TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await?;
        let addr = listener.local_addr()?;

        let (code_tx, code_rx) = oneshot::channel();
        let sender: api::CodeSender = Arc::new(Mutex::new(Some(code_tx)));

        let app = Router::new()
            .route("/", get(api::callback))
            .fallback(api::fallback)
            .layer(Extension(sender));

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warning!("Authorization listener stopped: {}", e);
            }
        });

        Ok(Self { addr, code_rx })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the authorization code.
    ///
    /// Without a timeout this blocks until the browser redirect arrives, however
    /// long that takes. A redirect carrying `error` instead of `code` ends the
    /// wait with [`Error::ConsentDenied`].
    pub async fn await_code(self, timeout: Option<Duration>) -> Res<String> {
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.code_rx)
                .await
                .map_err(|_| Error::ConsentTimeout(limit))?,
            None => self.code_rx.await,
        };
        received
            .map_err(|_| Error::CallbackClosed)?
            .map_err(Error::ConsentDenied)
    }
}
