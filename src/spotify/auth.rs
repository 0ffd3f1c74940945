use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};

use crate::{
    config::{AppConfig, Endpoints},
    error::{Error, Res},
    info,
    management::CredentialStore,
    server::CallbackListener,
    types::{Credentials, TokenResponse},
    warning,
};

/// Lifetime assigned to every token we receive, in seconds.
///
/// The token endpoint's `expires_in` is deliberately not consulted.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Permissions requested during the consent flow.
pub const SCOPES: [&str; 3] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

/// A token exchange against `/api/token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    ClientCredentials,
    AuthorizationCode(String),
    RefreshToken(String),
}

impl Grant {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::ClientCredentials => "client_credentials",
            Grant::AuthorizationCode(_) => "authorization_code",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }

    /// Form fields sent with this grant.
    pub fn form(&self, redirect_uri: &str) -> Vec<(&'static str, String)> {
        let mut form = vec![("grant_type", self.grant_type().to_string())];
        match self {
            Grant::ClientCredentials => {}
            Grant::AuthorizationCode(code) => {
                form.push(("code", code.clone()));
                form.push(("redirect_uri", redirect_uri.to_string()));
            }
            Grant::RefreshToken(refresh_token) => {
                form.push(("refresh_token", refresh_token.clone()));
                form.push(("redirect_uri", redirect_uri.to_string()));
            }
        }
        form
    }
}

/// Which branch of the authorization state machine produced the user token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    Reused,
    Refreshed,
    Consented,
}

/// `Basic` credentials for the app identity: `base64(clientId:clientSecret)`.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Drives the token lifecycle: reuse, refresh, or full user consent.
///
/// # Example
///
/// ```rust,ignore
/// let authorizer = Authorizer::new(config, Endpoints::from_env(), CredentialStore::new(path));
/// let credentials = authorizer.authorize().await?;
/// let client = SpotifyClient::new(endpoints, credentials.user_access_token);
/// ```
pub struct Authorizer {
    config: AppConfig,
    endpoints: Endpoints,
    store: CredentialStore,
    http: Client,
    open_browser: bool,
    consent_timeout: Option<Duration>,
}

impl Authorizer {
    pub fn new(config: AppConfig, endpoints: Endpoints, store: CredentialStore) -> Self {
        let consent_timeout = config.consent_timeout();
        Self {
            config,
            endpoints,
            store,
            http: Client::new(),
            open_browser: true,
            consent_timeout,
        }
    }

    /// Whether the consent URL is also opened in the default browser.
    pub fn with_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    pub fn with_consent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.consent_timeout = timeout;
        self
    }

    /// Makes sure usable app and user tokens exist and returns them.
    ///
    /// The credentials are written back to the store whether or not the state
    /// machine succeeded, so a freshly minted app token survives a failed
    /// consent flow. When both fail, the authorization error wins.
    pub async fn authorize(&self) -> Res<Credentials> {
        let mut credentials = self.store.load().await;
        let outcome = self.advance(&mut credentials).await;
        let saved = self.store.save(&credentials).await;

        outcome?;
        saved?;
        Ok(credentials)
    }

    /// Runs the state machine once over `credentials`, mutating them in place.
    pub async fn advance(&self, credentials: &mut Credentials) -> Res<AuthPath> {
        let now = Utc::now().timestamp();

        // The app token is kept fresh independently of the user token.
        if credentials.app_token_expired(now) {
            self.exchange(Grant::ClientCredentials, credentials).await?;
        }

        if !credentials.user_token_expired(now) {
            return Ok(AuthPath::Reused);
        }

        if credentials.has_refresh_token() {
            let grant = Grant::RefreshToken(credentials.user_refresh_token.clone());
            self.exchange(grant, credentials).await?;
            return Ok(AuthPath::Refreshed);
        }

        let code = self.request_consent().await?;
        self.exchange(Grant::AuthorizationCode(code), credentials)
            .await?;
        Ok(AuthPath::Consented)
    }

    /// The provider's authorization page for this app.
    pub fn consent_url(&self) -> Res<Url> {
        let url = Url::parse_with_params(
            &self.endpoints.authorize_url(),
            &[
                ("client_id", self.config.app_client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.config.redirect_uri().as_str()),
                ("scope", SCOPES.join(" ").as_str()),
            ],
        )
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        Ok(url)
    }

    async fn request_consent(&self) -> Res<String> {
        let listener = CallbackListener::start(&self.config.redirect_port).await?;
        let url = self.consent_url()?;

        info!(
            "Please navigate to this URL to authorize Spotify:\n\n{}\n",
            url
        );
        if self.open_browser && webbrowser::open(url.as_str()).is_err() {
            warning!("Failed to open browser. Open the URL above manually.");
        }

        listener.await_code(self.consent_timeout).await
    }

    /// Performs one POST to the token endpoint and records the result.
    async fn exchange(&self, grant: Grant, credentials: &mut Credentials) -> Res<()> {
        let res = self
            .http
            .post(self.endpoints.token_url())
            .header(
                AUTHORIZATION,
                basic_credentials(&self.config.app_client_id, &self.config.app_client_secret),
            )
            .form(&grant.form(&self.config.redirect_uri()))
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::AuthExchange {
                grant: grant.grant_type(),
                status,
                body,
            });
        }

        let payload: TokenResponse = res.json().await?;
        let expiration = Utc::now().timestamp() + TOKEN_LIFETIME_SECS;

        match grant {
            Grant::ClientCredentials => {
                if let Some(token) = payload.access_token {
                    credentials.app_access_token = token;
                    credentials.app_token_expiration = expiration;
                }
            }
            Grant::AuthorizationCode(_) | Grant::RefreshToken(_) => {
                if let Some(token) = payload.access_token {
                    credentials.user_access_token = token;
                    credentials.user_token_expiration = expiration;
                }
                if let Some(refresh_token) = payload.refresh_token {
                    credentials.user_refresh_token = refresh_token;
                }
            }
        }
        Ok(())
    }
}
