mod common;

use std::time::Duration;

use common::{MockSpotify, app_config, endpoints, free_port, now, temp_path};
use spotify_cli::{
    Error,
    management::CredentialStore,
    spotify::auth::{AuthPath, Authorizer, Grant, TOKEN_LIFETIME_SECS, basic_credentials},
    types::Credentials,
};

fn valid_credentials() -> Credentials {
    let later = now() + 1800;
    Credentials {
        app_access_token: "app".to_string(),
        app_token_expiration: later,
        user_access_token: "user".to_string(),
        user_refresh_token: "refresh".to_string(),
        user_token_expiration: later,
    }
}

fn assert_fresh_expiration(expiration: i64) {
    let expected = now() + TOKEN_LIFETIME_SECS;
    assert!(
        (expected - expiration).abs() <= 5,
        "expiration {expiration} is not about now + {TOKEN_LIFETIME_SECS}"
    );
}

async fn authorizer_with(
    credentials: Option<&Credentials>,
    redirect_port: u16,
) -> (MockSpotify, Authorizer, CredentialStore) {
    let (mock, addr) = MockSpotify::start().await;
    let path = temp_path("tokens.json");
    let store = CredentialStore::new(&path);
    if let Some(credentials) = credentials {
        store.save(credentials).await.unwrap();
    }

    let authorizer = Authorizer::new(
        app_config(redirect_port),
        endpoints(addr),
        CredentialStore::new(&path),
    )
    .with_browser(false);
    (mock, authorizer, store)
}

#[test]
fn test_basic_credentials() {
    // base64("client-id:client-secret")
    assert_eq!(
        basic_credentials("client-id", "client-secret"),
        "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ="
    );
}

#[test]
fn test_grant_forms() {
    let redirect = "http://localhost:8888";

    let form = Grant::ClientCredentials.form(redirect);
    assert_eq!(
        form,
        vec![("grant_type", "client_credentials".to_string())]
    );

    let form = Grant::AuthorizationCode("abc".to_string()).form(redirect);
    assert!(form.contains(&("grant_type", "authorization_code".to_string())));
    assert!(form.contains(&("code", "abc".to_string())));
    assert!(form.contains(&("redirect_uri", redirect.to_string())));

    let form = Grant::RefreshToken("r".to_string()).form(redirect);
    assert!(form.contains(&("grant_type", "refresh_token".to_string())));
    assert!(form.contains(&("refresh_token", "r".to_string())));
    assert!(form.contains(&("redirect_uri", redirect.to_string())));
}

#[tokio::test]
async fn test_valid_tokens_are_reused_without_network() {
    let credentials = valid_credentials();
    let (mock, authorizer, store) = authorizer_with(Some(&credentials), free_port()).await;

    let first = authorizer.authorize().await.unwrap();
    let second = authorizer.authorize().await.unwrap();

    assert_eq!(first, credentials);
    assert_eq!(second, credentials);
    assert!(mock.requests().is_empty());
    assert_eq!(store.load().await, credentials);
}

#[tokio::test]
async fn test_expired_app_token_uses_client_credentials() {
    let mut credentials = valid_credentials();
    credentials.app_token_expiration = now() - 10;
    let (mock, authorizer, store) = authorizer_with(Some(&credentials), free_port()).await;

    let mut working = store.load().await;
    let path = authorizer.advance(&mut working).await.unwrap();
    assert_eq!(path, AuthPath::Reused);

    let requests = mock.token_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.form_field("grant_type").as_deref(),
        Some("client_credentials")
    );
    assert_eq!(request.form_field("code"), None);
    assert_eq!(request.form_field("refresh_token"), None);
    assert_eq!(
        request.authorization.as_deref(),
        Some("Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=")
    );

    assert_eq!(working.app_access_token, "client_credentials-access");
    assert_fresh_expiration(working.app_token_expiration);
    // The app grant never touches the user tokens.
    assert_eq!(working.user_access_token, "user");
    assert_eq!(working.user_refresh_token, "refresh");
}

#[tokio::test]
async fn test_expired_user_token_is_refreshed() {
    let mut credentials = valid_credentials();
    credentials.user_token_expiration = now() - 10;
    let port = free_port();
    let (mock, authorizer, store) = authorizer_with(Some(&credentials), port).await;

    let refreshed = authorizer.authorize().await.unwrap();

    let requests = mock.token_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.form_field("grant_type").as_deref(),
        Some("refresh_token")
    );
    assert_eq!(request.form_field("refresh_token").as_deref(), Some("refresh"));
    assert_eq!(
        request.form_field("redirect_uri"),
        Some(format!("http%3A%2F%2Flocalhost%3A{port}"))
    );

    assert_eq!(refreshed.user_access_token, "refresh_token-access");
    assert_eq!(refreshed.user_refresh_token, "refresh_token-refresh");
    assert_fresh_expiration(refreshed.user_token_expiration);
    assert_eq!(refreshed.app_access_token, "app");
    assert_eq!(store.load().await, refreshed);
}

#[tokio::test]
async fn test_empty_user_token_with_refresh_token_is_refreshed() {
    let mut credentials = valid_credentials();
    credentials.user_access_token.clear();
    let (mock, authorizer, _store) = authorizer_with(Some(&credentials), free_port()).await;

    let mut working = credentials.clone();
    let path = authorizer.advance(&mut working).await.unwrap();

    assert_eq!(path, AuthPath::Refreshed);
    assert_eq!(mock.token_requests().len(), 1);
    assert_eq!(working.user_access_token, "refresh_token-access");
}

#[tokio::test]
async fn test_refresh_keeps_old_refresh_token_when_none_returned() {
    let mut credentials = valid_credentials();
    credentials.user_token_expiration = now() - 10;
    let (mock, authorizer, _store) = authorizer_with(Some(&credentials), free_port()).await;
    mock.respond(
        "POST /api/token",
        200,
        r#"{"access_token":"new-access","expires_in":60}"#,
    );

    let refreshed = authorizer.authorize().await.unwrap();

    assert_eq!(refreshed.user_access_token, "new-access");
    assert_eq!(refreshed.user_refresh_token, "refresh");
    // expires_in is not trusted; the fixed lifetime applies.
    assert_fresh_expiration(refreshed.user_token_expiration);
}

#[tokio::test]
async fn test_token_endpoint_failure_is_fatal_and_surfaces_body() {
    let mut credentials = valid_credentials();
    credentials.user_token_expiration = now() - 10;
    let (mock, authorizer, store) = authorizer_with(Some(&credentials), free_port()).await;
    mock.respond(
        "POST /api/token",
        400,
        r#"{"error":"invalid_grant","error_description":"Refresh token revoked"}"#,
    );

    let err = authorizer.authorize().await.unwrap_err();

    match &err {
        Error::AuthExchange { grant, body, .. } => {
            assert_eq!(*grant, "refresh_token");
            assert!(body.contains("Refresh token revoked"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("invalid_grant"));
    // Nothing was acquired, so the stored record is unchanged.
    assert_eq!(store.load().await, credentials);
}

#[tokio::test]
async fn test_new_app_token_is_saved_even_when_consent_fails() {
    let (mock, authorizer, store) = authorizer_with(None, free_port()).await;
    let authorizer = authorizer.with_consent_timeout(Some(Duration::from_millis(200)));

    let err = authorizer.authorize().await.unwrap_err();

    assert!(matches!(err, Error::ConsentTimeout(_)));
    assert_eq!(mock.token_requests().len(), 1);

    let saved = store.load().await;
    assert_eq!(saved.app_access_token, "client_credentials-access");
    assert_fresh_expiration(saved.app_token_expiration);
    assert!(saved.user_access_token.is_empty());
    assert!(saved.user_refresh_token.is_empty());
}

#[tokio::test]
async fn test_consent_url() {
    let port = free_port();
    let (_mock, authorizer, _store) = authorizer_with(None, port).await;

    let url = authorizer.consent_url().unwrap();
    assert_eq!(url.path(), "/authorize");

    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    assert_eq!(get("client_id").as_deref(), Some("client-id"));
    assert_eq!(get("response_type").as_deref(), Some("code"));
    assert_eq!(get("redirect_uri"), Some(format!("http://localhost:{port}")));
    let scope = get("scope").unwrap();
    assert!(scope.contains("user-read-playback-state"));
    assert!(scope.contains("user-modify-playback-state"));
}

#[tokio::test]
async fn test_fresh_process_runs_consent_flow() {
    let port = free_port();
    let (mock, authorizer, store) = authorizer_with(None, port).await;

    let flow = tokio::spawn(async move { authorizer.authorize().await });

    // The listener comes up once the app token has been minted.
    let http = reqwest::Client::new();
    let callback = format!("http://127.0.0.1:{port}/?code=abc123");
    let mut page = None;
    for _ in 0..100 {
        if let Ok(res) = http.get(&callback).send().await {
            page = Some(res.text().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let page = page.expect("callback listener never came up");
    assert!(page.contains("successful"));

    let credentials = flow.await.unwrap().unwrap();

    let code_exchanges: Vec<_> = mock
        .token_requests()
        .into_iter()
        .filter(|r| r.form_field("grant_type").as_deref() == Some("authorization_code"))
        .collect();
    assert_eq!(code_exchanges.len(), 1);
    assert_eq!(code_exchanges[0].form_field("code").as_deref(), Some("abc123"));
    assert_eq!(
        code_exchanges[0].form_field("redirect_uri"),
        Some(format!("http%3A%2F%2Flocalhost%3A{port}"))
    );

    assert_eq!(credentials.app_access_token, "client_credentials-access");
    assert_eq!(credentials.user_access_token, "authorization_code-access");
    assert_eq!(credentials.user_refresh_token, "authorization_code-refresh");
    assert_fresh_expiration(credentials.user_token_expiration);
    assert_eq!(store.load().await, credentials);
}

#[tokio::test]
async fn test_refused_consent_aborts_authorization() {
    let port = free_port();
    let (mock, authorizer, store) = authorizer_with(None, port).await;
    // No consent timeout: only the refusal can end the wait.
    let authorizer = authorizer.with_consent_timeout(None);

    let flow = tokio::spawn(async move { authorizer.authorize().await });

    let http = reqwest::Client::new();
    let callback = format!("http://127.0.0.1:{port}/?error=access_denied");
    let mut page = None;
    for _ in 0..100 {
        if let Ok(res) = http.get(&callback).send().await {
            page = Some(res.text().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(page.expect("callback listener never came up").contains("failed"));

    let result = tokio::time::timeout(Duration::from_secs(5), flow)
        .await
        .expect("authorization still waiting after the refusal")
        .unwrap();

    match result {
        Err(Error::ConsentDenied(reason)) => assert_eq!(reason, "access_denied"),
        other => panic!("unexpected result: {other:?}"),
    }
    // Only the app token was requested; no code was exchanged.
    assert_eq!(mock.token_requests().len(), 1);
    let saved = store.load().await;
    assert_eq!(saved.app_access_token, "client_credentials-access");
    assert!(saved.user_access_token.is_empty());
}
