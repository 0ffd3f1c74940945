#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;
use spotify_cli::config::{AppConfig, Endpoints};

/// A request seen by [`MockSpotify`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    /// Raw (still percent-encoded) value of a form or query field.
    pub fn form_field(&self, key: &str) -> Option<String> {
        field(&self.body, key)
    }

    pub fn query_field(&self, key: &str) -> Option<String> {
        field(&self.query, key)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

fn field(encoded: &str, key: &str) -> Option<String> {
    encoded.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}

#[derive(Default)]
struct Inner {
    requests: Vec<Recorded>,
    routes: HashMap<String, (StatusCode, String)>,
}

/// Records every request and answers from a script keyed by `"METHOD /path"`.
///
/// `POST /api/token` answers a token per grant unless scripted: the access
/// token is `<grant_type>-access` and user grants also get
/// `<grant_type>-refresh`.
#[derive(Clone, Default)]
pub struct MockSpotify {
    inner: Arc<Mutex<Inner>>,
}

impl MockSpotify {
    pub async fn start() -> (Self, SocketAddr) {
        let mock = MockSpotify::default();
        let app = Router::new().fallback(handle).with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (mock, addr)
    }

    pub fn respond(&self, route: &str, status: u16, body: impl Into<String>) -> &Self {
        self.inner.lock().unwrap().routes.insert(
            route.to_string(),
            (StatusCode::from_u16(status).unwrap(), body.into()),
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn token_requests(&self) -> Vec<Recorded> {
        self.requests_to(Method::POST, "/api/token")
    }
}

async fn handle(
    State(mock): State<MockSpotify>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };

    let mut inner = mock.inner.lock().unwrap();
    let key = format!("{} {}", method, recorded.path);
    let scripted = inner.routes.get(&key).cloned();
    let grant = recorded.form_field("grant_type");
    inner.requests.push(recorded);
    drop(inner);

    if let Some((status, body)) = scripted {
        return (status, body).into_response();
    }

    match (key.as_str(), grant) {
        ("POST /api/token", Some(grant)) => {
            let mut payload = json!({
                "access_token": format!("{grant}-access"),
                "token_type": "Bearer",
                "expires_in": 3600,
            });
            if grant != "client_credentials" {
                payload["refresh_token"] = json!(format!("{grant}-refresh"));
            }
            (StatusCode::OK, payload.to_string()).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "unscripted route").into_response(),
    }
}

pub fn endpoints(addr: SocketAddr) -> Endpoints {
    Endpoints::single(format!("http://{addr}"))
}

pub fn app_config(redirect_port: u16) -> AppConfig {
    AppConfig {
        app_client_id: "client-id".to_string(),
        app_client_secret: "client-secret".to_string(),
        redirect_port: redirect_port.to_string(),
        ..AppConfig::default()
    }
}

/// A path under the system temp dir that no other test uses.
pub fn temp_path(name: &str) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!(
            "spotify-cli-test-{}-{}-{}",
            std::process::id(),
            seq,
            nanos
        ))
        .join(name)
}

/// A local port that was free a moment ago.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}
