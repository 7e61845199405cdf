// Backend falso para os testes de integração:
// - axum em 127.0.0.1:0, respostas roteiradas por (método, caminho)
// - registra cada requisição recebida (método, caminho, Authorization, corpo)
// - desligamento gracioso para não deixar servidores vivos entre testes
#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::Response,
    Router,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use gestock_client::{
    config::{ApiConfig, AppState},
    models::auth::{Session, SessionUser},
    navigation::MemoryNavigator,
};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct MockBackend {
    routes: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockBackend {
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

async fn handle(
    State(backend): State<Arc<MockBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let scripted = backend
        .routes
        .lock()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    let (status, body) = scripted.unwrap_or((404, String::new()));
    let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };

    Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: Arc<MockBackend>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Arc::new(MockBackend::default());
        let router = Router::new().fallback(handle).with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            backend,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/gestock", self.addr)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(base_url)
        .unwrap()
        .with_timeout(Duration::from_secs(2))
        .without_proxy()
}

/// AppState com sessão em memória e o navegador parado em `path`.
pub fn app_at(base_url: &str, path: &str) -> (AppState, Arc<MemoryNavigator>) {
    let navigator = Arc::new(MemoryNavigator::new(path));
    let app = AppState::with_navigator(test_config(base_url), navigator.clone()).unwrap();
    (app, navigator)
}

pub fn owner_session(business_id: i64) -> Session {
    Session {
        token: "eyJhbGciOiJIUzI1NiJ9.owner.sig".to_string(),
        user: SessionUser {
            id: 11,
            email: Some("dona@bodega.co".to_string()),
            business_id: Some(business_id),
            role: Some("BUSINESS_OWNER".to_string()),
        },
    }
}
