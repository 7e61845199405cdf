// src/http/client.rs

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::common::error::{messages, ApiError, ErrorBody};
use crate::config::ApiConfig;
use crate::navigation::{Navigator, Route};
use crate::session::SessionStore;

/// Configuração extra por requisição (query string, cabeçalhos, timeout próprio).
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// O pipeline de requisições autenticadas.
///
/// Toda chamada segue a mesma sequência: compõe a URL, anexa o token da sessão
/// (se houver), despacha e normaliza a resposta. O chamador recebe os dados já
/// sem o envelope `{ data }` ou um [`ApiError`]; nunca um erro cru do transporte.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers);
        if config.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            inner: Arc::new(Inner {
                http: builder.build()?,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                session,
                navigator,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // --- Verbos HTTP ---

    pub async fn get<T: DeserializeOwned>(&self, path: &str, config: &RequestConfig) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, config).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, config: &RequestConfig) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(to_body(body)?), config).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, config: &RequestConfig) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(to_body(body)?), config).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B, config: &RequestConfig) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(to_body(body)?), config).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, config: &RequestConfig) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None, config).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        // 1. Compor
        let url = join_path(&self.inner.base_url, path);
        let mut builder = self.inner.http.request(method.clone(), &url);

        // 2. Autenticar (relido a cada requisição; ausência de token não é erro)
        let token = self.inner.session.token();
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }

        if !config.query.is_empty() {
            builder = builder.query(&config.query);
        }
        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, %url, authenticated = token.is_some(), "📤 Requisição à API");

        // 3. Despachar
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(&method, &url, &e)),
        };

        let status = response.status();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => return Err(self.transport_failure(&method, &url, &e)),
        };

        tracing::debug!(%method, %url, status = status.as_u16(), "📥 Resposta da API");

        // 4. Sucesso: tira um nível de envelope e entrega o tipo pedido
        if status.is_success() {
            let payload = unwrap_envelope(parse_success_body(&raw));
            return serde_json::from_value(payload).map_err(|e| {
                tracing::error!(%method, %url, "🔥 Resposta fora do formato esperado: {}", e);
                ApiError::unknown(status.as_u16(), messages::INVALID_RESPONSE)
            });
        }

        // 5. Falha: normaliza
        let error = ApiError::from_response(status.as_u16(), &ErrorBody::parse(&raw));
        if error.is_unauthorized() {
            self.handle_unauthorized();
        }

        if status.is_server_error() {
            tracing::error!(%method, %url, status = error.status, "❌ Erro da API: {}", error.message);
        } else {
            tracing::warn!(%method, %url, status = error.status, "❌ Erro da API: {}", error.message);
        }

        Err(error)
    }

    // Sessão expirada: limpa a sessão e manda para o login, a menos que já estejamos lá.
    fn handle_unauthorized(&self) {
        self.inner.session.clear();

        let current = self.inner.navigator.current_route();
        if current.is_login() {
            tracing::debug!("Já na tela de login; redirecionamento suprimido");
            return;
        }
        tracing::info!("🔒 Sessão expirada em {}; redirecionando para o login", current.path());
        self.inner.navigator.navigate(Route::Login);
    }

    fn transport_failure(&self, method: &Method, url: &str, e: &reqwest::Error) -> ApiError {
        tracing::error!(%method, %url, "🔥 Falha de conexão com a API: {}", e);
        ApiError::from_transport(e)
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| {
        tracing::error!("🔥 Falha ao serializar o corpo da requisição: {}", e);
        ApiError::validation(messages::INVALID_REQUEST_BODY)
    })
}

/// Junta base e caminho sem barras duplicadas. Caminho vazio devolve a base intacta.
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

// Corpo vazio vira null; texto que não é JSON vira string JSON.
fn parse_success_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Se o corpo for um objeto com a chave `data`, devolve o conteúdo de `data` (um nível só).
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}
