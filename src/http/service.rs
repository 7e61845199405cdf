// src/http/service.rs

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::common::error::ApiError;
use crate::http::client::{join_path, ApiClient, RequestConfig};
use crate::session::SessionStore;

/// Base dos serviços de recurso: um caminho fixo (`/products`, `/warehouses`, ...)
/// sobre o pipeline compartilhado. Os serviços só dizem o sufixo e o corpo.
#[derive(Clone)]
pub struct ApiService {
    base_endpoint: String,
    api: ApiClient,
}

impl ApiService {
    pub fn new(api: ApiClient, base_endpoint: &str) -> Self {
        Self {
            base_endpoint: base_endpoint.to_string(),
            api,
        }
    }

    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        join_path(&self.base_endpoint, endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.api.get(&self.build_url(endpoint), &RequestConfig::default()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        self.api.get(&self.build_url(endpoint), config).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.post(&self.build_url(endpoint), body, &RequestConfig::default()).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.put(&self.build_url(endpoint), body, &RequestConfig::default()).await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.patch(&self.build_url(endpoint), body, &RequestConfig::default()).await
    }

    /// DELETE descartando o corpo (normalmente 204).
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        self.api
            .delete::<Value>(&self.build_url(endpoint), &RequestConfig::default())
            .await
            .map(|_| ())
    }

    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        self.api.request(method, &self.build_url(endpoint), body, config).await
    }
}

/// Identificador 0 conta como ausente: nunca vai para a rede.
pub(crate) fn require_id(id: i64, message: &str) -> Result<i64, ApiError> {
    if id == 0 {
        return Err(ApiError::validation(message));
    }
    Ok(id)
}
