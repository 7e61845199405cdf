// src/config.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::{env, time::Duration};
use url::Url;

use crate::http::ApiClient;
use crate::navigation::{MemoryNavigator, Navigator};
use crate::services::{
    AuthService, BusinessService, ProductService, UserService, WarehouseProductService,
    WarehouseService,
};
use crate::session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};

// Fallback de desenvolvimento local
pub const DEFAULT_API_URL: &str = "http://localhost:8080/gestock";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub session_file: Option<PathBuf>,
    // Ignora HTTP(S)_PROXY do ambiente
    pub no_proxy: bool,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
            no_proxy: false,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var("GESTOCK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("GESTOCK_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = env::var("GESTOCK_SESSION_FILE").ok().map(PathBuf::from);

        Ok(Self {
            base_url: validate_base_url(&base_url)?,
            timeout: Duration::from_secs(timeout_secs),
            session_file,
            no_proxy: false,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }
}

// Zero faria toda requisição falhar como erro de rede
fn parse_timeout_secs(raw: &str) -> anyhow::Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("GESTOCK_API_TIMEOUT_SECS inválido: '{}'", raw))?;
    if secs == 0 {
        anyhow::bail!("GESTOCK_API_TIMEOUT_SECS deve ser maior que zero");
    }
    Ok(secs)
}

fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("URL da API deve ser http ou https: '{}'", raw);
    }
    Ok(raw.trim_end_matches('/').to_string())
}

// ---
// O estado compartilhado: monta o gráfico de dependências uma vez só
// ---
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub session: SessionStore,
    pub navigator: Arc<dyn Navigator>,
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub business_service: BusinessService,
    pub warehouse_service: WarehouseService,
    pub product_service: ProductService,
    pub user_service: UserService,
    pub warehouse_product_service: WarehouseProductService,
}

impl AppState {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        Self::with_navigator(config, Arc::new(MemoryNavigator::default()))
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn with_navigator(config: ApiConfig, navigator: Arc<dyn Navigator>) -> anyhow::Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => {
                tracing::debug!("Sessão persistida em {}", path.display());
                Arc::new(FileStorage::new(path))
            }
            None => Arc::new(MemoryStorage::new()),
        };
        let session = SessionStore::new(storage);

        let api = ApiClient::new(&config, session.clone(), navigator.clone())?;
        tracing::info!("✅ Cliente da API configurado para {}", api.base_url());

        Ok(Self {
            auth_service: AuthService::new(api.clone()),
            business_service: BusinessService::new(api.clone()),
            warehouse_service: WarehouseService::new(api.clone()),
            product_service: ProductService::new(api.clone()),
            user_service: UserService::new(api.clone()),
            warehouse_product_service: WarehouseProductService::new(api.clone()),
            config,
            session,
            navigator,
            api,
        })
    }
}
