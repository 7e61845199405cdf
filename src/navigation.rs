// src/navigation.rs

use parking_lot::RwLock;

/// Rota da tela de login.
pub const LOGIN_PATH: &str = "/auth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Other(String),
}

impl Route {
    /// `/auth`, `/auth/` e qualquer sub-rota de `/auth/` são a tela de login.
    /// Query string e fragmento não fazem parte da identidade da rota.
    pub fn from_path(path: &str) -> Self {
        let clean = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = clean.trim_end_matches('/');

        if trimmed == LOGIN_PATH || trimmed.starts_with("/auth/") {
            Route::Login
        } else {
            Route::Other(path.to_string())
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Other(path) => path,
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login)
    }
}

/// O mecanismo de navegação da interface, acionado pelo pipeline em respostas 401.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> Route;
    fn navigate(&self, route: Route);
}

/// Navegador em memória: guarda a rota atual e o histórico de navegações.
pub struct MemoryNavigator {
    current: RwLock<Route>,
    history: RwLock<Vec<Route>>,
}

impl MemoryNavigator {
    pub fn new(initial_path: &str) -> Self {
        Self {
            current: RwLock::new(Route::from_path(initial_path)),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Navegações feitas desde a criação (a rota inicial não entra).
    pub fn history(&self) -> Vec<Route> {
        self.history.read().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_route(&self) -> Route {
        self.current.read().clone()
    }

    fn navigate(&self, route: Route) {
        tracing::info!("➡️ Navegando para {}", route.path());
        *self.current.write() = route.clone();
        self.history.write().push(route);
    }
}
