// src/session/store.rs

use std::sync::Arc;
use tokio::sync::watch;

use crate::models::auth::{Session, SessionUser};
use crate::models::rbac::Role;
use crate::session::storage::{Change, SessionStorage, StorageError};

// Chaves do armazenamento persistente
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";
pub const BUSINESS_ID_KEY: &str = "business_id";

/// A sessão do usuário atual.
///
/// Escritores: somente o login (`save`) e o logout / resposta 401 (`clear`).
/// Todo o resto apenas lê, e cada leitura vai ao armazenamento: a cópia em
/// memória do canal `watch` serve para notificar a interface, não como cache.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    changes: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (tx, _rx) = watch::channel(None);
        let store = Self {
            storage,
            changes: Arc::new(tx),
        };
        // Sessão persistida de uma execução anterior
        store.changes.send_replace(store.session());
        store
    }

    /// Grava token, usuário e negócio num passo só. Se a gravação falhar, a sessão
    /// anterior também é descartada: nunca sobra uma sessão pela metade.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user_data = serde_json::to_string(&session.user)?;
        let business_id = session.user.business_id.map(|id| id.to_string());

        let written = self.storage.apply(&[
            (AUTH_TOKEN_KEY, Some(session.token.as_str())),
            (USER_DATA_KEY, Some(user_data.as_str())),
            (BUSINESS_ID_KEY, business_id.as_deref()),
        ]);
        if let Err(e) = written {
            tracing::error!("🔥 Falha ao gravar a sessão: {}", e);
            self.clear();
            return Err(e);
        }

        tracing::debug!(user_id = session.user.id, "Sessão gravada");
        self.changes.send_replace(Some(session.clone()));
        Ok(())
    }

    /// Melhor esforço: falhas são registradas e ignoradas, o logout sempre "funciona".
    pub fn clear(&self) {
        let removals: [Change<'_>; 3] = [
            (AUTH_TOKEN_KEY, None),
            (USER_DATA_KEY, None),
            (BUSINESS_ID_KEY, None),
        ];
        if let Err(e) = self.storage.apply(&removals) {
            tracing::warn!("⚠️ Falha ao remover a sessão do armazenamento: {}", e);
        }
        self.changes.send_replace(None);
    }

    pub fn token(&self) -> Option<String> {
        self.read(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        parse_user(&self.read(USER_DATA_KEY)?)
    }

    pub fn business_id(&self) -> Option<i64> {
        self.current_user()
            .and_then(|u| u.business_id)
            .or_else(|| self.read(BUSINESS_ID_KEY).and_then(|raw| raw.parse().ok()))
            .filter(|id| *id != 0)
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().and_then(|u| u.role())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Token e usuário lidos do mesmo estado do armazenamento.
    pub fn session(&self) -> Option<Session> {
        let values = match self.storage.get_many(&[AUTH_TOKEN_KEY, USER_DATA_KEY]) {
            Ok(values) => values,
            Err(e) => {
                tracing::error!("🔥 Falha ao ler a sessão: {}", e);
                return None;
            }
        };
        let [token, user_data]: [Option<String>; 2] = values.try_into().ok()?;

        let token = token.filter(|t| !t.is_empty())?;
        let user = parse_user(&user_data?)?;
        Some(Session { token, user })
    }

    /// Notificado a cada login/logout deste processo.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("🔥 Falha ao ler '{}' da sessão: {}", key, e);
                None
            }
        }
    }
}

fn parse_user(raw: &str) -> Option<SessionUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::error!("🔥 Erro ao ler os dados do usuário da sessão: {}", e);
            None
        }
    }
}
