// src/services/auth.rs

use serde_json::Value;
use validator::{Validate, ValidateEmail};

use crate::{
    common::error::{messages, ApiError, ErrorKind},
    http::{ApiClient, ApiService},
    models::auth::{LoginPayload, LoginResponse, RegisterPayload, Session, SessionUser},
    models::rbac::Role,
    services::rbac_service,
    session::SessionStore,
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiService,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/auth"),
        }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Registra usuário + negócio. Não abre sessão: o usuário faz login em seguida.
    /// Devolve a confirmação do backend como veio (normalmente um texto).
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Value, ApiError> {
        payload.validate()?;
        self.api.post("/register", payload).await
    }

    pub async fn login(&self, credentials: &LoginPayload) -> Result<Session, ApiError> {
        credentials.validate()?;

        let response: LoginResponse = self.api.post("/login", credentials).await?;

        // Sem token ou sem id não há sessão possível
        let (token, id) = match (response.jwt, response.id) {
            (Some(token), Some(id)) if !token.is_empty() => (token, id),
            _ => {
                tracing::error!("🔥 Resposta de login sem jwt/id");
                return Err(ApiError::new(ErrorKind::Server, 500, messages::INVALID_RESPONSE));
            }
        };

        let session = Session {
            token,
            user: SessionUser {
                id,
                email: response.email,
                business_id: response.business_id,
                role: response.role,
            },
        };

        self.session().save(&session)?;
        tracing::info!(user_id = id, "✅ Login realizado");

        Ok(session)
    }

    /// Sem chamada ao backend (JWT é stateless). Nunca falha.
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("👋 Logout realizado");
    }

    pub fn get_token(&self) -> Option<String> {
        self.session().token()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn business_id(&self) -> Option<i64> {
        self.session().business_id()
    }

    pub fn user_role(&self) -> Option<Role> {
        self.session().role()
    }

    pub fn is_admin(&self) -> bool {
        rbac_service::is_admin(self.user_role())
    }

    /// Formato de e-mail com domínio pontuado (`admin@empresa` não passa).
    pub fn validate_email(email: &str) -> bool {
        if !email.validate_email() {
            return false;
        }
        email
            .rsplit_once('@')
            .and_then(|(_, domain)| domain.split_once('.'))
            .is_some_and(|(name, rest)| !name.is_empty() && !rest.is_empty())
    }

    /// Força da senha. Lista vazia = senha aceita.
    pub fn validate_password(password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < 6 {
            errors.push("A senha deve ter pelo menos 6 caracteres.".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("A senha deve conter pelo menos uma letra maiúscula.".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push("A senha deve conter pelo menos uma letra minúscula.".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("A senha deve conter pelo menos um número.".to_string());
        }

        errors
    }
}
