// src/services/user_service.rs

use validator::Validate;

use crate::{
    common::error::{validation_messages, ApiError},
    http::{service::require_id, ApiClient, ApiService},
    models::auth::{CreateUserPayload, UpdateUserPayload, User},
    services::business_service::rewrite_not_found,
};

const USER_ID_REQUIRED: &str = "O ID do usuário é obrigatório.";
const UPDATE_UNAVAILABLE: &str = "O endpoint de atualização não está disponível no backend.";
const DELETE_UNAVAILABLE: &str = "O endpoint de exclusão não está disponível no backend.";

// A maioria das rotas exige ADMIN. O cadastro comum passa por AuthService::register.
#[derive(Clone)]
pub struct UserService {
    api: ApiService,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/users"),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<User>, ApiError> {
        self.api.get("").await
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User, ApiError> {
        let id = require_id(user_id, USER_ID_REQUIRED)?;
        self.api.get(&format!("/{}", id)).await
    }

    pub async fn create(&self, payload: &CreateUserPayload) -> Result<User, ApiError> {
        payload.validate()?;
        self.api.post("", payload).await
    }

    pub async fn update(&self, user_id: i64, payload: &UpdateUserPayload) -> Result<User, ApiError> {
        let id = require_id(user_id, USER_ID_REQUIRED)?;
        payload.validate()?;

        self.api
            .put(&format!("/{}", id), payload)
            .await
            .map_err(|e| rewrite_not_found(e, UPDATE_UNAVAILABLE))
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), ApiError> {
        let id = require_id(user_id, USER_ID_REQUIRED)?;

        self.api
            .delete(&format!("/{}", id))
            .await
            .map_err(|e| rewrite_not_found(e, DELETE_UNAVAILABLE))
    }

    pub fn validate_user_data(payload: &CreateUserPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }
}
