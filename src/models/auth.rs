// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::rbac::Role;
use crate::models::validate_not_blank;

// Dados para login
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank", message = "A senha é obrigatória."))]
    pub password: String,
}

// Dados para registro: cria o usuário e o negócio de uma vez
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do negócio é obrigatório."),
        length(max = 100, message = "O nome do negócio não pode exceder 100 caracteres.")
    )]
    pub business_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta do /auth/login. Os campos são opcionais porque a resposta é validada antes de virar sessão.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub jwt: Option<String>,
    pub business_id: Option<i64>,
    pub role: Option<String>,
}

// ---
// Sessão
// ---

/// Dados do usuário guardados junto com o token (nunca incluem o token).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_id: Option<i64>,
    // Guardado como texto: um papel desconhecido não pode invalidar a sessão inteira
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.user.role()
    }

    pub fn business_id(&self) -> Option<i64> {
        self.user.business_id
    }
}

// ---
// Usuários (/users)
// ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub business_name: Option<String>,
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "O e-mail do usuário é obrigatório."),
        email(message = "O formato do e-mail é inválido.")
    )]
    pub email: String,
    #[validate(custom(function = "validate_not_blank", message = "A senha do usuário é obrigatória."))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "O formato do e-mail é inválido."))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}
