// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::validate_not_blank;

// ---
// 1. Business (O "Negócio")
// ---
// Criado junto com o usuário no registro; por isso não há payload de criação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do negócio é obrigatório."),
        length(max = 100, message = "O nome do negócio não pode exceder 100 caracteres.")
    )]
    pub name: String,
}

// ---
// 2. Warehouse (O "Armazém")
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub business_id: Option<i64>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehousePayload {
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do armazém é obrigatório."),
        length(max = 100, message = "O nome do armazém não pode exceder 100 caracteres.")
    )]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "O endereço não pode exceder 200 caracteres."))]
    pub address: Option<String>,

    // Se ausente, usa o negócio da sessão
    pub business_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehousePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do armazém é obrigatório."),
        length(max = 100, message = "O nome do armazém não pode exceder 100 caracteres.")
    )]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "O endereço não pode exceder 200 caracteres."))]
    pub address: Option<String>,

    pub business_id: Option<i64>,
}
