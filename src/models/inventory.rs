// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{validate_not_blank, validate_not_negative};

// --- 1. Produtos (catálogo do negócio) ---
// O estoque não fica aqui: ele vive na relação WarehouseProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub business_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do produto é obrigatório."),
        length(max = 100, message = "O nome do produto não pode exceder 100 caracteres.")
    )]
    pub name: String,

    #[validate(
        required(message = "O preço do produto é obrigatório."),
        custom(function = "validate_not_negative", message = "O preço do produto não pode ser negativo.")
    )]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "A descrição não pode exceder 500 caracteres."))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    // Se ausente, usa o negócio da sessão
    pub business_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "validate_not_blank", message = "O nome do produto é obrigatório."),
        length(max = 100, message = "O nome do produto não pode exceder 100 caracteres.")
    )]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_negative", message = "O preço do produto não pode ser negativo."))]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "A descrição não pode exceder 500 caracteres."))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    pub business_id: Option<i64>,
}

// --- 2. Estoque por armazém (WarehouseProduct) ---
// Liga um Produto a um Armazém com a quantidade física.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseProduct {
    pub product_id: i64,
    pub warehouse_id: i64,
    // O backend chama de "stock" em algumas rotas e "quantity" em outras
    #[serde(alias = "stock")]
    pub quantity: Decimal,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseProductPayload {
    #[validate(range(min = 1, message = "O ID do produto é obrigatório."))]
    pub product_id: i64,

    #[validate(range(min = 1, message = "O ID do armazém é obrigatório."))]
    pub warehouse_id: i64,

    #[validate(
        required(message = "A quantidade é obrigatória."),
        custom(function = "validate_not_negative", message = "A quantidade não pode ser negativa.")
    )]
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
    #[validate(custom(function = "validate_not_negative", message = "A quantidade não pode ser negativa."))]
    pub quantity: Decimal,
}
