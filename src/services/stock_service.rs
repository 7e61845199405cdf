// src/services/stock_service.rs

use validator::Validate;

use crate::{
    common::error::{validation_messages, ApiError},
    http::{service::require_id, ApiClient, ApiService},
    models::inventory::{CreateWarehouseProductPayload, UpdateStockPayload, WarehouseProduct},
};

const WAREHOUSE_ID_REQUIRED: &str = "O ID do armazém é obrigatório.";
const BOTH_IDS_REQUIRED: &str = "O ID do produto e do armazém são obrigatórios.";

// Quantidade de cada produto em cada armazém (/warehouse-products).
#[derive(Clone)]
pub struct WarehouseProductService {
    api: ApiService,
}

impl WarehouseProductService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/warehouse-products"),
        }
    }

    /// Estoque de todos os armazéns do negócio do usuário (o backend resolve pelo token).
    pub async fn get_by_business(&self) -> Result<Vec<WarehouseProduct>, ApiError> {
        self.api.get("/by-business").await
    }

    pub async fn get_by_warehouse(&self, warehouse_id: i64) -> Result<Vec<WarehouseProduct>, ApiError> {
        let id = require_id(warehouse_id, WAREHOUSE_ID_REQUIRED)?;
        self.api.get(&format!("/by-warehouse/{}", id)).await
    }

    pub async fn get_by_id(&self, product_id: i64, warehouse_id: i64) -> Result<WarehouseProduct, ApiError> {
        let (p, w) = require_pair(product_id, warehouse_id)?;
        self.api.get(&format!("/{}/{}", p, w)).await
    }

    /// Atribui estoque inicial de um produto a um armazém.
    pub async fn create(&self, payload: &CreateWarehouseProductPayload) -> Result<WarehouseProduct, ApiError> {
        require_pair(payload.product_id, payload.warehouse_id)?;
        payload.validate()?;

        let created: WarehouseProduct = self.api.post("", payload).await?;
        tracing::info!(
            product_id = created.product_id,
            warehouse_id = created.warehouse_id,
            quantity = %created.quantity,
            "📦 Estoque atribuído"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        product_id: i64,
        warehouse_id: i64,
        payload: &UpdateStockPayload,
    ) -> Result<WarehouseProduct, ApiError> {
        let (p, w) = require_pair(product_id, warehouse_id)?;
        payload.validate()?;
        self.api.put(&format!("/{}/{}", p, w), payload).await
    }

    pub async fn delete(&self, product_id: i64, warehouse_id: i64) -> Result<(), ApiError> {
        let (p, w) = require_pair(product_id, warehouse_id)?;
        self.api.delete(&format!("/{}/{}", p, w)).await
    }

    pub fn validate_warehouse_product_data(payload: &CreateWarehouseProductPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }
}

fn require_pair(product_id: i64, warehouse_id: i64) -> Result<(i64, i64), ApiError> {
    let p = require_id(product_id, BOTH_IDS_REQUIRED)?;
    let w = require_id(warehouse_id, BOTH_IDS_REQUIRED)?;
    Ok((p, w))
}
