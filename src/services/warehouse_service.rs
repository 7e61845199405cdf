// src/services/warehouse_service.rs

use validator::Validate;

use crate::{
    common::error::{validation_messages, ApiError},
    http::{service::require_id, ApiClient, ApiService},
    models::tenancy::{CreateWarehousePayload, UpdateWarehousePayload, Warehouse},
};

const WAREHOUSE_ID_REQUIRED: &str = "O ID do armazém é obrigatório.";
pub(crate) const BUSINESS_ID_UNKNOWN: &str = "Não foi possível determinar o ID do negócio.";

#[derive(Clone)]
pub struct WarehouseService {
    api: ApiService,
}

impl WarehouseService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/warehouses"),
        }
    }

    // Negócio explícito ou, na falta dele, o da sessão
    fn resolve_business_id(&self, business_id: Option<i64>) -> Result<i64, ApiError> {
        business_id
            .filter(|id| *id != 0)
            .or_else(|| self.api.session().business_id())
            .ok_or_else(|| ApiError::validation(BUSINESS_ID_UNKNOWN))
    }

    /// Todos os armazéns do sistema (somente ADMIN no backend).
    pub async fn get_all(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.api.get("").await
    }

    pub async fn get_by_id(&self, warehouse_id: i64) -> Result<Warehouse, ApiError> {
        let id = require_id(warehouse_id, WAREHOUSE_ID_REQUIRED)?;
        self.api.get(&format!("/{}", id)).await
    }

    pub async fn get_by_business_id(&self, business_id: Option<i64>) -> Result<Vec<Warehouse>, ApiError> {
        let business_id = self.resolve_business_id(business_id)?;
        self.api.get(&format!("/by-business/{}", business_id)).await
    }

    pub async fn create(&self, payload: &CreateWarehousePayload) -> Result<Warehouse, ApiError> {
        payload.validate()?;

        let request = CreateWarehousePayload {
            business_id: Some(self.resolve_business_id(payload.business_id)?),
            ..payload.clone()
        };

        let warehouse: Warehouse = self.api.post("", &request).await?;
        tracing::info!(warehouse_id = warehouse.id, "📦 Armazém criado");
        Ok(warehouse)
    }

    pub async fn update(
        &self,
        warehouse_id: i64,
        payload: &UpdateWarehousePayload,
    ) -> Result<Warehouse, ApiError> {
        let id = require_id(warehouse_id, WAREHOUSE_ID_REQUIRED)?;
        payload.validate()?;

        // Mantém o businessId presente no corpo, mesmo quando o chamador não informa
        let request = UpdateWarehousePayload {
            business_id: payload
                .business_id
                .filter(|b| *b != 0)
                .or_else(|| self.api.session().business_id()),
            ..payload.clone()
        };

        self.api.put(&format!("/{}", id), &request).await
    }

    pub async fn delete(&self, warehouse_id: i64) -> Result<(), ApiError> {
        let id = require_id(warehouse_id, WAREHOUSE_ID_REQUIRED)?;
        self.api.delete(&format!("/{}", id)).await?;
        tracing::info!(warehouse_id = id, "🗑️ Armazém excluído");
        Ok(())
    }

    pub fn validate_warehouse_data(payload: &CreateWarehousePayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warehouse_form_rules() {
        let payload = CreateWarehousePayload {
            name: String::new(),
            address: Some("a".repeat(201)),
            business_id: None,
        };
        let errors = WarehouseService::validate_warehouse_data(&payload);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"O nome do armazém é obrigatório.".to_string()));
        assert!(errors.contains(&"O endereço não pode exceder 200 caracteres.".to_string()));
    }
}
