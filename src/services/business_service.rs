// src/services/business_service.rs

use validator::Validate;

use crate::{
    common::error::{validation_messages, ApiError, ErrorKind},
    http::{service::require_id, ApiClient, ApiService},
    models::tenancy::{Business, UpdateBusinessPayload},
};

const BUSINESS_ID_REQUIRED: &str = "O ID do negócio é obrigatório.";
const BUSINESS_INFO_MISSING: &str =
    "Informação do negócio não encontrada. Por favor, faça login novamente.";
const UPDATE_UNAVAILABLE: &str = "O endpoint de atualização não está disponível no backend.";

// Negócios são criados no registro (AuthService); aqui só leitura e atualização.
#[derive(Clone)]
pub struct BusinessService {
    api: ApiService,
}

impl BusinessService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/businesses"),
        }
    }

    /// Todos os negócios do sistema (somente ADMIN no backend).
    pub async fn get_all(&self) -> Result<Vec<Business>, ApiError> {
        self.api.get("").await
    }

    pub async fn get_by_id(&self, business_id: i64) -> Result<Business, ApiError> {
        let id = require_id(business_id, BUSINESS_ID_REQUIRED)?;
        self.api.get(&format!("/{}", id)).await
    }

    /// O negócio do usuário logado.
    pub async fn get_current_business(&self) -> Result<Business, ApiError> {
        let Some(business_id) = self.api.session().business_id() else {
            return Err(ApiError::new(ErrorKind::Authentication, 401, BUSINESS_INFO_MISSING));
        };
        self.get_by_id(business_id).await
    }

    pub async fn update(
        &self,
        business_id: i64,
        payload: &UpdateBusinessPayload,
    ) -> Result<Business, ApiError> {
        let id = require_id(business_id, BUSINESS_ID_REQUIRED)?;
        payload.validate()?;

        self.api
            .put(&format!("/{}", id), payload)
            .await
            .map_err(|e| rewrite_not_found(e, UPDATE_UNAVAILABLE))
    }

    pub fn validate_business_data(payload: &UpdateBusinessPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }
}

// O backend ainda não expõe algumas rotas de escrita; 404 ali significa "rota inexistente".
pub(crate) fn rewrite_not_found(mut error: ApiError, message: &str) -> ApiError {
    if error.status == 404 {
        error.message = message.to_string();
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_name_rules() {
        let blank = UpdateBusinessPayload { name: "  ".into() };
        assert_eq!(
            BusinessService::validate_business_data(&blank),
            vec!["O nome do negócio é obrigatório.".to_string()]
        );

        let long = UpdateBusinessPayload { name: "x".repeat(101) };
        assert_eq!(BusinessService::validate_business_data(&long).len(), 1);

        let ok = UpdateBusinessPayload { name: "Mi Empresa SAS".into() };
        assert!(BusinessService::validate_business_data(&ok).is_empty());
    }

    #[test]
    fn only_404_is_rewritten() {
        let not_found = ApiError::from_response(404, &crate::common::error::ErrorBody::Empty);
        assert_eq!(rewrite_not_found(not_found, UPDATE_UNAVAILABLE).message, UPDATE_UNAVAILABLE);

        let forbidden = ApiError::forbidden();
        assert_ne!(rewrite_not_found(forbidden, UPDATE_UNAVAILABLE).message, UPDATE_UNAVAILABLE);
    }
}
