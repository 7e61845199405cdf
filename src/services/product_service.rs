// src/services/product_service.rs

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::error::{validation_messages, ApiError},
    http::{service::require_id, ApiClient, ApiService},
    models::inventory::{CreateProductPayload, Product, UpdateProductPayload},
    services::warehouse_service::BUSINESS_ID_UNKNOWN,
};

const PRODUCT_ID_REQUIRED: &str = "O ID do produto é obrigatório.";

// Produtos pertencem a um negócio; o estoque fica em WarehouseProductService.
#[derive(Clone)]
pub struct ProductService {
    api: ApiService,
}

impl ProductService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: ApiService::new(api, "/products"),
        }
    }

    fn resolve_business_id(&self, business_id: Option<i64>) -> Result<i64, ApiError> {
        business_id
            .filter(|id| *id != 0)
            .or_else(|| self.api.session().business_id())
            .ok_or_else(|| ApiError::validation(BUSINESS_ID_UNKNOWN))
    }

    pub async fn get_by_business_id(&self, business_id: Option<i64>) -> Result<Vec<Product>, ApiError> {
        let business_id = self.resolve_business_id(business_id)?;
        self.api.get(&format!("/by-business/{}", business_id)).await
    }

    pub async fn get_by_id(&self, product_id: i64) -> Result<Product, ApiError> {
        let id = require_id(product_id, PRODUCT_ID_REQUIRED)?;
        self.api.get(&format!("/{}", id)).await
    }

    pub async fn create(&self, payload: &CreateProductPayload) -> Result<Product, ApiError> {
        // Nome, preço obrigatório e não negativo: tudo antes da rede
        payload.validate()?;

        let request = CreateProductPayload {
            business_id: Some(self.resolve_business_id(payload.business_id)?),
            ..payload.clone()
        };

        let product: Product = self.api.post("", &request).await?;
        tracing::info!(product_id = product.id, "🏷️ Produto criado");
        Ok(product)
    }

    pub async fn update(&self, product_id: i64, payload: &UpdateProductPayload) -> Result<Product, ApiError> {
        let id = require_id(product_id, PRODUCT_ID_REQUIRED)?;
        payload.validate()?;

        let request = UpdateProductPayload {
            business_id: payload
                .business_id
                .filter(|b| *b != 0)
                .or_else(|| self.api.session().business_id()),
            ..payload.clone()
        };

        self.api.put(&format!("/{}", id), &request).await
    }

    pub async fn delete(&self, product_id: i64) -> Result<(), ApiError> {
        let id = require_id(product_id, PRODUCT_ID_REQUIRED)?;
        self.api.delete(&format!("/{}", id)).await
    }

    /// Busca local (no cliente) por nome ou descrição do catálogo do negócio.
    pub async fn search(&self, term: &str, business_id: Option<i64>) -> Result<Vec<Product>, ApiError> {
        let products = self.get_by_business_id(business_id).await?;
        Ok(search_products(products, term))
    }

    /// Filtro local por faixa de preço, limites inclusivos.
    pub async fn filter_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
        business_id: Option<i64>,
    ) -> Result<Vec<Product>, ApiError> {
        let products = self.get_by_business_id(business_id).await?;
        Ok(filter_by_price_range(products, min, max))
    }

    pub fn validate_product_data(payload: &CreateProductPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }
}

// Termo vazio devolve a lista inteira
pub fn search_products(products: Vec<Product>, term: &str) -> Vec<Product> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| {
            let name_match = p.name.to_lowercase().contains(&term);
            let desc_match = p
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            name_match || desc_match
        })
        .collect()
}

// Produto sem preço conta como 0
pub fn filter_by_price_range(products: Vec<Product>, min: Decimal, max: Decimal) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| {
            let price = p.price.unwrap_or(Decimal::ZERO);
            price >= min && price <= max
        })
        .collect()
}
