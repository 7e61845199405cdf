// src/common/error.rs

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

// ---
// Mensagens fixas (o que chega na tela do usuário)
// ---
pub mod messages {
    pub const SESSION_EXPIRED: &str = "Sessão expirada. Por favor, faça login novamente.";
    pub const FORBIDDEN: &str = "Você não tem permissão para realizar esta ação.";
    pub const NOT_FOUND: &str = "Recurso não encontrado.";
    pub const UNPROCESSABLE: &str = "Erro de validação nos dados enviados.";
    pub const SERVER_ERROR: &str = "Erro interno do servidor. Por favor, tente mais tarde.";
    pub const COMMUNICATION: &str = "Erro na comunicação com o servidor.";
    pub const NETWORK: &str = "Não foi possível conectar ao servidor. Verifique sua conexão.";
    pub const INVALID_FIELDS: &str = "Um ou mais campos são inválidos.";
    pub const INVALID_RESPONSE: &str = "Resposta inválida do servidor.";
    pub const INVALID_REQUEST_BODY: &str = "Não foi possível serializar os dados da requisição.";
    pub const SESSION_STORAGE: &str = "Falha ao gravar a sessão local.";
}

/// Categoria fechada de falhas que atravessam o pipeline de requisições.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Pré-validação no cliente. Nunca chega à rede.
    Validation,
    Authentication,
    Authorization,
    NotFound,
    UnprocessableEntity,
    Server,
    /// Nenhuma resposta recebida (status 0).
    Network,
    Unknown,
}

// O erro normalizado: toda falha vira este formato antes de chegar ao chamador.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

/// Corpo de uma resposta de erro, já interpretado.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ErrorBody::Empty;
        }
        match serde_json::from_str::<Value>(raw) {
            // Uma string JSON ("...") conta como texto puro
            Ok(Value::String(text)) => ErrorBody::Text(text),
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(raw.to_string()),
        }
    }

    fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ErrorBody::Json(Value::Object(map)) => map.get(name),
            _ => None,
        }
    }

    fn message(&self) -> Option<String> {
        match self.field("message") {
            Some(Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
            _ => None,
        }
    }

    fn code(&self) -> Option<String> {
        match self.field("code") {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        }
    }
}

impl ApiError {
    pub fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            code: None,
            errors: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Falha de pré-validação (400), levantada antes de qualquer chamada de rede.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, 400, message)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Authorization, 403, messages::FORBIDDEN)
    }

    /// Nenhuma resposta do servidor.
    pub fn network(code: &str) -> Self {
        Self::new(ErrorKind::Network, 0, messages::NETWORK).with_code(code)
    }

    pub fn unknown(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, status, message)
    }

    // ---
    // A função de normalização: status HTTP + corpo -> ApiError
    // ---
    pub fn from_response(status: u16, body: &ErrorBody) -> Self {
        let mut error = match status {
            401 => Self::new(ErrorKind::Authentication, status, messages::SESSION_EXPIRED),
            403 => Self::new(ErrorKind::Authorization, status, messages::FORBIDDEN),
            404 => Self::new(ErrorKind::NotFound, status, messages::NOT_FOUND),
            422 => {
                let message = body.message().unwrap_or_else(|| messages::UNPROCESSABLE.to_string());
                let mut error = Self::new(ErrorKind::UnprocessableEntity, status, message);
                error.errors = body.field("errors").filter(|v| !v.is_null()).cloned();
                error
            }
            500 => Self::new(ErrorKind::Server, status, messages::SERVER_ERROR),
            _ => {
                let message = body.message().unwrap_or_else(|| messages::COMMUNICATION.to_string());
                Self::new(ErrorKind::Unknown, status, message)
            }
        };

        error.code = body.code();

        // Corpo em texto puro tem a palavra final sobre a mensagem
        if let ErrorBody::Text(text) = body {
            error.message = text.clone();
        }

        error
    }

    /// Falhas de transporte (timeout, conexão recusada, corpo ilegível) viram status 0.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("TIMEOUT")
        } else {
            Self::network("NETWORK_ERROR")
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }
}

// Erros do `validator` viram um único ApiError de validação, com os detalhes por campo.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = field_messages(&errors);

        let message = details
            .values()
            .flat_map(|msgs| msgs.iter())
            .next()
            .cloned()
            .unwrap_or_else(|| messages::INVALID_FIELDS.to_string());

        let mut map = Map::new();
        for (field, msgs) in details {
            map.insert(field, Value::from(msgs));
        }

        ApiError::validation(message).with_errors(Value::Object(map))
    }
}

impl From<crate::session::StorageError> for ApiError {
    fn from(err: crate::session::StorageError) -> Self {
        tracing::error!("🔥 Erro no armazenamento de sessão: {}", err);
        ApiError::unknown(500, messages::SESSION_STORAGE)
    }
}

/// Mensagens de validação agrupadas por campo, em ordem estável.
pub fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut details = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        let msgs: Vec<String> = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("Campo '{}' inválido ({}).", field, e.code),
            })
            .collect();
        details.insert(field.to_string(), msgs);
    }
    details
}

/// Lista plana de mensagens, no formato que um formulário exibe.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    field_messages(errors).into_values().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unprocessable_entity_keeps_backend_message_and_field_errors() {
        let body = ErrorBody::parse(r#"{"message":"Invalid SKU","errors":{"sku":"duplicate"}}"#);
        let err = ApiError::from_response(422, &body);

        assert_eq!(err.kind, ErrorKind::UnprocessableEntity);
        assert_eq!(err.message, "Invalid SKU");
        assert_eq!(err.status, 422);
        assert_eq!(err.errors, Some(json!({ "sku": "duplicate" })));
    }

    #[test]
    fn unprocessable_entity_without_message_uses_generic_text() {
        let err = ApiError::from_response(422, &ErrorBody::parse("{}"));
        assert_eq!(err.message, messages::UNPROCESSABLE);
        assert_eq!(err.errors, None);
    }

    #[test]
    fn fixed_messages_ignore_backend_message() {
        let body = ErrorBody::parse(r#"{"message":"whatever"}"#);

        assert_eq!(ApiError::from_response(401, &body).message, messages::SESSION_EXPIRED);
        assert_eq!(ApiError::from_response(403, &body).message, messages::FORBIDDEN);
        assert_eq!(ApiError::from_response(404, &body).message, messages::NOT_FOUND);
        assert_eq!(ApiError::from_response(500, &body).message, messages::SERVER_ERROR);
        assert_eq!(ApiError::from_response(500, &body).kind, ErrorKind::Server);
    }

    #[test]
    fn other_statuses_use_backend_message_or_fallback() {
        let with_msg = ApiError::from_response(409, &ErrorBody::parse(r#"{"message":"SKU já existe"}"#));
        assert_eq!(with_msg.message, "SKU já existe");
        assert_eq!(with_msg.kind, ErrorKind::Unknown);

        let without = ApiError::from_response(400, &ErrorBody::Empty);
        assert_eq!(without.message, messages::COMMUNICATION);
        assert_eq!(without.status, 400);
    }

    #[test]
    fn plain_string_body_overrides_every_computed_message() {
        let err = ApiError::from_response(403, &ErrorBody::parse("Conta bloqueada"));
        assert_eq!(err.message, "Conta bloqueada");
        assert_eq!(err.kind, ErrorKind::Authorization);

        let quoted = ApiError::from_response(500, &ErrorBody::parse(r#""falhou""#));
        assert_eq!(quoted.message, "falhou");
    }

    #[test]
    fn backend_code_is_copied() {
        let err = ApiError::from_response(409, &ErrorBody::parse(r#"{"code":"DUPLICATE"}"#));
        assert_eq!(err.code.as_deref(), Some("DUPLICATE"));
    }

    #[test]
    fn serializes_to_stable_shape() {
        let err = ApiError::network("NETWORK_ERROR");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({ "message": messages::NETWORK, "status": 0, "code": "NETWORK_ERROR" })
        );
    }
}
