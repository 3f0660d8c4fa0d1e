use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::errors::{QueryError, ValidationError};
use crate::query::kind::QueryKind;
use crate::server::server::AppState;

/// Body of `POST /api/consulta-processual/consulta`.
#[derive(Debug, Deserialize)]
pub struct ConsultaRequest {
    pub tipo: Option<String>,
    pub valor: Option<String>,
}

pub async fn handle_consulta(
    State(state): State<AppState>,
    body: Result<Json<ConsultaRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("rejected consulta body: {}", rejection);
            return QueryError::Validation(ValidationError::MissingInput).into_response();
        }
    };

    let (tipo, valor) = match (request.tipo, request.valor) {
        (Some(tipo), Some(valor)) if !tipo.is_empty() && !valor.is_empty() => (tipo, valor),
        _ => return QueryError::Validation(ValidationError::MissingInput).into_response(),
    };

    let kind = match tipo.parse::<QueryKind>() {
        Ok(kind) => kind,
        Err(e) => return QueryError::Validation(e).into_response(),
    };

    match state.dispatcher.query(kind, &valor).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingInput => "Tipo de consulta e valor são obrigatórios".to_owned(),
        ValidationError::UnsupportedKind(kind) => format!("Tipo de consulta '{}' não suportado", kind),
        ValidationError::InvalidCpf => "CPF inválido".to_owned(),
        ValidationError::InvalidCnpj => "CNPJ inválido".to_owned(),
        ValidationError::InvalidProcessNumber => "Número de processo inválido".to_owned(),
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            QueryError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": validation_message(e) }),
            ),
            QueryError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Nenhum processo encontrado" }),
            ),
            QueryError::UpstreamAuth(detail) => {
                error!("upstream authentication failed: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "message": "Falha na autenticação com a API externa" }),
                )
            }
            QueryError::Upstream { status, body } => {
                let details = serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "message": "Erro na API externa",
                        "status": status.as_u16(),
                        "details": details,
                    }),
                )
            }
            QueryError::UpstreamUnavailable(detail) => {
                error!("upstream unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "message": "API externa indisponível, tente novamente" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
