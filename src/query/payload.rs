use serde_json::{json, Map, Value};

use crate::config::upstream::UpstreamConfig;
use crate::query::kind::QueryKind;
use crate::validation::digits_only;

pub const COURT_INSTANCES: [u8; 4] = [1, 2, 3, 4];
pub const RESULT_LIMIT: u32 = 10_000;

pub const JUDICIAL_SEGMENTS: [&str; 11] = [
    "CNJ",
    "JUSTICA DO TRABALHO",
    "JUSTICA ELEITORAL",
    "JUSTICA ESTADUAL",
    "JUSTICA FEDERAL",
    "JUSTICA MILITAR",
    "STF",
    "STJ",
    "TST",
    "TSE",
    "STM",
];

pub const RETURN_FIELDS: [&str; 14] = [
    "numeroProcessoUnico",
    "tribunal",
    "uf",
    "classeProcessual",
    "dataDistribuicao",
    "valorCausa",
    "statusProcesso",
    "partes",
    "advogadosSemParte",
    "assuntosCNJ",
    "temSentenca",
    "sentenca",
    "urlProcesso",
    "grauProcesso",
];

/// Endpoint and JSON body for one upstream query.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub payload: Value,
}

impl UpstreamRequest {
    pub fn build(kind: QueryKind, raw_value: &str, config: &UpstreamConfig) -> Self {
        match kind {
            QueryKind::Cpf => Self {
                url: config.cpf_url.clone(),
                payload: party_payload("cpf", raw_value),
            },
            QueryKind::Cnpj => Self {
                url: config.cnpj_url.clone(),
                payload: party_payload("cnpj", raw_value),
            },
            // sent as typed, formatting included
            QueryKind::ProcessNumber => Self {
                url: config.process_url.clone(),
                payload: json!({
                    "numeroProcesso": raw_value,
                    "camposRetorno": return_fields(),
                }),
            },
        }
    }
}

fn party_payload(id_field: &str, raw_value: &str) -> Value {
    let mut payload = Map::new();
    payload.insert(id_field.to_owned(), Value::String(digits_only(raw_value)));
    payload.insert("grausProcesso".to_owned(), json!(COURT_INSTANCES));
    payload.insert("limiteResultados".to_owned(), json!(RESULT_LIMIT));
    payload.insert("segmentos".to_owned(), json!(JUDICIAL_SEGMENTS));
    payload.insert("camposRetorno".to_owned(), return_fields());
    Value::Object(payload)
}

fn return_fields() -> Value {
    json!({ "incluir": RETURN_FIELDS })
}
