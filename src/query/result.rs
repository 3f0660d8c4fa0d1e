use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::helpers::time::now_rfc3339;
use crate::query::kind::QueryKind;

/// Upstream process record, relayed as-is.
pub type ProcessRecord = Value;

/// Echo of the query, serialized as `{"<kind>": value, "timestamp", "totalProcessos"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEcho {
    pub kind: QueryKind,
    pub value: String,
    pub timestamp: String,
    pub total_count: usize,
}

impl Serialize for QueryEcho {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.kind.as_str(), &self.value)?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry("totalProcessos", &self.total_count)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    #[serde(rename = "consulta")]
    query_echo: QueryEcho,
    #[serde(rename = "processos")]
    records: Vec<ProcessRecord>,
}

impl QueryResult {
    pub fn new(kind: QueryKind, value: &str, records: Vec<ProcessRecord>) -> Self {
        Self {
            query_echo: QueryEcho {
                kind,
                value: value.to_owned(),
                timestamp: now_rfc3339(),
                total_count: records.len(),
            },
            records,
        }
    }

    pub fn echo(&self) -> &QueryEcho {
        &self.query_echo
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn total_count(&self) -> usize {
        self.query_echo.total_count
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}

/// Turn an upstream success body into records.
///
/// 204, blank body, `null`, `""` and `[]` mean no records; an object is one
/// record; an array is relayed unchanged. Non-JSON text is kept as a single
/// string record.
pub fn normalize_records(no_content: bool, body: &str) -> Vec<ProcessRecord> {
    if no_content || body.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Vec::new(),
        Ok(Value::Array(records)) => records,
        Ok(Value::String(s)) if s.is_empty() => Vec::new(),
        Ok(record) => vec![record],
        Err(_) => vec![Value::String(body.to_owned())],
    }
}
