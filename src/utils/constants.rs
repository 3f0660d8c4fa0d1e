//! Shared constants and invariants

pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 1800;
pub const DEFAULT_AUTH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_TOKEN_CACHE_PATH: &str = "token.json";

// Predictus production endpoints
pub const PREDICTUS_AUTH_URL: &str = "https://api.predictus.com.br/auth";
pub const PREDICTUS_CPF_URL: &str =
    "https://api.predictus.com.br/predictus-api/processos/judiciais/buscarPorCPFParte";
pub const PREDICTUS_CNPJ_URL: &str =
    "https://api.predictus.com.br/predictus-api/processos/judiciais/buscarPorCNPJParte";
pub const PREDICTUS_PROCESS_URL: &str =
    "https://api.predictus.com.br/predictus-api/processos/judiciais/buscarPorNumeroProcesso";

// Inbound routes
pub const CONSULTA_PATH: &str = "/api/consulta-processual/consulta";
pub const HEALTH_PATH: &str = "/health";
