use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_AUTH_TIMEOUT_MS, DEFAULT_QUERY_TIMEOUT_MS, PREDICTUS_AUTH_URL, PREDICTUS_CNPJ_URL,
    PREDICTUS_CPF_URL, PREDICTUS_PROCESS_URL,
};

/// Upstream judicial-records provider: endpoints, credentials, timeouts.
///
/// Credentials are expected to arrive through `${ENV}` expansion in the
/// config file.
#[derive(Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_cpf_url")]
    pub cpf_url: String,
    #[serde(default = "default_cnpj_url")]
    pub cnpj_url: String,
    #[serde(default = "default_process_url")]
    pub process_url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_auth_timeout_ms")]
    pub auth_timeout_ms: u64,
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl UpstreamConfig {
    /// Config pointing every endpoint at `base_url`, default timeouts.
    pub fn with_base_url(base_url: &str, username: &str, password: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth_url: format!("{}/auth", base),
            cpf_url: format!("{}/processos/judiciais/buscarPorCPFParte", base),
            cnpj_url: format!("{}/processos/judiciais/buscarPorCNPJParte", base),
            process_url: format!("{}/processos/judiciais/buscarPorNumeroProcesso", base),
            username: username.to_owned(),
            password: password.to_owned(),
            auth_timeout_ms: DEFAULT_AUTH_TIMEOUT_MS,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

// never print the password
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("auth_url", &self.auth_url)
            .field("cpf_url", &self.cpf_url)
            .field("cnpj_url", &self.cnpj_url)
            .field("process_url", &self.process_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth_timeout_ms", &self.auth_timeout_ms)
            .field("query_timeout_ms", &self.query_timeout_ms)
            .finish()
    }
}

fn default_auth_url() -> String {
    PREDICTUS_AUTH_URL.to_owned()
}

fn default_cpf_url() -> String {
    PREDICTUS_CPF_URL.to_owned()
}

fn default_cnpj_url() -> String {
    PREDICTUS_CNPJ_URL.to_owned()
}

fn default_process_url() -> String {
    PREDICTUS_PROCESS_URL.to_owned()
}

fn default_auth_timeout_ms() -> u64 {
    DEFAULT_AUTH_TIMEOUT_MS
}

fn default_query_timeout_ms() -> u64 {
    DEFAULT_QUERY_TIMEOUT_MS
}
