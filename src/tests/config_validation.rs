#[cfg(test)]
mod tests {
    use serial_test::serial;

    use crate::config::proc_loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::utils::constants::{
        DEFAULT_AUTH_TIMEOUT_MS, DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_TOKEN_CACHE_PATH,
        PREDICTUS_AUTH_URL, PREDICTUS_CPF_URL,
    };
    use crate::utils::logging::{resolve, LogLevel};

    const MINIMAL: &str = r#"
settings:
  server:
    host: 127.0.0.1
    port: "5001"
upstream:
  username: "${PA_TEST_USERNAME}"
  password: "${PA_TEST_PASSWORD:fallback-pass}"
"#;

    #[tokio::test]
    #[serial]
    async fn minimal_config_gets_defaults_and_env_credentials() {
        std::env::set_var("PA_TEST_USERNAME", "svc-user");
        std::env::remove_var("PA_TEST_PASSWORD");

        let cfg = parse_config(expand_env_vars(MINIMAL).unwrap()).await.unwrap();

        assert_eq!(cfg.upstream.username, "svc-user");
        assert_eq!(cfg.upstream.password, "fallback-pass");
        assert_eq!(cfg.upstream.auth_url, PREDICTUS_AUTH_URL);
        assert_eq!(cfg.upstream.cpf_url, PREDICTUS_CPF_URL);
        assert_eq!(cfg.upstream.auth_timeout_ms, DEFAULT_AUTH_TIMEOUT_MS);
        assert_eq!(cfg.upstream.query_timeout_ms, DEFAULT_QUERY_TIMEOUT_MS);
        assert_eq!(cfg.token_cache.path, DEFAULT_TOKEN_CACHE_PATH);
        assert_eq!(cfg.token_cache.default_expires_in_seconds, 1800);
        assert!(!cfg.settings.metrics.is_enabled);
        assert!(cfg.settings.logging.is_none());

        std::env::remove_var("PA_TEST_USERNAME");
    }

    #[tokio::test]
    #[serial]
    async fn missing_credentials_are_rejected() {
        std::env::remove_var("PA_TEST_USERNAME");
        std::env::remove_var("PA_TEST_PASSWORD");

        let yaml = MINIMAL.replace(":fallback-pass", "");
        let err = parse_config(expand_env_vars(&yaml).unwrap()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("upstream.username must not be empty"), "{}", msg);
        assert!(msg.contains("upstream.password must not be empty"), "{}", msg);
    }

    #[tokio::test]
    async fn all_problems_are_reported_together() {
        let yaml = r#"
settings:
  server:
    host: ""
    port: "not-a-port"
  logging:
    level: loud
    format: json
  metrics:
    is_enabled: true
    path: metrics
upstream:
  auth_url: ftp://example.com/auth
  username: u
  password: p
  query_timeout_ms: 0
token_cache:
  path: ""
"#;
        let err = parse_config(yaml.to_string()).await.unwrap_err();
        let msg = err.to_string();
        for expected in [
            "settings.server.host",
            "settings.server.port",
            "settings.logging.level",
            "settings.metrics.path",
            "upstream.auth_url",
            "upstream.query_timeout_ms",
            "token_cache.path",
        ] {
            assert!(msg.contains(expected), "missing '{}' in: {}", expected, msg);
        }
    }

    #[tokio::test]
    async fn config_file_is_loaded_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processual-agent.yaml");
        std::fs::write(
            &path,
            r#"
settings:
  server: { host: 0.0.0.0, port: "8080" }
  logging: { level: debug, format: json }
  metrics: { is_enabled: true }
upstream:
  auth_url: http://localhost:9000/auth
  username: u
  password: p
token_cache:
  path: /var/lib/processual/token.json
  default_expires_in_seconds: 600
"#,
        )
        .unwrap();

        let cfg = file_to_config(&path).await.unwrap();
        assert_eq!(cfg.settings.server.port, "8080");
        assert_eq!(cfg.settings.metrics.path, "/metrics");
        assert_eq!(cfg.upstream.auth_url, "http://localhost:9000/auth");
        assert_eq!(cfg.token_cache.default_expires_in_seconds, 600);

        let logging = cfg.settings.logging.clone().unwrap();
        assert_eq!(logging.format, LogFormat::Json);

        // cli level overrides the file, format is kept
        let resolved = resolve(&cfg, Some(LogLevel::WARN));
        assert_eq!(resolved.level, "warn");
        assert_eq!(resolved.format, LogFormat::Json);
        assert_eq!(resolve(&cfg, None).level, "debug");
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = crate::config::upstream::UpstreamConfig::with_base_url("http://x", "user", "hunter2");
        let printed = format!("{:?}", cfg);
        assert!(printed.contains("user"));
        assert!(!printed.contains("hunter2"));
    }
}
