#[cfg(test)]
mod tests {

    use std::io::Write;

    use http::Method;

    use crate::config::proc_loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::config::store::StoreTypes;
    use crate::utils::logging::{resolve_logging_config, LogLevel};

    const MINIMAL_YAML: &str = r#"
settings:
  server:
    host: 127.0.0.1
    port: "8080"
store:
  type: memory
oracle:
  url: "http://vendor.local/validate"
"#;

    #[tokio::test]
    async fn repository_sample_config_is_valid() {
        std::env::set_var("DB_HOST", "db.internal");
        let service_config = file_to_config(std::path::Path::new("token-validator.yaml"))
            .await
            .expect("token-validator.yaml must exist in repo root for tests");

        assert_eq!(service_config.store.store_type, StoreTypes::POSTGRES);
        let pg = service_config.store.postgres.as_ref().unwrap();
        assert_eq!(pg.host, "db.internal");
        assert_eq!(pg.port, 5432);
        assert!(service_config.settings.metrics.is_enabled);
    }

    #[tokio::test]
    async fn minimal_config_gets_defaults() {
        let cfg = parse_config(MINIMAL_YAML.to_string()).await.unwrap();

        assert_eq!(cfg.store.store_type, StoreTypes::MEMORY);
        assert_eq!(cfg.oracle.method, Method::POST);
        assert_eq!(cfg.oracle.token_field, "token");
        assert_eq!(cfg.oracle.response_pointer, "/valid");
        assert_eq!(cfg.oracle.timeout_ms, 5000);
        assert_eq!(cfg.settings.metrics.path, "/metrics");
        assert!(!cfg.settings.metrics.is_enabled);

        let logging = cfg.settings.logging.as_ref().unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);
    }

    #[tokio::test]
    async fn config_file_is_loaded_with_env_expansion() {
        std::env::set_var("TOKEN_VALIDATOR_TEST_VENDOR_URL", "https://vendor.example/check");
        let yaml = r#"
settings:
  server: { host: 0.0.0.0, port: "9090" }
  logging: { level: debug, format: json }
store:
  type: postgres
  postgres: { host: "${TOKEN_VALIDATOR_TEST_DB_HOST:localhost}", dbname: tokens, user: app }
oracle:
  url: "${TOKEN_VALIDATOR_TEST_VENDOR_URL}"
  method: GET
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let cfg = file_to_config(file.path()).await.unwrap();

        assert_eq!(cfg.oracle.url, "https://vendor.example/check");
        assert_eq!(cfg.oracle.method, Method::GET);
        let pg = cfg.store.postgres.unwrap();
        assert_eq!(pg.host, "localhost");
        assert_eq!(pg.max_size, 16);
        assert_eq!(cfg.settings.logging.unwrap().format, LogFormat::Json);
    }

    #[test]
    fn env_expansion_uses_defaults_for_missing_vars() {
        let out = expand_env_vars("a: ${TOKEN_VALIDATOR_TEST_UNSET_VAR:fallback}, b: ${TOKEN_VALIDATOR_TEST_UNSET_VAR}");
        assert_eq!(out, "a: fallback, b: ");
    }

    #[tokio::test]
    async fn invalid_config_reports_all_errors() {
        let invalid_yaml = r#"
settings:
  server:
    host: ""
    port: "not-a-port"
  logging:
    level: loud
    format: compact
store:
  type: postgres
oracle:
  url: "ftp://vendor"
  method: DELETE
  response_pointer: "valid"
  timeout_ms: 0
"#;
        let err = parse_config(invalid_yaml.to_string()).await.unwrap_err().to_string();

        assert!(err.contains("config is not valid"), "{err}");
        for expected in [
            "settings.server.host",
            "settings.server.port",
            "settings.logging.level",
            "store.postgres is required",
            "oracle.url",
            "oracle.method",
            "oracle.response_pointer",
            "oracle.timeout_ms",
        ] {
            assert!(err.contains(expected), "expected '{expected}' in:\n{err}");
        }
    }

    #[tokio::test]
    async fn unknown_store_type_is_a_parse_error() {
        let yaml = MINIMAL_YAML.replace("type: memory", "type: redis");
        assert!(parse_config(yaml).await.is_err());
    }

    #[tokio::test]
    async fn cli_log_level_overrides_configured_level() {
        let cfg = parse_config(MINIMAL_YAML.to_string()).await.unwrap();

        let from_config = resolve_logging_config(&cfg, None);
        assert_eq!(from_config.level, "info");

        let from_cli = resolve_logging_config(&cfg, Some(LogLevel::DEBUG));
        assert_eq!(from_cli.level, "debug");
        assert_eq!(from_cli.format, LogFormat::Compact);
    }
}
