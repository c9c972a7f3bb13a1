use sibu::config::Settings;
use sibu::infrastructure::observability::TracingConfig;

#[test]
fn given_no_environment_overrides_when_loading_settings_then_defaults_apply() {
    for key in [
        "EMBEDDING_MODEL",
        "CHAT_MODEL",
        "EMBEDDING_TOKEN_CEILING",
        "EMBEDDING_MAX_RETRIES",
        "DATA_DIR",
        "LOG_LEVEL",
        "LOG_JSON",
    ] {
        std::env::remove_var(key);
    }

    let settings = Settings::from_env();

    assert_eq!(settings.openai.embedding_model, "text-embedding-3-small");
    assert_eq!(settings.openai.chat_model, "gpt-4o-mini");
    assert_eq!(settings.clustering.token_ceiling, 8000);
    assert_eq!(settings.clustering.max_retries, 2);
    assert_eq!(settings.storage.data_dir.to_str(), Some("data"));
    assert_eq!(settings.logging.level, "info");
    assert!(!settings.logging.enable_json);
}

#[test]
fn given_logging_settings_when_converting_then_tracing_config_carries_them() {
    std::env::remove_var("LOG_LEVEL");
    std::env::remove_var("LOG_JSON");
    let settings = Settings::from_env();

    let config = TracingConfig::from(&settings.logging);

    assert_eq!(config.level, settings.logging.level);
    assert_eq!(config.json_format, settings.logging.enable_json);
}

#[test]
fn given_default_tracing_config_then_filter_keeps_crate_debug_logs() {
    let config = TracingConfig::default();

    assert_eq!(config.level, "info,sibu=debug");
    assert!(!config.json_format);
}
