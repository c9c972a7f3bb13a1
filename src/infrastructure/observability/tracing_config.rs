use crate::config::LoggingSettings;

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info,sibu=debug".to_string(),
            json_format: false,
        }
    }
}

impl From<&LoggingSettings> for TracingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            json_format: settings.enable_json,
        }
    }
}
