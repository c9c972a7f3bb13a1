use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub openai: OpenAiSettings,
    pub clustering: ClusteringSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub embedding_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusteringSettings {
    pub token_ceiling: usize,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            openai: OpenAiSettings {
                api_key: env_or("OPENAI_API_KEY", ""),
                embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
                chat_model: env_or("CHAT_MODEL", "gpt-4o-mini"),
            },
            clustering: ClusteringSettings {
                token_ceiling: env_or("EMBEDDING_TOKEN_CEILING", "8000")
                    .parse()
                    .unwrap_or(8000),
                max_retries: env_or("EMBEDDING_MAX_RETRIES", "2").parse().unwrap_or(2),
            },
            storage: StorageSettings {
                data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: env_or("LOG_JSON", "false") == "true",
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
