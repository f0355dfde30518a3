use serde::{Deserialize, Serialize};

pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub translation: TranslationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub bind_addr: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub max_chars: usize,
    pub languages: Vec<String>,
    pub default_languages: Vec<String>,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
    pub sheet_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// What a single failed cell translation does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    Abort,
    KeepOriginal,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "xlsx-translator".to_string(),
            bind_addr: "0.0.0.0".to_string(),
            port: 9527,
            max_upload_mb: 25,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_seconds: 30,
            max_chars: 5000,
            languages: ["de", "fr", "es", "it", "zh", "ja", "pl"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_languages: vec!["de".to_string()],
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "translated.xlsx".to_string(),
            sheet_prefix: "File_".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> crate::utils::errors::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::utils::errors::XlsxTranslatorError::ConfigError(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::utils::errors::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::utils::errors::XlsxTranslatorError::ConfigError(e.to_string()))
    }

    pub fn load_or_default(path: Option<&str>) -> Self {
        if let Some(p) = path {
            Self::load_from_file(p).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_offer_the_fixed_language_list() {
        let config = AppConfig::default();
        assert_eq!(
            config.translation.languages,
            vec!["de", "fr", "es", "it", "zh", "ja", "pl"]
        );
        assert_eq!(config.translation.default_languages, vec!["de"]);
        assert_eq!(config.translation.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.output.sheet_prefix, "File_");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [translation]
            failure_policy = "keep_original"
            default_languages = ["fr", "es"]

            [output]
            file_name = "Polish_translation.xlsx"
            "#,
        )
        .unwrap();

        assert_eq!(config.translation.failure_policy, FailurePolicy::KeepOriginal);
        assert_eq!(config.translation.default_languages, vec!["fr", "es"]);
        assert_eq!(config.translation.max_chars, 5000);
        assert_eq!(config.output.file_name, "Polish_translation.xlsx");
        assert_eq!(config.output.sheet_prefix, "File_");
        assert_eq!(config.server.port, 9527);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = AppConfig::from_toml("server = 3").unwrap_err();
        assert!(matches!(
            err,
            crate::utils::errors::XlsxTranslatorError::ConfigError(_)
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default(Some("/nonexistent/config.toml"));
        assert_eq!(config.server.name, "xlsx-translator");
    }
}
