use crate::core::{BirthDetailsRequest, CombineMode, FetchMode};
use crate::domain::model::DEFAULT_ENDPOINTS;
use crate::utils::error::{HoroscopeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ASTROLOGY_BASE_URL: &str = "https://json.astrologyapi.com/v1";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert astrologer. Explain birth horoscope data in a simple, spiritual, and positive way.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub astrology: AstrologyConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub birth: BirthDetailsRequest,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstrologyConfig {
    #[serde(default = "default_astrology_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub fetch_mode: FetchMode,
    #[serde(default)]
    pub combine: CombineMode,
}

fn default_astrology_base_url() -> String {
    DEFAULT_ASTROLOGY_BASE_URL.to_string()
}

fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect()
}

fn default_groq_base_url() -> String {
    DEFAULT_GROQ_BASE_URL.to_string()
}

fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

fn default_max_output_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for AstrologyConfig {
    fn default() -> Self {
        Self {
            base_url: default_astrology_base_url(),
            user_id: String::new(),
            api_key: String::new(),
            endpoints: default_endpoints(),
            timeout_seconds: None,
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: default_groq_base_url(),
            api_key: String::new(),
            model: default_groq_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            timeout_seconds: None,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HoroscopeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HoroscopeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Defaults plus credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the default config, filling credentials and overrides through
    /// `lookup`: `ASTROLOGY_USER_ID`, `ASTROLOGY_API_KEY`, `GROQ_API_KEY`,
    /// and optionally `ASTROLOGY_BASE_URL`, `GROQ_BASE_URL`, `GROQ_MODEL`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_id) = lookup("ASTROLOGY_USER_ID") {
            config.astrology.user_id = user_id;
        }
        if let Some(api_key) = lookup("ASTROLOGY_API_KEY") {
            config.astrology.api_key = api_key;
        }
        if let Some(base_url) = lookup("ASTROLOGY_BASE_URL") {
            config.astrology.base_url = base_url;
        }
        if let Some(api_key) = lookup("GROQ_API_KEY") {
            config.groq.api_key = api_key;
        }
        if let Some(base_url) = lookup("GROQ_BASE_URL") {
            config.groq.base_url = base_url;
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            config.groq.model = model;
        }

        config
    }

    /// 替換環境變數 (例如 ${API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HoroscopeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("astrology.base_url", &self.astrology.base_url)?;
        validation::validate_credential("astrology.user_id", &self.astrology.user_id)?;
        validation::validate_credential("astrology.api_key", &self.astrology.api_key)?;
        validation::validate_endpoint_names("astrology.endpoints", &self.astrology.endpoints)?;

        validation::validate_url("groq.base_url", &self.groq.base_url)?;
        validation::validate_credential("groq.api_key", &self.groq.api_key)?;
        validation::validate_non_empty_string("groq.model", &self.groq.model)?;
        validation::validate_positive_number(
            "groq.max_output_tokens",
            self.groq.max_output_tokens as usize,
            1,
        )?;
        validation::validate_range("groq.temperature", self.groq.temperature, 0.0, 2.0)?;

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// Keeps the first four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[astrology]
base_url = "https://astro.example.com/v1"
user_id = "604000"
api_key = "astro-secret"
endpoints = ["birth_details", "astro_details"]
timeout_seconds = 10

[groq]
api_key = "gsk_test"
model = "llama-3.1-8b-instant"
temperature = 0.2

[birth]
day = 1
month = 2
year = 1990
hour = 3
min = 4
lat = 51.5
lon = -0.12
tzone = 0.0

[pipeline]
fetch_mode = "concurrent"
combine = "labeled"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml_str(FULL_CONFIG).unwrap();

        assert_eq!(config.astrology.base_url, "https://astro.example.com/v1");
        assert_eq!(config.astrology.endpoints.len(), 2);
        assert_eq!(config.astrology.timeout_seconds, Some(10));
        assert_eq!(config.groq.model, "llama-3.1-8b-instant");
        assert_eq!(config.groq.max_output_tokens, 1000);
        assert_eq!(config.groq.base_url, DEFAULT_GROQ_BASE_URL);
        assert_eq!(config.birth.minute, 4);
        assert_eq!(config.birth.longitude, -0.12);
        assert_eq!(config.pipeline.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.pipeline.combine, CombineMode::Labeled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.astrology.base_url, DEFAULT_ASTROLOGY_BASE_URL);
        assert_eq!(
            config.astrology.endpoints,
            vec!["birth_details", "astro_details", "ghat_chakra"]
        );
        assert_eq!(config.groq.model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.groq.temperature, 0.7);
        assert_eq!(config.birth, BirthDetailsRequest::default());
        assert_eq!(config.pipeline.fetch_mode, FetchMode::Sequential);
        assert_eq!(config.pipeline.combine, CombineMode::Raw);

        // no credentials
        assert!(matches!(
            config.validate(),
            Err(HoroscopeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOROSCOPE_TEST_GROQ_KEY", "gsk_from_env");

        let config = AppConfig::from_toml_str(
            r#"
[groq]
api_key = "${HOROSCOPE_TEST_GROQ_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.groq.api_key, "gsk_from_env");

        std::env::remove_var("HOROSCOPE_TEST_GROQ_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = FULL_CONFIG.replace("astro-secret", "${HOROSCOPE_TEST_NEVER_SET}");
        let config = AppConfig::from_toml_str(&toml_content).unwrap();

        assert_eq!(config.astrology.api_key, "${HOROSCOPE_TEST_NEVER_SET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_url = FULL_CONFIG.replace("https://astro.example.com/v1", "astro.example.com");
        assert!(AppConfig::from_toml_str(&bad_url).unwrap().validate().is_err());

        let bad_temperature = FULL_CONFIG.replace("temperature = 0.2", "temperature = 3.5");
        assert!(AppConfig::from_toml_str(&bad_temperature)
            .unwrap()
            .validate()
            .is_err());

        let bad_mode = FULL_CONFIG.replace("\"concurrent\"", "\"parallel\"");
        assert!(AppConfig::from_toml_str(&bad_mode).is_err());
    }

    #[test]
    fn test_from_lookup_fills_credentials() {
        let vars: HashMap<&str, &str> = [
            ("ASTROLOGY_USER_ID", "604000"),
            ("ASTROLOGY_API_KEY", "astro-secret"),
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_MODEL", "llama-3.3-70b-versatile"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.astrology.user_id, "604000");
        assert_eq!(config.groq.api_key, "gsk_test");
        assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
        assert_eq!(config.astrology.base_url, DEFAULT_ASTROLOGY_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.astrology.user_id, "604000");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("gsk_abcdef"), "gsk_****");
        assert_eq!(mask_secret(""), "<unset>");
    }
}
