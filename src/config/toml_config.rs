use crate::config::{ContentSettings, BASE_URL, DEFAULT_SETTINGS_COLLECTION};
use crate::core::ConfigProvider;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_SITE_URL: &str = "https://wheelpowerautoshop.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_settings_collection")]
    pub settings_collection: String,
    pub timeout_seconds: Option<u64>,
}

/// Static site generation settings consumed by the page build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_true")]
    pub sitemap: bool,
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_settings_collection() -> String {
    DEFAULT_SETTINGS_COLLECTION.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            settings_collection: default_settings_collection(),
            timeout_seconds: None,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            sitemap: true,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIRECTUS_URL})
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<regex::Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            regex::Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(timeout) = self.content.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "content.timeout_seconds",
                timeout,
                1,
            )?;
        }
        self.content_settings().validate()?;
        crate::utils::validation::validate_url("site.url", &self.site.url)
    }

    pub fn content_settings(&self) -> ContentSettings {
        ContentSettings {
            base_url: self.content.base_url.clone(),
            settings_collection: self.content.settings_collection.clone(),
            timeout: self.content.timeout_seconds.map(Duration::from_secs),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.content.base_url
    }

    fn settings_collection(&self) -> &str {
        &self.content.settings_collection
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.content.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[content]
base_url = "http://localhost:8055"
settings_collection = "settings"
timeout_seconds = 15

[site]
url = "https://staging.wheelpowerautoshop.com"
sitemap = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "http://localhost:8055");
        assert_eq!(config.settings_collection(), "settings");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.site.url, "https://staging.wheelpowerautoshop.com");
        assert!(!config.site.sitemap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.base_url(), BASE_URL);
        assert_eq!(config.settings_collection(), "site_settings");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.site.url, DEFAULT_SITE_URL);
        assert!(config.site.sitemap);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WHEELPOWER_TEST_DIRECTUS_URL", "https://cms.test.local");

        let toml_content = r#"
[content]
base_url = "${WHEELPOWER_TEST_DIRECTUS_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.content.base_url, "https://cms.test.local");

        std::env::remove_var("WHEELPOWER_TEST_DIRECTUS_URL");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[content]
base_url = "${WHEELPOWER_TEST_SURELY_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.content.base_url, "${WHEELPOWER_TEST_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[content]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let zero_timeout = TomlConfig::from_toml_str("[content]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[content\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ContentError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[content]
base_url = "https://cms.example.com"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://cms.example.com");
    }
}
