use crate::utils::error::{LendingError, Result};
use crate::utils::validation::{validate_non_empty, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub records_dir: String,
    pub extension: String,
    /// Write the label text of the original tool so older installs can
    /// keep reading the files.
    pub preserve_legacy_labels: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_dir: "clientes".to_string(),
            extension: "txt".to_string(),
            preserve_legacy_labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_prefix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_prefix: crate::domain::loan::DEFAULT_CURRENCY_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LendingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists. A missing file only falls back to
    /// defaults when the path was not asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if path.is_file() {
            tracing::debug!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }
        if explicit {
            return Err(LendingError::ConfigError {
                message: format!("configuration file {} does not exist", path.display()),
            });
        }
        tracing::debug!("No configuration at {}, using defaults", path.display());
        Ok(Self::default())
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LendingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LENDING_HOME})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let storage = &self.storage;
        validate_non_empty("storage.records_dir", &storage.records_dir).map_err(|e| {
            LendingError::ConfigError {
                message: e.to_string(),
            }
        })?;
        if storage.records_dir.contains('\0') {
            return Err(LendingError::ConfigError {
                message: "storage.records_dir contains null bytes".to_string(),
            });
        }

        let extension = storage.extension.as_str();
        if extension.is_empty()
            || !extension.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(LendingError::ConfigError {
                message: format!(
                    "storage.extension must be a plain file extension without a dot, found {:?}",
                    extension
                ),
            });
        }

        // An unreplaced ${VAR} means the environment variable was never set.
        if storage.records_dir.contains("${") {
            return Err(LendingError::ConfigError {
                message: format!(
                    "storage.records_dir references an unset environment variable: {}",
                    storage.records_dir
                ),
            });
        }
        Ok(())
    }
}
