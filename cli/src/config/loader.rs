//! CLI configuration loader for atelier
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./atelier.json or ./.atelier/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/atelier/config.json or the platform config dir
//! 4. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use atelier_core::config::{
    BackendConfig, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
    DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables checked for an API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Raw configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// API key (can be "env:VAR_NAME" for environment variable)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL (optional, uses the public endpoint if not specified)
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Directory searched instead of the process working directory
    working_dir: Option<PathBuf>,
    /// Directory searched instead of the user config directory
    config_home: Option<PathBuf>,
    /// Flag overrides
    api_key_override: Option<String>,
    base_url_override: Option<String>,
    text_model_override: Option<String>,
    image_model_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_config_home(mut self, dir: PathBuf) -> Self {
        self.config_home = Some(dir);
        self
    }

    /// Set API key override
    pub fn with_api_key_override(mut self, api_key: String) -> Self {
        self.api_key_override = Some(api_key);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set text model override
    pub fn with_text_model_override(mut self, model: String) -> Self {
        self.text_model_override = Some(model);
        self
    }

    /// Set image model override
    pub fn with_image_model_override(mut self, model: String) -> Self {
        self.image_model_override = Some(model);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<BackendConfig> {
        self.load_with_env(|name| std::env::var(name).ok()).await
    }

    /// Load with an explicit environment lookup
    pub async fn load_with_env<F>(&self, env: F) -> Result<BackendConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            let path = expand_path(override_path)?;
            self.load_from_path(&path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    path.display()
                )
            })?
        } else {
            self.search_and_load(&env).await?
        };

        // Step 2: Apply flag overrides
        if let Some(api_key) = &self.api_key_override {
            config.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(model) = &self.text_model_override {
            config.text_model = Some(model.clone());
        }
        if let Some(model) = &self.image_model_override {
            config.image_model = Some(model.clone());
        }

        // Step 3: Resolve to final backend config
        resolve_config(config, &env)
    }

    /// Search for config in priority order
    async fn search_and_load<F>(&self, env: &F) -> Result<RawConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg(env).await? {
            return Ok(config);
        }

        // 3. Environment variables only
        debug!("No config file found, using environment");
        Ok(raw_from_env(env))
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<RawConfig>> {
        let cwd = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        for candidate in [
            cwd.join("atelier.json"),
            cwd.join(".atelier").join("config.json"),
        ] {
            if candidate.exists() {
                return Ok(Some(self.load_file(&candidate).await?));
            }
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg<F>(&self, env: &F) -> Result<Option<RawConfig>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = self
            .config_home
            .clone()
            .or_else(|| env("XDG_CONFIG_HOME").map(PathBuf::from))
            .or_else(dirs::config_dir);

        if let Some(config_dir) = config_dir {
            let config_path = config_dir.join("atelier").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Expand `~` and environment variables in a user-supplied path
fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Build a raw config from environment variables only
fn raw_from_env<F>(env: &F) -> RawConfig
where
    F: Fn(&str) -> Option<String>,
{
    RawConfig {
        api_key: API_KEY_VARS.iter().find_map(|name| env(name)),
        base_url: env("ATELIER_BASE_URL"),
        text_model: env("ATELIER_TEXT_MODEL"),
        image_model: env("ATELIER_IMAGE_MODEL"),
        timeout_secs: None,
        headers: HashMap::new(),
    }
}

/// Resolve raw config to a validated BackendConfig
fn resolve_config<F>(config: RawConfig, env: &F) -> Result<BackendConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = config.api_key.ok_or_else(|| {
        anyhow!(
            "No API key configured. Create an atelier.json file or set {}",
            API_KEY_VARS.join(" or ")
        )
    })?;

    // Resolve API key (handle env: prefix)
    let api_key = match api_key.strip_prefix("env:") {
        Some(var_name) => env(var_name)
            .with_context(|| format!("Environment variable not found: {}", var_name))?,
        None => api_key,
    };

    let resolved = BackendConfig::new(api_key)
        .with_base_url(config.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
        .with_text_model(config.text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()))
        .with_image_model(
            config
                .image_model
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        )
        .with_timeout_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        .with_headers(config.headers);

    // Validate
    resolved
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn isolated_loader(dir: &TempDir) -> CliConfigLoader {
        CliConfigLoader::new()
            .with_working_dir(dir.path().to_path_buf())
            .with_config_home(dir.path().join("xdg"))
    }

    #[tokio::test]
    async fn test_working_dir_file_with_env_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("atelier.json"),
            r#"{ "api_key": "env:MY_KEY", "text_model": "gemini-1.5-pro" }"#,
        )
        .unwrap();

        let config = isolated_loader(&dir)
            .load_with_env(env_from(&[("MY_KEY", "secret")]))
            .await
            .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.text_model, "gemini-1.5-pro");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_dot_dir_and_flag_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".atelier")).unwrap();
        std::fs::write(
            dir.path().join(".atelier").join("config.json"),
            r#"{ "api_key": "file-key", "headers": { "x-goog-user-project": "p" } }"#,
        )
        .unwrap();

        let config = isolated_loader(&dir)
            .with_api_key_override("flag-key".to_string())
            .with_base_url_override("http://localhost:8080/v1beta".to_string())
            .load_with_env(env_from(&[]))
            .await
            .unwrap();

        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.headers.get("x-goog-user-project").map(String::as_str), Some("p"));
    }

    #[tokio::test]
    async fn test_config_home_is_searched() {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("xdg").join("atelier");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.json"),
            r#"{ "api_key": "xdg-key", "timeout_secs": 30 }"#,
        )
        .unwrap();

        let config = isolated_loader(&dir)
            .load_with_env(env_from(&[]))
            .await
            .unwrap();

        assert_eq!(config.api_key, "xdg-key");
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_environment_only() {
        let dir = TempDir::new().unwrap();
        let config = isolated_loader(&dir)
            .load_with_env(env_from(&[
                ("GOOGLE_API_KEY", "google-key"),
                ("ATELIER_IMAGE_MODEL", "imagen-4.0-generate-001"),
            ]))
            .await
            .unwrap();

        assert_eq!(config.api_key, "google-key");
        assert_eq!(config.image_model, "imagen-4.0-generate-001");

        let err = isolated_loader(&dir)
            .load_with_env(env_from(&[]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[tokio::test]
    async fn test_config_override_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{ "api_key": "dir-key" }"#).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load_with_env(env_from(&[]))
            .await
            .unwrap();
        assert_eq!(config.api_key, "dir-key");

        let missing = CliConfigLoader::new()
            .with_config_override(dir.path().join("nope.json"))
            .load_with_env(env_from(&[]))
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_invalid_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("atelier.json"),
            r#"{ "api_key": "k", "base_url": "ftp://example.com" }"#,
        )
        .unwrap();

        let err = isolated_loader(&dir)
            .load_with_env(env_from(&[]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
