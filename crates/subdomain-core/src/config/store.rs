//! JSON-backed credential store
//!
//! The whole local state of the CLI is one small JSON document in the user's
//! home directory. It is read once per invocation and handed around as a
//! [`Config`] value; writes replace the file atomically with owner-only
//! permissions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};

/// File name of the config document inside the home directory
pub const CONFIG_FILE_NAME: &str = ".subdomain.json";

/// Persisted configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Stored API key, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Fields written by something else; kept so a rewrite does not drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// Config holding only the given key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            extra: Map::new(),
        }
    }

    /// Stored key, ignoring empty strings
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.extra.is_empty()
    }
}

/// Reads and writes the config document at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location (`$HOME/.subdomain.json`)
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve the default config path from the home directory
    pub fn default_path() -> Result<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
            .ok_or(CoreError::HomeDirNotFound)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config document.
    ///
    /// A missing file is an empty config. An unreadable or unparsable file is
    /// reported as [`CoreError::ConfigRead`].
    pub async fn load(&self) -> Result<Config> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {:?}, using empty config", self.path);
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(CoreError::ConfigRead {
                    path: self.path.clone(),
                    source: e.into(),
                })
            }
        };

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| CoreError::ConfigRead {
                path: self.path.clone(),
                source: e.into(),
            })?;

        debug!("Loaded config from {:?}", self.path);
        Ok(config)
    }

    /// Load the config document, falling back to an empty one on a
    /// recoverable error
    pub async fn load_or_default(&self) -> Config {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; continuing with an empty config", e);
                Config::default()
            }
        }
    }

    /// Write the config document with owner-only read/write permission
    pub async fn save(&self, config: &Config) -> Result<()> {
        let contents = serde_json::to_string_pretty(config)
            .map_err(|e| self.write_error(std::io::Error::other(e)))?;

        // Write atomically using a per-process temp file
        let temp_path = self
            .path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        let written = match write_private(&temp_path, contents.as_bytes()).await {
            Ok(()) => tokio::fs::rename(&temp_path, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // The temp file holds the key in clear text
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.write_error(e));
        }

        debug!("Saved config to {:?}", self.path);
        Ok(())
    }

    /// Drop the stored key. The file is removed once nothing else is left
    /// in it.
    pub async fn clear(&self, config: &mut Config) -> Result<()> {
        config.api_key = None;

        if !config.is_empty() {
            return self.save(config).await;
        }

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed config file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(e)),
        }
    }

    fn write_error(&self, source: std::io::Error) -> CoreError {
        CoreError::ConfigWrite {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    // mode() only applies on creation; a leftover temp file keeps its old bits
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(not(unix))]
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(path, contents).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(CONFIG_FILE_NAME))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let config = store.load().await.unwrap();
        assert!(config.is_empty());
        assert_eq!(config.api_key(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.save(&Config::with_api_key("abc123")).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let json: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json, serde_json::json!({ "apiKey": "abc123" }));

        let config = store.load().await.unwrap();
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_unparsable_file_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CoreError::ConfigRead { .. }));
        assert!(err.is_recoverable());
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<serde_json::Error>().is_some());

        let config = store.load_or_default().await;
        assert!(config.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        std::fs::write(
            store.path(),
            r#"{ "apiKey": "k-1", "theme": "dark", "nested": { "a": [1, 2] } }"#,
        )
        .unwrap();

        let first = store.load().await.unwrap();
        store.save(&first).await.unwrap();
        let written = std::fs::read_to_string(store.path()).unwrap();

        let second = store.load().await.unwrap();
        store.save(&second).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(written, std::fs::read_to_string(store.path()).unwrap());
        assert_eq!(second.extra.get("theme"), Some(&Value::from("dark")));
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.save(&Config::with_api_key("old")).await.unwrap();
        let mut config = store.load().await.unwrap();
        config.api_key = Some("new".to_string());
        store.save(&config).await.unwrap();

        assert_eq!(store.load().await.unwrap().api_key(), Some("new"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        std::fs::write(store.path(), "{}").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Config::with_api_key("secret")).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save(&Config::with_api_key("abc")).await.unwrap();

        let mut config = store.load().await.unwrap();
        store.clear(&mut config).await.unwrap();

        assert!(!store.path().exists());
        assert_eq!(config.api_key(), None);
        // Clearing twice is fine
        store.clear(&mut config).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_keeps_other_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        std::fs::write(store.path(), r#"{ "apiKey": "abc", "theme": "dark" }"#).unwrap();

        let mut config = store.load().await.unwrap();
        store.clear(&mut config).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.api_key(), None);
        assert_eq!(reloaded.extra.get("theme"), Some(&Value::from("dark")));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails_recoverably() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join("missing").join(CONFIG_FILE_NAME));

        let err = store.save(&Config::with_api_key("abc")).await.unwrap_err();
        assert!(matches!(err, CoreError::ConfigWrite { .. }));
        assert!(err.is_recoverable());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        // A directory in place of the file makes the final rename fail
        std::fs::create_dir(store.path()).unwrap();

        let err = store.save(&Config::with_api_key("secret-key")).await.unwrap_err();
        assert!(matches!(err, CoreError::ConfigWrite { .. }));

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(CONFIG_FILE_NAME)]);
    }
}
