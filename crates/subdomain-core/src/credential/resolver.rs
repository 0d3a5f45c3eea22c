//! API key resolution
//!
//! Order of precedence:
//! 1. a key given explicitly for this invocation (never persisted)
//! 2. the key stored in the config file
//! 3. a new key requested from the API, which is then persisted
//!
//! The third step is what makes the very first command of a fresh install
//! work without any setup.

use tracing::{debug, info, warn};

use super::types::{ApiKey, KeySource, ResolvedKey};
use crate::client::SubdomainApi;
use crate::config::{Config, ConfigStore};
use crate::error::Result;

/// Pick the API key for a command, provisioning one if needed.
///
/// `config` is the document loaded at startup; it is updated in place when a
/// key gets provisioned. A failed write of the new key is logged and does not
/// fail the command.
pub async fn resolve_key(
    explicit: Option<&str>,
    config: &mut Config,
    store: &ConfigStore,
    api: &dyn SubdomainApi,
) -> Result<ResolvedKey> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        debug!("Using API key passed on the command line");
        return Ok(ResolvedKey {
            key: ApiKey::new(key),
            source: KeySource::Explicit,
        });
    }

    if let Some(key) = config.api_key() {
        debug!("Using API key from {:?}", store.path());
        return Ok(ResolvedKey {
            key: ApiKey::new(key),
            source: KeySource::Stored,
        });
    }

    info!("No API key stored, requesting a new one");
    let key = api.create_key().await?;
    if let Err(e) = store_key(&key, config, store).await {
        warn!("{}; the new key will not be remembered", e);
    }

    Ok(ResolvedKey {
        key,
        source: KeySource::Provisioned,
    })
}

/// Record `key` in `config` and write it out
pub async fn store_key(key: &ApiKey, config: &mut Config, store: &ConfigStore) -> Result<()> {
    config.api_key = Some(key.expose().to_string());
    store.save(config).await?;

    info!("Stored API key {} in {:?}", key.prefix(), store.path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{SubdomainRecord, SubdomainSpec};
    use crate::config::CONFIG_FILE_NAME;
    use crate::error::CoreError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// API double that only knows how to hand out keys
    #[derive(Default)]
    struct FakeApi {
        created: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SubdomainApi for FakeApi {
        async fn create_key(&self) -> Result<ApiKey> {
            if self.fail {
                return Err(CoreError::Api("key creation disabled".to_string()));
            }
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(ApiKey::new(format!("generated-{}", n)))
        }

        async fn key_info(&self, _key: &ApiKey) -> Result<Value> {
            unimplemented!()
        }

        async fn delete_key(&self, _key: &ApiKey) -> Result<Value> {
            unimplemented!()
        }

        async fn create_subdomain(&self, _key: &ApiKey, _spec: &SubdomainSpec) -> Result<Value> {
            unimplemented!()
        }

        async fn update_subdomain(&self, _key: &ApiKey, _spec: &SubdomainSpec) -> Result<Value> {
            unimplemented!()
        }

        async fn delete_subdomain(&self, _key: &ApiKey, _name: &str) -> Result<Value> {
            unimplemented!()
        }

        async fn list_subdomains(&self, _key: &ApiKey) -> Result<Vec<SubdomainRecord>> {
            unimplemented!()
        }
    }

    fn test_store(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(CONFIG_FILE_NAME))
    }

    #[tokio::test]
    async fn test_explicit_key_wins_and_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let api = FakeApi::default();
        let mut config = Config::with_api_key("stored");

        let resolved = resolve_key(Some("explicit"), &mut config, &store, &api)
            .await
            .unwrap();

        assert_eq!(resolved.source, KeySource::Explicit);
        assert_eq!(resolved.key.expose(), "explicit");
        assert_eq!(config.api_key(), Some("stored"));
        assert!(!store.path().exists());
        assert_eq!(api.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stored_key_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let api = FakeApi::default();
        let mut config = Config::with_api_key("stored");

        let resolved = resolve_key(None, &mut config, &store, &api).await.unwrap();

        assert_eq!(resolved.source, KeySource::Stored);
        assert_eq!(resolved.key.expose(), "stored");
        assert_eq!(api.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_provisioned_once_and_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let api = FakeApi::default();
        let mut config = store.load().await.unwrap();

        let first = resolve_key(None, &mut config, &store, &api).await.unwrap();
        assert!(first.is_provisioned());
        assert_eq!(first.key.expose(), "generated-1");
        assert_eq!(store.load().await.unwrap().api_key(), Some("generated-1"));

        // The same config now carries the key, so nothing new is created
        let second = resolve_key(None, &mut config, &store, &api).await.unwrap();
        assert_eq!(second.source, KeySource::Stored);
        assert_eq!(second.key.expose(), "generated-1");
        assert_eq!(api.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_stored_key_counts_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let api = FakeApi::default();
        let mut config = Config::with_api_key("");

        let resolved = resolve_key(Some(""), &mut config, &store, &api).await.unwrap();

        assert!(resolved.is_provisioned());
        assert_eq!(api.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provisioning_failure_leaves_config_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let api = FakeApi {
            fail: true,
            ..Default::default()
        };
        let mut config = Config::default();

        let err = resolve_key(None, &mut config, &store, &api).await.unwrap_err();

        assert!(matches!(err, CoreError::Api(_)));
        assert!(config.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_provisioned_key_survives_failed_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join("missing").join(CONFIG_FILE_NAME));
        let api = FakeApi::default();
        let mut config = Config::default();

        let resolved = resolve_key(None, &mut config, &store, &api).await.unwrap();

        assert!(resolved.is_provisioned());
        assert_eq!(resolved.key.expose(), "generated-1");
    }
}
