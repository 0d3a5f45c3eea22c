//! Per-invocation state shared by command handlers

use anyhow::Context as _;
use tracing::debug;

use subdomain_core::{resolve_key, ApiClient, Config, ConfigStore, ResolvedKey, SubdomainApi};

use crate::cli::Cli;

/// Everything a command needs, loaded once at startup
pub struct Context {
    pub store: ConfigStore,
    /// Config document as loaded at startup; handlers update it in place
    pub config: Config,
    pub api: Box<dyn SubdomainApi>,
    /// Key passed with `--key`, used instead of the stored one
    pub explicit_key: Option<String>,
}

impl Context {
    pub fn new(
        store: ConfigStore,
        config: Config,
        api: Box<dyn SubdomainApi>,
        explicit_key: Option<String>,
    ) -> Self {
        Self {
            store,
            config,
            api,
            explicit_key,
        }
    }

    /// Build the context from parsed arguments, reading the config file
    pub async fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let api_url = cli
            .api_url
            .as_deref()
            .context("no API URL configured; pass --api-url or set SUBDOMAIN_API_URL")?;
        let api = ApiClient::new(api_url)
            .with_context(|| format!("cannot use API URL {:?}", api_url))?;

        let store = match &cli.config {
            Some(path) => ConfigStore::new(path),
            None => ConfigStore::at_default_path()?,
        };
        debug!("Config file: {:?}, API: {}", store.path(), api.base_url());

        let config = store.load_or_default().await;
        Ok(Self::new(store, config, Box::new(api), cli.api_key.clone()))
    }

    /// Resolve the key for this invocation, provisioning one if none exists
    pub async fn resolve_key(&mut self) -> subdomain_core::Result<ResolvedKey> {
        resolve_key(
            self.explicit_key.as_deref(),
            &mut self.config,
            &self.store,
            self.api.as_ref(),
        )
        .await
    }
}
