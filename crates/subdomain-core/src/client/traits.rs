//! API trait definitions

use async_trait::async_trait;
use serde_json::Value;

use super::types::{SubdomainRecord, SubdomainSpec};
use crate::credential::ApiKey;
use crate::error::Result;

/// Operations exposed by the remote subdomain API
#[async_trait]
pub trait SubdomainApi: Send + Sync {
    /// Ask the API for a brand new key
    async fn create_key(&self) -> Result<ApiKey>;

    /// Server-side details about a key
    async fn key_info(&self, key: &ApiKey) -> Result<Value>;

    /// Revoke a key on the server
    async fn delete_key(&self, key: &ApiKey) -> Result<Value>;

    async fn create_subdomain(&self, key: &ApiKey, spec: &SubdomainSpec) -> Result<Value>;

    async fn update_subdomain(&self, key: &ApiKey, spec: &SubdomainSpec) -> Result<Value>;

    async fn delete_subdomain(&self, key: &ApiKey, name: &str) -> Result<Value>;

    async fn list_subdomains(&self, key: &ApiKey) -> Result<Vec<SubdomainRecord>>;
}
