//! HTTP implementation of [`SubdomainApi`]
//!
//! Every call is a POST with its parameters in the query string and no body.
//! Responses share one envelope, `{ "success": bool, "result": ... }`, which
//! is unwrapped here so callers only ever see the payload or a [`CoreError`].
//! There is no timeout and no retry: a single attempt, fail fast.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::traits::SubdomainApi;
use super::types::{Envelope, ListResponse, SubdomainRecord, SubdomainSpec};
use crate::credential::ApiKey;
use crate::error::{CoreError, Result};

/// Body of calls whose payload lives in `result`
#[derive(Debug, Deserialize)]
struct ResultResponse {
    #[serde(default)]
    result: Value,
}

/// Client for the subdomain API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(Url::parse(base_url)?),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST to `endpoint` and unwrap the response envelope
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.base_url.join(endpoint)?;

        // Only parameter names are logged; values include the key
        debug!(
            "POST {} with params {:?}",
            url,
            params.iter().map(|(name, _)| *name).collect::<Vec<_>>()
        );

        let response = self.client.post(url).query(params).send().await?;

        let status = response.status();
        let body = response.text().await?;

        debug!("Response status: {}", status);

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => return Err(CoreError::Status { status, body }),
            Err(e) => return Err(CoreError::InvalidResponse(e.to_string())),
        };

        let envelope: Envelope = match serde_json::from_value(value.clone()) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(CoreError::Status { status, body }),
            Err(e) => return Err(CoreError::InvalidResponse(e.to_string())),
        };

        if !envelope.success {
            let message = envelope.message();
            warn!("{} rejected with status {}: {}", endpoint, status, message);
            return Err(CoreError::Api(message));
        }

        serde_json::from_value(value).map_err(|e| CoreError::InvalidResponse(e.to_string()))
    }

    async fn request_result(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let response: ResultResponse = self.request(endpoint, params).await?;
        Ok(response.result)
    }
}

#[async_trait]
impl SubdomainApi for ApiClient {
    async fn create_key(&self) -> Result<ApiKey> {
        match self.request_result("key/create", &[]).await? {
            Value::String(key) if !key.is_empty() => Ok(ApiKey::new(key)),
            other => Err(CoreError::InvalidResponse(format!(
                "expected a key string from key/create, got {}",
                other
            ))),
        }
    }

    async fn key_info(&self, key: &ApiKey) -> Result<Value> {
        self.request_result("key/info", &[("key", key.expose())]).await
    }

    async fn delete_key(&self, key: &ApiKey) -> Result<Value> {
        self.request_result("key/delete", &[("key", key.expose())]).await
    }

    async fn create_subdomain(&self, key: &ApiKey, spec: &SubdomainSpec) -> Result<Value> {
        self.request_result("subdomain/create", &spec_params(key, spec)).await
    }

    async fn update_subdomain(&self, key: &ApiKey, spec: &SubdomainSpec) -> Result<Value> {
        self.request_result("subdomain/update", &spec_params(key, spec)).await
    }

    async fn delete_subdomain(&self, key: &ApiKey, name: &str) -> Result<Value> {
        self.request_result(
            "subdomain/delete",
            &[("key", key.expose()), ("subdomain", name)],
        )
        .await
    }

    async fn list_subdomains(&self, key: &ApiKey) -> Result<Vec<SubdomainRecord>> {
        let response: ListResponse = self
            .request("subdomain/list", &[("key", key.expose())])
            .await?;
        Ok(response.subdomains)
    }
}

fn spec_params<'a>(key: &'a ApiKey, spec: &'a SubdomainSpec) -> [(&'static str, &'a str); 4] {
    [
        ("key", key.expose()),
        ("subdomain", spec.name.as_str()),
        ("type", spec.record_type.as_str()),
        ("value", spec.value.as_str()),
    ]
}

/// Endpoints are joined relative to the base, so its path must end in '/'
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
