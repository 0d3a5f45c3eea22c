//! # subdomain-core
//!
//! Core functionality for the subdomain CLI:
//! - JSON config file holding the API key, written with owner-only permissions
//! - API key resolution with implicit provisioning on first use
//! - HTTP client for the subdomain API and its `{success, result}` envelope

pub mod client;
pub mod config;
pub mod credential;
pub mod error;

pub use client::{ApiClient, SubdomainApi, SubdomainRecord, SubdomainSpec};
pub use config::{Config, ConfigStore};
pub use credential::{resolve_key, store_key, ApiKey, KeySource, ResolvedKey};
pub use error::{CoreError, Result};
