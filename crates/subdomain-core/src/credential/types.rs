//! Credential type definitions

use zeroize::{Zeroize, ZeroizeOnDrop};

/// API key value - automatically zeroed when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the key value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// First 8 characters for display (e.g., "sk-proj-...")
    pub fn prefix(&self) -> String {
        let end = self
            .value
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len());
        format!("{}...", &self.value[..end])
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Passed on the command line; never persisted
    Explicit,
    /// Read from the local config file
    Stored,
    /// Freshly created by the API and written to the config file
    Provisioned,
}

/// Outcome of key resolution
#[derive(Debug, Clone)]
pub struct ResolvedKey {
    pub key: ApiKey,
    pub source: KeySource,
}

impl ResolvedKey {
    pub fn is_provisioned(&self) -> bool {
        self.source == KeySource::Provisioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("sk-live-very-secret");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ApiKey::new("0123456789abcdef").prefix(), "01234567...");
        assert_eq!(ApiKey::new("short").prefix(), "short...");
    }
}
