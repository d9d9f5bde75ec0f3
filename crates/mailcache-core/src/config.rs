//! Cache configuration types.

/// Label used when none is configured.
pub const DEFAULT_LABEL: &str = "memory";

/// Cache configuration.
///
/// Only affects diagnostics: the cache's storage semantics are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Name attached to every log event, to tell caches of several accounts
    /// apart.
    pub label: String,
    /// Include full values (flags, envelopes, listings, sync states) in log
    /// events instead of just counts and sizes.
    pub log_values: bool,
}

impl CacheConfig {
    /// Creates a configuration with the given label and value logging off.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log_values: false,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::new()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

/// Builder for cache configuration.
#[derive(Debug, Clone, Default)]
pub struct CacheConfigBuilder {
    label: Option<String>,
    log_values: bool,
}

impl CacheConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Enables or disables logging of full values.
    #[must_use]
    pub const fn log_values(mut self, enabled: bool) -> Self {
        self.log_values = enabled;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> CacheConfig {
        CacheConfig {
            label: self.label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            log_values: self.log_values,
        }
    }
}
