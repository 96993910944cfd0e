//! Configuration of the path-string layer of a router.

/// Configuration for turning path strings into fragments and back.
///
/// Only the string layer is affected; the compiled endpoint is shared
/// between routers with different configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    /// Prefix of every routed path, such as `/app`.
    ///
    /// Written paths start with it. Incoming paths that do not start with it
    /// match nothing.
    /// Default: None
    pub base_path: Option<String>,

    /// Whether to drop `?query` and `#fragment` from incoming paths.
    ///
    /// Default: true
    pub strip_query: bool,

    /// Whether an incoming path may end with one extra `/`.
    ///
    /// Default: false
    pub ignore_trailing_slash: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            strip_query: true,
            ignore_trailing_slash: false,
        }
    }
}

impl RouterConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Enables or disables stripping of query and hash components.
    #[must_use]
    pub const fn with_strip_query(mut self, strip: bool) -> Self {
        self.strip_query = strip;
        self
    }

    /// Enables or disables tolerance of a trailing slash.
    #[must_use]
    pub const fn with_ignore_trailing_slash(mut self, ignore: bool) -> Self {
        self.ignore_trailing_slash = ignore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RouterConfig::default();
        assert!(config.base_path.is_none());
        assert!(config.strip_query);
        assert!(!config.ignore_trailing_slash);
    }

    #[test]
    fn builder_pattern() {
        let config = RouterConfig::new()
            .with_base_path("/app")
            .with_strip_query(false)
            .with_ignore_trailing_slash(true);

        assert_eq!(config.base_path.as_deref(), Some("/app"));
        assert!(!config.strip_query);
        assert!(config.ignore_trailing_slash);
    }
}
