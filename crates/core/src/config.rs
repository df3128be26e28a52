use std::time::Duration;

use crate::error::CoreError;
use crate::types::PagingKey;

/// Key of the first page in the article sequence.
pub const DEFAULT_STARTING_KEY: PagingKey = 0;

/// Simulated latency for non-initial loads.
pub const DEFAULT_LOAD_DELAY_MILLIS: u64 = 3_000;

/// Article source configuration.
///
/// Defaults match the demo feed; override via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSourceConfig {
    /// Lowest valid paging key; also the key of the first page.
    pub starting_key: PagingKey,
    /// How long non-initial loads wait before returning.
    pub load_delay: Duration,
}

impl Default for ArticleSourceConfig {
    fn default() -> Self {
        Self {
            starting_key: DEFAULT_STARTING_KEY,
            load_delay: Duration::from_millis(DEFAULT_LOAD_DELAY_MILLIS),
        }
    }
}

impl ArticleSourceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `PAGING_STARTING_KEY`  | `0`     |
    /// | `PAGING_LOAD_DELAY_MS` | `3000`  |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let starting_key = parse_var(&lookup, "PAGING_STARTING_KEY")?.unwrap_or(DEFAULT_STARTING_KEY);

        let load_delay_ms: u64 =
            parse_var(&lookup, "PAGING_LOAD_DELAY_MS")?.unwrap_or(DEFAULT_LOAD_DELAY_MILLIS);

        Ok(Self {
            starting_key,
            load_delay: Duration::from_millis(load_delay_ms),
        })
    }

    /// Clamp `key` so it never falls below the starting key.
    pub fn ensure_valid_key(&self, key: PagingKey) -> PagingKey {
        key.max(self.starting_key)
    }
}

/// Parse an optional variable, naming it in the error when malformed.
pub fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, CoreError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{name} must be a valid number, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ArticleSourceConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, ArticleSourceConfig::default());
        assert_eq!(config.starting_key, 0);
        assert_eq!(config.load_delay, Duration::from_millis(3_000));
    }

    #[test]
    fn overrides_from_vars() {
        let config = ArticleSourceConfig::from_vars(vars(&[
            ("PAGING_STARTING_KEY", "100"),
            ("PAGING_LOAD_DELAY_MS", " 250 "),
        ]))
        .unwrap();

        assert_eq!(config.starting_key, 100);
        assert_eq!(config.load_delay, Duration::from_millis(250));
    }

    #[test]
    fn zero_delay_is_allowed() {
        let config = ArticleSourceConfig::from_vars(vars(&[("PAGING_LOAD_DELAY_MS", "0")])).unwrap();
        assert!(config.load_delay.is_zero());
    }

    #[test]
    fn malformed_value_names_the_variable() {
        let err = ArticleSourceConfig::from_vars(vars(&[("PAGING_LOAD_DELAY_MS", "soon")])).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("PAGING_LOAD_DELAY_MS"));
    }

    #[test]
    fn negative_delay_is_rejected() {
        let result = ArticleSourceConfig::from_vars(vars(&[("PAGING_LOAD_DELAY_MS", "-5")]));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn ensure_valid_key_clamps_to_starting_key() {
        let config = ArticleSourceConfig::default();
        assert_eq!(config.ensure_valid_key(-15), 0);
        assert_eq!(config.ensure_valid_key(0), 0);
        assert_eq!(config.ensure_valid_key(7), 7);
    }
}
