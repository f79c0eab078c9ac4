//! Environment-driven configuration for the demonstration binary

use std::{env, str::FromStr};

use thiserror::Error;

/// Variable holding the RNG seed
pub const SEED_VAR: &str = "CHAINMAP_SEED";
/// Variable holding the number of generated entries
pub const ENTRIES_VAR: &str = "CHAINMAP_ENTRIES";
/// Variable holding the length of generated values
pub const VALUE_LEN_VAR: &str = "CHAINMAP_VALUE_LEN";

/// Errors raised while reading [`DemoConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but does not parse as an unsigned integer
    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidNumber {
        /// Name of the offending variable
        var: &'static str,
        /// Raw value found in the environment
        value: String,
    },

    /// The variable parses but lies below its allowed minimum
    #[error("{var} must be at least {min}, got {value}")]
    OutOfRange {
        /// Name of the offending variable
        var: &'static str,
        /// Parsed value
        value: usize,
        /// Smallest accepted value
        min: usize,
    },
}

/// Settings of the demonstration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// Seed for the value generator, so runs are reproducible
    pub seed: u64,
    /// Number of keys inserted before the update/remove steps
    pub entries: usize,
    /// Length of every generated value
    pub value_len: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { seed: 42, entries: 10, value_len: 10 }
    }
}

impl DemoConfig {
    /// Reads the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for unset variables
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = parse_var(&lookup, SEED_VAR)?.unwrap_or(defaults.seed);
        let entries = parse_var(&lookup, ENTRIES_VAR)?.unwrap_or(defaults.entries);
        let value_len = parse_var(&lookup, VALUE_LEN_VAR)?.unwrap_or(defaults.value_len);

        if value_len < 1 {
            return Err(ConfigError::OutOfRange { var: VALUE_LEN_VAR, value: value_len, min: 1 });
        }

        Ok(Self { seed, entries, value_len })
    }
}

/// Parses `var` if it is set; surrounding whitespace is ignored
fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse().map_err(|_| ConfigError::InvalidNumber { var, value: raw.clone() })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DemoConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            (SEED_VAR, "7"),
            (ENTRIES_VAR, " 25 "),
            (VALUE_LEN_VAR, "4"),
        ]))
        .unwrap();

        assert_eq!(config, DemoConfig { seed: 7, entries: 25, value_len: 4 });
    }

    #[test]
    fn test_rejects_garbage() {
        let err = DemoConfig::from_lookup(lookup_from(&[(ENTRIES_VAR, "ten")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidNumber { var: ENTRIES_VAR, value: "ten".to_string() });
        assert_eq!(err.to_string(), "CHAINMAP_ENTRIES must be an unsigned integer, got \"ten\"");
    }

    #[test]
    fn test_rejects_zero_value_len() {
        let err = DemoConfig::from_lookup(lookup_from(&[(VALUE_LEN_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::OutOfRange { var: VALUE_LEN_VAR, value: 0, min: 1 });
    }
}
