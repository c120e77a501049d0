//! A `Scheme` is an immutable, named, finite, indexable candidate
//! password sequence: `size()` gives its cardinality, `at(i)` computes
//! the `i`-th candidate. Schemes are pure functions of `i` — no I/O, no
//! interior mutable state — so a single `Arc<dyn Scheme>` can be shared
//! across every minion worker thread without synchronization.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemeError {
    #[error("index {index} out of range for scheme of size {size}")]
    InvalidIndex { index: u64, size: u64 },
    #[error("unknown scheme: {0}")]
    UnknownScheme(String),
}

pub trait Scheme: Send + Sync {
    /// Number of candidates in the space, `[0, size())`.
    fn size(&self) -> u64;

    /// The candidate at `i`. Must be a pure function of `i`.
    fn at(&self, i: u64) -> Result<String, SchemeError>;
}

/// `prefixNNN-DDDDDDD`: a 3-digit numeric prefix, a literal `-`, and a
/// 7-digit number, yielding `10^10` candidates.
pub struct PrefixNumericScheme;

const PREFIX_NUMERIC_SIZE: u64 = 10_000_000_000;
const SUFFIX_MODULUS: u64 = 10_000_000;

impl Scheme for PrefixNumericScheme {
    fn size(&self) -> u64 {
        PREFIX_NUMERIC_SIZE
    }

    fn at(&self, i: u64) -> Result<String, SchemeError> {
        if i >= PREFIX_NUMERIC_SIZE {
            return Err(SchemeError::InvalidIndex {
                index: i,
                size: PREFIX_NUMERIC_SIZE,
            });
        }
        let prefix = i / SUFFIX_MODULUS;
        let suffix = i % SUFFIX_MODULUS;
        Ok(format!("{prefix:03}-{suffix:07}"))
    }
}

/// Start-up map from scheme name to implementation. No reflection, no
/// dynamic registration — schemes are wired in once, at process start.
pub struct SchemeRegistry {
    schemes: HashMap<&'static str, Arc<dyn Scheme>>,
}

impl SchemeRegistry {
    pub fn with_builtins() -> Self {
        let mut schemes: HashMap<&'static str, Arc<dyn Scheme>> = HashMap::new();
        schemes.insert("prefix-numeric", Arc::new(PrefixNumericScheme));
        Self { schemes }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Scheme>, SchemeError> {
        self.schemes
            .get(name)
            .cloned()
            .ok_or_else(|| SchemeError::UnknownScheme(name.to_string()))
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_numeric_endpoints() {
        let s = PrefixNumericScheme;
        assert_eq!(s.size(), 10_000_000_000);
        assert_eq!(s.at(0).unwrap(), "000-0000000");
        assert_eq!(s.at(9_999_999).unwrap(), "000-9999999");
        assert_eq!(s.at(10_000_000).unwrap(), "001-0000000");
        assert_eq!(s.at(9_999_999_999).unwrap(), "999-9999999");
    }

    #[test]
    fn prefix_numeric_rejects_out_of_range() {
        let s = PrefixNumericScheme;
        let err = s.at(10_000_000_000).unwrap_err();
        assert_eq!(
            err,
            SchemeError::InvalidIndex {
                index: 10_000_000_000,
                size: 10_000_000_000
            }
        );
    }

    #[test]
    fn registry_resolves_builtin_and_rejects_unknown() {
        let reg = SchemeRegistry::with_builtins();
        let scheme = reg.get("prefix-numeric").unwrap();
        assert_eq!(scheme.at(0).unwrap(), "000-0000000");
        assert!(matches!(
            reg.get("no-such-scheme"),
            Err(SchemeError::UnknownScheme(_))
        ));
    }
}
