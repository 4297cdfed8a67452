//! Key Pattern Module
//!
//! Glob-like wildcard matching over cache keys. `*` matches any run of
//! characters (including none); everything else matches literally.

use regex::Regex;

use crate::cache::MAX_PATTERN_LENGTH;
use crate::error::{CacheError, Result};

// == Key Pattern ==
/// A compiled wildcard pattern, anchored at both ends.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    // == Compile ==
    /// Compiles a wildcard pattern such as `listings:*`.
    ///
    /// Fails on an empty pattern, an over-long pattern, or one the regex
    /// engine refuses to build.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(CacheError::InvalidPattern(
                "Pattern cannot be empty".to_string(),
            ));
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(CacheError::InvalidPattern(format!(
                "Pattern exceeds maximum length of {} bytes",
                MAX_PATTERN_LENGTH
            )));
        }

        let translated = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("^(?s:{})$", translated))
            .map_err(|e| CacheError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true when `key` matches the whole pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
