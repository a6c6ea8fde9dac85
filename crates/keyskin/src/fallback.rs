//! Fallback chains between color keys.
//!
//! A theme can leave keys out of a color scheme and instead declare, in its
//! `fallback_colors` section, which other key to use. Chains can be several
//! hops long and nothing stops a theme from writing a cycle, so traversal is
//! capped at twice the number of declared fallbacks.

use std::collections::BTreeMap;

use crate::scheme::ColorScheme;
use crate::value::{ConfigMap, ConfigValue};

/// Mapping from a color key to the key to try next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackChain {
    links: BTreeMap<String, String>,
}

impl FallbackChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link, returning `self` for chaining.
    pub fn link(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.links.insert(from.into(), to.into());
        self
    }

    /// Builds a chain from a parsed `fallback_colors` section.
    ///
    /// Targets that are not scalars are skipped.
    pub fn from_config(map: &ConfigMap) -> Self {
        let links = map
            .iter()
            .filter_map(|(key, target)| match target.to_text() {
                Some(target) => Some((key.clone(), target)),
                None => {
                    tracing::warn!(key = %key, "ignoring non-scalar fallback target");
                    None
                }
            })
            .collect();
        Self { links }
    }

    /// Returns the next key for `key`, if one is declared.
    pub fn next(&self, key: &str) -> Option<&str> {
        self.links.get(key).map(String::as_str)
    }

    /// Iterates over every key that declares a fallback.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Maximum number of hops [`resolve`] will follow.
    pub fn hop_limit(&self) -> usize {
        self.links.len() * 2
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FallbackChain {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            links: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolves `key` against `scheme`, following `chain` when the key is absent.
///
/// Returns the first literal found. Returns `None` when a key is missing from
/// both the scheme and the chain, or when more than
/// [`hop_limit`](FallbackChain::hop_limit) hops have been taken.
pub fn resolve<'a>(
    scheme: &'a ColorScheme,
    chain: &FallbackChain,
    key: &str,
) -> Option<&'a ConfigValue> {
    let limit = chain.hop_limit();
    let mut current = key;
    let mut hops = 0;

    loop {
        if let Some(value) = scheme.get(current) {
            return Some(value);
        }
        let next = chain.next(current)?;
        if hops == limit {
            tracing::debug!(key, limit, "fallback hop limit reached");
            return None;
        }
        hops += 1;
        current = next;
    }
}
