/*!
 * Memoisation of token streams.
 *
 * Tokenization is a pure function of the verse groups, the tradition and the
 * boundary flag, so its output can be reused across tradition toggles and
 * page-size changes. Entries are keyed by a SHA-256 fingerprint of the groups.
 */

use log::{debug, warn};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::text::document::{Tradition, VerseGroup};
use crate::text::tokenizer::{Token, Tokenizer};

/// Cache key combining the content fingerprint with the tokenizer inputs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// SHA-256 of the serialized groups
    fingerprint: String,

    /// Position of the first group in the effective list
    first_position: usize,

    /// Tradition the text was resolved for
    tradition: Tradition,

    /// Whether group markers were emitted
    include_group_boundaries: bool,
}

/// Thread-safe cache of token streams
pub struct TokenCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, Vec<Token>>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TokenCache {
    /// Create a new token cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Tokenize a group list, reusing a previous result for identical input.
    pub fn tokenize(
        &self,
        groups: &[VerseGroup],
        tradition: Tradition,
        include_group_boundaries: bool,
    ) -> Vec<Token> {
        self.get_or_insert_with(groups, 0, tradition, include_group_boundaries, || {
            Tokenizer::tokenize(groups, tradition, include_group_boundaries)
        })
    }

    /// Tokenize a single group at `position`, reusing a previous result.
    pub fn tokenize_group(
        &self,
        group: &VerseGroup,
        position: usize,
        tradition: Tradition,
        include_group_boundary: bool,
    ) -> Vec<Token> {
        self.get_or_insert_with(
            std::slice::from_ref(group),
            position,
            tradition,
            include_group_boundary,
            || Tokenizer::tokenize_group(group, position, tradition, include_group_boundary),
        )
    }

    fn get_or_insert_with<F>(
        &self,
        groups: &[VerseGroup],
        first_position: usize,
        tradition: Tradition,
        include_group_boundaries: bool,
        tokenize: F,
    ) -> Vec<Token>
    where
        F: FnOnce() -> Vec<Token>,
    {
        if !self.enabled {
            return tokenize();
        }

        let Some(fingerprint) = fingerprint(groups) else {
            return tokenize();
        };
        let key = CacheKey {
            fingerprint,
            first_position,
            tradition,
            include_group_boundaries,
        };

        if let Some(tokens) = self.cache.read().get(&key) {
            *self.hits.write() += 1;
            debug!("Token cache hit for {}… ({})", &key.fingerprint[..12], tradition);
            return tokens.clone();
        }

        *self.misses.write() += 1;
        debug!("Token cache miss for {}… ({})", &key.fingerprint[..12], tradition);

        let tokens = tokenize();
        self.cache.write().insert(key, tokens.clone());
        tokens
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Token cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Enable or disable the cache
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for TokenCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

/// Hex SHA-256 of the serialized groups.
fn fingerprint(groups: &[VerseGroup]) -> Option<String> {
    match serde_json::to_vec(groups) {
        Ok(bytes) => Some(format!("{:x}", Sha256::digest(&bytes))),
        Err(e) => {
            warn!("Could not fingerprint verse groups, skipping cache: {}", e);
            None
        }
    }
}
