//! Orders scanned puzzle URLs into the sequence that rebuilds the image.
//!
//! Puzzle slices are named with fixed-width alphabetic codes, so the right
//! order is the lexicographic order of a fixed-length URL suffix. Which
//! suffix depends on the naming convention, and the convention is recognized
//! by the character length of the first URL. Only the conventions listed in
//! the table are supported; anything else is an explicit error.

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// One recognized naming convention: URLs of `url_len` characters are sorted
/// by their last `key_len` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixConvention {
    pub name: String,
    pub url_len: usize,
    pub key_len: usize,
}

impl SuffixConvention {
    pub fn new(name: &str, url_len: usize, key_len: usize) -> Self {
        Self {
            name: name.to_string(),
            url_len,
            key_len,
        }
    }

    /// Sort key for `url`: its last `key_len` characters (the whole URL when shorter).
    pub fn key<'a>(&self, url: &'a str) -> &'a str {
        if self.key_len == 0 {
            return "";
        }
        match url.char_indices().rev().nth(self.key_len - 1) {
            Some((start, _)) => &url[start..],
            None => url,
        }
    }
}

/// Built-in conventions.
///
/// `animal`: `.../puzzle/a-baaa.jpg` on `code.google.com` (81 chars), keyed
/// on the file name. `place`: `.../puzzle/p-bbbb-baaa.jpg` (86 chars), keyed
/// on the second code word.
pub fn default_conventions() -> Vec<SuffixConvention> {
    vec![
        SuffixConvention::new("animal", 81, 10),
        SuffixConvention::new("place", 86, 8),
    ]
}

/// Sequencer bound to a convention table.
#[derive(Debug, Clone)]
pub struct Sequencer {
    conventions: Vec<SuffixConvention>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(default_conventions())
    }
}

impl Sequencer {
    pub fn new(conventions: Vec<SuffixConvention>) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &[SuffixConvention] {
        &self.conventions
    }

    /// Convention matching the character length of `url`, if any.
    pub fn recognize(&self, url: &str) -> Option<&SuffixConvention> {
        let len = url.chars().count();
        self.conventions.iter().find(|c| c.url_len == len)
    }

    /// Returns `urls` sorted by the suffix window of the convention the first
    /// URL matches. The sort is stable: equal keys keep scan order.
    pub fn sequence(&self, urls: &[String]) -> Result<Vec<String>, PuzzleError> {
        let first = urls.first().ok_or_else(|| PuzzleError::MalformedInput {
            path: "<url list>".into(),
            reason: "no puzzle URLs to sequence".to_string(),
        })?;
        let convention = self
            .recognize(first)
            .ok_or_else(|| PuzzleError::UnsupportedUrlFormat {
                url: first.clone(),
                len: first.chars().count(),
            })?;
        tracing::debug!(
            convention = %convention.name,
            key_len = convention.key_len,
            count = urls.len(),
            "sequencing puzzle urls"
        );

        let mut sorted = urls.to_vec();
        sorted.sort_by(|a, b| convention.key(a).cmp(convention.key(b)));
        Ok(sorted)
    }
}
