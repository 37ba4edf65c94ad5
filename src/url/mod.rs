//! URL handling module for Website-Graph
//!
//! This module provides URL normalization and host extraction. Every URL that
//! becomes a graph node goes through [`normalize`] first, so equivalent
//! addresses compare equal.

mod domain;
mod normalize;

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{extract_host, same_host};
pub use normalize::{normalize, normalize_seed};

/// A canonical absolute http(s) URL, used as the graph's node key
///
/// Only constructed by the normalizer, so two values are equal exactly when
/// they name the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Normalizes an absolute URL string, rejecting non-http(s) input
    pub fn from_absolute(url: &str) -> Option<Self> {
        normalize(url, "")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses back into a `Url` for resolution against this page
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }

    /// The lowercase host of this URL
    pub fn host(&self) -> Option<String> {
        self.to_url().as_ref().and_then(extract_host)
    }

    /// Origin (`scheme://host[:port]`) used to locate robots.txt
    pub fn origin(&self) -> Option<String> {
        self.to_url()
            .map(|url| url.origin().ascii_serialization())
            .filter(|origin| origin != "null")
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedUrl {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<NormalizedUrl> for String {
    fn from(url: NormalizedUrl) -> Self {
        url.0
    }
}
