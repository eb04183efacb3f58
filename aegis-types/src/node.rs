//! Node identity: where an appliance lives and how to log into it.

use crate::Error;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A single appliance: its base URL and the shared secret used to open a
/// session against its HTTP API.
///
/// Immutable after construction. Decoded from a `<url>|<secret>` string,
/// which is how nodes are written in configuration input. Deliberately not
/// serializable: the secret must not leak through derived encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    base_url: Url,
    secret: String,
}

impl Node {
    /// Creates a node from an already-parsed URL and secret.
    ///
    /// Fails for URLs that cannot carry a path (e.g. `data:` URLs), since
    /// every API request is addressed below `<base>/api/`.
    pub fn new(base_url: Url, secret: impl Into<String>) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::UnsupportedUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            secret: secret.into(),
        })
    }

    /// The node's base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared secret used to authenticate. Never printed by `Display`.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Builds the full URL for an API endpoint, e.g. `api_url("auth")` or
    /// `api_url("info/version")`. Any path prefix on the base URL is kept.
    pub fn api_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            // Checked at construction: the base URL can carry a path.
            let mut segments = url
                .path_segments_mut()
                .expect("base url validated at construction");
            segments.pop_if_empty().push("api");
            for segment in endpoint.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        url
    }
}

impl FromStr for Node {
    type Err = Error;

    /// Decodes `<url>|<secret>`. Exactly one separator is expected; the URL
    /// portion must parse as an absolute URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidFormat);
        }
        let base_url = Url::parse(parts[0])?;
        Self::new(base_url, parts[1])
    }
}

impl fmt::Display for Node {
    /// Prints the base URL only; the secret stays out of logs and errors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url)
    }
}
