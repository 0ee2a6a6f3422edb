//! Link validity oracle.
//!
//! A link is accepted when it parses as an absolute URL and some handler is
//! registered for its scheme. Unregistered schemes are rejected even when the
//! URL itself is well formed.

pub mod defaults;

use std::collections::BTreeSet;

pub use defaults::DEFAULT_SCHEMES;
pub use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Invalid URL scheme: {0:?}")]
    InvalidScheme(String),

    #[error("Scheme list is empty")]
    Empty,
}

/// Answers whether the host environment can open a parsed URL.
pub trait LinkOracle: Send + Sync {
    fn can_open(&self, url: &Url) -> bool;
}

/// Check `text` against `oracle`: syntactic parse first, then openability.
pub fn is_valid_link(text: &str, oracle: &dyn LinkOracle) -> bool {
    match Url::parse(text) {
        Ok(url) => {
            let ok = oracle.can_open(&url);
            tracing::debug!(scheme = url.scheme(), ok, "Checked link scheme");
            ok
        }
        Err(e) => {
            tracing::debug!(error = %e, "Link failed to parse");
            false
        }
    }
}

/// Registry of openable schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeRegistry {
    schemes: BTreeSet<String>,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self {
            schemes: DEFAULT_SCHEMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SchemeRegistry {
    /// Build a registry from scheme names; names are lowercased.
    pub fn new<I, S>(schemes: I) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for s in schemes {
            let s = s.as_ref().trim();
            if !is_valid_scheme(s) {
                return Err(OracleError::InvalidScheme(s.to_string()));
            }
            set.insert(s.to_ascii_lowercase());
        }
        if set.is_empty() {
            return Err(OracleError::Empty);
        }
        Ok(Self { schemes: set })
    }

    /// Parse a comma-separated list such as `"http, https, mailto"`.
    pub fn parse_list(list: &str) -> Result<Self, OracleError> {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.schemes.contains(&scheme.to_ascii_lowercase())
    }

    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(String::as_str)
    }
}

impl LinkOracle for SchemeRegistry {
    fn can_open(&self, url: &Url) -> bool {
        // `Url` already lowercases the scheme
        self.schemes.contains(url.scheme())
    }
}

/// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
