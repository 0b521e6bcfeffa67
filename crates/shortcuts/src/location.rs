//! URL and query-string capability boundary.
//!
//! Responsibilities:
//! - Define the location capability the keybinding service consumes:
//!   current path, query parameters, navigation.
//! - Strip a configured base path from explore URLs.
//!
//! Non-responsibilities:
//! - Actual routing (the embedding application implements the trait).

use std::collections::BTreeMap;

use url::Url;

/// Ordered set of URL query parameters. Presence-only parameters (like
/// `kiosk`) carry an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlQuery(BTreeMap<String, String>);

impl UrlQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a parameter, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True if the parameter is present (with any value, including empty).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove a parameter, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// True if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for UrlQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Capability for reading and mutating the current location.
pub trait LocationService: Send + Sync {
    /// Current route path, e.g. `/d/abc/my-dashboard`.
    fn path(&self) -> String;

    /// Current query parameters.
    fn query(&self) -> UrlQuery;

    /// Replace the query parameters on the current path.
    fn set_query(&self, query: UrlQuery);

    /// Navigate to a path (optionally carrying its own query string).
    fn navigate(&self, path: &str);

    /// The shared base path prefix served under, e.g. `/gridview`.
    /// Defaults to none.
    fn base_path(&self) -> String {
        String::new()
    }

    /// Strip the base path from a URL, returning the in-app path and
    /// query. `None` when nothing usable remains.
    fn strip_base(&self, url: &str) -> Option<String> {
        strip_base_from_url(&self.base_path(), url)
    }
}

/// Reduce an absolute or relative URL to an in-app path, removing the
/// shared base path prefix. An empty result is reported as `None`.
pub fn strip_base_from_url(base_path: &str, url: &str) -> Option<String> {
    let path_and_query = match Url::parse(url) {
        Ok(parsed) => {
            let mut s = parsed.path().to_string();
            if let Some(q) = parsed.query() {
                s.push('?');
                s.push_str(q);
            }
            s
        }
        // not absolute; treat as an in-app path already
        Err(_) => url.to_string(),
    };

    let base = base_path.trim_end_matches('/');
    let stripped = if !base.is_empty() && path_and_query.starts_with(base) {
        path_and_query[base.len()..].to_string()
    } else {
        path_and_query
    };

    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}
