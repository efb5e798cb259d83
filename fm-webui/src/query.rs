//! Query-string parsing for URL fragments.
//!
//! A fragment such as `path=metric&name=cpu.load` is turned into a flat
//! `QueryMap`. The `path` key is reserved: the router uses it to pick a view.

use std::collections::HashMap;
use std::fmt;

/// Reserved key naming the route.
pub const PATH_KEY: &str = "path";

/// Flat key/value mapping parsed from a URL fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    params: HashMap<String, String>,
}

impl QueryMap {
    /// Parse a raw fragment. A leading `#` or `?` is ignored, values are
    /// percent-decoded and a repeated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let params = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { params }
    }

    /// The route name, if the fragment carried one.
    pub fn path(&self) -> Option<&str> {
        self.get(PATH_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over all pairs, sorted by key so output is stable.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<_> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter()
    }

    /// Builder-style insert, mostly useful in tests and view code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for QueryMap {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        f.write_str(&serializer.finish())
    }
}
