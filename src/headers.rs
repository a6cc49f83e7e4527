use crate::constants::{defaults, header};
use indexmap::IndexMap;

/// Response headers in the order they were produced.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value);
        } else {
            self.headers.insert(name, value.into());
        }
    }

    pub(crate) fn push_opt<V: Into<String>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let value: String = value.into();
        let merged = merge_vary(self.headers.get(header::VARY).map(String::as_str), &value);
        match merged {
            Some(merged) => {
                self.headers.insert(header::VARY.to_string(), merged);
            }
            None => {
                self.headers.shift_remove(header::VARY);
            }
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Appends the comma-separated `incoming` tokens to `existing`, skipping
/// case-insensitive duplicates. Returns `None` when no token remains.
pub(crate) fn merge_vary(existing: Option<&str>, incoming: &str) -> Option<String> {
    let mut entries: Vec<&str> = Vec::new();
    let tokens = existing
        .into_iter()
        .chain(std::iter::once(incoming))
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    for token in tokens {
        if entries.iter().any(|seen| seen.eq_ignore_ascii_case(token)) {
            continue;
        }
        entries.push(token);
    }

    if entries.is_empty() {
        None
    } else {
        Some(entries.join(defaults::LIST_SEPARATOR))
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
