//! Access to the current page's query string.

use std::sync::Arc;

/// Where the user currently is. In a browser this is `window.location`.
pub trait PageLocation: Send + Sync {
    /// The query string, with or without the leading `?`.
    fn search(&self) -> String;

    /// Decoded value of the first `name` parameter. Empty values count as
    /// absent.
    fn query_param(&self, name: &str) -> Option<String> {
        let search = self.search();
        url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

/// A fixed query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocation {
    search: String,
}

impl StaticLocation {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
        }
    }
}

impl PageLocation for StaticLocation {
    fn search(&self) -> String {
        self.search.clone()
    }
}

impl PageLocation for url::Url {
    fn search(&self) -> String {
        self.query().unwrap_or_default().to_string()
    }
}

impl<T: PageLocation + ?Sized> PageLocation for Arc<T> {
    fn search(&self) -> String {
        (**self).search()
    }
}
