//! Location store: the URL whose query string holds the list filter.

use url::Url;

/// Navigable location with browser-history semantics.
pub trait Location: Send {
    fn current(&self) -> &Url;

    /// Record `url` as a new history entry.
    fn push(&mut self, url: Url);

    /// Swap the current entry for `url` without growing history.
    fn replace(&mut self, url: Url);
}

/// In-process history stack. The last entry is the current location.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Url] {
        &self.entries
    }
}

impl Location for MemoryLocation {
    fn current(&self) -> &Url {
        // `entries` is never empty: created with one entry and never popped.
        &self.entries[self.entries.len() - 1]
    }

    fn push(&mut self, url: Url) {
        self.entries.push(url);
    }

    fn replace(&mut self, url: Url) {
        let last = self.entries.len() - 1;
        self.entries[last] = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[test]
    fn push_grows_history_and_replace_does_not() {
        let mut location = MemoryLocation::new(url("http://localhost/"));
        location.replace(url("http://localhost/?_page=1"));
        assert_eq!(location.history_len(), 1);

        location.push(url("http://localhost/?_page=2"));
        assert_eq!(location.history_len(), 2);
        assert_eq!(location.current().query(), Some("_page=2"));
    }
}
