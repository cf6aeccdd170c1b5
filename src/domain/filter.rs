//! Filter state carried in the location query string.
//!
//! The query string is the single source of truth for which posts are listed:
//! the page cursor (`_page`), the page size (`_limit`), the title search
//! (`title_like`) and any other key the API understands. Keys keep their
//! insertion order so that a state survives an encode/decode cycle unchanged.

use std::fmt;

use url::{Url, form_urlencoded};

pub const PAGE_KEY: &str = "_page";
pub const LIMIT_KEY: &str = "_limit";
pub const SEARCH_KEY: &str = "title_like";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 6;

/// Ordered key/value filter parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pairs: Vec<(String, String)>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query (without `?`).
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Copy of `url` whose query string is replaced by this state.
    pub fn apply_to(&self, url: &Url) -> Url {
        let mut next = url.clone();
        if self.pairs.is_empty() {
            next.set_query(None);
        } else {
            next.set_query(Some(&self.to_query()));
        }
        next
    }

    /// First value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the first occurrence of `key` in place and drop any duplicates;
    /// append when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(candidate, _)| candidate == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(candidate, _)| {
                    if candidate != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Apply a user-driven filter change.
    ///
    /// Changing the title search always restarts pagination at page 1.
    pub fn set_filter(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, value);
        if key == SEARCH_KEY {
            self.set(PAGE_KEY, DEFAULT_PAGE.to_string());
        }
    }

    /// Inject `_page` and `_limit` when missing or empty. Returns whether the
    /// state changed.
    pub fn ensure_defaults(&mut self, default_limit: u32) -> bool {
        let mut changed = false;
        if self.get(PAGE_KEY).is_none_or(str::is_empty) {
            self.set(PAGE_KEY, DEFAULT_PAGE.to_string());
            changed = true;
        }
        if self.get(LIMIT_KEY).is_none_or(str::is_empty) {
            self.set(LIMIT_KEY, default_limit.to_string());
            changed = true;
        }
        changed
    }

    /// Current page; unparsable or non-positive values read as page 1.
    pub fn page(&self) -> u32 {
        parse_positive(self.get(PAGE_KEY)).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit_or(&self, default_limit: u32) -> u32 {
        parse_positive(self.get(LIMIT_KEY)).unwrap_or(default_limit)
    }

    /// Non-empty title search, if any.
    pub fn search(&self) -> Option<&str> {
        self.get(SEARCH_KEY).filter(|value| !value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}
