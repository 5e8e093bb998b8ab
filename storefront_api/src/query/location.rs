//! Navigation location: a path plus its ordered query pairs.
//!
//! List views keep all of their state in the location, so every navigation
//! operation is a pure `Location -> Location` rewrite.

use std::fmt;

use url::form_urlencoded;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    pairs: Vec<(String, String)>,
}

impl Location {
    /// A location without query parameters.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            pairs: Vec::new(),
        }
    }

    /// Parses `path?query`. A missing `?` means an empty query; a leading `?`
    /// means an empty path.
    pub fn parse(input: &str) -> Self {
        match input.split_once('?') {
            Some((path, query)) => Self::from_query(path, query),
            None => Self::new(input),
        }
    }

    /// Builds a location from a path and an already separated query string.
    pub fn from_query(path: &str, query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            path: path.to_string(),
            pairs,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first occurrence of `key` and drops the others, or appends
    /// the pair when the key is absent.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Removes every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.pairs.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_path_and_query() {
        let location = Location::parse("/categorias?search=caf%C3%A9+preto&page=2");
        assert_eq!(location.path(), "/categorias");
        assert_eq!(location.get("search"), Some("café preto"));
        assert_eq!(location.get("page"), Some("2"));
        assert_eq!(location.get("limit"), None);
    }

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut location = Location::parse("/p?tag=a&page=3&tag=b");
        location.set("tag", "c");
        assert_eq!(location.query_string(), "tag=c&page=3");
        location.set("limit", "20");
        assert_eq!(location.query_string(), "tag=c&page=3&limit=20");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut location = Location::parse("/p?page=1&x=1&page=2");
        location.remove("page");
        assert_eq!(location.to_string(), "/p?x=1");
        location.remove("x");
        assert_eq!(location.to_string(), "/p");
    }
}
