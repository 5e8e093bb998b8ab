use url::Url;

use super::{
    common::{PageSize, SortDirection, StatusFilter},
    location::Location,
    Query,
};

/// Canonical list view state, decoded from a [`Location`].
///
/// Every field is optional: an absent value means "let the endpoint pick its
/// default" and is never written back to a location or a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<PageSize>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub status: StatusFilter,
}

impl Query for ListQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.params() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        url
    }
}

impl ListQuery {
    /// Reads each recognized parameter independently. Values that do not parse
    /// are treated as absent.
    pub fn from_location(location: &Location) -> Self {
        let search = location
            .get("search")
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        let page = location.get("page").and_then(|raw| match raw.parse::<u32>() {
            Ok(page) if page >= 1 => Some(page),
            _ => {
                tracing::warn!("Ignoring invalid page parameter: {:?}", raw);
                None
            }
        });
        let page_size = location
            .get("limit")
            .and_then(|raw| match raw.parse::<PageSize>() {
                Ok(size) => Some(size),
                Err(()) => {
                    tracing::warn!("Ignoring unsupported limit parameter: {:?}", raw);
                    None
                }
            });
        let sort_field = location
            .get("order_by")
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let sort_direction = location
            .get("order_dir")
            .and_then(|raw| raw.parse::<SortDirection>().ok());
        let status = location
            .get("status")
            .and_then(|raw| raw.parse::<StatusFilter>().ok())
            .unwrap_or_default();

        Self {
            search,
            page,
            page_size,
            sort_field,
            sort_direction,
            status,
        }
    }

    /// Decodes a bare query string (with or without the leading `?`).
    pub fn from_query_str(query: &str) -> Self {
        Self::from_location(&Location::from_query("", query))
    }

    /// The page to highlight. Defaults to 1 without ever being serialized.
    pub fn display_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// The present parameters in canonical order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("limit", page_size.to_string()));
        }
        if let Some(sort_field) = self.sort_field.as_deref().filter(|s| !s.is_empty()) {
            params.push(("order_by", sort_field.to_string()));
        }
        if let Some(sort_direction) = self.sort_direction {
            params.push(("order_dir", sort_direction.to_string()));
        }
        if !self.status.is_default() {
            params.push(("status", self.status.to_string()));
        }
        params
    }

    /// Encodes the query the way it appears in a canonical location.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort_field = Some(field.to_string());
        self.sort_direction = Some(direction);
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ListQuery, PageSize, Query, SortDirection, StatusFilter};

    #[test]
    fn test_list_query_url() {
        let url = Url::parse("https://example.com/categories/list").unwrap();

        insta::assert_snapshot!(
            "full_query",
            ListQuery::default()
                .with_search("café")
                .with_page(2)
                .with_page_size(PageSize::Twenty)
                .with_sort("name", SortDirection::Desc)
                .with_status(StatusFilter::Inactive)
                .add_to_url(&url)
                .to_string()
        );

        insta::assert_snapshot!(
            "default_query",
            ListQuery::default().add_to_url(&url).to_string()
        );
    }

    #[test]
    fn absent_values_are_not_synthesized() {
        let query = ListQuery::from_query_str("");
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.display_page(), 1);
        assert!(query.params().is_empty());
    }

    #[test]
    fn default_status_and_empty_search_never_leak() {
        let query = ListQuery::from_query_str("status=all&search=");
        assert_eq!(query.to_query_string(), "");

        let query = ListQuery::default().with_search("").with_status(StatusFilter::All);
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn invalid_values_read_as_absent() {
        let query = ListQuery::from_query_str("page=0&limit=7&order_dir=up&status=gone");
        assert_eq!(query.page, None);
        assert_eq!(query.page_size, None);
        assert_eq!(query.sort_direction, None);
        assert_eq!(query.status, StatusFilter::All);
    }

    #[test]
    fn canonical_round_trip() {
        let raw = "search=mesa&page=3&limit=50&order_by=disabled_at&order_dir=asc&status=active";
        let query = ListQuery::from_query_str(raw);
        assert_eq!(query.to_query_string(), raw);
    }
}
