//! Search bar, status filter, paginator and sort headers.
//!
//! None of these perform requests. Each one rewrites the current
//! [`Location`] and hands the new one back to the host, which navigates and
//! lets the [`ListController`](crate::listing::ListController) load it.

use storefront_api::types::Page;
use storefront_api::{ListQuery, Location, PageSize, SortDirection, StatusFilter};

use crate::error::AdminError;
use crate::validation::validate_search;

/// Text search plus the status select above a list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchBar {
    search: String,
    status: StatusFilter,
    pending: bool,
}

impl SearchBar {
    /// Mirrors the `search` and `status` currently in the location.
    pub fn from_location(location: &Location) -> Self {
        let query = ListQuery::from_location(location);
        Self {
            search: query.search.unwrap_or_default(),
            status: query.status,
            pending: false,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Updates the text field without navigating.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// Explicit submit: writes the sanitised search text and the selected
    /// status into the location and drops `page`.
    pub fn submit(&mut self, location: &Location) -> Result<Location, AdminError> {
        let search = validate_search(&self.search)?;
        let mut next = location.clone();
        match &search {
            Some(text) => next.set("search", text),
            None => next.remove("search"),
        }
        set_status(&mut next, self.status);
        next.remove("page");

        self.search = search.unwrap_or_default();
        self.pending = true;
        Ok(next)
    }

    /// Status changes navigate immediately. The search text in the location is
    /// kept as is, even if the field holds unsubmitted text.
    pub fn select_status(&mut self, status: StatusFilter, location: &Location) -> Location {
        let mut next = location.clone();
        set_status(&mut next, status);
        next.remove("page");

        self.status = status;
        self.pending = true;
        next
    }

    /// True between producing a navigation and the host reporting that the
    /// new location finished loading.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn navigation_settled(&mut self) {
        self.pending = false;
    }
}

fn set_status(location: &mut Location, status: StatusFilter) {
    if status.is_default() {
        location.remove("status");
    } else {
        location.set("status", status.as_str());
    }
}

/// Page controls below a list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paginator {
    total: u64,
    page_size: u32,
    page: u32,
    pending: bool,
}

impl Paginator {
    /// `page` is 1-indexed; zero is treated as the first page.
    pub fn new(total: u64, page_size: u32, page: u32) -> Self {
        Self {
            total,
            page_size,
            page: page.max(1),
            pending: false,
        }
    }

    /// Controls for a page the backend returned.
    pub fn for_page<T>(page: &Page<T>) -> Self {
        Self::new(page.total, page.limit, page.page)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        u32::try_from(self.total.div_ceil(u64::from(self.page_size))).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Location for `page`, or `None` when it is outside `1..=page_count`.
    pub fn go_to(&mut self, page: u32, location: &Location) -> Option<Location> {
        if page < 1 || page > self.page_count() {
            return None;
        }
        let mut next = location.clone();
        next.set("page", &page.to_string());
        self.pending = true;
        Some(next)
    }

    pub fn next(&mut self, location: &Location) -> Option<Location> {
        self.go_to(self.page + 1, location)
    }

    pub fn previous(&mut self, location: &Location) -> Option<Location> {
        self.go_to(self.page.saturating_sub(1), location)
    }

    /// Sets `limit` and goes back to the first page.
    pub fn change_page_size(&mut self, size: PageSize, location: &Location) -> Location {
        let mut next = location.clone();
        next.set("limit", &size.to_string());
        next.remove("page");
        self.pending = true;
        next
    }

    /// Page buttons to render; `None` marks a gap.
    pub fn page_items(&self) -> Vec<Option<u32>> {
        get_pages(self.page_count(), self.page, 1, 2, 2, 1)
    }

    pub fn summary(&self) -> String {
        if self.total == 1 {
            "Total: 1 item".to_string()
        } else {
            format!("Total: {} itens", self.total)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn navigation_settled(&mut self) {
        self.pending = false;
    }
}

fn get_pages(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;
    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Clicking a sortable column header.
///
/// The active column flips between `asc` and `desc`; an active column without
/// a direction counts as `asc`. Any other column starts at `asc`. The page and
/// every other parameter are kept.
pub fn toggle_sort(location: &Location, column: &str) -> Location {
    let query = ListQuery::from_location(location);
    let direction = match query.sort_field.as_deref() {
        Some(field) if field == column => query
            .sort_direction
            .unwrap_or(SortDirection::Asc)
            .toggled(),
        _ => SortDirection::Asc,
    };
    let mut next = location.clone();
    next.set("order_by", column);
    next.set("order_dir", direction.as_str());
    next
}

/// Direction arrow for a column header, if it is the active sort column.
pub fn sort_indicator(query: &ListQuery, column: &str) -> Option<SortDirection> {
    match query.sort_field.as_deref() {
        Some(field) if field == column => {
            Some(query.sort_direction.unwrap_or(SortDirection::Asc))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s)
    }

    #[test]
    fn submit_rewrites_search_and_drops_page() {
        let current = loc("/categorias?page=3&limit=20&search=old");
        let mut bar = SearchBar::from_location(&current);
        assert_eq!(bar.search(), "old");

        bar.set_search("  suco ");
        let next = bar.submit(&current).unwrap();
        assert_eq!(next.to_string(), "/categorias?limit=20&search=suco");
        assert!(bar.is_pending());

        bar.navigation_settled();
        assert!(!bar.is_pending());
    }

    #[test]
    fn submit_empty_search_removes_param() {
        let current = loc("/categorias?search=old&status=active&page=2");
        let mut bar = SearchBar::from_location(&current);
        bar.set_search("");
        let next = bar.submit(&current).unwrap();
        assert_eq!(next.to_string(), "/categorias?status=active");
    }

    #[test]
    fn submit_rejects_overlong_search() {
        let current = loc("/categorias");
        let mut bar = SearchBar::from_location(&current);
        bar.set_search(&"x".repeat(101));
        assert!(bar.submit(&current).is_err());
        assert!(!bar.is_pending());
    }

    #[test]
    fn status_all_removes_param() {
        let current = loc("/produtos?status=inactive&page=4&order_by=name");
        let mut bar = SearchBar::from_location(&current);
        let next = bar.select_status(StatusFilter::All, &current);
        assert_eq!(next.to_string(), "/produtos?order_by=name");
    }

    #[test]
    fn status_change_keeps_committed_search() {
        let current = loc("/produtos?search=uva&page=2");
        let mut bar = SearchBar::from_location(&current);
        bar.set_search("typed but not submitted");
        let next = bar.select_status(StatusFilter::Active, &current);
        assert_eq!(next.to_string(), "/produtos?search=uva&status=active");
        assert_eq!(bar.status(), StatusFilter::Active);
    }

    #[test]
    fn paginator_bounds() {
        let current = loc("/categorias?limit=10");
        let mut paginator = Paginator::new(47, 10, 1);
        assert_eq!(paginator.page_count(), 5);
        assert!(paginator.go_to(6, &current).is_none());
        assert!(paginator.go_to(0, &current).is_none());
        assert!(!paginator.is_pending());

        let next = paginator.go_to(5, &current).unwrap();
        assert_eq!(next.to_string(), "/categorias?limit=10&page=5");
        assert!(paginator.is_pending());
    }

    #[test]
    fn paginator_next_previous() {
        let current = loc("/categorias?page=5");
        let mut last = Paginator::new(47, 10, 5);
        assert!(!last.has_next());
        assert!(last.next(&current).is_none());
        assert_eq!(
            last.previous(&current).unwrap().to_string(),
            "/categorias?page=4"
        );

        let mut first = Paginator::new(47, 10, 1);
        assert!(!first.has_previous());
        assert!(first.previous(&current).is_none());
    }

    #[test]
    fn page_size_change_clears_page() {
        let current = loc("/categorias?page=3&search=a");
        let mut paginator = Paginator::new(47, 10, 3);
        let next = paginator.change_page_size(PageSize::Fifty, &current);
        assert_eq!(next.to_string(), "/categorias?search=a&limit=50");
    }

    #[test]
    fn empty_list_has_no_pages() {
        let paginator = Paginator::new(0, 10, 1);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.page_items().is_empty());
        assert_eq!(paginator.summary(), "Total: 0 itens");
        assert_eq!(Paginator::new(1, 10, 1).summary(), "Total: 1 item");
    }

    #[test]
    fn huge_backend_numbers_saturate() {
        let paginator = Paginator::new(u64::MAX, 1, u32::MAX);
        assert_eq!(paginator.page_count(), u32::MAX);
        assert!(!paginator.has_next());
        assert_eq!(
            paginator.page_items(),
            vec![
                Some(1),
                None,
                Some(u32::MAX - 2),
                Some(u32::MAX - 1),
                Some(u32::MAX)
            ]
        );
    }

    #[test]
    fn page_items_with_gaps() {
        let paginator = Paginator::new(200, 10, 10);
        assert_eq!(
            paginator.page_items(),
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
        let short = Paginator::new(30, 10, 1);
        assert_eq!(short.page_items(), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn sort_same_column_toggles() {
        let asc = loc("/categorias?order_by=name&order_dir=asc&page=2");
        assert_eq!(
            toggle_sort(&asc, "name").to_string(),
            "/categorias?order_by=name&order_dir=desc&page=2"
        );

        let desc = loc("/categorias?order_by=name&order_dir=desc");
        assert_eq!(
            toggle_sort(&desc, "name").to_string(),
            "/categorias?order_by=name&order_dir=asc"
        );
    }

    #[test]
    fn sort_missing_direction_counts_as_asc() {
        let current = loc("/categorias?order_by=name");
        assert_eq!(
            toggle_sort(&current, "name").get("order_dir"),
            Some("desc")
        );
    }

    #[test]
    fn sort_new_column_starts_asc() {
        let current = loc("/produtos?order_by=name&order_dir=desc");
        let next = toggle_sort(&current, "price");
        assert_eq!(next.to_string(), "/produtos?order_by=price&order_dir=asc");

        let query = ListQuery::from_location(&next);
        assert_eq!(sort_indicator(&query, "price"), Some(SortDirection::Asc));
        assert_eq!(sort_indicator(&query, "name"), None);
    }
}
