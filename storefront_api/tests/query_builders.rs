use storefront_api::{ListQuery, Location, PageSize, Query, SortDirection, StatusFilter};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/categories/list").unwrap()
}

#[test]
fn list_query_defaults_send_nothing() {
    let url = ListQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn list_query_status_all_is_omitted() {
    let location = Location::parse("/categorias?status=all");
    let url = ListQuery::from_location(&location).add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn list_query_status_filters() {
    let url = ListQuery::default()
        .with_status(StatusFilter::Active)
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("status=active"));
}

#[test]
fn list_query_from_location_reads_each_param() {
    let location = Location::parse(
        "/produtos?search=suco&page=4&limit=20&order_by=price&order_dir=desc&status=inactive",
    );
    let query = ListQuery::from_location(&location);
    assert_eq!(query.search.as_deref(), Some("suco"));
    assert_eq!(query.page, Some(4));
    assert_eq!(query.page_size, Some(PageSize::Twenty));
    assert_eq!(query.sort_field.as_deref(), Some("price"));
    assert_eq!(query.sort_direction, Some(SortDirection::Desc));
    assert_eq!(query.status, StatusFilter::Inactive);
}

#[test]
fn list_query_ignores_unknown_params() {
    let location = Location::parse("/produtos?utm_source=mail&page=2");
    let query = ListQuery::from_location(&location);
    assert_eq!(query.to_query_string(), "page=2");
}

#[test]
fn list_query_encodes_search_text() {
    let url = ListQuery::default()
        .with_search("pão & café")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert_eq!(query, "search=p%C3%A3o+%26+caf%C3%A9");
}

#[test]
fn list_query_sort_without_direction() {
    let query = ListQuery::from_query_str("order_by=name");
    assert_eq!(query.sort_field.as_deref(), Some("name"));
    assert_eq!(query.sort_direction, None);
    assert_eq!(query.to_query_string(), "order_by=name");
}

#[test]
fn location_display_is_canonical_form() {
    let location = Location::parse("/categorias?search=a+b&limit=5");
    assert_eq!(location.to_string(), "/categorias?search=a+b&limit=5");
    assert_eq!(Location::new("/categorias").to_string(), "/categorias");
}
