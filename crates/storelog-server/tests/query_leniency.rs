//! End-to-end checks for lenient listing parameter handling.
//!
//! These run the real extractor stack (axum + the Query wrapper) against a
//! throwaway router, without a database: the handler echoes how the raw
//! parameters resolved into engine inputs.

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use storelog_server::extract::Query;
use storelog_server::handler::request::ListEventsQuery;

async fn echo(Query(query): Query<ListEventsQuery>) -> String {
    let page = query.page_request();
    let filter = query.filter();
    format!(
        "limit={} cursor={:?} store={:?} empty={}",
        page.limit,
        page.cursor,
        filter.store_domain(),
        filter.is_empty(),
    )
}

fn server() -> TestServer {
    let router = Router::new().route("/events", get(echo));
    TestServer::new(router).expect("test server should start")
}

#[tokio::test]
async fn bare_request_uses_defaults() {
    let response = server().get("/events").await;
    response.assert_status_ok();
    response.assert_text("limit=50 cursor=None store=None empty=true");
}

#[tokio::test]
async fn non_numeric_limit_falls_back() {
    let response = server().get("/events").add_query_param("limit", "lots").await;
    response.assert_status_ok();
    assert!(response.text().starts_with("limit=50 "));
}

#[tokio::test]
async fn unparseable_after_matches_first_page() {
    let bad = server().get("/events").add_query_param("after", "not-an-id").await;
    let none = server().get("/events").await;
    assert_eq!(bad.text(), none.text());
}

#[tokio::test]
async fn before_wins_over_after() {
    let response = server()
        .get("/events")
        .add_query_param("after", "4")
        .add_query_param("before", "9")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Before"));
    assert!(response.text().contains('9'));
}

#[tokio::test]
async fn filters_pass_through() {
    let response = server()
        .get("/events")
        .add_query_param("store", "shop-a.example.com")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("shop-a.example.com"));
    assert!(response.text().ends_with("empty=false"));
}
