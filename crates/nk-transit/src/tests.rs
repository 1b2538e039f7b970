use crate::*;
use crate::notify::{init_webhook_key, webhook_key};
use chrono::{DateTime, FixedOffset, TimeZone};
use nk_core::config::TransitConfig;
use nk_core::{jst, Direction, NkError, QueryInput, SearchMode};
use std::sync::Arc;

const SEARCH_URL: &str = "https://transit.yahoo.co.jp/search/result";

fn page(start: &str, arrival: &str, transfer: u32, next: Option<&str>, prev: Option<&str>) -> String {
    let link = |class: &str, href: Option<&str>| {
        href.map(|h| format!(r#"<p class="{}"><a href="{}">link</a></p>"#, class, h))
            .unwrap_or_default()
    };
    format!(
        r#"<html><body>
<ul class="summary"><li class="transfer">乗換：{}回</li><li class="fare">200円</li><li class="distance">7.2km</li></ul>
<div class="routeDetail">
<ul class="time"><li>{}</li></ul>
<div><span>[train]</span>JR山手線外回り</div>
<ul class="time"><li>{}</li></ul>
</div>
{}{}
</body></html>"#,
        transfer,
        start,
        arrival,
        link("next", next),
        link("prev", prev)
    )
}

fn now() -> DateTime<FixedOffset> {
    jst().with_ymd_and_hms(2018, 6, 1, 10, 0, 0).unwrap()
}

fn query() -> QueryInput {
    QueryInput {
        departure_station: "渋谷".into(),
        arrival_station: "東京".into(),
        date: Some("2018-06-01".into()),
        time: Some("23:59".into()),
        mode: Some("到着".into()),
        ..Default::default()
    }
}

fn setup() -> (Arc<MemoryFetcher>, RouteSearch, AdjacencyNavigator) {
    let fetcher = Arc::new(MemoryFetcher::new());
    let config = TransitConfig::default();
    let search = RouteSearch::new(fetcher.clone(), &config);
    let nav = AdjacencyNavigator::new(fetcher.clone(), &config);
    (fetcher, search, nav)
}

// ========== Search ==========

#[tokio::test]
async fn test_search_success_uses_effective_url() {
    let (fetcher, search, _) = setup();
    fetcher.insert(SEARCH_URL, page("23:30", "23:55", 0, None, None), "https://transit.yahoo.co.jp/search/result?id=1");

    let it = search.search(&query(), now()).await.unwrap();
    assert_eq!(it.source_url, "https://transit.yahoo.co.jp/search/result?id=1");
    assert_eq!(it.departure_station, "渋谷");
    assert_eq!(it.start_time, "23:30");
    assert_eq!(it.search_criteria.mode, Some(SearchMode::Arrive));

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    let (url, params) = &requests[0];
    assert_eq!(url, SEARCH_URL);
    assert!(params.contains(&("type".to_string(), "4".to_string())));
    assert!(params.contains(&("ws".to_string(), "2".to_string())));
}

#[tokio::test]
async fn test_search_invalid_criteria_does_not_fetch() {
    let (fetcher, search, _) = setup();
    let mut q = query();
    q.date = None;
    let err = search.search(&q, now()).await.unwrap_err();
    assert!(matches!(err, NkError::InvalidCriteria(_)));
    assert_eq!(fetcher.request_count(), 0);
}

#[tokio::test]
async fn test_search_fetch_failure_is_unparsable() {
    let (_, search, _) = setup();
    let err = search.search(&query(), now()).await.unwrap_err();
    assert!(matches!(err, NkError::UnparsablePage(_)));
}

#[tokio::test]
async fn test_search_bad_page_is_unparsable() {
    let (fetcher, search, _) = setup();
    fetcher.insert_page(SEARCH_URL, "<html>メンテナンス中</html>");
    let err = search.search(&query(), now()).await.unwrap_err();
    assert!(matches!(err, NkError::UnparsablePage(_)));
}

// ========== Adjacency ==========

#[tokio::test]
async fn test_navigate_next() {
    let (fetcher, _, nav) = setup();
    let anchor = "https://transit.yahoo.co.jp/search/result?id=1";
    let target = "https://transit.yahoo.co.jp/search/result?id=2";
    fetcher.insert_page(anchor, page("10:01", "10:25", 0, Some("/search/result?id=2"), None));
    fetcher.insert_page(target, page("10:05", "10:29", 1, None, Some("/search/result?id=1")));

    let (fragment, url) = nav.navigate(anchor, Direction::Next).await.unwrap();
    assert_eq!(url, target);
    assert_eq!(fragment.start_time, "10:05");
    assert_eq!(fragment.transfer_count, 1);

    let urls: Vec<String> = fetcher.requests().into_iter().map(|(u, _)| u).collect();
    assert_eq!(urls, vec![anchor.to_string(), target.to_string()]);
}

#[tokio::test]
async fn test_navigate_chain_back() {
    let (fetcher, _, nav) = setup();
    let first = "https://transit.yahoo.co.jp/search/result?id=1";
    let second = "https://transit.yahoo.co.jp/search/result?id=2";
    fetcher.insert_page(first, page("10:01", "10:25", 0, Some("/search/result?id=2"), None));
    fetcher.insert_page(second, page("10:05", "10:29", 0, None, Some("/search/result?id=1")));

    let (_, url) = nav.navigate(first, Direction::Next).await.unwrap();
    let (fragment, url) = nav.navigate(&url, Direction::Previous).await.unwrap();
    assert_eq!(url, first);
    assert_eq!(fragment.start_time, "10:01");
}

#[tokio::test]
async fn test_navigate_missing_link() {
    let (fetcher, _, nav) = setup();
    let anchor = "https://transit.yahoo.co.jp/search/result?id=1";
    fetcher.insert_page(anchor, page("23:50", "00:15", 0, None, None));
    let err = nav.navigate(anchor, Direction::Next).await.unwrap_err();
    assert!(matches!(err, NkError::NoAdjacentResult(_)));
    assert_eq!(fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_navigate_unparsable_target() {
    let (fetcher, _, nav) = setup();
    let anchor = "https://transit.yahoo.co.jp/search/result?id=1";
    fetcher.insert_page(anchor, page("10:01", "10:25", 0, Some("/search/result?id=2"), None));
    fetcher.insert_page("https://transit.yahoo.co.jp/search/result?id=2", "<html></html>");
    let err = nav.navigate(anchor, Direction::Next).await.unwrap_err();
    assert!(matches!(err, NkError::NoAdjacentResult(_)));
}

#[tokio::test]
async fn test_navigate_anchor_unreachable() {
    let (_, _, nav) = setup();
    let err = nav.navigate("https://transit.yahoo.co.jp/gone", Direction::Previous).await.unwrap_err();
    assert!(matches!(err, NkError::NoAdjacentResult(_)));
}

#[test]
fn test_resolve() {
    let (_, _, nav) = setup();
    assert_eq!(
        nav.resolve("/search/result?id=3").unwrap(),
        "https://transit.yahoo.co.jp/search/result?id=3"
    );
    assert_eq!(nav.resolve("https://example.com/x").unwrap(), "https://example.com/x");
}

// ========== Notification ==========

#[tokio::test]
async fn test_memory_notifier() {
    let ok = MemoryNotifier::new();
    ok.notify("msg", "https://x").await.unwrap();
    assert_eq!(ok.sent(), vec![("msg".to_string(), "https://x".to_string())]);

    let bad = MemoryNotifier::failing();
    assert!(matches!(bad.notify("msg", "https://x").await, Err(NkError::NotificationFailed(_))));
}

#[test]
fn test_webhook_key_initialized_once() {
    init_webhook_key("first-key");
    assert!(!init_webhook_key("second-key"));
    assert_eq!(webhook_key("NORIKAE_TEST_UNSET_KEY"), Some("first-key"));
}
