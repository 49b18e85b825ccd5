//! Session fetching: pagination and eligibility filtering

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::*;

fn fetcher(stripe: &Arc<FakeStripe>) -> SessionFetcher {
    SessionFetcher::new(stripe.clone())
}

#[tokio::test]
async fn test_single_page() {
    let stripe = Arc::new(FakeStripe::new().with_sessions(
        "plink_1",
        numbered_sessions("a", "plink_1", 3),
    ));

    let sessions = fetcher(&stripe).fetch("plink_1").await.unwrap();

    assert_eq!(sessions.len(), 3);
    assert_eq!(stripe.calls(), vec![("plink_1".to_string(), None)]);
}

#[tokio::test]
async fn test_empty_link_makes_one_request() {
    let stripe = Arc::new(FakeStripe::new());

    let sessions = fetcher(&stripe).fetch("plink_empty").await.unwrap();

    assert!(sessions.is_empty());
    assert_eq!(stripe.call_count(), 1);
}

#[tokio::test]
async fn test_pagination_requests_ceil_n_over_100_pages() {
    for (count, expected_pages) in [(100, 1), (101, 2), (250, 3), (300, 3)] {
        let stripe = Arc::new(FakeStripe::new().with_sessions(
            "plink_1",
            numbered_sessions("p", "plink_1", count),
        ));

        let sessions = fetcher(&stripe).fetch("plink_1").await.unwrap();

        assert_eq!(sessions.len(), count, "all {} sessions returned", count);
        assert_eq!(
            stripe.call_count(),
            expected_pages,
            "{} sessions should take {} page(s)",
            count,
            expected_pages
        );
    }
}

#[tokio::test]
async fn test_pagination_uses_last_id_as_cursor() {
    let stripe = Arc::new(FakeStripe::new().with_sessions(
        "plink_1",
        numbered_sessions("c", "plink_1", 250),
    ));

    let sessions = fetcher(&stripe).fetch("plink_1").await.unwrap();

    assert_eq!(
        stripe.calls(),
        vec![
            ("plink_1".to_string(), None),
            ("plink_1".to_string(), Some("cs_c_0099".to_string())),
            ("plink_1".to_string(), Some("cs_c_0199".to_string())),
        ]
    );
    // Order preserved across pages, no duplicates
    let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"cs_c_0000"));
    assert_eq!(ids.last(), Some(&"cs_c_0249"));
    assert_eq!(ids[100], "cs_c_0100");
}

#[tokio::test]
async fn test_filters_ineligible_sessions_after_paging() {
    let mut sessions = numbered_sessions("f", "plink_1", 150);
    // Abandoned checkout
    sessions[10].status = Some(SessionStatus::Other);
    // Subscription-mode session
    sessions[120].mode = SessionMode::Other;
    // No customer details
    sessions[149].customer_details = None;
    // Not yet finalized
    sessions[0].status = None;

    let stripe = Arc::new(FakeStripe::new().with_sessions("plink_1", sessions));

    let fetched = fetcher(&stripe).fetch("plink_1").await.unwrap();

    assert_eq!(fetched.len(), 146);
    assert_eq!(stripe.call_count(), 2);
    for id in ["cs_f_0000", "cs_f_0010", "cs_f_0120", "cs_f_0149"] {
        assert!(
            fetched.iter().all(|s| s.id != id),
            "{} should have been filtered out",
            id
        );
    }
    // Cursor is the last item of the raw page, even though it was filtered out
    assert_eq!(stripe.calls()[1].1.as_deref(), Some("cs_f_0099"));
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let stripe = Arc::new(FakeStripe::new().failing_for("plink_1"));

    let result = fetcher(&stripe).fetch("plink_1").await;

    assert!(matches!(result, Err(AppError::Stripe(_))));
}

/// A source that claims more results but never sends any.
struct EmptyButMore;

#[async_trait::async_trait]
impl SessionSource for EmptyButMore {
    async fn list_sessions(&self, _: &str, _: Option<&str>) -> Result<SessionPage> {
        Ok(SessionPage {
            data: vec![],
            has_more: true,
        })
    }
}

#[tokio::test]
async fn test_empty_page_with_has_more_terminates() {
    let fetcher = SessionFetcher::new(Arc::new(EmptyButMore));

    let sessions = fetcher.fetch("plink_1").await.unwrap();

    assert!(sessions.is_empty());
}
