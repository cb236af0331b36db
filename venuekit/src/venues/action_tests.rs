//! Tests for the delete action against scripted transports.

#[cfg(test)]
mod tests {
    use crate::errors::VenueError;
    use crate::events::{CollectingEventSink, VenueEventKind};
    use crate::testing::{RecordingNavigator, ScriptedReply, ScriptedTransport};
    use crate::venues::protocols::MockNavigator;
    use crate::venues::{
        ClickEvent, DeleteAction, DeleteOutcome, DeleteState, DuplicatePolicy, Element,
        MissingIdPolicy, NavigationPolicy, StaticPage, VenueClientConfig,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    const BASE: &str = "http://venues.test";

    struct Harness {
        action: DeleteAction,
        transport: Arc<ScriptedTransport>,
        navigator: Arc<RecordingNavigator>,
        sink: Arc<CollectingEventSink>,
    }

    fn venue_page(venue_id: &str) -> StaticPage {
        StaticPage::new().with_element(Element::new("deleteBtn").with_data("id", venue_id))
    }

    fn harness(transport: ScriptedTransport, config: VenueClientConfig) -> Harness {
        let transport = Arc::new(transport);
        let navigator = Arc::new(RecordingNavigator::new());
        let sink = Arc::new(CollectingEventSink::new());
        let action = DeleteAction::bind(
            Arc::new(venue_page("42")),
            transport.clone(),
            navigator.clone(),
            config.with_base_url(BASE),
        )
        .unwrap()
        .with_event_sink(sink.clone());

        Harness {
            action,
            transport,
            navigator,
            sink,
        }
    }

    fn click(venue_id: &str) -> ClickEvent {
        ClickEvent::on(Element::new("deleteBtn").with_data("id", venue_id))
    }

    #[tokio::test]
    async fn test_click_sends_one_delete_for_data_id() {
        let h = harness(ScriptedTransport::new(), VenueClientConfig::default());

        h.action.handle_click(&click("42")).await.unwrap();

        assert_eq!(h.transport.requests(), vec!["http://venues.test/venues/42"]);
    }

    #[tokio::test]
    async fn test_success_redirects_to_root_without_errors() {
        let h = harness(ScriptedTransport::new(), VenueClientConfig::default());

        let outcome = h.action.click().await.unwrap();

        assert!(outcome.is_redirected());
        assert_eq!(DeleteState::from(&outcome), DeleteState::Redirected);
        assert_eq!(h.navigator.locations(), vec!["/"]);
        assert!(h.sink.events_of_kind(VenueEventKind::DeleteFailed).is_empty());
        let succeeded = h.sink.events_of_kind(VenueEventKind::DeleteSucceeded);
        assert_eq!(succeeded.len(), 1);
        assert_eq!(succeeded[0].detail, json!(true));
    }

    #[tokio::test]
    async fn test_reported_failure_still_redirects_by_default() {
        let transport = ScriptedTransport::always(ScriptedReply::json(json!({ "success": false })));
        let h = harness(transport, VenueClientConfig::default());

        let outcome = h.action.click().await.unwrap();

        match outcome {
            DeleteOutcome::Redirected {
                response, location, ..
            } => {
                assert!(!response.is_success());
                assert_eq!(location, "/");
            }
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(h.navigator.locations(), vec!["/"]);
    }

    #[tokio::test]
    async fn test_on_success_policy_keeps_page_for_reported_failure() {
        let transport = ScriptedTransport::always(ScriptedReply::json(json!({ "success": false })));
        let h = harness(
            transport,
            VenueClientConfig::default().with_navigation(NavigationPolicy::OnSuccess),
        );

        let outcome = h.action.click().await.unwrap();

        assert!(matches!(outcome, DeleteOutcome::Stayed { .. }));
        assert!(h.navigator.locations().is_empty());
        assert_eq!(h.sink.events_of_kind(VenueEventKind::DeleteSucceeded).len(), 1);
    }

    #[tokio::test]
    async fn test_on_success_policy_redirects_on_true() {
        let h = harness(
            ScriptedTransport::new(),
            VenueClientConfig::default().with_navigation(NavigationPolicy::OnSuccess),
        );

        assert!(h.action.click().await.unwrap().is_redirected());
        assert_eq!(h.navigator.current().as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_network_rejection_logs_once_and_stays() {
        let transport = ScriptedTransport::always(ScriptedReply::reject("connection refused"));
        let h = harness(transport, VenueClientConfig::default());

        let result = h.action.click().await;

        assert_eq!(DeleteState::from_result(&result), DeleteState::Failed);
        let err = result.unwrap_err();
        assert!(matches!(err, VenueError::Network(_)));
        assert!(h.navigator.locations().is_empty());
        assert_eq!(h.sink.len(), 1);
        let failed = h.sink.events_of_kind(VenueEventKind::DeleteFailed);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].detail["kind"], json!("network"));
    }

    #[tokio::test]
    async fn test_non_json_body_logs_once_and_stays() {
        let transport =
            ScriptedTransport::always(ScriptedReply::raw(500, "<h1>Internal Server Error</h1>"));
        let h = harness(transport, VenueClientConfig::default());

        let err = h.action.click().await.unwrap_err();

        assert!(matches!(err, VenueError::InvalidBody { status: 500, .. }));
        assert!(h.navigator.locations().is_empty());
        assert_eq!(h.sink.len(), 1);
        assert_eq!(h.sink.events_of_kind(VenueEventKind::DeleteFailed).len(), 1);
    }

    #[tokio::test]
    async fn test_failure_never_touches_navigator() {
        let mut navigator = MockNavigator::new();
        navigator.expect_replace().times(0);

        let action = DeleteAction::bind(
            Arc::new(venue_page("42")),
            Arc::new(ScriptedTransport::always(ScriptedReply::raw(200, "not json"))),
            Arc::new(navigator),
            VenueClientConfig::default().with_base_url(BASE),
        )
        .unwrap();

        assert!(action.click().await.is_err());
    }

    #[tokio::test]
    async fn test_success_replaces_location_exactly_once() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_replace()
            .withf(|location| location == "/")
            .times(1)
            .return_const(());

        let action = DeleteAction::bind(
            Arc::new(venue_page("42")),
            Arc::new(ScriptedTransport::new()),
            Arc::new(navigator),
            VenueClientConfig::default().with_base_url(BASE),
        )
        .unwrap();

        action.click().await.unwrap();
    }

    #[test]
    fn test_bind_fails_without_control() {
        let result = DeleteAction::bind(
            Arc::new(StaticPage::new().with_element(Element::new("editBtn"))),
            Arc::new(ScriptedTransport::new()),
            Arc::new(RecordingNavigator::new()),
            VenueClientConfig::default(),
        );

        match result {
            Err(VenueError::MissingElement(id)) => assert_eq!(id, "deleteBtn"),
            other => panic!("expected missing element, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data_id_sends_undefined_by_default() {
        let h = harness(ScriptedTransport::new(), VenueClientConfig::default());

        let outcome = h
            .action
            .handle_click(&ClickEvent::on(Element::new("deleteBtn")))
            .await
            .unwrap();

        assert_eq!(outcome.venue_id(), "undefined");
        assert!(outcome.is_redirected());
        assert_eq!(
            h.transport.requests(),
            vec!["http://venues.test/venues/undefined"]
        );
        assert!(h.sink.events_of_kind(VenueEventKind::DeleteFailed).is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_id_rejected_sends_nothing() {
        let h = harness(
            ScriptedTransport::new(),
            VenueClientConfig::default().with_missing_id(MissingIdPolicy::Reject),
        );

        let err = h
            .action
            .handle_click(&ClickEvent::on(Element::new("deleteBtn")))
            .await
            .unwrap_err();

        assert!(matches!(err, VenueError::MissingVenueId { .. }));
        assert_eq!(h.transport.request_count(), 0);
        assert_eq!(h.sink.events_of_kind(VenueEventKind::DeleteFailed).len(), 1);
    }

    #[tokio::test]
    async fn test_venue_id_is_not_escaped_or_validated() {
        let h = harness(ScriptedTransport::new(), VenueClientConfig::default());

        h.action.handle_click(&click("abc/../7")).await.unwrap();

        assert_eq!(
            h.transport.requests(),
            vec!["http://venues.test/venues/abc/../7"]
        );
    }

    #[tokio::test]
    async fn test_double_click_sends_two_requests_by_default() {
        let transport = ScriptedTransport::new().with_delay(Duration::from_millis(20));
        let h = harness(transport, VenueClientConfig::default());
        let event = click("42");

        let (first, second) =
            futures::join!(h.action.handle_click(&event), h.action.handle_click(&event));

        assert!(first.unwrap().is_redirected());
        assert!(second.unwrap().is_redirected());
        assert_eq!(h.transport.request_count(), 2);
        assert_eq!(h.navigator.locations(), vec!["/", "/"]);
        assert!(h.action.in_flight().is_empty());
    }

    #[tokio::test]
    async fn test_double_click_blocked_while_pending() {
        let transport = ScriptedTransport::new().with_delay(Duration::from_millis(20));
        let h = harness(
            transport,
            VenueClientConfig::default().with_duplicates(DuplicatePolicy::Block),
        );
        let event = click("42");

        let (first, second) =
            futures::join!(h.action.handle_click(&event), h.action.handle_click(&event));

        assert!(first.unwrap().is_redirected());
        assert_eq!(
            second.unwrap(),
            DeleteOutcome::Skipped {
                venue_id: "42".to_string()
            }
        );
        assert_eq!(h.transport.request_count(), 1);
        assert_eq!(h.sink.events_of_kind(VenueEventKind::DeleteSkipped).len(), 1);
        assert!(h.action.in_flight().is_empty());
    }

    #[tokio::test]
    async fn test_state_is_pending_while_request_in_flight() {
        let transport = ScriptedTransport::new().with_delay(Duration::from_millis(50));
        let h = harness(transport, VenueClientConfig::default());
        let event = click("42");

        assert_eq!(h.action.state_of("42"), None);
        let (outcome, during) = tokio::join!(h.action.handle_click(&event), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            (h.action.state_of("42"), h.action.state_of("7"))
        });

        assert_eq!(during, (Some(DeleteState::Pending), None));
        assert!(!DeleteState::Pending.is_terminal());
        let outcome = outcome.unwrap();
        assert!(DeleteState::from(&outcome).is_terminal());
        assert_eq!(h.action.state_of("42"), None);
    }

    #[tokio::test]
    async fn test_block_releases_after_failure() {
        let transport = ScriptedTransport::new().then(ScriptedReply::reject("reset"));
        let h = harness(
            transport,
            VenueClientConfig::default().with_duplicates(DuplicatePolicy::Block),
        );

        assert!(h.action.click().await.is_err());
        assert!(h.action.in_flight().is_empty());
        assert!(h.action.click().await.unwrap().is_redirected());
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_block_is_per_venue() {
        let transport = ScriptedTransport::new().with_delay(Duration::from_millis(20));
        let h = harness(
            transport,
            VenueClientConfig::default().with_duplicates(DuplicatePolicy::Block),
        );
        let (a, b) = (click("1"), click("2"));

        let (first, second) = futures::join!(h.action.handle_click(&a), h.action.handle_click(&b));

        assert!(first.unwrap().is_redirected());
        assert!(second.unwrap().is_redirected());
        assert_eq!(h.transport.request_count(), 2);
    }

    #[test]
    fn test_click_uses_bound_control_outside_runtime() {
        let h = harness(ScriptedTransport::new(), VenueClientConfig::default());

        let outcome = tokio_test::block_on(h.action.click()).unwrap();

        assert_eq!(outcome.venue_id(), "42");
    }
}
