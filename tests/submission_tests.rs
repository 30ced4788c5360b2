//! Integration tests for order submission and the submit-then-keep lifecycle.

use std::sync::Arc;
use std::time::Duration;

use polykeeper::application::submitter::OrderSubmitter;
use polykeeper::error::{Error, SubmissionError};
use polykeeper::infrastructure::runtime::run_keeper;
use polykeeper::port::outbound::venue::{OrderVenue, PriceVerifier};
use polykeeper::testkit::config::keeper;
use polykeeper::testkit::domain::order_request;
use polykeeper::testkit::venue::{Call, ScanStep, ScriptedVenue};
use tokio::sync::watch;

const TRADER: &str = "0x0000000000000000000000000000000000000001";

fn ports(venue: &Arc<ScriptedVenue>) -> (Arc<dyn OrderVenue>, Arc<dyn PriceVerifier>) {
    (venue.clone(), venue.clone())
}

#[tokio::test]
async fn submit_builds_and_executes_exactly_once() {
    let venue = Arc::new(ScriptedVenue::new());
    let submitter = OrderSubmitter::new(venue.clone());

    let context = submitter.submit(&order_request()).await.unwrap();

    assert_eq!(context.order_id, "order-0xsigned");
    assert_eq!(venue.calls(), vec![Call::BuildOrder, Call::ExecuteOrder]);
}

#[tokio::test]
async fn build_failure_is_not_retried() {
    let venue = Arc::new(ScriptedVenue::new().failing_build("market closed"));
    let submitter = OrderSubmitter::new(venue.clone());

    let err = submitter.submit(&order_request()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Submission(SubmissionError::BuildFailed(ref msg)) if msg == "market closed"
    ));
    assert_eq!(venue.calls(), vec![Call::BuildOrder]);
}

#[tokio::test]
async fn execution_failure_is_not_retried() {
    let venue = Arc::new(ScriptedVenue::new().failing_execute("signature rejected"));
    let submitter = OrderSubmitter::new(venue.clone());

    let err = submitter.submit(&order_request()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Submission(SubmissionError::ExecutionFailed(_))
    ));
    assert_eq!(venue.calls(), vec![Call::BuildOrder, Call::ExecuteOrder]);
}

#[tokio::test]
async fn position_failure_is_informational() {
    let venue = Arc::new(ScriptedVenue::new().failing_positions("indexer down"));
    let submitter = OrderSubmitter::new(venue.clone());

    let snapshot = submitter.report_positions(&order_request(), TRADER).await;

    assert!(snapshot.is_none());
    assert_eq!(venue.count(Call::TraderPositions), 1);
}

#[tokio::test(start_paused = true)]
async fn build_failure_aborts_before_keeper_starts() {
    let venue = Arc::new(
        ScriptedVenue::new()
            .failing_build("market closed")
            .with_scans(vec![ScanStep::Ready(true)]),
    );
    let (order_venue, verifier) = ports(&venue);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let result = run_keeper(
        &order_request(),
        order_venue,
        verifier,
        TRADER,
        keeper(2000, 1000),
        shutdown_rx,
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Submission(SubmissionError::BuildFailed(_)))
    ));
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(venue.calls(), vec![Call::BuildOrder]);
}

#[tokio::test(start_paused = true)]
async fn successful_submission_hands_over_to_keeper() {
    let venue = Arc::new(
        ScriptedVenue::new()
            .failing_positions("indexer down")
            .with_scans(vec![ScanStep::Ready(false), ScanStep::Ready(true)]),
    );
    let (order_venue, verifier) = ports(&venue);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let run = tokio::spawn(async move {
        run_keeper(
            &order_request(),
            order_venue,
            verifier,
            TRADER,
            keeper(2000, 1000),
            shutdown_rx,
        )
        .await
    });

    tokio::time::sleep(Duration::from_millis(4500)).await;
    shutdown_tx.send(true).unwrap();
    let stats = run.await.unwrap().unwrap();

    assert_eq!(stats.cycles, 2);
    assert_eq!(stats.verifications, 1);
    assert_eq!(
        venue.calls(),
        vec![
            Call::BuildOrder,
            Call::ExecuteOrder,
            Call::TraderPositions,
            Call::ScanPendingPriceData,
            Call::PendingOrderIds,
            Call::ScanPendingPriceData,
            Call::PendingOrderIds,
            Call::VerifyPrice,
        ]
    );
}
