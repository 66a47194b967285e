use std::sync::Arc;

use assert_matches::assert_matches;
use tokio::sync::Mutex;
use tokio::time::{advance, Duration};

use payment_cell::*;

fn form(name: &str, amount: &str) -> PaymentForm {
    PaymentForm {
        payer_name: name.to_string(),
        amount: amount.to_string(),
        note: None,
    }
}

fn desk(success_probability: f64) -> PaymentDesk {
    PaymentDesk::new(PaymentSimulator::with_seed(5).with_success_probability(success_probability))
}

fn new_session() -> Arc<Mutex<PaymentSession>> {
    Arc::new(Mutex::new(PaymentSession::new()))
}

#[tokio::test(start_paused = true)]
async fn test_successful_payment_resets_form() {
    let desk = desk(1.0);
    let session = new_session();

    let ticket = desk.submit(Arc::clone(&session), form("Ann", "50.00")).await.unwrap();

    {
        let guard = session.lock().await;
        assert_eq!(*guard.status(), PaymentStatus::Submitting { attempt: 1 });
        assert_eq!(guard.form().payer_name, "Ann");
        assert!(guard.panel().result_html.as_deref().unwrap().contains("Processing payment"));
    }
    assert!((900..1700).contains(&ticket.attempt.delay_ms));

    ticket.handle.await.unwrap();

    let guard = session.lock().await;
    let result = assert_matches!(guard.status(), PaymentStatus::Success { result } => result.clone());
    assert_eq!(result.id, ticket.attempt.transaction_id);
    assert_eq!(result.amount, 50.0);
    assert_eq!(*guard.form(), PaymentForm::default());
    let html = guard.panel().result_html.clone().unwrap();
    assert!(html.contains("Payment Successful"));
    assert!(html.contains("$50.00"));
    assert!(guard.panel().summary_html.contains("Processing:</strong> Instant"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_payment_keeps_form() {
    let desk = desk(0.0);
    let session = new_session();

    let ticket = desk.submit(Arc::clone(&session), form("Ann", "50")).await.unwrap();
    ticket.handle.await.unwrap();

    let guard = session.lock().await;
    assert_matches!(guard.status(), PaymentStatus::Failure { .. });
    assert_eq!(guard.form().amount, "50");
    assert!(guard.panel().result_html.as_deref().unwrap().contains("Payment Failed"));
}

#[tokio::test(start_paused = true)]
async fn test_outcome_waits_for_delay() {
    let desk = desk(1.0);
    let session = new_session();

    let ticket = desk.submit(Arc::clone(&session), form("Ann", "10")).await.unwrap();
    tokio::task::yield_now().await;

    advance(Duration::from_millis(899)).await;
    assert!(session.lock().await.status().is_submitting());

    advance(Duration::from_millis(ticket.attempt.delay_ms - 899)).await;
    ticket.handle.await.unwrap();
    assert_matches!(session.lock().await.status(), PaymentStatus::Success { .. });
}

#[tokio::test]
async fn test_invalid_input_is_rejected_synchronously() {
    let desk = desk(1.0);
    let session = new_session();

    let result = desk.submit(Arc::clone(&session), form("", "50")).await;

    assert_matches!(result, Err(PaymentError::InvalidInput(_)));
    let guard = session.lock().await;
    assert_eq!(*guard.status(), PaymentStatus::Idle);
    assert_eq!(guard.panel().result_html, None);
    assert_eq!(guard.panel().last_alert.as_deref(), Some("Please enter a valid name and amount."));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_submission_is_rejected() {
    let desk = desk(1.0);
    let session = new_session();

    let first = desk.submit(Arc::clone(&session), form("Ann", "50")).await.unwrap();
    let second = desk.submit(Arc::clone(&session), form("Bob", "75")).await;

    assert_matches!(second, Err(PaymentError::AlreadySubmitting));
    first.handle.await.unwrap();
    let guard = session.lock().await;
    let result = assert_matches!(guard.status(), PaymentStatus::Success { result } => result);
    assert_eq!(result.payer_name, "Ann");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_returns_to_idle() {
    let desk = desk(1.0);
    let session = new_session();

    let ticket = desk.submit(Arc::clone(&session), form("Ann", "50")).await.unwrap();
    desk.cancel(&session).await.unwrap();
    ticket.handle.await.unwrap();

    let guard = session.lock().await;
    assert_eq!(*guard.status(), PaymentStatus::Idle);
    assert_eq!(guard.panel().result_html, None);
    assert_eq!(guard.form().payer_name, "Ann");
}

#[tokio::test]
async fn test_cancel_without_pending_attempt() {
    let desk = desk(1.0);
    let session = new_session();

    assert_eq!(desk.cancel(&session).await, Err(PaymentError::NothingToCancel));
}

#[tokio::test(start_paused = true)]
async fn test_resubmission_after_failure_is_a_fresh_attempt() {
    let desk = desk(0.0);
    let session = new_session();

    let first = desk.submit(Arc::clone(&session), form("Ann", "50")).await.unwrap();
    first.handle.await.unwrap();
    let second = desk.submit(Arc::clone(&session), form("Ann", "50")).await.unwrap();

    assert_eq!(second.attempt.attempt, 2);
    assert_ne!(first.attempt.transaction_id, second.attempt.transaction_id);
    second.handle.await.unwrap();
    assert_matches!(session.lock().await.status(), PaymentStatus::Failure { .. });
}

#[tokio::test(start_paused = true)]
async fn test_success_rate_over_many_sessions() {
    let desk = PaymentDesk::new(PaymentSimulator::with_seed(2024));
    let mut successes = 0;
    let trials = 2_000;

    for _ in 0..trials {
        let session = new_session();
        let ticket = desk.submit(Arc::clone(&session), form("Ann", "1")).await.unwrap();
        if ticket.attempt.outcome == PaymentOutcome::Success {
            successes += 1;
        }
    }

    let rate = successes as f64 / trials as f64;
    assert!((rate - 0.92).abs() < 0.03, "rate {}", rate);
}
