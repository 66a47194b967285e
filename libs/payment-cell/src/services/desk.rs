use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, instrument, warn};

use crate::error::PaymentError;
use crate::models::{
    PaymentAttempt, PaymentForm, PaymentOutcome, PaymentPanel, PaymentRequest, PaymentSnapshot,
    PaymentStatus, TransactionResult,
};
use crate::services::render::{
    failure_html, processing_html, settled_summary_html, success_html, summary_for_amount,
};
use crate::services::simulator::PaymentSimulator;
use crate::services::view::PaymentView;

/// State of one payment page visit.
#[derive(Debug)]
pub struct PaymentSession {
    status: PaymentStatus,
    form: PaymentForm,
    panel: PaymentPanel,
    attempts: u64,
    cancel: Option<oneshot::Sender<()>>,
}

impl PaymentSession {
    pub fn new() -> Self {
        let mut panel = PaymentPanel::default();
        panel.update_summary(summary_for_amount(0.0));

        Self {
            status: PaymentStatus::Idle,
            form: PaymentForm::default(),
            panel,
            attempts: 0,
            cancel: None,
        }
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn panel(&self) -> &PaymentPanel {
        &self.panel
    }

    pub fn snapshot(&self) -> PaymentSnapshot {
        PaymentSnapshot {
            status: self.status.clone(),
            form: self.form.clone(),
            panel: self.panel.clone(),
        }
    }

    /// Applies a decided attempt once its delay has elapsed. Ignored when the
    /// attempt was cancelled or superseded.
    fn settle(&mut self, attempt: &PaymentAttempt) {
        if self.status != (PaymentStatus::Submitting { attempt: attempt.attempt }) {
            debug!("Dropping stale payment attempt {}", attempt.attempt);
            return;
        }
        self.cancel = None;

        let result = TransactionResult {
            id: attempt.transaction_id.clone(),
            outcome: attempt.outcome,
            amount: attempt.request.amount,
            payer_name: attempt.request.payer_name.clone(),
        };

        match attempt.outcome {
            PaymentOutcome::Success => {
                info!("Payment {} succeeded", result.id);
                self.panel.show_result(success_html(&result));
                self.form = PaymentForm::default();
                self.panel.update_summary(settled_summary_html());
                self.status = PaymentStatus::Success { result };
            }
            PaymentOutcome::Failure => {
                warn!("Payment {} failed", result.id);
                self.panel.show_result(failure_html());
                self.status = PaymentStatus::Failure { result };
            }
        }
    }
}

impl Default for PaymentSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for a scheduled attempt. Awaiting `handle` waits for it to settle
/// or be cancelled.
#[derive(Debug)]
pub struct PaymentTicket {
    pub attempt: PaymentAttempt,
    pub handle: JoinHandle<()>,
}

/// Payment page controller: validates submissions and runs the delayed,
/// randomized outcome for each accepted attempt.
pub struct PaymentDesk {
    simulator: Mutex<PaymentSimulator>,
}

impl PaymentDesk {
    pub fn new(simulator: PaymentSimulator) -> Self {
        Self {
            simulator: Mutex::new(simulator),
        }
    }

    /// `Idle | Success | Failure -> Submitting`. Invalid input and overlapping
    /// submissions are rejected without touching the session state.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        session: Arc<Mutex<PaymentSession>>,
        form: PaymentForm,
    ) -> Result<PaymentTicket, PaymentError> {
        let mut guard = session.lock().await;

        if guard.status.is_submitting() {
            warn!("Rejected overlapping payment submission");
            return Err(PaymentError::AlreadySubmitting);
        }

        let request = match PaymentRequest::from_form(&form) {
            Ok(request) => request,
            Err(e) => {
                guard.panel.alert(e.to_string());
                return Err(e);
            }
        };

        guard.attempts += 1;
        let attempt = {
            let mut simulator = self.simulator.lock().await;
            PaymentAttempt {
                attempt: guard.attempts,
                transaction_id: simulator.transaction_id(),
                delay_ms: simulator.processing_delay_ms(),
                outcome: simulator.decide_outcome(),
                request,
            }
        };

        info!(
            "Processing payment {} ({} ms)",
            attempt.transaction_id, attempt.delay_ms
        );

        guard.form = form;
        guard.status = PaymentStatus::Submitting { attempt: attempt.attempt };
        guard.panel.last_alert = None;
        guard.panel.show_processing(processing_html());

        let (cancel_tx, cancel_rx) = oneshot::channel();
        guard.cancel = Some(cancel_tx);
        drop(guard);

        let handle = tokio::spawn(run_attempt(Arc::clone(&session), attempt.clone(), cancel_rx));

        Ok(PaymentTicket { attempt, handle })
    }

    /// Aborts the pending attempt and returns the session to `Idle`.
    pub async fn cancel(&self, session: &Mutex<PaymentSession>) -> Result<(), PaymentError> {
        let mut guard = session.lock().await;

        let attempt = match guard.status {
            PaymentStatus::Submitting { attempt } => attempt,
            _ => return Err(PaymentError::NothingToCancel),
        };

        if let Some(cancel) = guard.cancel.take() {
            let _ = cancel.send(());
        }
        guard.status = PaymentStatus::Idle;
        guard.panel.hide_result();

        info!("Cancelled payment attempt {}", attempt);
        Ok(())
    }
}

impl Default for PaymentDesk {
    fn default() -> Self {
        Self::new(PaymentSimulator::new())
    }
}

async fn run_attempt(
    session: Arc<Mutex<PaymentSession>>,
    attempt: PaymentAttempt,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = sleep(Duration::from_millis(attempt.delay_ms)) => {}
        _ = &mut cancel_rx => {
            debug!("Payment attempt {} stopped before settling", attempt.attempt);
            return;
        }
    }

    session.lock().await.settle(&attempt);
}
