//! Debounced quoting for interactive address input.
//!
//! Every keystroke in an address field calls [`QuoteSession::update`]. The
//! session waits until the input has been quiet for the debounce window and
//! then runs a single estimate. Input that arrives while an estimate is in
//! flight cancels it; only the latest input ever reaches [`QuoteState`].

use super::route::{RouteEstimate, RouteEstimator};
use super::service::Geocoder;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteQuery {
    pub pickup: String,
    pub dropoff: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuoteState {
    #[default]
    Idle,
    Calculating,
    Available(RouteEstimate),
    Unavailable,
}

impl QuoteState {
    pub fn estimate(&self) -> Option<&RouteEstimate> {
        match self {
            QuoteState::Available(estimate) => Some(estimate),
            _ => None,
        }
    }
}

pub struct QuoteSession {
    input: watch::Sender<RouteQuery>,
    state: watch::Receiver<QuoteState>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl QuoteSession {
    /// Starts the debounce worker on the current tokio runtime.
    pub fn spawn<G>(estimator: Arc<RouteEstimator<G>>, debounce: Duration) -> Self
    where
        G: Geocoder + 'static,
    {
        let (input_tx, input_rx) = watch::channel(RouteQuery::default());
        let (state_tx, state_rx) = watch::channel(QuoteState::Idle);
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn(run(
            estimator,
            debounce,
            input_rx,
            Arc::new(state_tx),
            shutdown.clone(),
        ));

        Self {
            input: input_tx,
            state: state_rx,
            shutdown,
            worker: Some(worker),
        }
    }

    pub fn update(&self, pickup: impl Into<String>, dropoff: impl Into<String>) {
        self.input.send_replace(RouteQuery {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
        });
    }

    pub fn state(&self) -> QuoteState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified every time the quote state changes.
    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.state.clone()
    }

    /// Stops the worker and any estimate it is running.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                log::warn!("[SESSION] Worker ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for QuoteSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run<G>(
    estimator: Arc<RouteEstimator<G>>,
    debounce: Duration,
    mut input: watch::Receiver<RouteQuery>,
    state: Arc<watch::Sender<QuoteState>>,
    shutdown: CancellationToken,
) where
    G: Geocoder + 'static,
{
    let mut in_flight: Option<CancellationToken> = None;

    'outer: loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = input.changed() => if changed.is_err() { break },
        }

        // Whatever was running is answering an outdated question now.
        if let Some(stale) = in_flight.take() {
            log::debug!("[SESSION] Input changed, cancelling in-flight estimate");
            stale.cancel();
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break 'outer,
                changed = input.changed() => {
                    if changed.is_err() {
                        break 'outer;
                    }
                }
                _ = tokio::time::sleep(debounce) => break,
            }
        }

        let query = input.borrow_and_update().clone();
        let token = shutdown.child_token();
        in_flight = Some(token.clone());

        state.send_replace(QuoteState::Calculating);
        log::debug!(
            "[SESSION] Estimating \"{}\" → \"{}\"",
            query.pickup,
            query.dropoff
        );

        let estimator = Arc::clone(&estimator);
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let estimate = estimator
                .estimate_cancellable(&query.pickup, &query.dropoff, &token)
                .await;
            state.send_if_modified(|current| {
                // A cancelled run must not overwrite a newer one.
                if token.is_cancelled() {
                    return false;
                }
                *current = match estimate {
                    Some(estimate) => QuoteState::Available(estimate),
                    None => QuoteState::Unavailable,
                };
                true
            });
        });
    }

    if let Some(running) = in_flight {
        running.cancel();
    }
}
