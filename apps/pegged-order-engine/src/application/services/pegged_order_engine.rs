//! Pegged Order Engine Service
//!
//! Runs one [`PeggedOrder`] against an order gateway and a quote feed.
//! Quotes and execution reports are merged into a single FIFO queue that
//! one task drains: each event is applied to the aggregate and every
//! resulting gateway call is awaited before the next event is taken, so
//! submit and cancel calls never overlap.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{GatewayError, OrderGatewayPort, QuoteFeedError, QuoteFeedPort};
use crate::domain::order_execution::{ExecutionReport, OrderFields};
use crate::domain::pegging::{
    DEFAULT_ORDER_ID_PREFIX, PegCommand, PegError, PegEvent, PegOffset, PegState, PeggedOrder,
};
use crate::domain::shared::{OrderId, Quantity};

/// Configuration for the pegged order engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Prefix of client order ids (`{prefix}-{n}`).
    pub order_id_prefix: String,
    /// Quantity already executed before the engine starts.
    pub filled_quantity: Quantity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_id_prefix: DEFAULT_ORDER_ID_PREFIX.to_string(),
            filled_quantity: Quantity::ZERO,
        }
    }
}

/// How a pegged order ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PegCompletion {
    /// Terminal state.
    pub state: PegState,
    /// Quantity executed across all submissions.
    pub filled_quantity: Quantity,
    /// Total requested quantity.
    pub requested_quantity: Quantity,
    /// Number of orders submitted.
    pub submissions: u64,
}

impl PegCompletion {
    fn from_order(order: &PeggedOrder) -> Self {
        Self {
            state: order.state(),
            filled_quantity: order.filled_quantity(),
            requested_quantity: order.requested_quantity(),
            submissions: order.submissions(),
        }
    }

    /// Returns true if the requested quantity was executed.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.state == PegState::Filled
    }
}

/// Pegged order engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The aggregate refused an input.
    #[error("pegged order error: {0}")]
    Domain(#[from] PegError),

    /// The gateway failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The quote feed failed.
    #[error("quote feed error: {0}")]
    QuoteFeed(#[from] QuoteFeedError),

    /// Every event source closed before a terminal state was reached.
    #[error("event streams closed before the order completed (state: {state})")]
    EventStreamClosed {
        /// State when the last source closed.
        state: PegState,
    },

    /// The engine task ended without reporting an outcome.
    #[error("engine task aborted")]
    TaskAborted,
}

type Outcome = Option<Result<PegCompletion, EngineError>>;

/// Message on the engine queue.
enum Inbound {
    Event(PegEvent),
    SourceClosed,
}

/// Pegged order engine.
///
/// Created with the order to work, started once, and discarded after it
/// completes. Independent engines share nothing and run in parallel.
pub struct PeggedOrderEngine<G, Q>
where
    G: OrderGatewayPort,
    Q: QuoteFeedPort,
{
    /// Order gateway.
    gateway: Arc<G>,
    /// Quote feed.
    feed: Arc<Q>,
    /// Aggregate; written only by the engine task.
    order: Arc<Mutex<PeggedOrder>>,
    /// Outcome sender, taken by the first `start`.
    outcome_tx: Mutex<Option<watch::Sender<Outcome>>>,
    /// Outcome receiver for `await_completion`.
    outcome_rx: watch::Receiver<Outcome>,
    /// Stops the stream forwarders once the engine finishes.
    shutdown: CancellationToken,
}

impl<G, Q> PeggedOrderEngine<G, Q>
where
    G: OrderGatewayPort + 'static,
    Q: QuoteFeedPort + 'static,
{
    /// Create an engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Domain`] if the order fields are invalid.
    pub fn new(
        fields: OrderFields,
        offset: PegOffset,
        gateway: Arc<G>,
        feed: Arc<Q>,
    ) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default(), fields, offset, gateway, feed)
    }

    /// Create an engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Domain`] if the order fields are invalid or the
    /// configured filled quantity exceeds the requested quantity.
    pub fn with_config(
        config: EngineConfig,
        fields: OrderFields,
        offset: PegOffset,
        gateway: Arc<G>,
        feed: Arc<Q>,
    ) -> Result<Self, EngineError> {
        let order = PeggedOrder::new(fields, offset)?
            .with_order_id_prefix(config.order_id_prefix)
            .with_filled_quantity(config.filled_quantity)?;
        let (outcome_tx, outcome_rx) = watch::channel(None);

        Ok(Self {
            gateway,
            feed,
            order: Arc::new(Mutex::new(order)),
            outcome_tx: Mutex::new(Some(outcome_tx)),
            outcome_rx,
            shutdown: CancellationToken::new(),
        })
    }

    /// Start working the order.
    ///
    /// Spawns the engine task on the current tokio runtime. Calls after the
    /// first have no effect.
    pub fn start(&self) {
        let Some(outcome_tx) = self.outcome_tx.lock().take() else {
            tracing::debug!("Pegged order engine already started");
            return;
        };

        let task = EngineTask {
            gateway: Arc::clone(&self.gateway),
            feed: Arc::clone(&self.feed),
            order: Arc::clone(&self.order),
            shutdown: self.shutdown.clone(),
        };

        tokio::spawn(async move {
            let outcome = task.run().await;
            task.shutdown.cancel();
            match &outcome {
                Ok(completion) => tracing::info!(
                    state = %completion.state,
                    filled_quantity = %completion.filled_quantity,
                    requested_quantity = %completion.requested_quantity,
                    submissions = completion.submissions,
                    "Pegged order completed"
                ),
                Err(e) => tracing::error!(error = %e, "Pegged order engine failed"),
            }
            outcome_tx.send_replace(Some(outcome));
        });
    }

    /// Wait until the engine reaches a terminal state or fails.
    ///
    /// May be called any number of times, from any number of callers.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the engine, or
    /// [`EngineError::TaskAborted`] if the engine task died without one.
    pub async fn await_completion(&self) -> Result<PegCompletion, EngineError> {
        let mut rx = self.outcome_rx.clone();
        let outcome = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| EngineError::TaskAborted)?;
        outcome.clone().unwrap_or(Err(EngineError::TaskAborted))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PegState {
        self.order.lock().state()
    }

    /// Quantity executed so far.
    #[must_use]
    pub fn filled_quantity(&self) -> Quantity {
        self.order.lock().filled_quantity()
    }

    /// Returns true once `start` has been called.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.outcome_tx.lock().is_none()
    }
}

/// State owned by the spawned engine task.
struct EngineTask<G, Q> {
    gateway: Arc<G>,
    feed: Arc<Q>,
    order: Arc<Mutex<PeggedOrder>>,
    shutdown: CancellationToken,
}

impl<G, Q> EngineTask<G, Q>
where
    G: OrderGatewayPort + 'static,
    Q: QuoteFeedPort + 'static,
{
    async fn run(&self) -> Result<PegCompletion, EngineError> {
        let (symbol, side) = {
            let order = self.order.lock();
            (order.fields().symbol.clone(), order.fields().side)
        };
        tracing::info!(symbol = %symbol, side = %side, "Starting pegged order engine");

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let quotes = self.feed.subscribe_bbo(&symbol).await?;
        let mut sources = 1_usize;
        self.spawn_forwarder(quotes, events_tx.clone(), PegEvent::Quote);

        loop {
            let event = match events_rx.recv().await {
                Some(Inbound::Event(event)) => event,
                Some(Inbound::SourceClosed) => {
                    sources -= 1;
                    if sources == 0 {
                        return Err(self.streams_closed());
                    }
                    continue;
                }
                None => return Err(self.streams_closed()),
            };

            let (commands, state) = self.apply(event)?;

            for command in commands {
                match command {
                    PegCommand::Submit(submission) => {
                        let order_id = submission.order_id.clone();
                        tracing::info!(
                            order_id = %order_id,
                            price = %submission.price(),
                            quantity = %submission.quantity(),
                            "Submitting pegged order"
                        );
                        match self.gateway.submit(submission.into()).await {
                            Ok(reports) => {
                                sources += 1;
                                self.spawn_forwarder(reports, events_tx.clone(), PegEvent::Report);
                            }
                            Err(GatewayError::Rejected { reason }) => {
                                tracing::warn!(
                                    order_id = %order_id,
                                    reason = %reason,
                                    "Gateway refused submission"
                                );
                                let report = ExecutionReport::rejected(order_id, reason);
                                // The receiver lives in this loop, so the send cannot fail.
                                let _ = events_tx.send(Inbound::Event(PegEvent::Report(report)));
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                    PegCommand::Cancel { order_id } => {
                        tracing::info!(order_id = %order_id, "Canceling drifted order");
                        self.cancel(&order_id).await?;
                    }
                }
            }

            if state.is_terminal() {
                return Ok(PegCompletion::from_order(&self.order.lock()));
            }
        }
    }

    /// Apply one event to the aggregate, logging the transition.
    fn apply(&self, event: PegEvent) -> Result<(Vec<PegCommand>, PegState), EngineError> {
        let mut order = self.order.lock();
        let before = order.state();

        match &event {
            PegEvent::Quote(quote) => tracing::debug!(
                bid = %quote.bid,
                ask = %quote.ask,
                state = %before,
                "Quote received"
            ),
            PegEvent::Report(report) => {
                tracing::debug!(
                    order_id = %report.order_id,
                    status = %report.status,
                    last_quantity = %report.last_quantity,
                    state = %before,
                    "Execution report received"
                );
                if !order.is_working(&report.order_id) && !before.is_terminal() {
                    tracing::debug!(
                        order_id = %report.order_id,
                        "Report for an order that is no longer working"
                    );
                }
            }
        }

        let commands = order.apply(event)?;
        let after = order.state();
        if before != after {
            tracing::info!(
                from = %before,
                to = %after,
                filled_quantity = %order.filled_quantity(),
                "Pegged order state changed"
            );
        }

        Ok((commands, after))
    }

    async fn cancel(&self, order_id: &OrderId) -> Result<(), EngineError> {
        match self.gateway.cancel(order_id).await {
            Ok(()) => Ok(()),
            Err(GatewayError::OrderNotFound { .. }) => {
                tracing::warn!(
                    order_id = %order_id,
                    "Cancel target already gone, awaiting its final report"
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn streams_closed(&self) -> EngineError {
        EngineError::EventStreamClosed {
            state: self.order.lock().state(),
        }
    }

    /// Forward a source stream onto the engine queue until it ends or the
    /// engine shuts down.
    fn spawn_forwarder<T, F>(
        &self,
        mut source: mpsc::UnboundedReceiver<T>,
        sink: mpsc::UnboundedSender<Inbound>,
        wrap: F,
    ) where
        T: Send + 'static,
        F: Fn(T) -> PegEvent + Send + 'static,
    {
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    item = source.recv() => {
                        let message = item.map_or(Inbound::SourceClosed, |item| Inbound::Event(wrap(item)));
                        let closed = matches!(message, Inbound::SourceClosed);
                        if sink.send(message).is_err() || closed {
                            break;
                        }
                    }
                    () = shutdown.cancelled() => break,
                }
            }
        });
    }
}
