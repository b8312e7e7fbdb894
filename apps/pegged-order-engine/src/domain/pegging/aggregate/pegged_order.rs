//! Pegged Order Aggregate Root
//!
//! Keeps one limit order resting at a fixed offset from the best price on
//! its own side of the book. Every input goes through [`PeggedOrder::apply`],
//! which updates the state in place and returns the gateway commands to
//! issue. The aggregate performs no I/O.
//!
//! ```text
//! AwaitingFirstQuote --quote--> Submitting --NEW--> Live --drift--> PendingCancel
//!                                   |                 |                  |
//!                                REJECTED           FILLED        CANCELED -> Submitting
//!                                   v                 v           FILLED   -> Filled
//!                                Rejected           Filled
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{ExecutionReport, OrderFields, OrderStatus};
use crate::domain::pegging::errors::PegError;
use crate::domain::pegging::events::{OrderSubmission, PegCommand, PegEvent};
use crate::domain::pegging::services::PegPricer;
use crate::domain::pegging::value_objects::{BboQuote, PegOffset, PegState, WorkingOrder};
use crate::domain::shared::{OrderId, Quantity};

/// Prefix of client order ids when none is configured.
pub const DEFAULT_ORDER_ID_PREFIX: &str = "peg";

/// A logical order worked as a sequence of pegged limit orders.
///
/// Invariants:
/// - `filled_quantity <= fields.quantity`, and the filled quantity never
///   decreases.
/// - At most one working order exists at any time.
/// - Every submission is for `fields.quantity - filled_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeggedOrder {
    fields: OrderFields,
    offset: PegOffset,
    state: PegState,
    filled_quantity: Quantity,
    latest_quote: Option<BboQuote>,
    working_order: Option<WorkingOrder>,
    order_id_prefix: String,
    submissions: u64,
}

impl PeggedOrder {
    /// Create a pegged order awaiting its first quote.
    ///
    /// # Errors
    ///
    /// Returns [`PegError::InvalidOrder`] if the order fields fail validation.
    pub fn new(fields: OrderFields, offset: PegOffset) -> Result<Self, PegError> {
        fields.validate()?;
        Ok(Self {
            fields,
            offset,
            state: PegState::AwaitingFirstQuote,
            filled_quantity: Quantity::ZERO,
            latest_quote: None,
            working_order: None,
            order_id_prefix: DEFAULT_ORDER_ID_PREFIX.to_string(),
            submissions: 0,
        })
    }

    /// Set the prefix of client order ids (`{prefix}-{n}`).
    #[must_use]
    pub fn with_order_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.order_id_prefix = prefix.into();
        self
    }

    /// Account for quantity executed before the pegged order started.
    ///
    /// The first submission is then for the remainder only.
    ///
    /// # Errors
    ///
    /// Returns [`PegError::Overfill`] if the quantity exceeds the requested one.
    pub fn with_filled_quantity(mut self, filled: Quantity) -> Result<Self, PegError> {
        if filled > self.fields.quantity || filled < Quantity::ZERO {
            return Err(PegError::Overfill {
                order_id: OrderId::new(format!("{}-0", self.order_id_prefix)),
                fill_quantity: filled.to_string(),
                filled_quantity: Quantity::ZERO.to_string(),
                requested_quantity: self.fields.quantity.to_string(),
            });
        }
        self.filled_quantity = filled;
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Order fields being worked.
    #[must_use]
    pub const fn fields(&self) -> &OrderFields {
        &self.fields
    }

    /// Peg offset.
    #[must_use]
    pub const fn offset(&self) -> PegOffset {
        self.offset
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PegState {
        self.state
    }

    /// Quantity executed across all submissions.
    #[must_use]
    pub const fn filled_quantity(&self) -> Quantity {
        self.filled_quantity
    }

    /// Total requested quantity.
    #[must_use]
    pub const fn requested_quantity(&self) -> Quantity {
        self.fields.quantity
    }

    /// Quantity still to be executed.
    #[must_use]
    pub fn remaining_quantity(&self) -> Quantity {
        self.fields.quantity.saturating_sub(self.filled_quantity)
    }

    /// Most recent quote.
    #[must_use]
    pub const fn latest_quote(&self) -> Option<&BboQuote> {
        self.latest_quote.as_ref()
    }

    /// Order currently outstanding at the gateway.
    #[must_use]
    pub const fn working_order(&self) -> Option<&WorkingOrder> {
        self.working_order.as_ref()
    }

    /// Number of orders submitted so far.
    #[must_use]
    pub const fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Returns true once no further event changes the order.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if the report refers to the current working order.
    #[must_use]
    pub fn is_working(&self, order_id: &OrderId) -> bool {
        self.working_order
            .as_ref()
            .is_some_and(|working| &working.order_id == order_id)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Apply one event and return the gateway commands it requires.
    ///
    /// Events after a terminal state are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PegError::Overfill`] if a report executes more than the
    /// remaining quantity. The aggregate is left unchanged in that case.
    pub fn apply(&mut self, event: PegEvent) -> Result<Vec<PegCommand>, PegError> {
        if self.state.is_terminal() {
            return Ok(Vec::new());
        }

        match event {
            PegEvent::Quote(quote) => Ok(self.on_quote(quote)),
            PegEvent::Report(report) => self.on_report(&report),
        }
    }

    fn on_quote(&mut self, quote: BboQuote) -> Vec<PegCommand> {
        self.latest_quote = Some(quote);

        match self.state {
            PegState::AwaitingFirstQuote => self.submit_remaining(),
            PegState::Live => self.cancel_on_drift(),
            _ => Vec::new(),
        }
    }

    fn on_report(&mut self, report: &ExecutionReport) -> Result<Vec<PegCommand>, PegError> {
        if report.has_fill() {
            let filled = self.filled_quantity + report.last_quantity;
            if filled > self.fields.quantity {
                return Err(PegError::Overfill {
                    order_id: report.order_id.clone(),
                    fill_quantity: report.last_quantity.to_string(),
                    filled_quantity: self.filled_quantity.to_string(),
                    requested_quantity: self.fields.quantity.to_string(),
                });
            }
            self.filled_quantity = filled;
        }

        if !self.is_working(&report.order_id) {
            return Ok(Vec::new());
        }

        let commands = match (self.state, report.status) {
            // The working order is done; anything it left unexecuted is
            // worked again.
            (_, OrderStatus::Filled) => {
                self.working_order = None;
                self.submit_remaining()
            }

            (PegState::Submitting, status) if status.is_acknowledgment() => {
                self.state = PegState::Live;
                Vec::new()
            }
            (PegState::Submitting | PegState::Live, OrderStatus::Rejected) => {
                self.finish(PegState::Rejected);
                Vec::new()
            }
            (PegState::Submitting | PegState::Live, status) if status.is_terminal() => {
                self.finish(PegState::Canceled);
                Vec::new()
            }

            (PegState::PendingCancel, OrderStatus::CancelReject) => {
                self.state = PegState::Live;
                Vec::new()
            }
            (PegState::PendingCancel, status) if status.is_terminal() => {
                self.working_order = None;
                self.submit_remaining()
            }

            _ => Vec::new(),
        };

        Ok(commands)
    }

    fn cancel_on_drift(&mut self) -> Vec<PegCommand> {
        let (Some(working), Some(quote)) = (&self.working_order, &self.latest_quote) else {
            return Vec::new();
        };

        if !PegPricer::has_drifted(self.fields.side, quote, self.offset, working.price) {
            return Vec::new();
        }

        let order_id = working.order_id.clone();
        self.state = PegState::PendingCancel;
        vec![PegCommand::Cancel { order_id }]
    }

    fn submit_remaining(&mut self) -> Vec<PegCommand> {
        let remaining = self.remaining_quantity();
        if !remaining.is_positive() {
            self.finish(PegState::Filled);
            return Vec::new();
        }

        let Some(quote) = &self.latest_quote else {
            self.state = PegState::AwaitingFirstQuote;
            return Vec::new();
        };

        let price = PegPricer::target_price(self.fields.side, quote, self.offset);
        self.submissions += 1;
        let order_id = OrderId::new(format!("{}-{}", self.order_id_prefix, self.submissions));

        self.working_order = Some(WorkingOrder::new(order_id.clone(), price, remaining));
        self.state = PegState::Submitting;

        vec![PegCommand::Submit(OrderSubmission::new(
            order_id,
            &self.fields,
            price,
            remaining,
        ))]
    }

    fn finish(&mut self, state: PegState) {
        self.state = state;
        self.working_order = None;
    }
}
