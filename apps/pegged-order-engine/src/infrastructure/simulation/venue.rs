//! Simulated venue.
//!
//! An in-memory order gateway and quote feed. Limit orders execute in full
//! as soon as the opposite side of the book reaches their price:
//!
//! - a bid fills at the ask when `ask <= price`
//! - an ask fills at the bid when `bid >= price`
//!
//! Orders are rejected while either side of the book is empty, and after the
//! session has ended.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::application::ports::{
    BboQuoteStream, ExecutionReportStream, GatewayError, OrderGatewayPort, QuoteFeedError,
    QuoteFeedPort, SubmitOrderRequest,
};
use crate::domain::order_execution::{ExecutionReport, OrderStatus, Side};
use crate::domain::pegging::BboQuote;
use crate::domain::shared::{Money, OrderId, Quantity, Symbol};

/// An order resting at the simulated venue.
#[derive(Debug)]
struct RestingOrder {
    request: SubmitOrderRequest,
    /// Quantity still open.
    leaves_quantity: Quantity,
    sequence: u64,
    reports: mpsc::UnboundedSender<ExecutionReport>,
}

impl RestingOrder {
    fn new(request: SubmitOrderRequest, reports: mpsc::UnboundedSender<ExecutionReport>) -> Self {
        Self {
            leaves_quantity: request.quantity,
            request,
            sequence: 0,
            reports,
        }
    }

    /// Send a report, returning the status it carried.
    ///
    /// Executions reduce the open quantity.
    fn send(&mut self, report: ExecutionReport) -> OrderStatus {
        if report.status.is_fill() {
            self.leaves_quantity = self.leaves_quantity.saturating_sub(report.last_quantity);
        }
        self.sequence += 1;
        let status = report.status;
        let _ = self.reports.send(report.with_sequence(self.sequence));
        status
    }

    fn send_status(&mut self, status: OrderStatus) -> OrderStatus {
        let report = ExecutionReport::new(self.request.client_order_id.clone(), status);
        self.send(report)
    }

    /// Execution price if the book crosses the order's limit.
    fn match_price(&self, quote: &BboQuote) -> Option<Money> {
        let touch = quote.anchor(self.request.side.opposite());
        let crosses = match self.request.side {
            Side::Bid => touch <= self.request.limit_price,
            Side::Ask => touch >= self.request.limit_price,
        };
        crosses.then_some(touch)
    }

    /// Execute everything still open.
    fn fill(&mut self, price: Money) -> OrderStatus {
        let report = ExecutionReport::new(self.request.client_order_id.clone(), OrderStatus::Filled)
            .with_fill(self.leaves_quantity, price);
        self.send(report)
    }
}

#[derive(Debug, Default)]
struct Book {
    bbo: Option<BboQuote>,
    subscribers: Vec<mpsc::UnboundedSender<BboQuote>>,
}

#[derive(Debug, Default)]
struct VenueState {
    books: HashMap<Symbol, Book>,
    orders: HashMap<OrderId, RestingOrder>,
    session_closed: bool,
}

impl VenueState {
    /// Fill every resting order on `symbol` that the book now crosses.
    fn match_orders(&mut self, symbol: &Symbol) {
        let Some(quote) = self.books.get(symbol).and_then(|book| book.bbo.clone()) else {
            return;
        };

        let mut filled = Vec::new();
        for (order_id, order) in self
            .orders
            .iter_mut()
            .filter(|(_, order)| &order.request.symbol == symbol)
        {
            if let Some(price) = order.match_price(&quote) {
                tracing::debug!(
                    order_id = %order_id,
                    price = %price,
                    quantity = %order.leaves_quantity,
                    "Simulated fill"
                );
                order.fill(price);
                filled.push(order_id.clone());
            }
        }

        for order_id in filled {
            self.orders.remove(&order_id);
        }
    }
}

/// In-memory venue implementing both the order gateway and the quote feed.
#[derive(Debug, Default)]
pub struct SimulatedVenue {
    state: Mutex<VenueState>,
}

impl SimulatedVenue {
    /// Create an empty venue with no quotes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new top of book.
    ///
    /// The quote is stored, sent to every subscriber of its symbol, and
    /// resting orders are matched against it.
    pub fn publish_bbo(&self, quote: BboQuote) {
        let mut state = self.state.lock();
        let symbol = quote.symbol.clone();

        let book = state.books.entry(symbol.clone()).or_default();
        book.subscribers
            .retain(|subscriber| subscriber.send(quote.clone()).is_ok());
        book.bbo = Some(quote);

        state.match_orders(&symbol);
    }

    /// Latest quote for a symbol.
    #[must_use]
    pub fn bbo(&self, symbol: &Symbol) -> Option<BboQuote> {
        self.state
            .lock()
            .books
            .get(symbol)
            .and_then(|book| book.bbo.clone())
    }

    /// Close the trading session.
    ///
    /// Every resting order ends with `DONE_FOR_DAY` and later submissions
    /// are rejected.
    pub fn end_session(&self) {
        let mut state = self.state.lock();
        state.session_closed = true;
        for (order_id, mut order) in state.orders.drain() {
            tracing::debug!(order_id = %order_id, "Session closed for order");
            order.send_status(OrderStatus::DoneForDay);
        }
    }

    /// Push an externally produced report onto a resting order's stream.
    ///
    /// The report gets the next sequence number; a terminal report ends the
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::OrderNotFound`] if the order is not resting.
    pub fn update(&self, order_id: &OrderId, report: ExecutionReport) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        if order.send(report).is_terminal() {
            state.orders.remove(order_id);
        }
        Ok(())
    }

    /// Returns the ids of all resting orders.
    #[must_use]
    pub fn resting_orders(&self) -> Vec<OrderId> {
        self.state.lock().orders.keys().cloned().collect()
    }
}

#[async_trait]
impl OrderGatewayPort for SimulatedVenue {
    async fn submit(
        &self,
        request: SubmitOrderRequest,
    ) -> Result<ExecutionReportStream, GatewayError> {
        let mut state = self.state.lock();
        let order_id = request.client_order_id.clone();

        if state.orders.contains_key(&order_id) {
            return Err(GatewayError::Rejected {
                reason: format!("duplicate order id {order_id}"),
            });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let symbol = request.symbol.clone();
        let mut order = RestingOrder::new(request, tx);
        order.send_status(OrderStatus::PendingNew);

        if state.session_closed {
            tracing::debug!(order_id = %order_id, "Simulated order rejected, session closed");
            order.send(ExecutionReport::rejected(order_id, "session closed"));
            return Ok(rx);
        }

        let bbo = state.books.get(&symbol).and_then(|book| book.bbo.clone());
        match bbo {
            Some(quote) if !quote.is_one_sided() => {
                tracing::debug!(
                    order_id = %order_id,
                    side = %order.request.side,
                    price = %order.request.limit_price,
                    "Simulated order accepted"
                );
                order.send_status(OrderStatus::New);
                state.orders.insert(order_id, order);
                state.match_orders(&symbol);
            }
            _ => {
                tracing::debug!(order_id = %order_id, "Simulated order rejected, no market");
                order.send(ExecutionReport::rejected(
                    order_id,
                    format!("no two-sided market for {symbol}"),
                ));
            }
        }

        Ok(rx)
    }

    async fn cancel(&self, order_id: &OrderId) -> Result<(), GatewayError> {
        let mut order = self
            .state
            .lock()
            .orders
            .remove(order_id)
            .ok_or_else(|| GatewayError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        order.send_status(OrderStatus::PendingCancel);
        order.send_status(OrderStatus::Canceled);
        Ok(())
    }
}

#[async_trait]
impl QuoteFeedPort for SimulatedVenue {
    async fn subscribe_bbo(&self, symbol: &Symbol) -> Result<BboQuoteStream, QuoteFeedError> {
        symbol
            .validate()
            .map_err(|e| QuoteFeedError::SymbolNotFound {
                symbol: format!("{symbol} ({e})"),
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        let book = state.books.entry(symbol.clone()).or_default();
        if let Some(quote) = &book.bbo {
            let _ = tx.send(quote.clone());
        }
        book.subscribers.push(tx);
        Ok(rx)
    }
}
