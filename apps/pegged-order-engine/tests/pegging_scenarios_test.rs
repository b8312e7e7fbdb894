//! Integration tests for the pegged order engine.
//!
//! Drives `PeggedOrderEngine` through a scripted gateway and quote feed: the
//! test plays the venue, answering each gateway call with the execution
//! reports a real venue would send.

// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;

use pegged_order_engine::application::ports::{
    BboQuoteStream, ExecutionReportStream, GatewayError, OrderGatewayPort, QuoteFeedError,
    QuoteFeedPort, SubmitOrderRequest,
};
use pegged_order_engine::application::services::{EngineConfig, PeggedOrderEngine};
use pegged_order_engine::domain::order_execution::{
    ExecutionReport, OrderFields, OrderStatus, Side,
};
use pegged_order_engine::domain::pegging::{BboQuote, PegOffset, PegState};
use pegged_order_engine::domain::shared::{Money, OrderId, Quantity, Symbol};

// =============================================================================
// Scripted venue
// =============================================================================

#[derive(Debug)]
enum Call {
    Submit(SubmitOrderRequest),
    Cancel(OrderId),
}

/// Gateway whose reports are sent by the test.
///
/// Tracks which orders are still outstanding (submitted without a terminal
/// report) and counts submissions made while another order was outstanding.
struct ScriptedGateway {
    streams: Mutex<HashMap<OrderId, mpsc::UnboundedSender<ExecutionReport>>>,
    outstanding: Mutex<HashSet<OrderId>>,
    overlapping_submits: AtomicUsize,
    calls: mpsc::UnboundedSender<Call>,
}

impl ScriptedGateway {
    fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Call>) {
        let (calls, rx) = mpsc::unbounded_channel();
        let gateway = Self {
            streams: Mutex::new(HashMap::new()),
            outstanding: Mutex::new(HashSet::new()),
            overlapping_submits: AtomicUsize::new(0),
            calls,
        };
        (Arc::new(gateway), rx)
    }

    fn report(&self, report: ExecutionReport) {
        if report.status.is_terminal() {
            self.outstanding.lock().remove(&report.order_id);
        }
        let streams = self.streams.lock();
        streams[&report.order_id].send(report).unwrap();
    }

    fn status(&self, order_id: &str, status: OrderStatus) {
        self.report(ExecutionReport::new(OrderId::new(order_id), status));
    }

    fn fill(&self, order_id: &str, status: OrderStatus, quantity: i64, price: Decimal) {
        self.report(
            ExecutionReport::new(OrderId::new(order_id), status)
                .with_fill(Quantity::from_i64(quantity), Money::new(price)),
        );
    }

    fn overlapping_submits(&self) -> usize {
        self.overlapping_submits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderGatewayPort for ScriptedGateway {
    async fn submit(
        &self,
        request: SubmitOrderRequest,
    ) -> Result<ExecutionReportStream, GatewayError> {
        {
            let mut outstanding = self.outstanding.lock();
            if !outstanding.is_empty() {
                self.overlapping_submits.fetch_add(1, Ordering::SeqCst);
            }
            outstanding.insert(request.client_order_id.clone());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.streams
            .lock()
            .insert(request.client_order_id.clone(), tx);
        let _ = self.calls.send(Call::Submit(request));
        Ok(rx)
    }

    async fn cancel(&self, order_id: &OrderId) -> Result<(), GatewayError> {
        let _ = self.calls.send(Call::Cancel(order_id.clone()));
        Ok(())
    }
}

struct ScriptedFeed {
    quotes: Mutex<Option<BboQuoteStream>>,
}

impl ScriptedFeed {
    fn new() -> (Arc<Self>, mpsc::UnboundedSender<BboQuote>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = Self {
            quotes: Mutex::new(Some(rx)),
        };
        (Arc::new(feed), tx)
    }
}

#[async_trait]
impl QuoteFeedPort for ScriptedFeed {
    async fn subscribe_bbo(&self, symbol: &Symbol) -> Result<BboQuoteStream, QuoteFeedError> {
        self.quotes
            .lock()
            .take()
            .ok_or_else(|| QuoteFeedError::SubscriptionError {
                message: format!("already subscribed to {symbol}"),
            })
    }
}

// =============================================================================
// Helpers
// =============================================================================

type Engine = PeggedOrderEngine<ScriptedGateway, ScriptedFeed>;

struct Harness {
    engine: Engine,
    gateway: Arc<ScriptedGateway>,
    calls: mpsc::UnboundedReceiver<Call>,
    quotes: mpsc::UnboundedSender<BboQuote>,
}

impl Harness {
    fn start(side: Side, offset: Decimal, filled_quantity: i64) -> Self {
        let (gateway, calls) = ScriptedGateway::new();
        let (feed, quotes) = ScriptedFeed::new();
        let fields = OrderFields::limit(
            Symbol::new("TST"),
            side,
            Quantity::from_i64(1000),
            Money::new(dec!(1.00)),
        );
        let config = EngineConfig {
            filled_quantity: Quantity::from_i64(filled_quantity),
            ..EngineConfig::default()
        };
        let engine = PeggedOrderEngine::with_config(
            config,
            fields,
            PegOffset::new(Money::new(offset)).unwrap(),
            Arc::clone(&gateway),
            feed,
        )
        .unwrap();
        engine.start();

        Self {
            engine,
            gateway,
            calls,
            quotes,
        }
    }

    fn quote(&self, bid: Decimal, ask: Decimal) {
        let _ = self.quotes.send(BboQuote::new(
            Symbol::new("TST"),
            Money::new(bid),
            Money::new(ask),
        ));
    }

    async fn next_call(&mut self) -> Call {
        tokio::time::timeout(Duration::from_secs(5), self.calls.recv())
            .await
            .expect("timed out waiting for gateway call")
            .expect("gateway dropped")
    }

    async fn expect_submit(&mut self, order_id: &str, price: Decimal, quantity: i64) {
        match self.next_call().await {
            Call::Submit(request) => {
                assert_eq!(request.client_order_id, OrderId::new(order_id));
                assert_eq!(request.limit_price, Money::new(price));
                assert_eq!(request.quantity, Quantity::from_i64(quantity));
            }
            Call::Cancel(order_id) => panic!("expected submit, got cancel of {order_id}"),
        }
    }

    async fn expect_cancel(&mut self, order_id: &str) {
        match self.next_call().await {
            Call::Cancel(cancelled) => assert_eq!(cancelled, OrderId::new(order_id)),
            Call::Submit(request) => {
                panic!("expected cancel, got submit of {}", request.client_order_id)
            }
        }
    }

    async fn wait_for_state(&self, state: PegState) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.engine.state() != state {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {state}, at {}", self.engine.state()));
    }

    async fn assert_no_more_calls(&mut self) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(self.calls.try_recv().is_err(), "unexpected gateway call");
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_initial_rejection_is_terminal() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 1000).await;

    h.gateway.status("peg-1", OrderStatus::PendingNew);
    h.gateway
        .report(ExecutionReport::rejected(OrderId::new("peg-1"), "price out of band"));

    let completion = h.engine.await_completion().await.unwrap();
    assert_eq!(completion.state, PegState::Rejected);
    assert_eq!(completion.filled_quantity, Quantity::ZERO);
    assert_eq!(completion.submissions, 1);

    h.quote(dec!(1.05), dec!(1.06));
    h.assert_no_more_calls().await;
}

#[tokio::test]
async fn test_ask_reprices_on_drift_and_fills() {
    let mut h = Harness::start(Side::Ask, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(1.02), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.wait_for_state(PegState::Live).await;

    h.quote(dec!(0.90), dec!(0.91));
    h.expect_cancel("peg-1").await;
    h.wait_for_state(PegState::PendingCancel).await;

    h.gateway.status("peg-1", OrderStatus::PendingCancel);
    h.gateway.status("peg-1", OrderStatus::Canceled);
    h.expect_submit("peg-2", dec!(0.92), 1000).await;

    h.gateway.status("peg-2", OrderStatus::New);
    h.gateway
        .fill("peg-2", OrderStatus::Filled, 1000, dec!(0.92));

    let completion = h.engine.await_completion().await.unwrap();
    assert!(completion.is_filled());
    assert_eq!(completion.filled_quantity, Quantity::from_i64(1000));
    assert_eq!(completion.submissions, 2);
    assert_eq!(h.gateway.overlapping_submits(), 0);
}

#[tokio::test]
async fn test_zero_offset_pegs_at_touch() {
    let mut h = Harness::start(Side::Bid, Decimal::ZERO, 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(1.00), 1000).await;
    h.gateway
        .fill("peg-1", OrderStatus::Filled, 1000, dec!(1.00));

    let completion = h.engine.await_completion().await.unwrap();
    assert_eq!(completion.state, PegState::Filled);
    assert_eq!(completion.filled_quantity, Quantity::from_i64(1000));
    assert_eq!(completion.submissions, 1);
}

#[tokio::test]
async fn test_prior_and_partial_fills_carry_across_resubmission() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 10);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 990).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.gateway
        .fill("peg-1", OrderStatus::PartiallyFilled, 90, dec!(0.99));
    h.wait_for_state(PegState::Live).await;

    h.quote(dec!(1.01), dec!(1.02));
    h.expect_cancel("peg-1").await;

    h.gateway.status("peg-1", OrderStatus::Canceled);
    h.expect_submit("peg-2", dec!(1.00), 900).await;
    assert_eq!(h.engine.filled_quantity(), Quantity::from_i64(100));

    h.gateway.status("peg-2", OrderStatus::New);
    h.gateway
        .fill("peg-2", OrderStatus::PartiallyFilled, 400, dec!(1.00));
    h.gateway
        .fill("peg-2", OrderStatus::Filled, 500, dec!(1.00));

    let completion = h.engine.await_completion().await.unwrap();
    assert!(completion.is_filled());
    assert_eq!(completion.filled_quantity, Quantity::from_i64(1000));
    assert_eq!(completion.requested_quantity, Quantity::from_i64(1000));
}

#[tokio::test]
async fn test_unchanged_target_does_not_reprice() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.wait_for_state(PegState::Live).await;

    // Only the far side moves.
    h.quote(dec!(1.00), dec!(1.03));
    h.quote(dec!(1.00), dec!(1.02));
    h.assert_no_more_calls().await;
    assert_eq!(h.engine.state(), PegState::Live);
}

#[tokio::test]
async fn test_cancel_reject_keeps_order_live() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.wait_for_state(PegState::Live).await;

    h.quote(dec!(1.02), dec!(1.03));
    h.expect_cancel("peg-1").await;
    h.gateway.status("peg-1", OrderStatus::CancelReject);
    h.wait_for_state(PegState::Live).await;

    // Drift is evaluated again on the next quote.
    h.quote(dec!(1.03), dec!(1.04));
    h.expect_cancel("peg-1").await;
    h.gateway.status("peg-1", OrderStatus::Canceled);
    h.expect_submit("peg-2", dec!(1.02), 1000).await;
}

#[tokio::test]
async fn test_fill_during_pending_cancel_wins() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.wait_for_state(PegState::Live).await;

    h.quote(dec!(0.95), dec!(0.96));
    h.expect_cancel("peg-1").await;
    h.gateway
        .fill("peg-1", OrderStatus::Filled, 1000, dec!(0.99));

    let completion = h.engine.await_completion().await.unwrap();
    assert!(completion.is_filled());
    assert_eq!(completion.submissions, 1);
    h.assert_no_more_calls().await;
}

#[tokio::test]
async fn test_unsolicited_cancel_ends_engine() {
    let mut h = Harness::start(Side::Ask, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(1.02), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.gateway
        .fill("peg-1", OrderStatus::PartiallyFilled, 250, dec!(1.02));
    h.gateway.status("peg-1", OrderStatus::DoneForDay);

    let completion = h.engine.await_completion().await.unwrap();
    assert_eq!(completion.state, PegState::Canceled);
    assert_eq!(completion.filled_quantity, Quantity::from_i64(250));
    assert!(!completion.is_filled());
}

#[tokio::test]
async fn test_at_most_one_order_outstanding_while_chasing() {
    let mut h = Harness::start(Side::Bid, dec!(0.01), 0);

    h.quote(dec!(1.00), dec!(1.01));
    h.expect_submit("peg-1", dec!(0.99), 1000).await;
    h.gateway.status("peg-1", OrderStatus::New);
    h.wait_for_state(PegState::Live).await;

    let bids = [dec!(1.01), dec!(1.02), dec!(1.01), dec!(1.00)];
    for (n, bid) in bids.into_iter().enumerate() {
        let working = format!("peg-{}", n + 1);
        let next = format!("peg-{}", n + 2);

        h.quote(bid, bid + dec!(0.01));
        h.expect_cancel(&working).await;

        // Quotes arriving mid-cancel must not trigger another submit.
        h.quote(bid + dec!(0.05), bid + dec!(0.06));
        h.quote(bid, bid + dec!(0.01));
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.gateway.status(&working, OrderStatus::Canceled);

        h.expect_submit(&next, bid - dec!(0.01), 1000).await;
        h.gateway.status(&next, OrderStatus::New);
        h.wait_for_state(PegState::Live).await;
    }

    assert_eq!(h.gateway.overlapping_submits(), 0);
    assert_eq!(h.engine.state(), PegState::Live);
}
