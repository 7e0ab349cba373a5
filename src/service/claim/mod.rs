//! Claim orchestrator: the autopay state machine.
//!
//! A claim moves `Idle → Admitted → Negotiating → AwaitingPriceConfirmation →
//! AwaitingConfirmAction → Settled`, or stops at one of the `ClaimOutcome` error exits.
//!
//! The listening window races the correlated-reply feed against a deadline. As soon as a
//! terminal branch fires the feed is dropped, so nothing the market bot posts afterwards
//! can reach the ledger. The balance is cleared exactly once, in `Settled`, and only after
//! the confirm button press was reported successful.

pub mod verify;

use std::{sync::Arc, time::Duration};

use crate::{
    error::{transport::TransportError, AppError},
    market::{ActionInvoker, MarketFeed, MarketTransport},
    model::{
        claim::{ClaimOutcome, ClaimRequest, ClaimState, MarketRejection},
        market::{ActionHandle, MarketMessage, CONFIRM_LABEL},
    },
    service::{
        balance::BalanceStore,
        guard::{AutopaySwitch, ClaimGuard},
    },
};

use self::verify::{parse_market_reply, MarketReply};

/// How long the market bot has to answer a purchase request.
pub const DEFAULT_CLAIM_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of the listening window.
enum Verdict {
    /// The claim ended without touching the ledger
    Finished(ClaimOutcome),
    /// The price checked out; press `action` on `reply`
    Confirm {
        reply: MarketMessage,
        action: ActionHandle,
    },
}

/// Tracks the state of one claim for logging.
struct ClaimRun {
    user_id: u64,
    state: ClaimState,
}

impl ClaimRun {
    fn new(user_id: u64) -> Self {
        Self {
            user_id,
            state: ClaimState::Idle,
        }
    }

    fn advance(&mut self, next: ClaimState) {
        tracing::debug!(
            "Claim for user {}: {} -> {}",
            self.user_id,
            self.state,
            next
        );
        self.state = next;
    }

    fn finish(self, outcome: ClaimOutcome) -> ClaimOutcome {
        match &outcome {
            ClaimOutcome::Success { points, amount } => tracing::info!(
                "Claim for user {} settled: {} points for {} coins",
                self.user_id,
                points,
                amount
            ),
            ClaimOutcome::SystemError(reason) => tracing::error!(
                "Claim for user {} failed in state {}: {}",
                self.user_id,
                self.state,
                reason
            ),
            other => tracing::warn!(
                "Claim for user {} ended in state {} with {}",
                self.user_id,
                self.state,
                other.label()
            ),
        }
        outcome
    }
}

/// Drives claims from request to settlement.
///
/// Cheap to clone; clones share the store, guard, switch and transport.
#[derive(Clone)]
pub struct ClaimOrchestrator {
    store: BalanceStore,
    guard: ClaimGuard,
    autopay: AutopaySwitch,
    transport: Arc<dyn MarketTransport>,
    invoker: Arc<dyn ActionInvoker>,
    exchange_rate: u64,
    timeout: Duration,
}

impl ClaimOrchestrator {
    /// Creates an orchestrator.
    ///
    /// # Arguments
    /// - `store` - Ledger the balance is read from and settled in
    /// - `guard` - Per-user admission
    /// - `autopay` - Process-wide kill switch
    /// - `transport` - Sends purchase requests and exposes replies
    /// - `invoker` - Presses the confirm button
    /// - `exchange_rate` - Market coins per point
    /// - `timeout` - Listening window for the market reply
    pub fn new(
        store: BalanceStore,
        guard: ClaimGuard,
        autopay: AutopaySwitch,
        transport: Arc<dyn MarketTransport>,
        invoker: Arc<dyn ActionInvoker>,
        exchange_rate: u64,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            guard,
            autopay,
            transport,
            invoker,
            exchange_rate,
            timeout,
        }
    }

    pub fn exchange_rate(&self) -> u64 {
        self.exchange_rate
    }

    /// Runs one claim to a terminal outcome.
    ///
    /// Never fails: transport and storage faults come back as `ClaimOutcome::SystemError`.
    /// The ledger is only written on `ClaimOutcome::Success`.
    pub async fn submit_claim(&self, user_id: u64, listing_id: &str) -> ClaimOutcome {
        let mut run = ClaimRun::new(user_id);

        if !self.autopay.is_enabled() {
            return run.finish(ClaimOutcome::AutopayDisabled);
        }

        let Some(_permit) = self.guard.try_admit(user_id) else {
            return run.finish(ClaimOutcome::Busy);
        };
        run.advance(ClaimState::Admitted);

        let entry = self.store.balance(user_id).await;
        if entry.point_balance < 1 {
            return run.finish(ClaimOutcome::InsufficientBalance);
        }

        let Some(requested_amount) = entry.point_balance.checked_mul(self.exchange_rate) else {
            return run.finish(ClaimOutcome::SystemError(format!(
                "claim amount for {} points overflows",
                entry.point_balance
            )));
        };

        let request = ClaimRequest {
            user_id,
            listing_id: listing_id.to_string(),
            points: entry.point_balance,
            requested_amount,
        };

        let outcome = match self.negotiate(&mut run, &request).await {
            Ok(outcome) => outcome,
            Err(e) => ClaimOutcome::SystemError(e.to_string()),
        };

        run.finish(outcome)
    }

    async fn negotiate(
        &self,
        run: &mut ClaimRun,
        request: &ClaimRequest,
    ) -> Result<ClaimOutcome, AppError> {
        // subscribe before sending so a fast reply cannot slip past the window
        let mut feed = self.transport.subscribe();
        run.advance(ClaimState::Negotiating);

        let sent = self
            .transport
            .request_purchase(&request.listing_id)
            .await?;
        run.advance(ClaimState::AwaitingPriceConfirmation);

        let verdict = self
            .await_verdict(&mut feed, &sent, request.requested_amount)
            .await?;
        drop(feed);

        let (reply, action) = match verdict {
            Verdict::Finished(outcome) => return Ok(outcome),
            Verdict::Confirm { reply, action } => (reply, action),
        };
        run.advance(ClaimState::AwaitingConfirmAction);

        if let Err(e) = self.invoker.invoke(&reply, &action).await {
            tracing::warn!(
                "Confirm press for user {} on message {} failed: {}",
                request.user_id,
                reply.id,
                e
            );
            return Ok(ClaimOutcome::ConfirmActionFailure);
        }

        match self
            .store
            .update_existing(request.user_id, |e| e.settled())
            .await
        {
            Ok(Some(_)) => {}
            // a reset during the claim already removed the entry
            Ok(None) => tracing::warn!(
                "Purchase for user {} was confirmed after their ledger entry was reset",
                request.user_id
            ),
            Err(e) => {
                tracing::error!(
                    "Purchase for user {} was confirmed but the balance was not cleared: {}",
                    request.user_id,
                    e
                );
                return Err(e);
            }
        }
        run.advance(ClaimState::Settled);

        Ok(ClaimOutcome::Success {
            points: request.points,
            amount: request.requested_amount,
        })
    }

    /// Listens for the first correlated reply that ends the negotiation, or the deadline.
    async fn await_verdict(
        &self,
        feed: &mut MarketFeed,
        request: &MarketMessage,
        expected: u64,
    ) -> Result<Verdict, TransportError> {
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => return Ok(Verdict::Finished(ClaimOutcome::Timeout)),
                next = feed.next() => {
                    let reply = next.ok_or(TransportError::FeedClosed)?;
                    if !reply.correlates_to(request) {
                        continue;
                    }
                    if let Some(verdict) = evaluate_reply(reply, expected) {
                        return Ok(verdict);
                    }
                }
            }
        }
    }
}

/// Decides what a correlated reply means for the claim.
///
/// Returns `None` for a verified reply that offers no confirm button; the window then
/// stays open.
fn evaluate_reply(reply: MarketMessage, expected: u64) -> Option<Verdict> {
    let finished = |outcome| Some(Verdict::Finished(outcome));

    match parse_market_reply(&reply.content) {
        MarketReply::ListingNotFound => {
            finished(ClaimOutcome::NotFound(MarketRejection::ListingNotFound))
        }
        MarketReply::InsufficientFunds => {
            finished(ClaimOutcome::NotFound(MarketRejection::InsufficientFunds))
        }
        MarketReply::Unrecognized => finished(ClaimOutcome::VerificationParseFailure),
        MarketReply::Quoted(quoted) if quoted != expected => {
            finished(ClaimOutcome::PriceMismatch { quoted, expected })
        }
        MarketReply::Quoted(_) => {
            let action = reply.action(CONFIRM_LABEL)?.clone();
            Some(Verdict::Confirm { reply, action })
        }
    }
}
