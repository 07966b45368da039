//! Per-tool invocation lifecycle

use crate::error::Error;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Observable state of one tool instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum ToolState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for ToolState<T> {
    fn default() -> Self {
        ToolState::Idle
    }
}

impl<T> ToolState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, ToolState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ToolState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ToolState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            ToolState::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Ticket issued by [`ToolSlot::begin`]. Only the newest ticket may write the slot.
#[derive(Debug, Clone)]
pub struct Invocation {
    generation: u64,
    token: CancellationToken,
}

impl Invocation {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancelled once a newer invocation starts or the slot is reset
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

struct SlotInner {
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Holds the single live [`ToolState`] of a tool and enforces
/// "last request sent wins" between overlapping invocations.
pub struct ToolSlot<T> {
    state: watch::Sender<ToolState<T>>,
    inner: Mutex<SlotInner>,
    root: CancellationToken,
}

impl<T> Default for ToolSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ToolSlot<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ToolState::Idle);
        Self {
            state,
            inner: Mutex::new(SlotInner {
                generation: 0,
                in_flight: None,
            }),
            root: CancellationToken::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bump the generation and cancel whatever was in flight
    fn supersede(inner: &mut SlotInner) -> u64 {
        inner.generation += 1;
        if let Some(previous) = inner.in_flight.take() {
            previous.cancel();
        }
        inner.generation
    }

    /// Start an invocation: supersede any in-flight one and enter `Loading`
    pub fn begin(&self) -> Invocation {
        let mut inner = self.lock();
        let generation = Self::supersede(&mut inner);
        let token = self.root.child_token();
        inner.in_flight = Some(token.clone());
        self.state.send_replace(ToolState::Loading);

        debug!(generation, "Tool invocation started");
        Invocation { generation, token }
    }

    /// Apply an invocation's outcome if its ticket is still current.
    ///
    /// Failures are logged in full and surfaced as `user_message`. Returns
    /// `false` when the ticket was stale and the outcome was discarded.
    pub fn complete(
        &self,
        invocation: &Invocation,
        outcome: Result<T, Error>,
        user_message: &str,
    ) -> bool {
        let mut inner = self.lock();
        if inner.generation != invocation.generation {
            warn!(
                generation = invocation.generation,
                current = inner.generation,
                "Discarding stale tool completion"
            );
            return false;
        }

        inner.in_flight = None;
        let next = match outcome {
            Ok(value) => ToolState::Success(value),
            Err(e) => {
                error!(generation = invocation.generation, kind = ?e.kind(), "Tool invocation failed: {}", e);
                ToolState::Error(user_message.to_string())
            }
        };
        self.state.send_replace(next);
        true
    }

    /// Enter `Error` without a backend call, superseding any in-flight invocation
    pub fn fail_fast(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        let generation = Self::supersede(&mut inner);
        let message = message.into();
        debug!(generation, "Tool invocation rejected: {}", message);
        self.state.send_replace(ToolState::Error(message));
    }

    /// Return to `Idle`, superseding any in-flight invocation
    pub fn reset(&self) {
        let mut inner = self.lock();
        Self::supersede(&mut inner);
        self.state.send_replace(ToolState::Idle);
    }

    pub fn is_current(&self, invocation: &Invocation) -> bool {
        self.lock().generation == invocation.generation
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Receive every state transition
    pub fn subscribe(&self) -> watch::Receiver<ToolState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> ToolSlot<T> {
    /// Snapshot of the live state
    pub fn state(&self) -> ToolState<T> {
        self.state.borrow().clone()
    }
}

impl<T> Drop for ToolSlot<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;

    #[test]
    fn test_begin_and_complete() {
        let slot: ToolSlot<u32> = ToolSlot::new();
        assert!(slot.state().is_idle());

        let ticket = slot.begin();
        assert!(slot.state().is_loading());

        assert!(slot.complete(&ticket, Ok(7), "unused"));
        assert_eq!(slot.state(), ToolState::Success(7));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let slot: ToolSlot<&str> = ToolSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());

        assert!(slot.complete(&second, Ok("newer"), "failed"));
        assert!(!slot.complete(&first, Ok("older"), "failed"));
        assert_eq!(slot.state().value(), Some(&"newer"));
    }

    #[test]
    fn test_loading_clears_previous_payload() {
        let slot: ToolSlot<u32> = ToolSlot::new();
        let ticket = slot.begin();
        slot.complete(&ticket, Err(Error::decode("bad json")), "Could not generate copy.");
        assert_eq!(slot.state().error(), Some("Could not generate copy."));

        slot.begin();
        let state = slot.state();
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.value(), None);
    }

    #[test]
    fn test_fail_fast_supersedes_in_flight() {
        let slot: ToolSlot<u32> = ToolSlot::new();
        let ticket = slot.begin();

        slot.fail_fast("Please upload an image first.");

        assert!(ticket.token().is_cancelled());
        assert!(!slot.is_current(&ticket));
        let late: Result<u32, Error> = Err(GenerationError::Network {
            message: "late".to_string(),
        }
        .into());
        assert!(!slot.complete(&ticket, late, "ignored"));
        assert_eq!(slot.state().error(), Some("Please upload an image first."));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let slot: ToolSlot<u32> = ToolSlot::new();
        let ticket = slot.begin();
        slot.reset();

        assert!(slot.state().is_idle());
        assert!(ticket.token().is_cancelled());
        assert_eq!(slot.generation(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let slot: ToolSlot<u32> = ToolSlot::new();
        let mut rx = slot.subscribe();

        let ticket = slot.begin();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        slot.complete(&ticket, Ok(3), "unused");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ToolState::Success(3));
    }

    #[test]
    fn test_state_serializes_with_status_tag() {
        let state: ToolState<u32> = ToolState::Error("nope".into());
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({ "status": "error", "payload": "nope" })
        );
    }
}
