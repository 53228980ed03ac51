//! Cancellable one-shot timer sets.
//!
//! A room schedules deadline work — draw-time expiry, letter-hint
//! reveals, the between-rounds grace delay — as messages posted back
//! into its own command channel after a delay. The room actor stays the
//! single writer: a timer never touches state, it only delivers a
//! command.
//!
//! Cancellation is two layers deep:
//!
//! 1. [`TimerSet::cancel_all`] aborts every outstanding sleep task as a
//!    unit. This is best-effort — a task that already sent its message
//!    cannot be un-sent.
//! 2. [`Generation`] makes the leak harmless: the scheduler stamps each
//!    message with the generation current at scheduling time, bumps the
//!    generation at every round boundary, and discards any delivery
//!    whose stamp is stale. That turns "timer fired after its round
//!    ended" into a guaranteed no-op rather than a race.
//!
//! # Integration
//!
//! ```ignore
//! timers.schedule(self_tx.clone(), draw_time, Command::DrawTimeExpired {
//!     generation: self.generation,
//! });
//! // ...on round end:
//! self.timers.cancel_all();
//! self.generation.bump();
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// A round/turn generation token.
///
/// Copied into every scheduled message; compared on delivery. Two
/// generations are equal only if no cancellation boundary passed
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every message stamped with the current value.
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A set of pending one-shot timers, cancellable as a unit.
///
/// Each [`schedule`](Self::schedule) spawns a sleep-then-send task;
/// `cancel_all` aborts whatever is still pending. Dropping the set
/// cancels it, so a dying room actor takes its timers with it.
pub struct TimerSet<M: Send + 'static> {
    tasks: Vec<JoinHandle<()>>,
    _msg: std::marker::PhantomData<fn() -> M>,
}

impl<M: Send + 'static> TimerSet<M> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            _msg: std::marker::PhantomData,
        }
    }

    /// Posts `msg` into `tx` after `delay`.
    ///
    /// Delivery into a full channel waits; delivery into a closed
    /// channel (owner gone) is silently dropped.
    pub fn schedule(&mut self, tx: mpsc::Sender<M>, delay: Duration, msg: M) {
        // Completed handles accumulate across a long game; drop them
        // before adding another.
        self.tasks.retain(|t| !t.is_finished());

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(msg).await;
        });
        self.tasks.push(handle);
        trace!(pending = self.tasks.len(), ?delay, "timer scheduled");
    }

    /// Aborts every pending timer.
    ///
    /// Safe to call at any time, including when nothing is pending.
    /// Callers pair this with a [`Generation`] bump — abort alone does
    /// not guarantee an in-flight message is gone.
    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl<M: Send + 'static> Default for TimerSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Drop for TimerSet<M> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
