//! Per-game event pipeline.
//!
//! Each started game owns one worker thread reading from a zero-capacity
//! channel: a submission returns only once the worker has taken the event.
//! The worker applies events one at a time, in the order received, while
//! holding the duel-state lock.
//!
//! Closing the channel is the only way to stop a worker. It then drains
//! whatever submitters already handed over and exits.

use parking_lot::Mutex;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

use super::game::GameId;
use super::state::{DuelState, EventOutcome};
use crate::core::error::{DuelError, Result};
use crate::events::{Event, EventStatus, HandlerRegistry};

pub(crate) enum Envelope {
    Event(Event),
    /// Acknowledged once every envelope received before it is processed.
    Flush(SyncSender<()>),
}

/// Sending side of a game's event queue. `None` while the queue is closed.
pub(crate) type Queue = Arc<Mutex<Option<SyncSender<Envelope>>>>;

/// Cloneable handle for submitting events to a running game from any thread.
///
/// ```no_run
/// # use duel_engine::duel::Game;
/// # use duel_engine::events::{Event, EventType};
/// # fn demo(game: &Game) -> duel_engine::core::Result<()> {
/// let submitter = game.event_submitter();
/// std::thread::spawn(move || submitter.submit(Event::new(EventType::CardFused, Default::default())));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EventSubmitter {
    game_id: GameId,
    queue: Queue,
}

impl EventSubmitter {
    pub(crate) fn new(game_id: GameId, queue: Queue) -> Self {
        Self { game_id, queue }
    }

    /// Mark the event enqueued and block until the worker receives it.
    pub fn submit(&self, mut event: Event) -> Result<()> {
        event.advance_to(EventStatus::Enqueued)?;
        self.send(Envelope::Event(event))
    }

    /// Block until every event submitted before this call has been processed.
    pub fn flush(&self) -> Result<()> {
        let (ack, done) = sync_channel(1);
        self.send(Envelope::Flush(ack))?;
        done.recv().map_err(|_| self.closed())
    }

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    fn send(&self, envelope: Envelope) -> Result<()> {
        // Clone the sender so the queue lock is not held while blocked in `send`.
        let sender = self.queue.lock().clone().ok_or_else(|| self.closed())?;
        sender.send(envelope).map_err(|_| self.closed())
    }

    fn closed(&self) -> DuelError {
        DuelError::EventQueueClosed { game_id: self.game_id }
    }
}

impl std::fmt::Debug for EventSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubmitter")
            .field("game_id", &self.game_id)
            .field("open", &self.queue.lock().is_some())
            .finish()
    }
}

/// Open a fresh rendezvous channel and start its worker.
pub(crate) fn spawn_worker(
    game_id: GameId,
    state: Arc<Mutex<DuelState>>,
    handlers: Arc<HandlerRegistry>,
) -> Result<(SyncSender<Envelope>, JoinHandle<()>)> {
    let (sender, receiver) = sync_channel(0);
    let handle = thread::Builder::new()
        .name(format!("duel-events-{game_id}"))
        .spawn(move || run(game_id, receiver, &state, &handlers))
        .map_err(|source| DuelError::EventWorkerSpawn { game_id, source })?;
    Ok((sender, handle))
}

fn run(game_id: GameId, receiver: Receiver<Envelope>, state: &Mutex<DuelState>, handlers: &HandlerRegistry) {
    debug!(%game_id, "event worker started");
    for envelope in receiver {
        match envelope {
            Envelope::Event(event) => process(game_id, event, state, handlers),
            Envelope::Flush(ack) => {
                // The flusher may have given up waiting; nothing to do then.
                let _ = ack.send(());
            }
        }
    }
    debug!(%game_id, "event worker stopped");
}

fn process(game_id: GameId, mut event: Event, state: &Mutex<DuelState>, handlers: &HandlerRegistry) {
    let event_type = event.event_type();
    let mut state = state.lock();

    let Some(handler) = handlers.get(event_type) else {
        warn!(%game_id, %event_type, "no handler registered; event ignored");
        state.record(event, EventOutcome::Ignored);
        return;
    };

    let applied = event
        .advance_to(EventStatus::Processing)
        .and_then(|()| handler.handle(&event, &mut state));
    let completed = event.advance_to(EventStatus::Completed);

    let outcome = match applied.and(completed) {
        Ok(()) => {
            debug!(%game_id, %event_type, "event applied");
            EventOutcome::Applied
        }
        Err(err) => {
            warn!(%game_id, %event_type, error = %err, "event rejected");
            EventOutcome::Rejected(err.to_string())
        }
    };
    state.record(event, outcome);
}
