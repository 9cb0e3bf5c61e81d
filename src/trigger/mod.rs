//! Write-event delivery for the ranking collection.
//!
//! Every write to a ranking record is published as a document path.
//! Paths inside the `rankings` collection are handed to the
//! [`LeaderboardTrimmer`], each in its own task, with no ordering and no
//! mutual exclusion between deliveries for the same record.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, Notify};

use crate::database::{PuzzleId, RankingStore, RANKINGS_COLLECTION};

mod trimmer;

pub use trimmer::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

/// A write to one ranking record, keyed by its puzzle id.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteEvent {
    pub kind: WriteKind,
    pub puzzle_id: PuzzleId,
}

impl WriteEvent {
    /// Binds a written document path of the form `rankings/{puzzleId}`.
    /// Returns `None` for documents outside the ranking collection.
    pub fn from_path(kind: WriteKind, path: &str) -> Option<Self> {
        let mut segments = path.trim_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(RANKINGS_COLLECTION), Some(puzzle_id), None) => {
                PuzzleId::parse(puzzle_id).map(|puzzle_id| Self { kind, puzzle_id })
            }
            _ => None,
        }
    }
}

#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    fn begin(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn end(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Handle for publishing document writes to the trigger platform.
#[derive(Clone)]
pub struct Triggers {
    sender: mpsc::UnboundedSender<(WriteKind, String)>,
    in_flight: Arc<InFlight>,
}

impl Triggers {
    /// Spawns the delivery loop. A failing invocation is attempted up to
    /// `max_attempts` times in total before the event is dropped.
    pub fn start(
        store: Arc<dyn RankingStore>,
        trimmer: LeaderboardTrimmer,
        max_attempts: u32,
    ) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let triggers = Self {
            sender,
            in_flight: Arc::default(),
        };

        let platform = Platform {
            store,
            trimmer,
            max_attempts: max_attempts.max(1),
            triggers: triggers.clone(),
        };
        tokio::spawn(async move {
            while let Some((kind, path)) = receiver.recv().await {
                let event = match WriteEvent::from_path(kind, &path) {
                    Some(event) => event,
                    None => {
                        debug!("No trigger bound to {}", path);
                        platform.triggers.in_flight.end();
                        continue;
                    }
                };

                let platform = platform.clone();
                tokio::spawn(async move {
                    platform.deliver(event).await;
                    platform.triggers.in_flight.end();
                });
            }
        });

        triggers
    }

    /// Publishes a write to the document at `path`.
    pub fn publish(&self, kind: WriteKind, path: String) {
        self.in_flight.begin();
        if self.sender.send((kind, path)).is_err() {
            warn!("Trigger platform is gone, dropping write event");
            self.in_flight.end();
        }
    }

    /// Waits until every published write, including the writes made by
    /// the triggers themselves, has been handled.
    pub async fn settled(&self) {
        loop {
            let idle = self.in_flight.idle.notified();
            if self.in_flight.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            idle.await;
        }
    }
}

#[derive(Clone)]
struct Platform {
    store: Arc<dyn RankingStore>,
    trimmer: LeaderboardTrimmer,
    max_attempts: u32,
    triggers: Triggers,
}

impl Platform {
    async fn deliver(&self, event: WriteEvent) {
        for attempt in 1..=self.max_attempts {
            match self.trimmer.on_write(self.store.as_ref(), &event).await {
                Ok(TrimOutcome::Trimmed { before, after }) => {
                    info!(
                        "Trimmed ranking {} from {} to {} entries",
                        event.puzzle_id, before, after
                    );
                    // The trim is itself a write to the watched record
                    self.triggers
                        .publish(WriteKind::Update, event.puzzle_id.document_path());
                    return;
                }
                Ok(outcome) => {
                    debug!("Ranking {} after {:?}: {:?}", event.puzzle_id, event.kind, outcome);
                    return;
                }
                Err(err) if attempt < self.max_attempts => {
                    warn!(
                        "Trimming ranking {} failed (attempt {}/{}): {}",
                        event.puzzle_id, attempt, self.max_attempts, err
                    );
                }
                Err(err) => {
                    error!(
                        "Dropping write event for ranking {} after {} attempts: {}",
                        event.puzzle_id, attempt, err
                    );
                }
            }
        }
    }
}
