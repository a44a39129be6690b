// src/board.rs
//! Published status state for a frontend.
//!
//! - at most one refresh in flight; a second request is turned away;
//! - the feature list is swapped as a whole, never edited in place;
//! - a refresh that fails keeps the previous list;
//! - a refresh whose future is dropped publishes nothing.

use std::sync::atomic::{ AtomicBool, Ordering };
use std::sync::{ Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard };

use crate::error::FetchError;
use crate::model::ReconciledFeature;
use crate::pipeline::Pipeline;
use crate::progress::Progress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshStatus {
    Idle,
    Pending,
    /// Human-readable message including the cause.
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Bumped on every successful refresh.
    pub generation: u64,
    pub features: Arc<[ReconciledFeature]>,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Updated(Snapshot),
    /// Another refresh was already running; nothing was done.
    Busy,
    Failed(FetchError),
}

struct State {
    status: RefreshStatus,
    snapshot: Option<Snapshot>,
}

pub struct StatusBoard {
    pipeline: Pipeline,
    state: RwLock<State>,
    in_flight: AtomicBool,
}

impl StatusBoard {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: RwLock::new(State { status: RefreshStatus::Idle, snapshot: None }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn status(&self) -> RefreshStatus {
        self.read().status.clone()
    }

    /// Last successfully reconciled list, if any.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.read().snapshot.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn refresh(&self, progress: Option<&mut dyn Progress>) -> RefreshOutcome {
        if self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            logd!("Board: refresh already in flight, skipping");
            return RefreshOutcome::Busy;
        }

        let mut guard = InFlight { board: self, prev: self.status(), settled: false };
        self.write().status = RefreshStatus::Pending;

        let result = self.pipeline.run(progress).await;

        let outcome = {
            let mut state = self.write();
            match result {
                Ok(features) => {
                    let generation = state.snapshot.as_ref().map_or(0, |s| s.generation) + 1;
                    let snap = Snapshot { generation, features: features.into() };
                    state.snapshot = Some(snap.clone());
                    state.status = RefreshStatus::Idle;
                    logf!("Board: published generation {generation}");
                    RefreshOutcome::Updated(snap)
                }
                Err(e) => {
                    state.status = RefreshStatus::Failed(format!(
                        "Failed to fetch live status. Please try again later: {}",
                        e.with_causes()
                    ));
                    RefreshOutcome::Failed(e)
                }
            }
        };
        guard.settled = true;
        outcome
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the in-flight flag. If the refresh never settled (its future was
/// dropped mid-fetch), the status it replaced is restored.
struct InFlight<'a> {
    board: &'a StatusBoard,
    prev: RefreshStatus,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            logd!("Board: refresh abandoned, nothing published");
            self.board.write().status = std::mem::replace(&mut self.prev, RefreshStatus::Idle);
        }
        self.board.in_flight.store(false, Ordering::Release);
    }
}
