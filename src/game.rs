//! Quiz - round lifecycle state machine and game loop
//!
//! The round logic lives in [`GameState`], a single state object with
//! synchronous transition methods that take explicit timestamps. [`Quiz`] is
//! the thin async adapter around it: it owns the countdown timer, the catalog
//! and the event channel, and dispatches commands and timer callbacks into
//! the state object.

use crate::catalog::{ItemCatalog, LoadStatus};
use crate::error::{QuizError, Result};
use crate::ledger::GuessHistory;
use crate::timer::CountdownTimer;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

/// Quiz events emitted to the presentation layer
#[derive(Debug, Clone)]
pub enum QuizEvent {
    /// Catalog loaded and ready
    CatalogReady { version: String, item_count: usize },
    /// Catalog load failed; game stays idle
    CatalogFailed(String),
    /// A fresh target was drawn and the countdown restarted
    RoundStarted,
    /// Countdown tick with remaining ms
    Tick(u64),
    /// The live round concluded
    Resolved { outcome: Outcome, record: GuessRecord },
    /// Time limit changed (already clamped)
    TimeLimitChanged(u64),
    /// Full reset: streak zeroed, history cleared
    GameReset,
}

/// The whole game as one explicit state object.
///
/// Transitions are pure with respect to time: callers pass `now` in ms, so
/// every path is testable without a runtime. At most one round is live; its
/// `generation` distinguishes it from superseded rounds so that delayed
/// callbacks scheduled for an old round can be discarded.
#[derive(Debug, Default)]
pub struct GameState {
    pub status: GameStatus,
    pub target: Option<Item>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub history: GuessHistory,
    pub message: String,
    pub message_type: MessageType,
    pub revealed: bool,
    pub round_started_at: u64,
    pub time_limit_ms: u64,
    pub generation: u64,
}

impl GameState {
    pub fn new(time_limit_ms: u64) -> Self {
        Self {
            time_limit_ms,
            ..Default::default()
        }
    }

    /// Start a round on the given target. Supersedes the previous round.
    pub fn begin_round(&mut self, target: Item, now: u64) {
        self.generation += 1;
        self.target = Some(target);
        self.revealed = false;
        self.message.clear();
        self.message_type = MessageType::None;
        self.round_started_at = now;
        self.status = GameStatus::AwaitingGuess;
    }

    /// Resolve the live round with a submitted answer.
    ///
    /// Correct iff the candidate id matches the target id. A candidate that
    /// matches no catalog entry arrives here with an empty id and resolves as
    /// a plain wrong guess. Errors if no round is awaiting a guess, which is
    /// how a delayed timeout racing a manual submit gets ignored.
    pub fn resolve_guess(
        &mut self,
        candidate_id: &str,
        candidate_name: &str,
        now: u64,
    ) -> Result<(Outcome, GuessRecord)> {
        let target = self.live_target()?;
        let correct = !candidate_id.is_empty() && candidate_id == target.id;
        let time_spent = (now.saturating_sub(self.round_started_at)) as f64 / 1000.0;

        let outcome = if correct {
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
            self.set_message("Correct!", MessageType::Success);
            Outcome::Correct
        } else {
            self.current_streak = 0;
            self.set_message("Wrong!", MessageType::Error);
            Outcome::Wrong
        };

        let record = GuessRecord {
            item_name: candidate_name.to_string(),
            item_id: candidate_id.to_string(),
            correct,
            time_spent,
        };
        self.conclude(record.clone());
        Ok((outcome, record))
    }

    /// Give up on the live round. Recorded against the target item.
    pub fn resolve_skip(&mut self, now: u64) -> Result<(Outcome, GuessRecord)> {
        let target = self.live_target()?.clone();
        let time_spent = (now.saturating_sub(self.round_started_at)) as f64 / 1000.0;

        self.current_streak = 0;
        self.set_message("Skipped!", MessageType::Error);

        let record = GuessRecord {
            item_name: target.name,
            item_id: target.id,
            correct: false,
            time_spent,
        };
        self.conclude(record.clone());
        Ok((Outcome::Skipped, record))
    }

    /// The countdown ran out. Time spent is the full configured duration.
    pub fn resolve_timeout(&mut self) -> Result<(Outcome, GuessRecord)> {
        let target = self.live_target()?.clone();
        let time_spent = self.time_limit_ms as f64 / 1000.0;

        self.current_streak = 0;
        self.set_message("Time's up!", MessageType::Error);

        let record = GuessRecord {
            item_name: target.name,
            item_id: target.id,
            correct: false,
            time_spent,
        };
        self.conclude(record.clone());
        Ok((Outcome::TimedOut, record))
    }

    /// Clear streak, history, message and reveal. Longest streak survives.
    /// Bumps the generation so pending delayed advances become stale.
    pub fn apply_reset(&mut self) {
        self.generation += 1;
        self.current_streak = 0;
        self.history.clear();
        self.revealed = false;
        self.message.clear();
        self.message_type = MessageType::None;
        self.status = GameStatus::Idle;
        self.target = None;
    }

    fn live_target(&self) -> Result<&Item> {
        if self.status != GameStatus::AwaitingGuess {
            return Err(QuizError::NoActiveRound);
        }
        self.target.as_ref().ok_or(QuizError::NoActiveRound)
    }

    fn set_message(&mut self, message: &str, message_type: MessageType) {
        self.message = message.to_string();
        self.message_type = message_type;
    }

    fn conclude(&mut self, record: GuessRecord) {
        self.history.record(record);
        self.revealed = true;
        self.status = GameStatus::Resolved;
    }
}

/// Quiz - drives the round lifecycle over a loaded catalog
pub struct Quiz {
    config: QuizConfig,
    catalog: Arc<RwLock<ItemCatalog>>,
    load_status: Arc<RwLock<LoadStatus>>,
    state: Arc<RwLock<GameState>>,
    timer: CountdownTimer,
    event_tx: mpsc::Sender<QuizEvent>,
    event_rx: Arc<RwLock<mpsc::Receiver<QuizEvent>>>,
}

impl Quiz {
    /// Create a new Quiz. The catalog starts empty in `Loading` status; call
    /// [`Quiz::load_catalog`] or [`Quiz::set_catalog`] before [`Quiz::start`].
    pub async fn new(config: QuizConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(100);
        let timer = CountdownTimer::new(config.tick_interval_ms);

        let quiz = Self {
            state: Arc::new(RwLock::new(GameState::new(config.time_limit_ms))),
            config,
            catalog: Arc::new(RwLock::new(ItemCatalog::default())),
            load_status: Arc::new(RwLock::new(LoadStatus::Loading)),
            timer,
            event_tx,
            event_rx: Arc::new(RwLock::new(event_rx)),
        };
        quiz.wire_timer().await;
        quiz
    }

    /// Fetch the item catalog. Failure is non-fatal: the game stays idle with
    /// `LoadStatus::Failed` and a `CatalogFailed` event is emitted.
    pub async fn load_catalog(&self) {
        match ItemCatalog::fetch().await {
            Ok(catalog) => {
                let version = catalog.version().to_string();
                let item_count = catalog.len();
                *self.catalog.write().await = catalog;
                *self.load_status.write().await = LoadStatus::Ready;
                let _ = self
                    .event_tx
                    .try_send(QuizEvent::CatalogReady { version, item_count });
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                *self.load_status.write().await = LoadStatus::Failed;
                let _ = self.event_tx.try_send(QuizEvent::CatalogFailed(e.to_string()));
            }
        }
    }

    /// Install an already-loaded catalog (offline play, tests)
    pub async fn set_catalog(&self, catalog: ItemCatalog) {
        let version = catalog.version().to_string();
        let item_count = catalog.len();
        *self.catalog.write().await = catalog;
        *self.load_status.write().await = LoadStatus::Ready;
        let _ = self
            .event_tx
            .try_send(QuizEvent::CatalogReady { version, item_count });
    }

    pub async fn load_status(&self) -> LoadStatus {
        *self.load_status.read().await
    }

    pub async fn catalog_version(&self) -> String {
        self.catalog.read().await.version().to_string()
    }

    pub async fn item_count(&self) -> usize {
        self.catalog.read().await.len()
    }

    /// Begin the first round. No-op if a round is already live.
    /// An empty catalog is reported but not fatal; the machine stays idle.
    pub async fn start(&self) -> Result<()> {
        if *self.load_status.read().await != LoadStatus::Ready {
            return Err(QuizError::CatalogNotReady);
        }
        if self.catalog.read().await.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        if self.state.read().await.status != GameStatus::Idle {
            return Ok(());
        }
        advance_round(
            self.state.clone(),
            self.catalog.clone(),
            self.timer.clone(),
            self.event_tx.clone(),
            None,
        )
        .await;
        Ok(())
    }

    /// Submit an answer for the live round
    pub async fn submit_guess(&self, candidate: &Item) -> Result<Outcome> {
        self.resolve_with(|state, now| {
            state.resolve_guess(&candidate.id, &candidate.name, now)
        })
        .await
    }

    /// Submit an answer by name, case-insensitively. A name matching no
    /// catalog entry is treated as a plain wrong guess.
    pub async fn submit_guess_by_name(&self, name: &str) -> Result<Outcome> {
        let candidate = {
            let catalog = self.catalog.read().await;
            catalog
                .items()
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(name))
                .cloned()
        };
        match candidate {
            Some(item) => self.submit_guess(&item).await,
            None => {
                self.resolve_with(|state, now| state.resolve_guess("", name, now))
                    .await
            }
        }
    }

    /// Give up on the live round
    pub async fn skip(&self) -> Result<Outcome> {
        self.resolve_with(|state, now| state.resolve_skip(now)).await
    }

    /// Clear streak and history and start over with a fresh target.
    /// Usable from any state; idempotent in effect.
    pub async fn reset(&self) -> Result<()> {
        self.timer.stop().await;
        {
            let mut state = self.state.write().await;
            state.apply_reset();
        }
        let _ = self.event_tx.try_send(QuizEvent::GameReset);

        if *self.load_status.read().await != LoadStatus::Ready {
            return Ok(());
        }
        advance_round(
            self.state.clone(),
            self.catalog.clone(),
            self.timer.clone(),
            self.event_tx.clone(),
            None,
        )
        .await;
        info!("Game reset");
        Ok(())
    }

    /// Change the round duration. The live countdown is re-based to the full
    /// new duration; target, streak and round start time are untouched.
    pub async fn change_time_limit(&self, time_limit_ms: u64) -> Result<u64> {
        if !(limits::MIN_TIME_LIMIT_MS..=limits::MAX_TIME_LIMIT_MS).contains(&time_limit_ms) {
            return Err(QuizError::InvalidTimeLimit(time_limit_ms));
        }
        self.state.write().await.time_limit_ms = time_limit_ms;
        self.timer.set_duration(time_limit_ms).await;
        let _ = self.event_tx.try_send(QuizEvent::TimeLimitChanged(time_limit_ms));
        Ok(time_limit_ms)
    }

    /// Observable state for the presentation boundary
    pub async fn snapshot(&self) -> GameSnapshot {
        let time_left_ms = self.timer.remaining_ms().await;
        let state = self.state.read().await;
        GameSnapshot {
            status: state.status,
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            time_left_ms,
            time_limit_ms: state.time_limit_ms,
            message: state.message.clone(),
            message_type: state.message_type,
            revealed: state.revealed,
            target: state.target.clone(),
            history: state.history.to_vec(),
        }
    }

    /// Receive next event (non-blocking)
    pub async fn try_recv(&self) -> Option<QuizEvent> {
        self.event_rx.write().await.try_recv().ok()
    }

    /// Receive next event (blocking)
    pub async fn recv(&self) -> Option<QuizEvent> {
        self.event_rx.write().await.recv().await
    }

    /// Stop the countdown and resolve the live round with `f`, then schedule
    /// the delayed advance tagged with the resolved round's generation.
    async fn resolve_with<F>(&self, f: F) -> Result<Outcome>
    where
        F: FnOnce(&mut GameState, u64) -> Result<(Outcome, GuessRecord)>,
    {
        self.timer.stop().await;
        let (outcome, record, generation) = {
            let mut state = self.state.write().await;
            let (outcome, record) = f(&mut state, now_ms())?;
            (outcome, record, state.generation)
        };
        let _ = self.event_tx.try_send(QuizEvent::Resolved { outcome, record });
        self.schedule_advance(generation);
        Ok(outcome)
    }

    fn schedule_advance(&self, generation: u64) {
        let state = self.state.clone();
        let catalog = self.catalog.clone();
        let timer = self.timer.clone();
        let event_tx = self.event_tx.clone();
        let delay = Duration::from_millis(self.config.resolution_delay_ms);

        tokio::spawn(async move {
            sleep(delay).await;
            advance_round(state, catalog, timer, event_tx, Some(generation)).await;
        });
    }

    /// Route timer callbacks into the state machine. The timer dereferences
    /// these cells at fire time, so re-wiring here always takes effect for
    /// the live countdown as well.
    async fn wire_timer(&self) {
        let tick_tx = self.event_tx.clone();
        self.timer
            .set_on_tick(Box::new(move |remaining| {
                let _ = tick_tx.try_send(QuizEvent::Tick(remaining));
            }))
            .await;

        let state = self.state.clone();
        let catalog = self.catalog.clone();
        let timer = self.timer.clone();
        let event_tx = self.event_tx.clone();
        let delay = Duration::from_millis(self.config.resolution_delay_ms);
        self.timer
            .set_on_timeout(Box::new(move || {
                let state = state.clone();
                let catalog = catalog.clone();
                let timer = timer.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    handle_timeout(state, catalog, timer, event_tx, delay).await;
                });
            }))
            .await;
    }
}

/// Conclude the live round as timed out. A round already resolved by a manual
/// submit or skip makes this a no-op.
async fn handle_timeout(
    state: Arc<RwLock<GameState>>,
    catalog: Arc<RwLock<ItemCatalog>>,
    timer: CountdownTimer,
    event_tx: mpsc::Sender<QuizEvent>,
    delay: Duration,
) {
    let resolved = {
        let mut guard = state.write().await;
        match guard.resolve_timeout() {
            Ok((outcome, record)) => Some((outcome, record, guard.generation)),
            Err(_) => None,
        }
    };

    let Some((outcome, record, generation)) = resolved else {
        return;
    };

    let _ = event_tx.try_send(QuizEvent::Resolved { outcome, record });

    tokio::spawn(async move {
        sleep(delay).await;
        advance_round(state, catalog, timer, event_tx, Some(generation)).await;
    });
}

/// Draw a fresh target and start its countdown.
///
/// When `expected_generation` is given, the advance only happens while that
/// round is still current; a reset or manual resolution in the meantime makes
/// this call a stale no-op. An empty catalog leaves the machine idle.
async fn advance_round(
    state: Arc<RwLock<GameState>>,
    catalog: Arc<RwLock<ItemCatalog>>,
    timer: CountdownTimer,
    event_tx: mpsc::Sender<QuizEvent>,
    expected_generation: Option<u64>,
) {
    let pick = catalog.read().await.pick_random().cloned();

    let time_limit = {
        let mut guard = state.write().await;
        if let Some(expected) = expected_generation {
            if guard.generation != expected {
                return;
            }
        }
        match pick {
            Some(item) => {
                guard.begin_round(item, now_ms());
                guard.time_limit_ms
            }
            None => {
                warn!("Catalog has no items; staying idle");
                guard.status = GameStatus::Idle;
                guard.target = None;
                return;
            }
        }
    };

    timer.start(time_limit).await;
    let _ = event_tx.try_send(QuizEvent::RoundStarted);
}
