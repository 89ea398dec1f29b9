//! The debounced lookup cycle as a plain state machine.
//!
//! [`LookupState::apply`] consumes one [`Event`] and returns the single
//! [`Command`] the runtime should carry out next. Nothing in here sleeps,
//! spawns, or touches the network, so the GUI screen and the async
//! controller drive the exact same transitions, and tests can step
//! through them by hand.

use std::time::Duration;

use kensaku_api::{MediaKind, MediaRecord};

use crate::config::SearchConfig;
use crate::outcome::{FetchError, LookupFailure, Outcome};
use crate::query::{parse_query, ParsedQuery};

/// Identifies one scheduled quiescence timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Generation number of an issued request. Strictly increasing per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// What to do with a response that belongs to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Whatever resolves last is shown, even if the user has moved on.
    #[default]
    LastArrivalWins,
    /// Only the most recently issued request may write the outcome.
    DiscardStale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSettings {
    pub debounce: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            stale_policy: StalePolicy::default(),
        }
    }
}

impl From<&SearchConfig> for LookupSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            stale_policy: if config.discard_stale_responses {
                StalePolicy::DiscardStale
            } else {
                StalePolicy::LastArrivalWins
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// The search box text changed.
    InputChanged(String),
    /// A quiescence timer elapsed; `query` is the text captured when it was scheduled.
    TimerFired { token: TimerToken, query: String },
    /// A lookup for `id` finished.
    Resolved {
        request: RequestId,
        id: u64,
        result: Result<MediaRecord, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    /// Cancel any pending timer, then fire `TimerFired { token, query }` after `delay`.
    Schedule {
        token: TimerToken,
        delay: Duration,
        query: String,
    },
    /// Issue exactly one GET for `kind`/`id` and report back with `Resolved`.
    Fetch {
        request: RequestId,
        kind: MediaKind,
        id: u64,
    },
}

/// Everything one lookup page knows.
#[derive(Debug, Clone)]
pub struct LookupState {
    kind: MediaKind,
    settings: LookupSettings,
    query: String,
    outcome: Outcome,
    pending_timer: Option<TimerToken>,
    timers_issued: u64,
    latest_request: Option<RequestId>,
    in_flight: usize,
    completions: u64,
}

impl LookupState {
    pub fn new(kind: MediaKind, settings: LookupSettings) -> Self {
        Self {
            kind,
            settings,
            query: String::new(),
            outcome: Outcome::Idle,
            pending_timer: None,
            timers_issued: 0,
            latest_request: None,
            in_flight: 0,
            completions: 0,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether a quiescence timer is currently armed.
    pub fn has_pending_timer(&self) -> bool {
        self.pending_timer.is_some()
    }

    /// Requests issued but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Cycles that ended in a record or an error so far. Bumps even when
    /// the new outcome equals the previous one.
    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Forget the armed timer (teardown). In-flight requests are untouched.
    pub fn cancel_timer(&mut self) {
        self.pending_timer = None;
    }

    pub fn apply(&mut self, event: Event) -> Command {
        match event {
            Event::InputChanged(query) => self.on_input(query),
            Event::TimerFired { token, query } => self.on_timer(token, query),
            Event::Resolved {
                request,
                id,
                result,
            } => {
                self.on_resolved(request, id, result);
                Command::None
            }
        }
    }

    fn on_input(&mut self, query: String) -> Command {
        self.timers_issued += 1;
        let token = TimerToken(self.timers_issued);
        self.pending_timer = Some(token);
        self.query = query.clone();
        tracing::debug!(?token, query = %self.query, "lookup rescheduled");
        Command::Schedule {
            token,
            delay: self.settings.debounce,
            query,
        }
    }

    fn on_timer(&mut self, token: TimerToken, query: String) -> Command {
        if self.pending_timer != Some(token) {
            tracing::debug!(?token, "superseded timer ignored");
            return Command::None;
        }
        self.pending_timer = None;

        match parse_query(&query) {
            ParsedQuery::Empty => {
                self.outcome = Outcome::Idle;
                Command::None
            }
            ParsedQuery::Invalid => {
                tracing::debug!(%query, "rejected lookup input");
                self.outcome = Outcome::Failed(LookupFailure::InvalidId);
                self.completions += 1;
                Command::None
            }
            ParsedQuery::Id(id) => {
                let next = self.latest_request.map_or(1, |RequestId(n)| n + 1);
                let request = RequestId(next);
                self.latest_request = Some(request);
                self.in_flight += 1;
                self.outcome = Outcome::Pending { id };
                tracing::info!(kind = %self.kind, id, ?request, "issuing lookup");
                Command::Fetch {
                    request,
                    kind: self.kind,
                    id,
                }
            }
        }
    }

    fn on_resolved(&mut self, request: RequestId, id: u64, result: Result<MediaRecord, FetchError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.settings.stale_policy == StalePolicy::DiscardStale
            && self.latest_request != Some(request)
        {
            tracing::debug!(?request, id, "dropping stale response");
            return;
        }

        self.outcome = match result {
            Ok(record) => Outcome::Found(record),
            Err(err) => {
                tracing::warn!(kind = %self.kind, id, error = %err, "lookup failed");
                Outcome::Failed(err.into_failure(self.kind, id))
            }
        };
        self.completions += 1;
    }
}
