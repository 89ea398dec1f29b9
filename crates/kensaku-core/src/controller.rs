//! Tokio driver for [`LookupState`].
//!
//! Wires the state machine to a real timer and a real [`MediaLookup`],
//! publishing every change on a `watch` channel. Used by the headless
//! terminal mode; the GUI drives the same state machine through iced tasks.

use std::sync::{Arc, Mutex};

use kensaku_api::{MediaKind, MediaLookup};
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::lookup::{Command, Event, LookupSettings, LookupState, RequestId, TimerToken};
use crate::outcome::{FetchError, Outcome};

/// What subscribers see after every transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub query: String,
    pub outcome: Outcome,
    pub in_flight: usize,
    pub timer_armed: bool,
    /// See [`LookupState::completions`].
    pub completions: u64,
}

impl Snapshot {
    fn of(state: &LookupState) -> Self {
        Self {
            query: state.query().to_string(),
            outcome: state.outcome().clone(),
            in_flight: state.in_flight(),
            timer_armed: state.has_pending_timer(),
            completions: state.completions(),
        }
    }

    /// No timer armed and no request outstanding.
    pub fn is_settled(&self) -> bool {
        !self.timer_armed && self.in_flight == 0
    }
}

struct Shared<L> {
    lookup: L,
    state: Mutex<LookupState>,
    updates: watch::Sender<Snapshot>,
}

impl<L: MediaLookup + 'static> Shared<L> {
    fn apply(&self, event: Event) -> Command {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let command = state.apply(event);
        self.updates.send_replace(Snapshot::of(&state));
        command
    }

    fn timer_fired(self: Arc<Self>, token: TimerToken, query: String) {
        if let Command::Fetch { request, kind, id } = self.apply(Event::TimerFired { token, query })
        {
            // Detached on purpose: later keystrokes must not abort it.
            tokio::spawn(self.fetch(request, kind, id));
        }
    }

    async fn fetch(self: Arc<Self>, request: RequestId, kind: MediaKind, id: u64) {
        let result = self
            .lookup
            .lookup(kind, id)
            .await
            .map_err(FetchError::from);
        self.apply(Event::Resolved {
            request,
            id,
            result,
        });
    }
}

/// Debounced lookup controller.
///
/// Must be used from within a tokio runtime. Dropping the controller
/// cancels a pending timer; requests already sent still complete and
/// update the published snapshot.
pub struct LookupController<L> {
    shared: Arc<Shared<L>>,
    timer: Debouncer,
}

impl<L: MediaLookup + 'static> LookupController<L> {
    pub fn new(lookup: L, kind: MediaKind, settings: LookupSettings) -> Self {
        let state = LookupState::new(kind, settings);
        let (updates, _) = watch::channel(Snapshot::of(&state));
        Self {
            shared: Arc::new(Shared {
                lookup,
                state: Mutex::new(state),
                updates,
            }),
            timer: Debouncer::new(),
        }
    }

    /// Record new input and (re)arm the quiescence timer.
    pub fn input_changed(&mut self, query: impl Into<String>) {
        let command = self.shared.apply(Event::InputChanged(query.into()));
        if let Command::Schedule {
            token,
            delay,
            query,
        } = command
        {
            let shared = Arc::clone(&self.shared);
            self.timer
                .schedule(delay, async move { shared.timer_fired(token, query) });
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.updates.borrow().clone()
    }

    /// Whether a lookup is waiting for the input to go quiet.
    pub fn is_waiting(&self) -> bool {
        self.timer.is_pending()
    }
}

impl<L> Drop for LookupController<L> {
    fn drop(&mut self) {
        self.timer.cancel();
        let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        state.cancel_timer();
        self.shared.updates.send_replace(Snapshot::of(&state));
    }
}
