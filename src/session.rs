use tracing::info;

use crate::countdown::{Cadence, CountdownEngine};
use crate::settings::{Settings, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display)]
pub enum SessionKind {
    #[default]
    #[strum(serialize = "pomodoro")]
    Pomodoro,
    #[strum(serialize = "short break")]
    ShortBreak,
    #[strum(serialize = "long break")]
    LongBreak,
}

impl SessionKind {
    pub const ALL: [SessionKind; 3] = [
        SessionKind::Pomodoro,
        SessionKind::ShortBreak,
        SessionKind::LongBreak,
    ];

    pub fn next(self) -> Self {
        match self {
            SessionKind::Pomodoro => SessionKind::ShortBreak,
            SessionKind::ShortBreak => SessionKind::LongBreak,
            SessionKind::LongBreak => SessionKind::Pomodoro,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SessionKind::Pomodoro => SessionKind::LongBreak,
            SessionKind::ShortBreak => SessionKind::Pomodoro,
            SessionKind::LongBreak => SessionKind::ShortBreak,
        }
    }
}

/// Tracks the active session kind and keeps the countdown in step with it
#[derive(Debug, Clone, Default)]
pub struct SessionSelector {
    active: SessionKind,
}

impl SessionSelector {
    pub fn new(initial: SessionKind) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> SessionKind {
        self.active
    }

    /// Seconds configured for `kind` in the committed settings
    pub fn duration_for(&self, kind: SessionKind, store: &SettingsStore) -> u32 {
        store.get().durations.get(kind).as_secs()
    }

    /// Make `kind` active and reset the countdown to its duration. Selecting the
    /// active kind again restarts it.
    pub fn select<C: Cadence>(
        &mut self,
        kind: SessionKind,
        store: &SettingsStore,
        engine: &mut CountdownEngine<C>,
    ) {
        self.active = kind;
        let secs = self.duration_for(kind, store);
        info!(session = %kind, secs, "session selected");
        engine.reset(secs);
    }

    /// Re-resolve the active duration after an apply. The countdown is only
    /// reset when the active kind's duration actually changed.
    pub fn on_settings_applied<C: Cadence>(
        &self,
        previous: &Settings,
        store: &SettingsStore,
        engine: &mut CountdownEngine<C>,
    ) {
        let before = previous.durations.get(self.active);
        let after = store.get().durations.get(self.active);
        if before != after {
            info!(
                session = %self.active,
                from = before.get(),
                to = after.get(),
                "active duration changed, resetting countdown"
            );
            engine.reset(after.as_secs());
        }
    }
}
