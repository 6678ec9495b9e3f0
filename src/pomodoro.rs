use tracing::{debug, info};

use crate::countdown::{Cadence, CountdownEngine, LeaseId};
use crate::session::{SessionKind, SessionSelector};
use crate::settings::{AccentColor, Direction, Draft, FontChoice, Settings, SettingsStore, Step};

/// Read-only snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    pub session: SessionKind,
    pub clock: String,
    pub remaining_secs: u32,
    pub running: bool,
    pub expired: bool,
    pub progress: f64,
    pub color: AccentColor,
    pub font: FontChoice,
}

/// Owns the committed settings, the open draft (if any), the active session
/// and its countdown. All user operations go through here.
#[derive(Debug)]
pub struct Pomodoro<C: Cadence> {
    store: SettingsStore,
    selector: SessionSelector,
    engine: CountdownEngine<C>,
    draft: Option<Draft>,
}

impl<C: Cadence> Pomodoro<C> {
    pub fn new(settings: Settings, cadence: C) -> Self {
        let store = SettingsStore::new(settings);
        let selector = SessionSelector::default();
        let duration = selector.duration_for(selector.active(), &store);
        Self {
            engine: CountdownEngine::new(duration, cadence),
            store,
            selector,
            draft: None,
        }
    }

    pub fn settings(&self) -> Settings {
        self.store.get()
    }

    pub fn engine(&self) -> &CountdownEngine<C> {
        &self.engine
    }

    pub fn active_session(&self) -> SessionKind {
        self.selector.active()
    }

    pub fn select(&mut self, kind: SessionKind) {
        self.selector.select(kind, &self.store, &mut self.engine);
    }

    pub fn next_session(&mut self) {
        self.select(self.selector.active().next());
    }

    pub fn previous_session(&mut self) {
        self.select(self.selector.active().previous());
    }

    /// Reset the active session to its full duration
    pub fn restart(&mut self) {
        self.select(self.selector.active());
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn toggle(&mut self) {
        self.engine.toggle();
    }

    /// Feed one cadence beat. Returns whether the countdown moved.
    pub fn on_second(&mut self, lease: LeaseId) -> bool {
        let counted = self.engine.on_second(lease);
        if counted && self.engine.is_expired() {
            info!(session = %self.selector.active(), "session finished");
        }
        counted
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Seed a draft from the committed settings. An already open draft is kept.
    pub fn open_settings(&mut self) {
        if self.draft.is_none() {
            debug!("settings panel opened");
            self.draft = Some(Draft::open(self.store.get()));
        }
    }

    pub fn adjust(&mut self, field: SessionKind, step: Step) {
        if let Some(draft) = self.draft.as_mut() {
            draft.adjust(field, step);
        }
    }

    pub fn set_color(&mut self, color: AccentColor) {
        if let Some(draft) = self.draft.as_mut() {
            draft.set_color(color);
        }
    }

    pub fn set_font(&mut self, font: FontChoice) {
        if let Some(draft) = self.draft.as_mut() {
            draft.set_font(font);
        }
    }

    pub fn cycle_color(&mut self, dir: Direction) {
        if let Some(draft) = self.draft.as_mut() {
            draft.cycle_color(dir);
        }
    }

    pub fn cycle_font(&mut self, dir: Direction) {
        if let Some(draft) = self.draft.as_mut() {
            draft.cycle_font(dir);
        }
    }

    pub fn discard_settings(&mut self) {
        if let Some(draft) = self.draft.take() {
            debug!("settings draft discarded");
            draft.discard();
        }
    }

    /// Commit the open draft and re-resolve the active session's duration
    pub fn apply_settings(&mut self) {
        if let Some(draft) = self.draft.take() {
            let previous = self.store.apply(draft.commit());
            self.selector
                .on_settings_applied(&previous, &self.store, &mut self.engine);
        }
    }

    pub fn snapshot(&self) -> TimerView {
        let settings = self.store.get();
        TimerView {
            session: self.selector.active(),
            clock: self.engine.clock(),
            remaining_secs: self.engine.remaining_secs(),
            running: self.engine.is_running(),
            expired: self.engine.is_expired(),
            progress: self.engine.progress(),
            color: settings.color,
            font: settings.font,
        }
    }
}
