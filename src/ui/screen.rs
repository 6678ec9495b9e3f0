use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;

use pomo::{
    countdown::Cadence,
    session::SessionKind,
    settings::{Direction, Step},
};

use crate::{ui::settings_panel::render_settings_panel, App, AppState, PanelField};

/// A UI Screen boundary: responsible for rendering and optional key handling
pub trait Screen<C: Cadence> {
    fn render(&self, app: &App<C>, f: &mut Frame);
    /// Optional per-screen key handling. Returns true if the key was handled.
    fn on_key(&mut self, _key: KeyEvent, _app: &mut App<C>) -> bool {
        false
    }
}

/// Timer screen - tabs, ring and clock
pub struct TimerScreen;

impl<C: Cadence> Screen<C> for TimerScreen {
    fn render(&self, app: &App<C>, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn on_key(&mut self, key: KeyEvent, app: &mut App<C>) -> bool {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => app.pomodoro.toggle(),
            KeyCode::Char('1') => app.pomodoro.select(SessionKind::Pomodoro),
            KeyCode::Char('2') => app.pomodoro.select(SessionKind::ShortBreak),
            KeyCode::Char('3') => app.pomodoro.select(SessionKind::LongBreak),
            KeyCode::Tab => app.pomodoro.next_session(),
            KeyCode::BackTab => app.pomodoro.previous_session(),
            KeyCode::Char('r') => app.pomodoro.restart(),
            KeyCode::Char('s') => app.open_settings(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => return false,
        }
        true
    }
}

/// Settings screen - the timer with the settings panel on top
pub struct SettingsScreen;

impl SettingsScreen {
    fn nudge<C: Cadence>(app: &mut App<C>, dir: Direction) {
        let focus = app.panel.focus;
        let pomodoro = &mut app.pomodoro;
        match focus.session() {
            Some(kind) => {
                let step = match dir {
                    Direction::Forward => Step::Up,
                    Direction::Backward => Step::Down,
                };
                pomodoro.adjust(kind, step);
            }
            None if focus == PanelField::Font => pomodoro.cycle_font(dir),
            None => pomodoro.cycle_color(dir),
        }
    }
}

impl<C: Cadence> Screen<C> for SettingsScreen {
    fn render(&self, app: &App<C>, f: &mut Frame) {
        f.render_widget(app, f.area());
        render_settings_panel(app, f);
    }

    fn on_key(&mut self, key: KeyEvent, app: &mut App<C>) -> bool {
        match key.code {
            KeyCode::Esc => app.pomodoro.discard_settings(),
            KeyCode::Enter => app.pomodoro.apply_settings(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                app.panel.focus = app.panel.focus.previous();
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                app.panel.focus = app.panel.focus.next();
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                Self::nudge(app, Direction::Backward);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                Self::nudge(app, Direction::Forward);
            }
            _ => return false,
        }
        true
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen<C: Cadence>(state: &AppState) -> Box<dyn Screen<C>> {
    match state {
        AppState::Timer => Box::new(TimerScreen),
        AppState::Settings => Box::new(SettingsScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pomo::countdown::ManualCadence;
    use pomo::settings::Settings;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_unhandled_keys_report_false() {
        let mut app = App::new(Settings::default(), ManualCadence::default());
        let mut timer = current_screen::<ManualCadence>(&AppState::Timer);
        assert!(!timer.on_key(key(KeyCode::Char('x')), &mut app));
        assert!(timer.on_key(key(KeyCode::Char('2')), &mut app));

        app.open_settings();
        let mut settings = current_screen::<ManualCadence>(&AppState::Settings);
        assert!(!settings.on_key(key(KeyCode::Char('x')), &mut app));
        assert!(settings.on_key(key(KeyCode::Down), &mut app));
    }

    #[test]
    fn test_nudge_on_duration_rows_clamps() {
        let mut app = App::new(Settings::default(), ManualCadence::default());
        app.open_settings();
        app.panel.focus = PanelField::LongBreak;
        for _ in 0..80 {
            SettingsScreen::nudge(&mut app, Direction::Forward);
        }
        let draft = app.pomodoro.draft().unwrap();
        assert_eq!(draft.duration(SessionKind::LongBreak).get(), 100);
    }
}
