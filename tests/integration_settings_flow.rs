use assert_matches::assert_matches;
use pomo::countdown::{CountdownState, ManualCadence};
use pomo::pomodoro::Pomodoro;
use pomo::session::SessionKind;
use pomo::settings::{AccentColor, Direction, FontChoice, Settings, Step};

// End-to-end flows through the owning Pomodoro with a hand-driven cadence.

fn fresh() -> (Pomodoro<ManualCadence>, ManualCadence) {
    let cadence = ManualCadence::default();
    (Pomodoro::new(Settings::default(), cadence.clone()), cadence)
}

fn seconds(pomodoro: &mut Pomodoro<ManualCadence>, n: u32) {
    for _ in 0..n {
        let lease = pomodoro
            .engine()
            .lease_id()
            .expect("countdown should be running");
        pomodoro.on_second(lease);
    }
}

#[test]
fn default_pomodoro_runs_to_expiry() {
    let (mut pomodoro, cadence) = fresh();
    pomodoro.select(SessionKind::Pomodoro);
    assert_eq!(pomodoro.snapshot().remaining_secs, 1500);

    pomodoro.start();
    seconds(&mut pomodoro, 1500);

    let view = pomodoro.snapshot();
    assert!(view.expired);
    assert!(!view.running);
    assert_eq!(view.remaining_secs, 0);
    assert_eq!(cadence.live_leases(), 0);

    // starting an expired session does nothing until it is reset
    pomodoro.start();
    assert_matches!(pomodoro.engine().state(), CountdownState::Expired);
    pomodoro.restart();
    assert_matches!(
        pomodoro.engine().state(),
        CountdownState::Idle { remaining: 1500 }
    );
}

#[test]
fn switching_sessions_mid_run_discards_progress() {
    let (mut pomodoro, cadence) = fresh();
    pomodoro.start();
    seconds(&mut pomodoro, 600);
    assert_eq!(pomodoro.snapshot().clock, "15:00");

    pomodoro.select(SessionKind::ShortBreak);
    assert_matches!(
        pomodoro.engine().state(),
        CountdownState::Idle { remaining: 600 }
    );
    assert_eq!(pomodoro.snapshot().progress, 0.0);
    assert_eq!(cadence.live_leases(), 0);
}

#[test]
fn cancelled_edit_is_forgotten() {
    let (mut pomodoro, _) = fresh();
    pomodoro.open_settings();
    for _ in 0..5 {
        pomodoro.adjust(SessionKind::Pomodoro, Step::Up);
    }
    pomodoro.set_color(AccentColor::Purple);
    pomodoro.discard_settings();

    assert_eq!(pomodoro.settings(), Settings::default());
    pomodoro.open_settings();
    let draft = pomodoro.draft().unwrap();
    assert_eq!(draft.duration(SessionKind::Pomodoro).get(), 25);
    assert_eq!(draft.settings().color, AccentColor::Salmon);
}

#[test]
fn applied_edit_lands_atomically() {
    let (mut pomodoro, _) = fresh();
    pomodoro.select(SessionKind::LongBreak);
    pomodoro.start();
    seconds(&mut pomodoro, 3);

    pomodoro.open_settings();
    pomodoro.adjust(SessionKind::LongBreak, Step::Down);
    pomodoro.adjust(SessionKind::ShortBreak, Step::Up);
    pomodoro.cycle_font(Direction::Backward);
    pomodoro.cycle_color(Direction::Forward);

    // nothing is visible before apply
    assert_eq!(pomodoro.snapshot().font, FontChoice::Type1);
    assert!(pomodoro.snapshot().running);

    pomodoro.apply_settings();
    let settings = pomodoro.settings();
    assert_eq!(settings.durations.long_break.get(), 44);
    assert_eq!(settings.durations.short_break.get(), 11);
    assert_eq!(settings.font, FontChoice::Type3);
    assert_eq!(settings.color, AccentColor::Cyan);

    let view = pomodoro.snapshot();
    assert_eq!(view.session, SessionKind::LongBreak);
    assert_eq!(view.clock, "44:00");
    assert!(!view.running);
}

#[test]
fn clamp_boundaries_survive_apply() {
    let (mut pomodoro, _) = fresh();
    pomodoro.open_settings();
    for _ in 0..200 {
        pomodoro.adjust(SessionKind::Pomodoro, Step::Up);
        pomodoro.adjust(SessionKind::ShortBreak, Step::Down);
    }
    pomodoro.apply_settings();

    let settings = pomodoro.settings();
    assert_eq!(settings.durations.pomodoro.get(), 100);
    assert_eq!(settings.durations.short_break.get(), 1);
    assert_eq!(pomodoro.snapshot().clock, "100:00");
}
