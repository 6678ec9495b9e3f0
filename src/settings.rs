use serde::Deserialize;
use tracing::info;

use crate::session::SessionKind;

/// Accent color used for the active tab, the ring and the apply button
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Salmon,
    Cyan,
    Purple,
}

impl AccentColor {
    pub const ALL: [AccentColor; 3] = [AccentColor::Salmon, AccentColor::Cyan, AccentColor::Purple];

    /// RGB triple for the accent
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            AccentColor::Salmon => (0xFA, 0x6E, 0x72),
            AccentColor::Cyan => (0x22, 0xD3, 0xEE),
            AccentColor::Purple => (0xC0, 0x84, 0xFC),
        }
    }

    pub fn cycle(self, dir: Direction) -> Self {
        cycle(&Self::ALL, self, dir)
    }
}

/// Glyph style of the big clock digits
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Type1,
    Type2,
    Type3,
}

impl FontChoice {
    pub const ALL: [FontChoice; 3] = [FontChoice::Type1, FontChoice::Type2, FontChoice::Type3];

    pub fn cycle(self, dir: Direction) -> Self {
        cycle(&Self::ALL, self, dir)
    }
}

/// A single +1 / -1 interaction on a draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Direction for wrapping through a closed set of choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, dir: Direction) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = match dir {
        Direction::Forward => (idx + 1) % all.len(),
        Direction::Backward => (idx + all.len() - 1) % all.len(),
    };
    all[next]
}

/// Whole minutes in `[Minutes::MIN, Minutes::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Minutes(u8);

impl Minutes {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Clamps `value` into the allowed range
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Apply a single step; stepping past either boundary leaves the value unchanged
    pub fn step(self, step: Step) -> Self {
        match step {
            Step::Up => Self::new(self.0 as u32 + 1),
            Step::Down => Self::new((self.0 as u32).saturating_sub(1)),
        }
    }

    pub fn as_secs(&self) -> u32 {
        self.0 as u32 * 60
    }
}

/// One duration per session kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub pomodoro: Minutes,
    pub short_break: Minutes,
    pub long_break: Minutes,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro: Minutes::new(25),
            short_break: Minutes::new(10),
            long_break: Minutes::new(45),
        }
    }
}

impl Durations {
    pub fn get(&self, kind: SessionKind) -> Minutes {
        match kind {
            SessionKind::Pomodoro => self.pomodoro,
            SessionKind::ShortBreak => self.short_break,
            SessionKind::LongBreak => self.long_break,
        }
    }

    pub fn get_mut(&mut self, kind: SessionKind) -> &mut Minutes {
        match kind {
            SessionKind::Pomodoro => &mut self.pomodoro,
            SessionKind::ShortBreak => &mut self.short_break,
            SessionKind::LongBreak => &mut self.long_break,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub durations: Durations,
    pub color: AccentColor,
    pub font: FontChoice,
}

/// Holds the committed settings. Only [`SettingsStore::apply`] mutates it.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    current: Settings,
}

impl SettingsStore {
    pub fn new(initial: Settings) -> Self {
        Self { current: initial }
    }

    pub fn get(&self) -> Settings {
        self.current
    }

    /// Replace every field at once and hand back what was there before, so the
    /// caller can recompute whatever depends on the old values.
    pub fn apply(&mut self, new_settings: Settings) -> Settings {
        let previous = std::mem::replace(&mut self.current, new_settings);
        info!(
            pomodoro = new_settings.durations.pomodoro.get(),
            short_break = new_settings.durations.short_break.get(),
            long_break = new_settings.durations.long_break.get(),
            color = %new_settings.color,
            font = %new_settings.font,
            "settings applied"
        );
        previous
    }
}

/// In-progress edits made while the settings panel is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    settings: Settings,
}

impl Draft {
    /// Snapshot `from`; later changes to the store do not leak into the draft
    pub fn open(from: Settings) -> Self {
        Self { settings: from }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn duration(&self, kind: SessionKind) -> Minutes {
        self.settings.durations.get(kind)
    }

    pub fn adjust(&mut self, field: SessionKind, step: Step) {
        let slot = self.settings.durations.get_mut(field);
        *slot = slot.step(step);
    }

    pub fn set_color(&mut self, color: AccentColor) {
        self.settings.color = color;
    }

    pub fn set_font(&mut self, font: FontChoice) {
        self.settings.font = font;
    }

    pub fn cycle_color(&mut self, dir: Direction) {
        self.settings.color = self.settings.color.cycle(dir);
    }

    pub fn cycle_font(&mut self, dir: Direction) {
        self.settings.font = self.settings.font.cycle(dir);
    }

    /// Drop the edits
    pub fn discard(self) {}

    pub fn commit(self) -> Settings {
        self.settings
    }
}
