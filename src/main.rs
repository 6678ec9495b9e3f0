pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pomo::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    countdown::Cadence,
    logging,
    pomodoro::Pomodoro,
    runtime::{
        CrosstermEventSource, FixedTicker, PomoEvent, PomoEventSource, Runner, ThreadCadence,
        Ticker,
    },
    session::SessionKind,
    settings::{AccentColor, FontChoice, Settings},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

use crate::ui::screen::current_screen;

const TICK_RATE_MS: u64 = 250;
const SECOND: Duration = Duration::from_secs(1);

/// pomodoro timer tui with session tabs, a progress ring, and a settings panel
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal. Pick a session, start the countdown, and tune durations, accent color and clock font from the settings panel. Flags override the config file, which overrides the built-in defaults."
)]
pub struct Cli {
    /// minutes in a pomodoro session
    #[clap(short = 'p', long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pomodoro: Option<u32>,

    /// minutes in a short break
    #[clap(short = 's', long = "short", value_parser = clap::value_parser!(u32).range(1..=100))]
    short_break: Option<u32>,

    /// minutes in a long break
    #[clap(short = 'l', long = "long", value_parser = clap::value_parser!(u32).range(1..=100))]
    long_break: Option<u32>,

    /// accent color
    #[clap(short = 'c', long, value_enum)]
    color: Option<SupportedColor>,

    /// clock font
    #[clap(short = 'f', long, value_enum)]
    font: Option<SupportedFont>,

    /// config file to read defaults from
    #[clap(long)]
    config: Option<PathBuf>,

    /// where to write the log
    #[clap(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum SupportedColor {
    Salmon,
    Cyan,
    Purple,
}

impl SupportedColor {
    fn as_accent(&self) -> AccentColor {
        match self {
            SupportedColor::Salmon => AccentColor::Salmon,
            SupportedColor::Cyan => AccentColor::Cyan,
            SupportedColor::Purple => AccentColor::Purple,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum SupportedFont {
    Type1,
    Type2,
    Type3,
}

impl SupportedFont {
    fn as_font(&self) -> FontChoice {
        match self {
            SupportedFont::Type1 => FontChoice::Type1,
            SupportedFont::Type2 => FontChoice::Type2,
            SupportedFont::Type3 => FontChoice::Type3,
        }
    }
}

impl Cli {
    /// The flags as a config layer
    fn to_config(&self) -> Config {
        Config {
            pomodoro: self.pomodoro,
            short_break: self.short_break,
            long_break: self.long_break,
            color: self.color.map(|c| c.as_accent()),
            font: self.font.map(|f| f.as_font()),
        }
    }

    /// Built-in defaults, then the config file, then the flags
    fn initial_settings(&self) -> Settings {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let file_config = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring config file");
            Config::default()
        });
        self.to_config()
            .apply_to(file_config.apply_to(Settings::default()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Timer,
    Settings,
}

/// Rows of the settings panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelField {
    #[default]
    Pomodoro,
    ShortBreak,
    LongBreak,
    Font,
    Color,
}

impl PanelField {
    pub const ALL: [PanelField; 5] = [
        PanelField::Pomodoro,
        PanelField::ShortBreak,
        PanelField::LongBreak,
        PanelField::Font,
        PanelField::Color,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The session whose duration this row edits, if any
    pub fn session(self) -> Option<SessionKind> {
        match self {
            PanelField::Pomodoro => Some(SessionKind::Pomodoro),
            PanelField::ShortBreak => Some(SessionKind::ShortBreak),
            PanelField::LongBreak => Some(SessionKind::LongBreak),
            PanelField::Font | PanelField::Color => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct PanelState {
    pub focus: PanelField,
}

#[derive(Debug)]
pub struct App<C: Cadence> {
    pub pomodoro: Pomodoro<C>,
    pub panel: PanelState,
    pub should_quit: bool,
}

impl<C: Cadence> App<C> {
    pub fn new(settings: Settings, cadence: C) -> Self {
        Self {
            pomodoro: Pomodoro::new(settings, cadence),
            panel: PanelState::default(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> AppState {
        if self.pomodoro.is_editing() {
            AppState::Settings
        } else {
            AppState::Timer
        }
    }

    pub fn open_settings(&mut self) {
        self.panel = PanelState::default();
        self.pomodoro.open_settings();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // ctrl+c quits from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let mut screen = current_screen::<C>(&self.state());
        screen.on_key(key, self);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(e) = logging::init(&path) {
            eprintln!("pomo: logging disabled ({}): {e}", path.display());
        }
    }

    let settings = cli.initial_settings();
    info!(?settings, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let cadence = ThreadCadence::new(events.sender(), SECOND);
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    let mut app = App::new(settings, cadence);
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn start_tui<B: Backend, C: Cadence, E: PomoEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            PomoEvent::Key(key) => app.on_key(key),
            PomoEvent::Second(lease) => {
                if !app.pomodoro.on_second(lease) {
                    continue;
                }
            }
            PomoEvent::Resize => {}
            PomoEvent::Tick => continue,
        }

        if app.should_quit {
            break;
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui<C: Cadence>(app: &App<C>, f: &mut Frame) {
    current_screen::<C>(&app.state()).render(app, f);
}
