pub mod clock;
pub mod ring;
pub mod screen;
pub mod settings_panel;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use pomo::{countdown::Cadence, pomodoro::TimerView, session::SessionKind, settings::AccentColor};

use crate::{
    ui::{clock::BigClock, ring::render_ring},
    App,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl<C: Cadence> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.pomodoro.snapshot();
        let accent = accent_color(view.color);

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let accent_bold_style = Style::default().patch(bold_style).fg(accent);
        let italic_style = Style::default()
            .add_modifier(Modifier::ITALIC)
            .add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Length(1), // session tabs
                Constraint::Length(1), // padding
                Constraint::Min(1),    // ring + clock
                Constraint::Length(1), // state label
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("pomodoro", bold_style.fg(Color::Gray)))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(session_tabs(view.session, accent))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let ring_area = ring_rect(chunks[3]);
        render_ring(view.progress, accent, ring_area, buf);
        BigClock::new(&view.clock, view.font)
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
            .render(ring_area, buf);

        Paragraph::new(Span::styled(state_label(&view), accent_bold_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(space) start/pause / (1-3, tab) session / (r)estart / (s)ettings / (q)uit",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
    }
}

pub fn accent_color(color: AccentColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

pub fn state_label(view: &TimerView) -> &'static str {
    if view.expired {
        "FINISHED"
    } else if view.running {
        "RUNNING"
    } else {
        "PAUSED"
    }
}

/// One tab per session kind, the active one filled with the accent
pub fn session_tabs(active: SessionKind, accent: Color) -> Line<'static> {
    let mut spans = Vec::with_capacity(SessionKind::ALL.len() * 2);
    for (idx, kind) in SessionKind::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *kind == active {
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", kind), style));
    }
    Line::from(spans)
}

/// Largest rect in `area` whose cells form a circle-friendly 2:1 box
pub fn ring_rect(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    centered_rect(width, height, area)
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo::settings::FontChoice;

    fn view(running: bool, expired: bool) -> TimerView {
        TimerView {
            session: SessionKind::Pomodoro,
            clock: "25:00".to_string(),
            remaining_secs: 1500,
            running,
            expired,
            progress: 0.0,
            color: AccentColor::Salmon,
            font: FontChoice::Type1,
        }
    }

    #[test]
    fn test_state_label() {
        assert_eq!(state_label(&view(false, false)), "PAUSED");
        assert_eq!(state_label(&view(true, false)), "RUNNING");
        assert_eq!(state_label(&view(false, true)), "FINISHED");
    }

    #[test]
    fn test_accent_color() {
        assert_eq!(accent_color(AccentColor::Salmon), Color::Rgb(250, 110, 114));
        assert_eq!(accent_color(AccentColor::Cyan), Color::Rgb(34, 211, 238));
        assert_eq!(accent_color(AccentColor::Purple), Color::Rgb(192, 132, 252));
    }

    #[test]
    fn test_session_tabs_highlight_active() {
        let line = session_tabs(SessionKind::ShortBreak, Color::Red);
        let active: Vec<_> = line
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::Red))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].content, " short break ");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), area);
    }

    #[test]
    fn test_ring_rect_keeps_two_to_one() {
        let ring = ring_rect(Rect::new(0, 0, 80, 20));
        assert_eq!(ring.width, 40);
        assert_eq!(ring.height, 20);

        let ring = ring_rect(Rect::new(0, 0, 30, 20));
        assert_eq!(ring.width, 30);
        assert_eq!(ring.height, 15);
    }
}
