use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use pomo::{
    countdown::Cadence,
    settings::{AccentColor, Draft, FontChoice},
};

use crate::{
    ui::{accent_color, centered_rect},
    App, PanelField,
};

const PANEL_WIDTH: u16 = 46;
const PANEL_HEIGHT: u16 = 14;
const LABEL_WIDTH: usize = 14;

/// Draw the settings modal over whatever is on screen
pub fn render_settings_panel<C: Cadence>(app: &App<C>, f: &mut Frame) {
    let Some(draft) = app.pomodoro.draft() else {
        return;
    };
    // the apply button follows the committed accent until the draft is applied
    let accent = accent_color(app.pomodoro.settings().color);

    let area = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(" Settings ")
        .title_alignment(Alignment::Center);

    let panel = Paragraph::new(panel_lines(draft, app.panel.focus, accent)).block(block);
    f.render_widget(panel, area);
}

/// Panel content, one row per field plus headings and the button row
pub fn panel_lines(draft: &Draft, focus: PanelField, accent: Color) -> Vec<Line<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(" TIME (MINUTES)", bold_style)),
    ];

    for field in [
        PanelField::Pomodoro,
        PanelField::ShortBreak,
        PanelField::LongBreak,
    ] {
        if let Some(kind) = field.session() {
            lines.push(Line::from(vec![
                cursor(field == focus, accent),
                Span::raw(format!("{:<width$}", kind.to_string(), width = LABEL_WIDTH)),
                Span::styled(
                    format!("‹ {:>3} ›", draft.duration(kind).get()),
                    value_style(field == focus),
                ),
            ]));
        }
    }

    lines.push(Line::default());

    let mut font_row = vec![
        cursor(focus == PanelField::Font, accent),
        Span::styled(format!("{:<width$}", "FONT", width = LABEL_WIDTH), bold_style),
    ];
    for font in FontChoice::ALL {
        let style = if font == draft.settings().font {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            dim_style
        };
        font_row.push(Span::styled(format!(" {font} "), style));
    }
    lines.push(Line::from(font_row));

    let mut color_row = vec![
        cursor(focus == PanelField::Color, accent),
        Span::styled(format!("{:<width$}", "COLOR", width = LABEL_WIDTH), bold_style),
    ];
    for color in AccentColor::ALL {
        let mark = if color == draft.settings().color {
            " ✓ "
        } else {
            " ● "
        };
        color_row.push(Span::styled(
            mark,
            Style::default().fg(accent_color(color)).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(color_row));

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            " (enter) apply ",
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (esc) cancel", dim_style),
    ]));
    lines.push(Line::from(Span::styled(
        " (↑↓) field  (←→) change",
        dim_style.add_modifier(Modifier::ITALIC),
    )));

    lines
}

fn cursor(focused: bool, accent: Color) -> Span<'static> {
    if focused {
        Span::styled(" ▸ ", Style::default().fg(accent).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("   ")
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
    }
}
