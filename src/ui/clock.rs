use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use pomo::settings::FontChoice;

const GLYPH_HEIGHT: usize = 5;

// 3x5 bitmaps, '#' is ink
fn glyph(c: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", "###", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", "..#", "..#", "..#"],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        ':' => [".", "#", ".", "#", "."],
        _ => return None,
    };
    Some(rows)
}

/// Two cells of ink per bitmap pixel
fn ink(font: FontChoice) -> &'static str {
    match font {
        FontChoice::Type1 => "██",
        FontChoice::Type2 => "▒▒",
        FontChoice::Type3 => "••",
    }
}

/// The big-digit rows for `text`, or None if it holds a character without a glyph
pub fn big_lines(text: &str, font: FontChoice) -> Option<Vec<String>> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;
    let ink = ink(font);
    let lines = (0..GLYPH_HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| {
                    g[row]
                        .chars()
                        .map(|px| if px == '#' { ink } else { "  " })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(lines)
}

/// Clock text drawn with big glyphs when there is room, plain otherwise
pub struct BigClock<'a> {
    text: &'a str,
    font: FontChoice,
    style: Style,
}

impl<'a> BigClock<'a> {
    pub fn new(text: &'a str, font: FontChoice) -> Self {
        Self {
            text,
            font,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for BigClock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        // stay inside the square inscribed in the ring
        let usable_width = area.width as usize * 2 / 3;
        let usable_height = area.height as usize * 2 / 3;

        let lines = match big_lines(self.text, self.font) {
            Some(lines)
                if usable_height >= GLYPH_HEIGHT
                    && lines.iter().all(|l| l.chars().count() <= usable_width) =>
            {
                lines
            }
            _ => vec![self.text.to_string()],
        };

        let top = area.y + (area.height.saturating_sub(lines.len() as u16)) / 2;
        let text_area = Rect {
            x: area.x,
            y: top,
            width: area.width,
            height: (lines.len() as u16).min(area.bottom() - top),
        };

        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .style(self.style)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}
