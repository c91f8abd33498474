//! src/panels/help.rs
//!
//! One-line key reference at the bottom of the screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const HELP_HEIGHT: u16 = 1;

const KEYS: [(&str, &str); 7] = [
    ("q", "quit"),
    ("p", "pause"),
    ("r", "reset"),
    ("s", "status"),
    ("m", "mode"),
    ("l", "scale"),
    ("t", "time"),
];

#[derive(Default)]
pub struct HelpPanel;

impl HelpPanel {
    pub fn new() -> Self {
        Self
    }

    fn line() -> Line<'static> {
        let key_style = Style::default().fg(Color::Cyan);
        let text_style = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::with_capacity(KEYS.len() * 2);
        for (i, (key, action)) in KEYS.iter().enumerate() {
            let sep = if i == 0 { "" } else { "  " };
            spans.push(Span::styled(format!("{sep}{key}"), key_style));
            spans.push(Span::styled(format!(" {action}"), text_style));
        }
        Line::from(spans)
    }
}

impl crate::ui::Panel for HelpPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Paragraph::new(Self::line()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_key() {
        let text: String = HelpPanel::line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(
            text,
            "q quit  p pause  r reset  s status  m mode  l scale  t time"
        );
    }
}
