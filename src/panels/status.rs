//! src/panels/status.rs
//!
//! Status bar: live rates, session peaks and totals, and the chart modes.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::chart::gradient::{DOWNLOAD_GRADIENT, UPLOAD_GRADIENT};
use crate::format::{format_bandwidth, format_bytes, format_duration};
use crate::monitor::{MonitorShared, SharedMonitor};

/// Rows taken by the status bar including its border.
pub const STATUS_BAR_HEIGHT: u16 = 4;

const LABEL: Style = Style::new().fg(Color::Gray);

pub struct StatusPanel {
    pub shared: SharedMonitor,
}

impl StatusPanel {
    pub fn new(shared: SharedMonitor) -> Self {
        Self { shared }
    }

    fn lines(m: &MonitorShared) -> Vec<Line<'static>> {
        let up = Style::default()
            .fg(UPLOAD_GRADIENT[3].into())
            .add_modifier(Modifier::BOLD);
        let down = Style::default()
            .fg(DOWNLOAD_GRADIENT[3].into())
            .add_modifier(Modifier::BOLD);
        let state = if m.paused {
            Span::styled("PAUSED", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("LIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        };

        vec![
            Line::from(vec![
                Span::styled(format!("↑ {}", format_bandwidth(m.current.upload)), up),
                Span::raw("  "),
                Span::styled(format!("↓ {}", format_bandwidth(m.current.download)), down),
                Span::styled("   peak ", LABEL),
                Span::raw(format!(
                    "↑ {} ↓ {}",
                    format_bandwidth(m.stats.peak_upload),
                    format_bandwidth(m.stats.peak_download)
                )),
                Span::styled("   total ", LABEL),
                Span::raw(format!(
                    "↑ {} ↓ {}",
                    format_bytes(m.stats.total_upload),
                    format_bytes(m.stats.total_download)
                )),
            ]),
            Line::from(vec![
                state,
                Span::styled("   uptime ", LABEL),
                Span::raw(format_duration(m.stats.uptime())),
                Span::styled("   mode ", LABEL),
                Span::raw(m.chart.display_mode().name()),
                Span::styled("   scale ", LABEL),
                Span::raw(m.chart.scaling_mode_name()),
                Span::styled("   time ", LABEL),
                Span::raw(m.chart.time_scale_name()),
                Span::styled("   max ", LABEL),
                Span::raw(format_bandwidth(m.chart.max_value())),
            ]),
        ]
    }
}

impl crate::ui::Panel for StatusPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(m) = self.shared.read() else {
            return;
        };
        let block = Block::default().title("netpeaks").borders(Borders::ALL);
        f.render_widget(Paragraph::new(Self::lines(&m)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Sample;
    use crate::ui::Panel;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn shows_rates_and_modes() {
        let shared = MonitorShared::new_shared(100, Duration::from_secs(1));
        shared.write().unwrap().record(Sample::new(1536, 2048));
        let panel = StatusPanel::new(shared.clone());
        let mut terminal = Terminal::new(TestBackend::new(120, STATUS_BAR_HEIGHT)).unwrap();
        terminal.draw(|f| panel.draw(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("1.50 KB/s"));
        assert!(text.contains("2.00 KB/s"));
        assert!(text.contains("LIVE"));
        assert!(text.contains("split"));
        assert!(text.contains("Logarithmic"));
        assert!(text.contains("1 min"));
    }

    #[test]
    fn shows_paused_state() {
        let shared = MonitorShared::new_shared(100, Duration::from_secs(1));
        shared.write().unwrap().toggle_pause();
        let panel = StatusPanel::new(shared);
        let mut terminal = Terminal::new(TestBackend::new(120, STATUS_BAR_HEIGHT)).unwrap();
        terminal.draw(|f| panel.draw(f, f.area())).unwrap();
        assert!(screen_text(&terminal).contains("PAUSED"));
    }
}
