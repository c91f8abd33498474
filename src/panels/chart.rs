//! src/panels/chart.rs
//!
//! Chart panel: resizes the shared chart to its area and draws its cells.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::monitor::SharedMonitor;

pub struct ChartPanel {
    pub shared: SharedMonitor,
}

impl ChartPanel {
    pub fn new(shared: SharedMonitor) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for ChartPanel {
    /// The chart always fills the full width; the area height already
    /// accounts for the status bar and help line.
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(mut monitor) = self.shared.write() else {
            return;
        };
        monitor.chart.set_width(area.width as usize);
        monitor.chart.set_height(area.height as usize);
        let lines = monitor.chart.render_lines();
        f.render_widget(Paragraph::new(lines), area);
    }
}
