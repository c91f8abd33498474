//! src/ui/node.rs
//!
//! Recursive layout node and the `Panel` trait every screen element implements.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Anything that can draw itself into a rectangle of the frame.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Layout tree rebuilt every frame.
pub enum Node {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Leaf {
        panel: Box<dyn Panel>,
    },
}

impl Node {
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf { panel } => panel.draw(f, area),
        }
    }
}

pub fn group(direction: Direction, constraints: Vec<Constraint>, children: Vec<Node>) -> Node {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Stack `(height, node)` rows top to bottom.
pub fn rows(children: Vec<(Constraint, Node)>) -> Node {
    let (constraints, children) = children.into_iter().unzip();
    group(Direction::Vertical, constraints, children)
}

pub fn leaf(panel: impl Panel + 'static) -> Node {
    Node::Leaf {
        panel: Box::new(panel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, widgets::Paragraph};

    struct Fill(&'static str);

    impl Panel for Fill {
        fn draw(&self, f: &mut Frame<'_>, area: Rect) {
            let text = vec![self.0.repeat(area.width as usize); area.height as usize].join("\n");
            f.render_widget(Paragraph::new(text), area);
        }
    }

    #[test]
    fn rows_split_the_area_top_to_bottom() {
        let root = rows(vec![
            (Constraint::Min(0), leaf(Fill("a"))),
            (Constraint::Length(1), leaf(Fill("b"))),
        ]);
        let mut terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
        terminal.draw(|f| root.draw(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "a");
        assert_eq!(buffer[(3, 1)].symbol(), "a");
        assert_eq!(buffer[(0, 2)].symbol(), "b");
    }
}
