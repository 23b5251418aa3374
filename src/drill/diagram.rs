//! Three-box problem diagram: `[Old] ──▶ [% Change] ──▶ [New]`.
//!
//! Reads nothing but the problem's display descriptor and the area it is
//! given. Box and arrow sizes step down with the terminal width.

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::config::{DIAGRAM_MEDIUM_MAX_COLS, DIAGRAM_NARROW_MAX_COLS};

use super::problem::{DiagramBox, Display};

const BOX_HEIGHT: u16 = 3;
const HIDDEN_COLOR: Color = Color::Rgb(230, 126, 34);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagramLayout {
    pub box_w: u16,
    pub mid_w: u16,
    pub arrow_len: u16,
}

impl DiagramLayout {
    pub fn for_width(width: u16) -> Self {
        if width <= DIAGRAM_NARROW_MAX_COLS {
            Self { box_w: 8, mid_w: 13, arrow_len: 2 }
        } else if width <= DIAGRAM_MEDIUM_MAX_COLS {
            Self { box_w: 10, mid_w: 16, arrow_len: 4 }
        } else {
            Self { box_w: 12, mid_w: 20, arrow_len: 8 }
        }
    }

    pub fn total_width(&self) -> u16 {
        self.box_w * 2 + self.mid_w + self.arrow_len * 2
    }
}

/// Rectangles for the three boxes and the two arrows, centred in `area` and
/// clipped to it.
pub fn place(area: Rect, layout: DiagramLayout) -> ([Rect; 3], [Rect; 2]) {
    let x0 = area.x + area.width.saturating_sub(layout.total_width()) / 2;
    let y = area.y + area.height.saturating_sub(BOX_HEIGHT) / 2;

    let old_x = x0;
    let arrow1_x = old_x + layout.box_w;
    let mid_x = arrow1_x + layout.arrow_len;
    let arrow2_x = mid_x + layout.mid_w;
    let new_x = arrow2_x + layout.arrow_len;

    let boxes = [
        Rect::new(old_x, y, layout.box_w, BOX_HEIGHT),
        Rect::new(mid_x, y, layout.mid_w, BOX_HEIGHT),
        Rect::new(new_x, y, layout.box_w, BOX_HEIGHT),
    ];
    let arrows = [
        Rect::new(arrow1_x, y + 1, layout.arrow_len, 1),
        Rect::new(arrow2_x, y + 1, layout.arrow_len, 1),
    ];
    (boxes.map(|r| r.intersection(area)), arrows.map(|r| r.intersection(area)))
}

fn arrow(len: u16) -> String {
    match len {
        0 => String::new(),
        n => "─".repeat(n as usize - 1) + "▶",
    }
}

pub fn render_diagram(display: &Display, f: &mut Frame, area: Rect) {
    let layout = DiagramLayout::for_width(area.width);
    let (rects, arrows) = place(area, layout);
    let boxes = display.boxes();

    for (i, (b, rect)) in boxes.iter().zip(rects).enumerate() {
        let border = if i == 1 { Color::LightBlue } else { Color::White };
        render_box(b, border, f, rect);
    }
    for rect in arrows {
        let widget = Paragraph::new(arrow(rect.width)).style(Style::default().fg(Color::Gray));
        f.render_widget(widget, rect);
    }
}

fn render_box(b: &DiagramBox, border: Color, f: &mut Frame, rect: Rect) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let value_style = if b.hidden {
        Style::default().fg(HIDDEN_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(b.label, Style::default().fg(Color::Gray)))
        .title_alignment(Alignment::Center);
    let widget = Paragraph::new(Line::from(Span::styled(b.text.clone(), value_style)))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(widget, rect);
}
