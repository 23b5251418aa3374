//! Clickable UI components.
//!
//! A component renders itself and registers its own click targets, so the
//! hit regions always match what is on screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::Style;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ButtonBar ──────────────────────────────────────────────────

/// A row of buttons that wraps onto further rows when the area is narrow.
///
/// Click targets are computed from the rendered label widths, so CJK labels
/// (two columns per character) get correctly sized hit regions.
///
/// ```ignore
/// ButtonBar::new()
///     .button("[S] 提交", key_style, SUBMIT)
///     .button("[X] 重置", key_style, RESET)
///     .block(Block::default().borders(Borders::ALL))
///     .render(f, area, &mut cs);
/// ```
pub struct ButtonBar<'a> {
    buttons: Vec<(String, Style)>,
    actions: Vec<u16>,
    gap: u16,
    block: Option<Block<'a>>,
}

impl<'a> ButtonBar<'a> {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            actions: Vec::new(),
            gap: 1,
            block: None,
        }
    }

    pub fn button(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.buttons.push((format!(" {} ", label.into()), style));
        self.actions.push(action_id);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn widths(&self) -> Vec<u16> {
        self.buttons
            .iter()
            .map(|(text, _)| Line::from(text.as_str()).width() as u16)
            .collect()
    }

    /// Rows of content needed at the given inner width.
    pub fn rows_for(&self, inner_width: u16) -> u16 {
        layout_rows(&self.widths(), self.gap, inner_width).len().max(1) as u16
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let widths = self.widths();
        let rows = layout_rows(&widths, self.gap, inner.width);

        let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let mut spans: Vec<Span> = Vec::new();
            let mut cursor = 0u16;
            for &(x, idx) in row {
                if x > cursor {
                    spans.push(Span::raw(" ".repeat((x - cursor) as usize)));
                }
                let (text, style) = &self.buttons[idx];
                spans.push(Span::styled(text.clone(), *style));
                cursor = x + widths[idx];

                let y = inner.y + row_idx as u16;
                if y < inner.y + inner.height {
                    let rect = Rect::new(inner.x + x, y, widths[idx], 1);
                    cs.add_click_target(rect, self.actions[idx]);
                }
            }
            lines.push(Line::from(spans));
        }

        let paragraph = match self.block {
            Some(block) => Paragraph::new(lines).block(block),
            None => Paragraph::new(lines),
        };
        f.render_widget(paragraph, area);
    }
}

/// Greedy row packing. Returns, per row, `(x_offset, button_index)`.
/// A button wider than `max_width` still gets a row of its own.
fn layout_rows(widths: &[u16], gap: u16, max_width: u16) -> Vec<Vec<(u16, usize)>> {
    let mut rows: Vec<Vec<(u16, usize)>> = Vec::new();
    let mut current: Vec<(u16, usize)> = Vec::new();
    let mut cursor = 0u16;

    for (idx, &w) in widths.iter().enumerate() {
        let x = if current.is_empty() { 0 } else { cursor + gap };
        if !current.is_empty() && x + w > max_width {
            rows.push(std::mem::take(&mut current));
            current.push((0, idx));
            cursor = w;
        } else {
            current.push((x, idx));
            cursor = x + w;
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_when_everything_fits() {
        let rows = layout_rows(&[6, 8, 4], 1, 80);
        assert_eq!(rows, vec![vec![(0, 0), (7, 1), (16, 2)]]);
    }

    #[test]
    fn wraps_when_too_wide() {
        // 6 + 1 + 8 = 15 fits in 16; next (4) would end at 20.
        let rows = layout_rows(&[6, 8, 4], 1, 16);
        assert_eq!(rows, vec![vec![(0, 0), (7, 1)], vec![(0, 2)]]);
    }

    #[test]
    fn oversized_button_gets_own_row() {
        let rows = layout_rows(&[30, 4], 1, 10);
        assert_eq!(rows, vec![vec![(0, 0)], vec![(0, 1)]]);
    }

    #[test]
    fn empty_bar_has_no_rows() {
        assert!(layout_rows(&[], 1, 80).is_empty());
        assert_eq!(ButtonBar::new().rows_for(80), 1);
    }

    #[test]
    fn cjk_labels_are_double_width() {
        let bar = ButtonBar::new()
            .button("提交", Style::default(), 1)
            .button("OK", Style::default(), 2);
        // " 提交 " is 6 columns, " OK " is 4.
        assert_eq!(bar.widths(), vec![6, 4]);
        assert_eq!(bar.rows_for(11), 1);
        assert_eq!(bar.rows_for(10), 2);
    }
}
