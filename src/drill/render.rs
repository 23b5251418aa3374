//! Drill screen: title, score header, diagram, answer line, feedback and
//! commands, plus the report overlay.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::config::TARGET_SCORE;
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ButtonBar;

use super::actions;
use super::diagram::render_diagram;
use super::text::{texts, Texts, Tone};
use super::DrillGame;

pub fn render(game: &DrillGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let t = texts(game.lang);

    let bar = command_bar(game, t);
    let bar_inner_width = if is_narrow { area.width } else { area.width.saturating_sub(2) };
    let bar_height = bar.rows_for(bar_inner_width) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Title
            Constraint::Length(4),          // Score
            Constraint::Min(5),             // Diagram
            Constraint::Length(3),          // Answer
            Constraint::Length(1),          // Feedback
            Constraint::Length(bar_height), // Commands
        ])
        .split(area);

    render_title(t, f, chunks[0], click_state);
    render_score(game, t, f, chunks[1], borders);
    if let Some(problem) = &game.progress.current_problem {
        render_diagram(&problem.display, f, chunks[2]);
    }
    render_answer(game, t, f, chunks[3], borders);
    render_feedback(game, f, chunks[4]);
    {
        let mut cs = click_state.borrow_mut();
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray));
        bar.block(block).render(f, chunks[5], &mut cs);
    }

    if game.show_report {
        render_report(game, t, f, area, click_state);
    }
}

fn render_title(t: &Texts, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let widget = Paragraph::new(Line::from(Span::styled(
        t.title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(widget, area);

    let mut cs = click_state.borrow_mut();
    cs.add_row_target(area, area.y, actions::TITLE);
}

fn render_score(game: &DrillGame, t: &Texts, f: &mut Frame, area: Rect, borders: Borders) {
    let p = &game.progress;
    let score_color = if p.score >= TARGET_SCORE {
        Color::Yellow
    } else if p.score < 0 {
        Color::Red
    } else {
        Color::White
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let pct_text = format!(" {:>3}%", (p.progress_ratio() * 100.0).round() as u32);
    let bar_width = inner_width.saturating_sub(pct_text.len() + 1);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {}: ", t.score), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} / {}", p.score, TARGET_SCORE),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   {}: ", t.correct), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", p.correct_count, p.total_answered()),
                Style::default().fg(Color::White),
            ),
        ]),
        progress_line(p.progress_ratio(), bar_width, &pct_text),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn progress_line(ratio: f64, bar_width: usize, pct_text: &str) -> Line<'static> {
    let filled = (ratio * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    let bar: String = "█".repeat(filled) + &"░".repeat(empty);

    Line::from(vec![
        Span::raw(" "),
        Span::styled(bar, Style::default().fg(Color::Green)),
        Span::styled(pct_text.to_string(), Style::default().fg(Color::White)),
    ])
}

fn render_answer(game: &DrillGame, t: &Texts, f: &mut Frame, area: Rect, borders: Borders) {
    let line = if game.input.is_empty() {
        Line::from(vec![
            Span::styled(" ▏", Style::default().fg(Color::Cyan)),
            Span::styled(t.placeholder, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                game.input.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])
    };

    let border_color = if game.is_locked() { Color::DarkGray } else { Color::Cyan };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", t.answer));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_feedback(game: &DrillGame, f: &mut Frame, area: Rect) {
    let color = match game.feedback.tone() {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Neutral => Color::Gray,
    };
    let widget = Paragraph::new(Span::styled(
        game.feedback.text(game.lang),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn command_bar<'a>(game: &DrillGame, t: &Texts) -> ButtonBar<'a> {
    let key = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);
    let reveal = Style::default().fg(Color::Magenta);
    let danger = Style::default().fg(Color::Red);
    let submit_style = if game.is_locked() { dim } else { key };

    let mut bar = ButtonBar::new();
    bar = bar.button(format!("[S] {}", t.submit), submit_style, actions::SUBMIT);
    if game.progress.can_show_answer {
        bar = bar.button(format!("[A] {}", t.show_answer), reveal, actions::SHOW_ANSWER);
    }
    bar.button(format!("[P] {}", t.report), key, actions::OPEN_REPORT)
        .button(format!("[X] {}", t.reset), danger, actions::RESET)
        .button(format!("[L] {}", t.switch_lang), key, actions::TOGGLE_LANG)
}

// ── Report overlay ─────────────────────────────────────────────────

fn render_report(
    game: &DrillGame,
    t: &Texts,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let report = game.progress.report();
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ])
    };

    let mut lines = vec![
        row(t.score, report.score.to_string()),
        row(t.total, report.total.to_string()),
        row(t.correct, report.correct.to_string()),
        row(t.accuracy, format!("{}%", report.accuracy)),
    ];
    if let Some(time) = &game.report_time {
        lines.push(row(t.time, time.clone()));
    }

    let height = lines.len() as u16 + 4;
    let rect = centered_rect(area, 36, height);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {} ", t.report_title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    f.render_widget(Paragraph::new(lines), parts[0]);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(rect, actions::REPORT_BACKDROP);
    ButtonBar::new()
        .button(format!("[Q] {}", t.close), Style::default().fg(Color::Cyan), actions::CLOSE_REPORT)
        .render(f, parts[1], &mut cs);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        let line = progress_line(0.5, 10, "  50%");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " █████░░░░░  50%");
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn progress_bar_empty_and_full() {
        assert_eq!(line_text(&progress_line(0.0, 4, "")), " ░░░░");
        assert_eq!(line_text(&progress_line(1.0, 4, "")), " ████");
    }

    #[test]
    fn overlay_is_centred_and_clamped() {
        let r = centered_rect(Rect::new(0, 0, 80, 24), 36, 10);
        assert_eq!(r, Rect::new(22, 7, 36, 10));
        let small = centered_rect(Rect::new(0, 0, 20, 5), 36, 10);
        assert_eq!(small, Rect::new(0, 0, 20, 5));
    }
}
