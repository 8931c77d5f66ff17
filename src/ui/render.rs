use std::time::Instant;

use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;

use super::frame::{Cell, FrameRow, FrameView};
use super::{status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let view = FrameView::build(model, Instant::now());
    draw(&view, frame);
}

/// Draw a prepared frame: text area on top, then the status bar and the
/// message bar.
pub fn draw(view: &FrameView, frame: &mut Frame) {
    let area = frame.area();
    let [text_area, status_area, message_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let content: Vec<Line> = view.rows.iter().map(row_line).collect();
    frame.render_widget(Clear, text_area);
    frame.render_widget(Paragraph::new(content), text_area);

    status::render_status_bar(view, frame, status_area);
    status::render_message_bar(view, frame, message_area);

    let (x, y) = view.cursor;
    if x < text_area.width && y < text_area.height {
        frame.set_cursor_position(Position::new(text_area.x + x, text_area.y + y));
    }
}

fn row_line(row: &FrameRow) -> Line<'static> {
    match row {
        FrameRow::Filler => Line::raw("~"),
        FrameRow::Welcome(banner) => Line::raw(banner.clone()),
        FrameRow::Text(cells) => Line::from(cell_spans(cells)),
    }
}

/// Group runs of equally styled cells into spans.
fn cell_spans(cells: &[Cell]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = None;
    for &cell in cells {
        let (glyph, substituted) = cell.glyph();
        let cell_style = if substituted {
            style::control_style()
        } else {
            style::style_for_highlight(cell.highlight)
        };
        if run_style != Some(cell_style) {
            if let Some(prev) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run_style = Some(cell_style);
        }
        run.push(glyph);
    }
    if let Some(prev) = run_style {
        spans.push(Span::styled(run, prev));
    }
    spans
}
