use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::frame::FrameView;
use super::style;

pub fn render_status_bar(view: &FrameView, frame: &mut Frame, area: Rect) {
    let status_bar = Paragraph::new(view.status.as_str()).style(style::status_bar_style());
    frame.render_widget(status_bar, area);
}

pub fn render_message_bar(view: &FrameView, frame: &mut Frame, area: Rect) {
    let Some((text, level)) = &view.message else {
        return;
    };
    let bar = Paragraph::new(text.as_str()).style(style::message_style(*level));
    frame.render_widget(bar, area);
}
