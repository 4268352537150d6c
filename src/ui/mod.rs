//! Demo TUI renderer.

mod blocked;
mod confirm;
mod exam;
mod results;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{AppView, ExamApp};
use crate::backend::ExamBackend;

/// Render the app based on its current view.
pub fn render<B: ExamBackend>(frame: &mut Frame, app: &ExamApp<B>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.view {
        AppView::Exam => exam::render(frame, area, app),
        AppView::ConfirmSubmit { unanswered } => {
            exam::render(frame, area, app);
            confirm::render(frame, area, unanswered.len());
        }
        AppView::Results => results::render(frame, area, app),
        AppView::Blocked => blocked::render(frame, area, app),
    }
}
