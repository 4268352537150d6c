//! Screen for exams that cannot be taken right now.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::ExamApp;
use crate::backend::ExamBackend;
use crate::models::ExamStatus;

/// Render the blocked screen (missed or upcoming exam).
pub fn render<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(9),
        Constraint::Percentage(40),
    ])
    .split(area);

    let (message, color) = match app.snapshot.status {
        ExamStatus::Missed => ("The due date has passed. This exam was missed.", Color::Red),
        ExamStatus::Upcoming => ("This exam is not open yet.", Color::Yellow),
        ExamStatus::Taken | ExamStatus::Available => ("This exam is unavailable.", Color::Yellow),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.exam.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
