//! Submit-confirmation overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

/// Render the unanswered-questions confirmation dialog over the exam screen.
pub fn render(frame: &mut Frame, area: Rect, unanswered: usize) {
    let vertical = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(7),
        Constraint::Percentage(35),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .split(vertical[1]);
    let dialog = horizontal[1];

    let noun = if unanswered == 1 { "question is" } else { "questions are" };
    let content = vec![
        Line::from(Span::styled(
            format!("{} {} still unanswered.", unanswered, noun),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Submit anyway?  [Y]es / [N]o",
            Style::default().fg(Color::White),
        )),
    ];

    frame.render_widget(Clear, dialog);
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Confirm submission ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, dialog);
}
