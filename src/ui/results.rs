//! Results screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::ExamApp;
use crate::backend::ExamBackend;
use crate::session::SubmissionState;

/// Render the results screen.
pub fn render<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let chunks = Layout::vertical([
        Constraint::Length(8), // Score summary
        Constraint::Min(6),    // Breakdown
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let SubmissionState::Submitted(result) = &app.snapshot.submission else {
        let waiting = Paragraph::new("No result recorded")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let grade_color = match result.percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.exam.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)",
                result.score, result.total_points, result.percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Submitted {}", result.submitted_at.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(summary).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[0]);

    render_breakdown(frame, chunks[1], app);
    render_controls(frame, chunks[2]);
}

fn render_breakdown<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let lines: Vec<Line> = app
        .exam
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answered = app
                .snapshot
                .answers
                .get(&question.id)
                .is_some_and(|a| !a.is_empty());
            let (symbol, color) = if answered {
                ("+", Color::Green)
            } else {
                ("-", Color::DarkGray)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(question.text.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answered questions ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
