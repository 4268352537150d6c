//! Exam-taking screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::app::ExamApp;
use crate::backend::ExamBackend;
use crate::models::QuestionKind;
use crate::session::SubmissionState;

/// Render the exam screen.
pub fn render<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress + countdown
        Constraint::Length(7), // Question text
        Constraint::Min(8),    // Options or input
        Constraint::Length(2), // Status banner
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_question_text(frame, chunks[1], app);

    let question = app.current_question();
    match &question.kind {
        QuestionKind::Mcq { options } => {
            render_options(frame, chunks[2], options, app.selected_option, app);
        }
        QuestionKind::Text => render_input(frame, chunks[2], app),
    }

    render_banner(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn render_header<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let progress = format!(
        "{}  ·  Question {} of {}  ·  Answered {}/{}",
        app.exam.title,
        app.cursor + 1,
        app.snapshot.total,
        app.snapshot.answered,
        app.snapshot.total,
    );

    let line = match app.snapshot.remaining_seconds {
        Some(seconds) => {
            let clock = format!("{:02}:{:02}", seconds / 60, seconds % 60);
            let clock_color = if seconds <= 60 { Color::Red } else { Color::Cyan };
            Line::from(vec![
                Span::styled(progress, Style::default().fg(Color::Cyan).bold()),
                Span::raw("  ·  "),
                Span::styled(clock, Style::default().fg(clock_color).bold()),
            ])
        }
        None => Line::from(Span::styled(
            progress,
            Style::default().fg(Color::Cyan).bold(),
        )),
    };

    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_question_text<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let question = app.current_question();
    let title = format!(" {} pts ", question.points);

    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options<B: ExamBackend>(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    selected: usize,
    app: &ExamApp<B>,
) {
    let stored = app.snapshot.answers.get(&app.current_question().id);

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let is_selected = i == selected;
            let is_stored = stored.is_some_and(|answer| answer == opt);
            let prefix = if is_selected { "> " } else { "  " };
            let marker = if is_stored { "[x] " } else { "[ ] " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else if is_stored {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(marker, style),
                Span::styled(opt.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_input<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let stored = app
        .snapshot
        .answers
        .get(&app.current_question().id)
        .map(String::as_str)
        .unwrap_or("");
    let saved = !stored.is_empty() && stored == app.input;

    let title = if saved { " Your answer (saved) " } else { " Your answer " };
    let content = format!("{}_", app.input);

    let widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_banner<B: ExamBackend>(frame: &mut Frame, area: Rect, app: &ExamApp<B>) {
    let line = match &app.snapshot.submission {
        SubmissionState::Submitting => Some(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow).bold(),
        ))),
        SubmissionState::Failed(message) => Some(Line::from(Span::styled(
            format!("Submission failed: {} (Ctrl+S to retry)", message),
            Style::default().fg(Color::Red).bold(),
        ))),
        _ => match app.snapshot.remaining_seconds {
            Some(0) => Some(Line::from(Span::styled(
                "Time is up",
                Style::default().fg(Color::Red).bold(),
            ))),
            _ => None,
        },
    };

    if let Some(line) = line {
        let widget = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "←/→ question  ·  j/k select, type to answer  ·  Enter save  ·  Ctrl+S submit  ·  Esc quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
