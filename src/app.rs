//! Demo TUI driving an exam session.
//!
//! Everything here is a consumer of the session API; it holds no attempt
//! state of its own beyond editor scratch (cursor, text buffer).

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::backend::ExamBackend;
use crate::models::{Exam, ExamStatus, Question, QuestionKind};
use crate::session::{ExamSessionController, SessionSnapshot, SubmissionState, SubmitOutcome, SubmitTrigger};
use crate::{terminal, ui, SessionError};

/// What the screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    /// Answering questions.
    Exam,
    /// Submit requested with unanswered questions; waiting for a decision.
    ConfirmSubmit { unanswered: Vec<String> },
    /// Graded result (fresh or prior).
    Results,
    /// Exam not open: missed or upcoming.
    Blocked,
}

/// TUI state wrapped around a session controller.
pub struct ExamApp<B: ExamBackend> {
    pub controller: ExamSessionController<B>,
    pub exam: Exam,
    pub snapshot: SessionSnapshot,
    pub view: AppView,
    /// Index of the question being shown.
    pub cursor: usize,
    /// Highlighted option on an MCQ question.
    pub selected_option: usize,
    /// Edit buffer for a free-text question.
    pub input: String,
    pub should_quit: bool,
}

impl<B: ExamBackend> ExamApp<B> {
    pub async fn new(controller: ExamSessionController<B>) -> Self {
        let exam = controller.exam().await;
        let snapshot = controller.snapshot().await;
        // An exam with no questions has no screen to answer on, whatever its
        // status says; park it on the blocked view.
        let view = if exam.questions.is_empty() {
            AppView::Blocked
        } else {
            match snapshot.status {
                ExamStatus::Available => AppView::Exam,
                ExamStatus::Taken => AppView::Results,
                ExamStatus::Missed | ExamStatus::Upcoming => AppView::Blocked,
            }
        };

        let mut app = Self {
            controller,
            exam,
            snapshot,
            view,
            cursor: 0,
            selected_option: 0,
            input: String::new(),
            should_quit: false,
        };
        app.sync_editor();
        app
    }

    pub fn current_question(&self) -> &Question {
        &self.exam.questions[self.cursor]
    }

    /// Pull a fresh snapshot and follow the session into its terminal view.
    pub async fn refresh(&mut self) {
        self.snapshot = self.controller.snapshot().await;
        if matches!(self.snapshot.submission, SubmissionState::Submitted(_))
            && matches!(self.view, AppView::Exam | AppView::ConfirmSubmit { .. })
        {
            self.view = AppView::Results;
        }
    }

    /// Reset the editor scratch from the stored answer for the cursor.
    fn sync_editor(&mut self) {
        let Some(question) = self.exam.questions.get(self.cursor) else {
            return;
        };
        let stored = self.snapshot.answers.get(&question.id);

        match &question.kind {
            QuestionKind::Mcq { options } => {
                self.selected_option = stored
                    .and_then(|answer| options.iter().position(|o| o == answer))
                    .unwrap_or(0);
                self.input.clear();
            }
            QuestionKind::Text => {
                self.input = stored.cloned().unwrap_or_default();
            }
        }
    }

    fn next_question(&mut self) {
        if self.cursor + 1 < self.exam.questions.len() {
            self.cursor += 1;
            self.sync_editor();
        }
    }

    fn previous_question(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.sync_editor();
        }
    }

    async fn commit_answer(&mut self) {
        let question = self.current_question();
        let value = match &question.kind {
            QuestionKind::Mcq { options } => match options.get(self.selected_option) {
                Some(option) => option.clone(),
                None => return,
            },
            QuestionKind::Text => self.input.clone(),
        };
        let id = question.id.clone();
        self.controller.set_answer(&id, value).await;
        self.refresh().await;
    }

    async fn request_submit(&mut self) {
        match self.controller.submit(SubmitTrigger::Manual).await {
            Ok(SubmitOutcome::Submitted(_)) | Ok(SubmitOutcome::AlreadySubmitted(_)) => {
                self.view = AppView::Results;
            }
            Ok(SubmitOutcome::ConfirmationRequired { unanswered }) => {
                self.view = AppView::ConfirmSubmit { unanswered };
            }
            Ok(SubmitOutcome::InFlight) => {}
            Ok(SubmitOutcome::NotSubmittable(_)) => {
                self.view = AppView::Blocked;
            }
            // Failure lands in the snapshot as Failed; the exam screen shows
            // it and another Ctrl+S retries.
            Err(_) => {}
        }
    }

    async fn confirm_submit(&mut self) {
        match self.controller.submit_confirmed().await {
            Ok(SubmitOutcome::Submitted(_)) | Ok(SubmitOutcome::AlreadySubmitted(_)) => {
                self.view = AppView::Results;
            }
            Ok(_) | Err(_) => {
                self.view = AppView::Exam;
            }
        }
    }

    pub async fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match &self.view {
            AppView::Exam => self.handle_exam_key(code, modifiers).await,
            AppView::ConfirmSubmit { .. } => match code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.confirm_submit().await;
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.view = AppView::Exam;
                }
                _ => {}
            },
            AppView::Results | AppView::Blocked => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
        }
    }

    async fn handle_exam_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(code, KeyCode::Char('s') | KeyCode::Char('S')) {
                self.request_submit().await;
            }
            return;
        }

        match code {
            KeyCode::Left => {
                self.previous_question();
                return;
            }
            KeyCode::Right => {
                self.next_question();
                return;
            }
            _ => {}
        }

        if self.current_question().is_mcq() {
            let option_count = self.current_question().options().len();
            match code {
                KeyCode::Up | KeyCode::Char('k') if option_count > 0 => {
                    self.selected_option =
                        (self.selected_option + option_count - 1) % option_count;
                }
                KeyCode::Down | KeyCode::Char('j') if option_count > 0 => {
                    self.selected_option = (self.selected_option + 1) % option_count;
                }
                KeyCode::Enter => self.commit_answer().await,
                _ => {}
            }
        } else {
            match code {
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter => self.commit_answer().await,
                _ => {}
            }
        }
    }
}

/// Run the exam TUI until the student quits.
pub async fn run<B: ExamBackend>(controller: ExamSessionController<B>) -> Result<(), SessionError> {
    let mut app = ExamApp::new(controller).await;
    // The session restores the shell on drop, including the error returns
    // below and a panic inside the draw closure.
    let mut term = terminal::TerminalSession::begin()?;

    loop {
        app.refresh().await;
        term.terminal().draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key.code, key.modifiers).await;
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Leaving the screen: stop the countdown; an in-flight delivery finishes
    // on its own task.
    app.controller.close().await;
    Ok(())
}
