//! # study-quiz
//!
//! A terminal quiz for multiple-choice question sets written in YAML.
//!
//! The core is usable without the terminal UI:
//!
//! ```rust
//! use study_quiz::{AnswerMap, parse_question_set, score};
//!
//! let set = parse_question_set(
//!     "questions:\n  - question: 2+2?\n    options: ['3', '4']\n    correct: 1\n",
//! )?;
//! let result = score(&set, &AnswerMap::from([(0, 1)]));
//! assert_eq!(result.score, 1);
//! # Ok::<(), study_quiz::ImportError>(())
//! ```
//!
//! ## Running the terminal app
//!
//! ```rust,no_run
//! use study_quiz::{App, CatalogClient, GradingScale, MemoryStore, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let app = App::new(Box::new(MemoryStore::new()), GradingScale::SixTier);
//!     let catalog = CatalogClient::new(study_quiz::catalog::DEFAULT_CATALOG_URL)?;
//!     Quiz::new(app, catalog).run().await
//! }
//! ```

mod app;
pub mod catalog;
pub mod config;
mod data;
pub mod manual;
mod models;
pub mod scoring;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use app::{App, CatalogView, DraftField, ImportTab, Notice};
pub use catalog::{CatalogClient, CatalogError, Subject};
pub use data::{
    FileStore, ImportError, LoadError, MemoryStore, QUESTIONS_KEY, QuestionStore, StoreError,
    load_question_set, parse_question_set, read_question_file,
};
pub use manual::{DraftError, ManualSetBuilder, OptionRemoval, QuestionDraft};
pub use models::{AnswerMap, AppState, Question, QuestionFault, QuestionSet, SetError};
pub use scoring::{AttemptResult, Grade, GradingScale, is_complete, score, score_with};

const POLL_INTERVAL_MS: u64 = 100;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Results of background catalog requests, delivered to the UI loop.
#[derive(Debug)]
enum CatalogEvent {
    Subjects(Result<Vec<Subject>, CatalogError>),
    Questions {
        subject: Subject,
        content: Result<String, CatalogError>,
    },
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
    LoadSubjects,
    LoadSubject(Subject),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    catalog: CatalogClient,
}

impl Quiz {
    pub fn new(app: App, catalog: CatalogClient) -> Self {
        Self { app, catalog }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits. Must be called from
    /// within a tokio runtime; catalog requests run as background tasks.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut term = terminal::init()?;
        info!("terminal session started");

        let result = run_event_loop(&mut term, &mut self.app, &self.catalog, &tx, &mut rx);
        terminal::restore()?;
        info!("terminal session ended");
        result
    }
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    catalog: &CatalogClient,
    tx: &mpsc::UnboundedSender<CatalogEvent>,
    rx: &mut mpsc::UnboundedReceiver<CatalogEvent>,
) -> Result<(), QuizError> {
    loop {
        while let Ok(event) = rx.try_recv() {
            apply_catalog_event(app, event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll with a timeout so finished catalog requests show up promptly.
        if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_input(app, key) {
            Action::Continue => {}
            Action::Quit => break,
            Action::LoadSubjects => spawn_subject_listing(catalog.clone(), tx.clone()),
            Action::LoadSubject(subject) => spawn_subject_fetch(catalog.clone(), tx.clone(), subject),
        }
    }

    Ok(())
}

fn spawn_subject_listing(catalog: CatalogClient, tx: mpsc::UnboundedSender<CatalogEvent>) {
    debug!(url = catalog.base_url(), "requesting subject list");
    tokio::spawn(async move {
        let subjects = catalog.list_subjects().await;
        let _ = tx.send(CatalogEvent::Subjects(subjects));
    });
}

fn spawn_subject_fetch(
    catalog: CatalogClient,
    tx: mpsc::UnboundedSender<CatalogEvent>,
    subject: Subject,
) {
    debug!(subject = %subject.name, "requesting subject questions");
    tokio::spawn(async move {
        let content = catalog.fetch_questions(&subject).await;
        let _ = tx.send(CatalogEvent::Questions { subject, content });
    });
}

fn apply_catalog_event(app: &mut App, event: CatalogEvent) {
    match event {
        CatalogEvent::Subjects(subjects) => app.receive_subjects(subjects),
        CatalogEvent::Questions { subject, content } => {
            app.receive_subject_questions(&subject, content);
        }
    }
}

fn handle_input(app: &mut App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.state {
        AppState::Importing => handle_import_input(app, key.code, ctrl),
        AppState::Answering => handle_quiz_input(app, key.code),
        AppState::Graded => handle_result_input(app, key.code),
    }
}

fn handle_import_input(app: &mut App, key: KeyCode, ctrl: bool) -> Action {
    match key {
        KeyCode::Esc => return Action::Quit,
        KeyCode::F(1) => app.set_tab(ImportTab::Yaml),
        KeyCode::F(2) => app.set_tab(ImportTab::Manual),
        KeyCode::F(3) => {
            app.set_tab(ImportTab::Catalog);
            let catalog = app.catalog();
            if catalog.subjects().is_empty() && !catalog.is_loading() {
                app.begin_catalog_load();
                return Action::LoadSubjects;
            }
        }
        KeyCode::Char('t') if ctrl => {
            app.start_test();
        }
        _ => {
            return match app.tab() {
                ImportTab::Yaml => handle_yaml_input(app, key, ctrl),
                ImportTab::Manual => handle_manual_input(app, key, ctrl),
                ImportTab::Catalog => handle_catalog_input(app, key),
            };
        }
    }
    Action::Continue
}

fn handle_yaml_input(app: &mut App, key: KeyCode, ctrl: bool) -> Action {
    match key {
        KeyCode::Char('s') if ctrl => {
            app.submit_yaml();
        }
        KeyCode::Char(c) if !ctrl => app.input_char(c),
        KeyCode::Tab => {
            app.input_char(' ');
            app.input_char(' ');
        }
        KeyCode::Enter => app.input_newline(),
        KeyCode::Backspace => app.input_backspace(),
        _ => {}
    }
    Action::Continue
}

fn handle_manual_input(app: &mut App, key: KeyCode, ctrl: bool) -> Action {
    match key {
        KeyCode::Char('o') if ctrl => app.add_option(),
        KeyCode::Char('d') if ctrl => app.remove_focused_option(),
        KeyCode::Char('k') if ctrl => app.mark_focused_correct(),
        KeyCode::Char('n') if ctrl => {
            app.add_manual_question();
        }
        KeyCode::Char('x') if ctrl => app.remove_last_question(),
        KeyCode::Char('s') if ctrl => {
            app.finish_manual();
        }
        KeyCode::Char(c) if !ctrl => app.input_char(c),
        KeyCode::Tab | KeyCode::Enter | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::Backspace => app.input_backspace(),
        _ => {}
    }
    Action::Continue
}

fn handle_catalog_input(app: &mut App, key: KeyCode) -> Action {
    if app.catalog().is_loading() {
        return Action::Continue;
    }
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.begin_catalog_load();
            Action::LoadSubjects
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.catalog_select_next();
            Action::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.catalog_select_previous();
            Action::Continue
        }
        KeyCode::Enter => match app.selected_subject().cloned() {
            Some(subject) => {
                app.begin_catalog_load();
                Action::LoadSubject(subject)
            }
            None => Action::Continue,
        },
        _ => Action::Continue,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.submit_attempt();
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => app.back_to_import(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => app.back_to_import(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            assert_eq!(handle_input(app, key(code)), Action::Continue);
        }
    }

    fn app() -> App {
        App::new(Box::new(MemoryStore::new()), GradingScale::SixTier)
    }

    #[test]
    fn test_full_keyboard_session() {
        let mut app = app();
        type_text(
            &mut app,
            "questions:\n- question: 2+2?\n  options: [3, 4]\n  correct: 1\n",
        );
        handle_input(&mut app, ctrl('s'));
        assert!(app.has_questions());

        handle_input(&mut app, ctrl('t'));
        assert_eq!(app.state, AppState::Answering);

        // Submitting before answering is refused.
        handle_input(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.state, AppState::Answering);

        handle_input(&mut app, key(KeyCode::Char('j')));
        handle_input(&mut app, key(KeyCode::Enter));
        handle_input(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.state, AppState::Graded);
        assert_eq!(app.result().unwrap().score, 1);

        assert_eq!(handle_input(&mut app, key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_typing_q_in_editor_does_not_quit() {
        let mut app = app();
        assert_eq!(handle_input(&mut app, key(KeyCode::Char('q'))), Action::Continue);
        assert_eq!(app.yaml_input(), "q");
        assert_eq!(handle_input(&mut app, key(KeyCode::Esc)), Action::Quit);
        assert_eq!(handle_input(&mut app, ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_catalog_tab_requests_subjects_once() {
        let mut app = app();
        assert_eq!(handle_input(&mut app, key(KeyCode::F(3))), Action::LoadSubjects);
        assert_eq!(handle_input(&mut app, key(KeyCode::F(3))), Action::Continue);

        apply_catalog_event(
            &mut app,
            CatalogEvent::Subjects(Ok(vec![Subject { name: "math".into() }])),
        );
        assert_eq!(
            handle_input(&mut app, key(KeyCode::Enter)),
            Action::LoadSubject(Subject { name: "math".into() })
        );
        // Further keys wait for the request to finish.
        assert_eq!(handle_input(&mut app, key(KeyCode::Char('r'))), Action::Continue);
    }

    #[test]
    fn test_manual_shortcuts() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::F(2)));
        type_text(&mut app, "Which?");
        handle_input(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "x");
        handle_input(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "y");
        handle_input(&mut app, ctrl('k'));
        handle_input(&mut app, ctrl('n'));
        assert_eq!(app.builder().questions().len(), 1);
        assert_eq!(app.builder().questions()[0].correct_index(), 1);

        handle_input(&mut app, ctrl('s'));
        handle_input(&mut app, ctrl('t'));
        assert_eq!(app.state, AppState::Answering);
    }
}
