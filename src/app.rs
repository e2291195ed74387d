use tracing::{info, warn};
use uuid::Uuid;

use crate::QuizError;
use crate::catalog::{CatalogError, Subject};
use crate::data::{QuestionStore, parse_question_set};
use crate::manual::{ManualSetBuilder, OptionRemoval};
use crate::models::{AnswerMap, AppState, Question, QuestionSet};
use crate::scoring::{self, AttemptResult, GradingScale};

/// Import screen tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTab {
    Yaml,
    Manual,
    Catalog,
}

/// Field of the manual draft that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Text,
    Option(usize),
}

/// One-line message shown under the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(msg) | Notice::Error(msg) => msg,
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogView {
    subjects: Vec<Subject>,
    selected: usize,
    loading: bool,
}

impl CatalogView {
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// A loaded set plus the answers given so far.
struct Attempt {
    id: Uuid,
    questions: QuestionSet,
    answers: AnswerMap,
    current: usize,
    cursor: usize,
}

impl Attempt {
    fn new(questions: QuestionSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            answers: AnswerMap::new(),
            current: 0,
            cursor: 0,
        }
    }

    fn option_count(&self) -> usize {
        self.questions[self.current].options().len()
    }

    fn go_to(&mut self, index: usize) {
        self.current = index;
        self.cursor = self.answers.get(index).unwrap_or(0);
    }
}

pub struct App {
    pub state: AppState,
    store: Box<dyn QuestionStore + Send>,
    grading: GradingScale,
    tab: ImportTab,
    yaml_input: String,
    builder: ManualSetBuilder,
    focus: DraftField,
    catalog: CatalogView,
    notice: Option<Notice>,
    has_questions: bool,
    attempt: Option<Attempt>,
    result: Option<AttemptResult>,
    result_scroll: usize,
}

impl App {
    pub fn new(store: Box<dyn QuestionStore + Send>, grading: GradingScale) -> Self {
        let has_questions = match store.load() {
            Ok(stored) => stored.is_some(),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable stored question set");
                false
            }
        };

        Self {
            state: AppState::Importing,
            store,
            grading,
            tab: ImportTab::Yaml,
            yaml_input: String::new(),
            builder: ManualSetBuilder::new(),
            focus: DraftField::Text,
            catalog: CatalogView::default(),
            notice: None,
            has_questions,
            attempt: None,
            result: None,
            result_scroll: 0,
        }
    }

    pub fn grading(&self) -> GradingScale {
        self.grading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn info(&mut self, msg: impl Into<String>) {
        self.notice = Some(Notice::Info(msg.into()));
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.notice = Some(Notice::Error(msg.into()));
    }

    /// Whether a validated set is waiting in the store.
    pub fn has_questions(&self) -> bool {
        self.has_questions
    }

    // Importing

    pub fn tab(&self) -> ImportTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ImportTab) {
        self.tab = tab;
        self.notice = None;
    }

    pub fn yaml_input(&self) -> &str {
        &self.yaml_input
    }

    pub fn set_yaml_input(&mut self, text: impl Into<String>) {
        self.yaml_input = text.into();
    }

    pub fn builder(&self) -> &ManualSetBuilder {
        &self.builder
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    /// Text field that typing goes into on the current tab.
    fn focused_input(&mut self) -> Option<&mut String> {
        match self.tab {
            ImportTab::Yaml => Some(&mut self.yaml_input),
            ImportTab::Manual => {
                let draft = self.builder.draft_mut();
                match self.focus {
                    DraftField::Text => Some(draft.text_mut()),
                    DraftField::Option(index) => draft.option_mut(index).ok(),
                }
            }
            ImportTab::Catalog => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.focused_input() {
            input.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.pop();
        }
    }

    /// Newlines only make sense in the YAML editor.
    pub fn input_newline(&mut self) {
        if self.tab == ImportTab::Yaml {
            self.yaml_input.push('\n');
        }
    }

    /// Validate raw YAML and store it as the current set.
    pub fn import_text(&mut self, raw: &str) -> Result<usize, QuizError> {
        let set = match parse_question_set(raw) {
            Ok(set) => set,
            Err(e) => {
                info!(error = %e, "import rejected");
                return Err(e.into());
            }
        };
        self.store_set(&set)?;
        Ok(set.len())
    }

    fn store_set(&mut self, set: &QuestionSet) -> Result<(), QuizError> {
        self.store.save(set)?;
        self.has_questions = true;
        info!(questions = set.len(), "question set imported");
        Ok(())
    }

    pub fn submit_yaml(&mut self) -> bool {
        if self.yaml_input.trim().is_empty() {
            self.error("Paste or type a YAML question set first.");
            return false;
        }
        let raw = self.yaml_input.clone();
        match self.import_text(&raw) {
            Ok(count) => {
                self.info(format!("Imported {count} questions. Press Ctrl+T to start the test."));
                true
            }
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    pub fn focus_next(&mut self) {
        let options = self.builder.draft().options().len();
        self.focus = match self.focus {
            DraftField::Text => DraftField::Option(0),
            DraftField::Option(i) if i + 1 < options => DraftField::Option(i + 1),
            DraftField::Option(_) => DraftField::Text,
        };
    }

    pub fn focus_previous(&mut self) {
        let options = self.builder.draft().options().len();
        self.focus = match self.focus {
            DraftField::Text => DraftField::Option(options - 1),
            DraftField::Option(0) => DraftField::Text,
            DraftField::Option(i) => DraftField::Option(i - 1),
        };
    }

    pub fn add_option(&mut self) {
        match self.builder.draft_mut().add_option() {
            Ok(index) => self.focus = DraftField::Option(index),
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn remove_focused_option(&mut self) {
        let DraftField::Option(index) = self.focus else {
            return;
        };
        match self.builder.draft_mut().remove_option(index) {
            Ok(removal) => {
                let remaining = self.builder.draft().options().len();
                self.focus = DraftField::Option(index.min(remaining - 1));
                match removal {
                    OptionRemoval::Reset => self.info(
                        "The correct option was removed; option 1 is now marked correct. Check it before adding.",
                    ),
                    OptionRemoval::Shifted | OptionRemoval::Unchanged => self.notice = None,
                }
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn mark_focused_correct(&mut self) {
        if let DraftField::Option(index) = self.focus {
            if let Err(e) = self.builder.draft_mut().mark_correct(index) {
                self.error(e.to_string());
            }
        }
    }

    pub fn add_manual_question(&mut self) -> bool {
        match self.builder.add_question().map(|_| ()) {
            Ok(()) => {
                let count = self.builder.questions().len();
                self.focus = DraftField::Text;
                self.info(format!("Question {count} added."));
                true
            }
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    pub fn remove_last_question(&mut self) {
        let count = self.builder.questions().len();
        if count == 0 {
            return;
        }
        if self.builder.remove_question(count - 1).is_ok() {
            self.info(format!("Question {count} removed."));
        }
    }

    pub fn finish_manual(&mut self) -> bool {
        let set = match self.builder.finish() {
            Ok(set) => set,
            Err(e) => {
                self.error(e.to_string());
                return false;
            }
        };
        match self.store_set(&set) {
            Ok(()) => {
                self.builder.reset();
                self.focus = DraftField::Text;
                self.info(format!("Saved {set}. Press Ctrl+T to start the test."));
                true
            }
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    pub fn begin_catalog_load(&mut self) {
        self.catalog.loading = true;
        self.notice = None;
    }

    pub fn receive_subjects(&mut self, subjects: Result<Vec<Subject>, CatalogError>) {
        self.catalog.loading = false;
        match subjects {
            Ok(subjects) => {
                if subjects.is_empty() {
                    self.info("The catalog has no subjects.");
                }
                self.catalog.subjects = subjects;
                self.catalog.selected = 0;
            }
            Err(e) => self.error(format!("Could not load the subject list. {e}")),
        }
    }

    pub fn catalog_select_next(&mut self) {
        let count = self.catalog.subjects.len();
        if count > 0 {
            self.catalog.selected = (self.catalog.selected + 1) % count;
        }
    }

    pub fn catalog_select_previous(&mut self) {
        let count = self.catalog.subjects.len();
        if count > 0 {
            self.catalog.selected = (self.catalog.selected + count - 1) % count;
        }
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        self.catalog.subjects.get(self.catalog.selected)
    }

    /// Feed a fetched subject file to the importer.
    pub fn receive_subject_questions(
        &mut self,
        subject: &Subject,
        content: Result<String, CatalogError>,
    ) -> bool {
        self.catalog.loading = false;
        let raw = match content {
            Ok(raw) => raw,
            Err(e) => {
                self.error(format!("Could not load the question set. {e}"));
                return false;
            }
        };
        match self.import_text(&raw) {
            Ok(count) => {
                self.info(format!(
                    "Imported {count} questions from {}. Press Ctrl+T to start the test.",
                    subject.display_name()
                ));
                true
            }
            Err(e) => {
                self.error(format!("{}: {e}", subject.display_name()));
                false
            }
        }
    }

    // Importing -> Answering

    pub fn start_test(&mut self) -> bool {
        let questions = match self.store.load() {
            Ok(Some(questions)) => questions,
            Ok(None) => {
                self.error("No questions available. Import questions first.");
                return false;
            }
            Err(e) => {
                self.error(e.to_string());
                return false;
            }
        };

        let attempt = Attempt::new(questions);
        info!(attempt = %attempt.id, questions = attempt.questions.len(), "test started");
        self.attempt = Some(attempt);
        self.result = None;
        self.result_scroll = 0;
        self.notice = None;
        self.state = AppState::Answering;
        true
    }

    // Answering

    fn answering_mut(&mut self) -> Option<&mut Attempt> {
        match self.state {
            AppState::Answering => self.attempt.as_mut(),
            AppState::Importing | AppState::Graded => None,
        }
    }

    /// The loaded set; `None` while importing.
    pub fn questions(&self) -> Option<&QuestionSet> {
        self.attempt.as_ref().map(|a| &a.questions)
    }

    pub fn answers(&self) -> Option<&AnswerMap> {
        self.attempt.as_ref().map(|a| &a.answers)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.attempt.as_ref().map(|a| &a.questions[a.current])
    }

    pub fn current_question_index(&self) -> usize {
        self.attempt.as_ref().map_or(0, |a| a.current)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.attempt.as_ref().map_or(0, |a| a.questions.len())
    }

    pub fn selected_option(&self) -> usize {
        self.attempt.as_ref().map_or(0, |a| a.cursor)
    }

    pub fn select_next_option(&mut self) {
        if let Some(attempt) = self.answering_mut() {
            let count = attempt.option_count();
            attempt.cursor = (attempt.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(attempt) = self.answering_mut() {
            let count = attempt.option_count();
            attempt.cursor = (attempt.cursor + count - 1) % count;
        }
    }

    pub fn next_question(&mut self) {
        if let Some(attempt) = self.answering_mut() {
            if attempt.current + 1 < attempt.questions.len() {
                attempt.go_to(attempt.current + 1);
            }
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(attempt) = self.answering_mut() {
            if attempt.current > 0 {
                attempt.go_to(attempt.current - 1);
            }
        }
    }

    /// Record the option under the cursor and move on to the next question.
    pub fn choose_option(&mut self) {
        let Some(attempt) = self.answering_mut() else {
            return;
        };
        let (current, cursor) = (attempt.current, attempt.cursor);
        attempt.answers.select(current, cursor);
        if current + 1 < attempt.questions.len() {
            attempt.go_to(current + 1);
        }
        self.notice = None;
    }

    pub fn is_complete(&self) -> bool {
        self.attempt
            .as_ref()
            .is_some_and(|a| scoring::is_complete(&a.questions, &a.answers))
    }

    pub fn answered_count(&self) -> usize {
        self.attempt
            .as_ref()
            .map_or(0, |a| a.answers.answered_count())
    }

    // Answering -> Graded

    pub fn submit_attempt(&mut self) -> bool {
        if self.state != AppState::Answering {
            return false;
        }
        if !self.is_complete() {
            let total = self.total_questions();
            let answered = self.answered_count();
            self.error(format!(
                "Please answer all questions ({answered} of {total} answered)."
            ));
            return false;
        }

        let Some(attempt) = self.attempt.as_ref() else {
            return false;
        };
        let result = scoring::score_with(&attempt.questions, &attempt.answers, self.grading);
        info!(
            attempt = %attempt.id,
            score = result.score,
            total = result.total,
            grade = ?result.grade,
            "attempt graded"
        );
        self.result = Some(result);
        self.result_scroll = 0;
        self.notice = None;
        self.state = AppState::Graded;
        true
    }

    // Graded

    pub fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.attempt.as_ref().map_or(0, |a| a.questions.len().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Retake the same set with a fresh answer map.
    pub fn restart(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            self.attempt = Some(Attempt::new(attempt.questions));
            self.result = None;
            self.result_scroll = 0;
            self.notice = None;
            self.state = AppState::Answering;
        }
    }

    /// Leave the test; the answer map is discarded.
    pub fn back_to_import(&mut self) {
        self.attempt = None;
        self.result = None;
        self.result_scroll = 0;
        self.notice = None;
        self.state = AppState::Importing;
    }
}
