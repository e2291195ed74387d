mod import;
mod loader;
mod store;

pub use import::{ImportError, parse_question_set};
pub use loader::{LoadError, load_question_set, read_question_file};
pub use store::{FileStore, MemoryStore, QUESTIONS_KEY, QuestionStore, StoreError};
