use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::{ImportError, parse_question_set};
use crate::models::QuestionSet;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: ImportError,
    },
}

/// Read a question file as raw text, for the import editor.
pub fn read_question_file<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and validate a YAML question file.
pub fn load_question_set<P: AsRef<Path>>(path: P) -> Result<QuestionSet, LoadError> {
    let path = path.as_ref();
    let raw = read_question_file(path)?;

    parse_question_set(&raw).map_err(|source| LoadError::Import {
        path: path.to_path_buf(),
        source,
    })
}
