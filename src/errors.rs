/*!
 * Error types for the wmtformat crate.
 *
 * `CorpusError` covers every failure of the corpus model, the alignment
 * engines and the serialization adapters. `AppError` is what the command
 * line front end reports.
 */

use thiserror::Error;

use crate::corpus::SectionKind;

/// Errors raised while reading, aligning or wrapping a corpus
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// No source section declares a language
    #[error("No source languages found")]
    MissingLanguage,

    /// More than one distinct language for one kind of section
    #[error("Multiple {kind} languages found ({}) -- this case is not handled", .languages.join(", "))]
    AmbiguousLanguage {
        /// Section kind the languages were collected from
        kind: SectionKind,
        /// Distinct languages, in first-seen order
        languages: Vec<String>,
    },

    /// Several translators or systems and no selection
    #[error("Multiple {}s ({}) -- need to specify which one to choose", .kind.stream_noun(), .candidates.join(", "))]
    AmbiguousStream {
        /// Reference or hypothesis
        kind: SectionKind,
        /// Available stream names
        candidates: Vec<String>,
    },

    /// The selected translator or system does not exist
    #[error("{} {name} was not found", capitalize(.kind.stream_noun()))]
    UnknownStream {
        /// Reference or hypothesis
        kind: SectionKind,
        /// The requested name
        name: String,
    },

    /// The hypothesis stream ran out before every document was filled
    #[error("Hypothesis file contains too few lines: document {document} needs {required} lines in total, only {available} available")]
    Underflow {
        /// Document that could not be filled
        document: String,
        /// Lines required up to and including this document
        required: usize,
        /// Lines supplied
        available: usize,
    },

    /// Lines were left over after every document was filled
    #[error("Hypothesis file contains too many lines: {remaining} left after the last document")]
    Overflow {
        /// Number of unconsumed lines
        remaining: usize,
    },

    /// The corpus tree violates a structural rule
    #[error("Corpus structure error: {0}")]
    Structure(String),

    /// The serialized corpus could not be read
    #[error("Failed to parse corpus: {0}")]
    Parse(String),
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the corpus layer
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<CorpusError>() {
            Ok(corpus_error) => Self::Corpus(corpus_error),
            Err(other) => Self::Unknown(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
