/*!
 * # wmtformat - WMT test set wrapping and unwrapping
 *
 * A Rust library for moving machine-translation evaluation data between the
 * WMT XML test set format and line-aligned plain text.
 *
 * ## Features
 *
 * - Unwrap a test set into one text file per stream:
 *   - source sentences
 *   - references, one stream per translator
 *   - system outputs, one stream per system
 * - Placeholders for segments a translator or system does not cover
 * - Optional empty line between documents
 * - Filtering by collection and exclusion of test-suite documents
 * - Wrap plain-text system output back into the source test set
 * - JSON view of a test set
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `corpus`: In-memory corpus tree and its adapters:
 *   - `corpus::model`: Documents, sections and segments
 *   - `corpus::xml`: Parsing and rendering of the XML format
 *   - `corpus::json`: JSON projection
 * - `alignment`: The wrap and unwrap engines:
 *   - `alignment::census`: Corpus-wide language rules
 *   - `alignment::streams`: Translator and system stream reconciliation
 *   - `alignment::unwrap`: Corpus to aligned text streams
 *   - `alignment::wrap`: Hypothesis lines into a corpus
 * - `observer`: Progress and diagnostic events
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the Apache License 2.0
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod corpus;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod observer;

// Re-export main types for easier usage
pub use alignment::{unwrap, wrap, StreamKey, UnwrapOptions, Unwrapped};
pub use app_config::Config;
pub use corpus::{Corpus, Document, DocumentFilter, Section, SectionKind, Segment};
pub use errors::{AppError, CorpusError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use observer::{AlignmentEvent, AlignmentObserver, LogObserver, NullObserver, RecordingObserver};
