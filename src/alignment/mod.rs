/*!
 * Alignment engines.
 *
 * - `census`: the one-language-per-kind validation pass
 * - `streams`: translator/system stream reconciliation
 * - `unwrap`: corpus to aligned text streams
 * - `wrap`: hypothesis lines back into a corpus
 */

pub mod census;
pub mod streams;
pub mod unwrap;
pub mod wrap;

pub use census::{CorpusLanguages, LanguageCensus, UNDECLARED_LANGUAGE};
pub use streams::{DEFAULT_STREAM_NAME, SegmentLookup, StreamKey, StreamPlan};
pub use unwrap::{DEFAULT_MISSING_MESSAGE, UnwrapOptions, Unwrapped, unwrap};
pub use wrap::wrap;
