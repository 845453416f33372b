/*!
 * Corpus model and its serialized forms.
 *
 * - `model`: the in-memory tree shared by the unwrap and wrap engines
 * - `xml`: reading and writing the WMT XML format
 * - `json`: the nested JSON projection of a corpus
 */

pub mod json;
pub mod model;
pub mod xml;

pub use model::{
    Collection, Corpus, Document, DocumentFilter, Section, SectionKind, Segment, SegmentId,
};
