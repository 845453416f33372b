/*!
 * Stream reconciliation for reference and hypothesis sections.
 *
 * Reference sections may carry a translator, hypothesis sections a system.
 * When no section of a kind is labelled anywhere in the corpus, the kind
 * has a single anonymous stream fed by the first section of each document.
 * Otherwise there is one stream per distinct label and a document feeds a
 * stream through the section carrying that label, if it has one.
 *
 * `StreamPlan::resolve` hides that difference: it always yields one lookup
 * per stream key, empty when the document has nothing for that stream.
 */

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexSet;

use crate::corpus::{Corpus, Document, Section, SectionKind, SegmentId};
use crate::errors::CorpusError;

/// Name the anonymous stream answers to
pub const DEFAULT_STREAM_NAME: &str = "DEFAULT";

/// Segment id to text for one section
pub type SegmentLookup<'a> = BTreeMap<SegmentId, &'a str>;

/// Key of an output stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StreamKey {
    /// The single stream used when no labels are declared
    Anonymous,
    /// A translator or system name
    Named(String),
}

impl StreamKey {
    pub fn named(name: &str) -> Self {
        StreamKey::Named(name.to_string())
    }

    /// Label of the key, `None` for the anonymous stream
    pub fn label(&self) -> Option<&str> {
        match self {
            StreamKey::Anonymous => None,
            StreamKey::Named(name) => Some(name),
        }
    }

    /// Whether a user-supplied name selects this stream
    pub fn matches(&self, name: &str) -> bool {
        match self {
            StreamKey::Anonymous => name == DEFAULT_STREAM_NAME,
            StreamKey::Named(own) => own == name,
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKey::Anonymous => write!(f, "{}", DEFAULT_STREAM_NAME),
            StreamKey::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Output streams of one section kind
#[derive(Debug, Clone)]
pub struct StreamPlan {
    kind: SectionKind,
    keys: Vec<StreamKey>,
}

impl StreamPlan {
    /// Work out the streams of `kind` over the whole corpus
    pub fn reconcile(corpus: &Corpus, kind: SectionKind) -> Self {
        let mut any_section = false;
        let mut labels = IndexSet::new();
        for section in corpus.sections(kind) {
            any_section = true;
            if let Some(label) = &section.label {
                labels.insert(label.clone());
            }
        }

        let keys = if !any_section {
            Vec::new()
        } else if labels.is_empty() {
            vec![StreamKey::Anonymous]
        } else {
            labels.into_iter().map(StreamKey::Named).collect()
        };

        StreamPlan { kind, keys }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn keys(&self) -> &[StreamKey] {
        &self.keys
    }

    /// No sections of this kind exist
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sections exist but none is labelled
    pub fn is_implicit(&self) -> bool {
        self.keys == [StreamKey::Anonymous]
    }

    /// One lookup per key, in key order, for `document`
    pub fn resolve<'a>(&self, document: &'a Document) -> Result<Vec<SegmentLookup<'a>>, CorpusError> {
        let sections = document.sections(self.kind);
        self.keys
            .iter()
            .map(|key| match section_for(sections, key) {
                Some(section) => section.segment_index(),
                None => Ok(SegmentLookup::new()),
            })
            .collect()
    }
}

fn section_for<'a>(sections: &'a [Section], key: &StreamKey) -> Option<&'a Section> {
    match key {
        StreamKey::Anonymous => sections.first(),
        StreamKey::Named(name) => sections
            .iter()
            .find(|section| section.label.as_deref() == Some(name.as_str())),
    }
}
