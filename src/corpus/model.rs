/*!
 * In-memory corpus tree.
 *
 * A corpus is an ordered list of documents, optionally grouped into
 * collections. Each document owns one source section and any number of
 * reference and hypothesis sections; each section owns its segments.
 */

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::CorpusError;

/// Segment identifier, unique within its section
pub type SegmentId = i64;

/// Kind of a section inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// The `<src>` section, exactly one per document
    Source,
    /// A `<ref>` section, optionally tagged with a translator
    Reference,
    /// A `<hyp>` section, tagged with a system
    Hypothesis,
}

impl SectionKind {
    /// Element name used by the XML format
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Source => "src",
            Self::Reference => "ref",
            Self::Hypothesis => "hyp",
        }
    }

    /// Parse an element name into a section kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "src" => Some(Self::Source),
            "ref" => Some(Self::Reference),
            "hyp" => Some(Self::Hypothesis),
            _ => None,
        }
    }

    /// Name of the attribute that labels a section of this kind
    pub fn label_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Source => None,
            Self::Reference => Some("translator"),
            Self::Hypothesis => Some("system"),
        }
    }

    /// What a stream of this kind is keyed by
    pub fn stream_noun(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Reference => "translator",
            Self::Hypothesis => "system",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Reference => write!(f, "reference"),
            Self::Hypothesis => write!(f, "hypothesis"),
        }
    }
}

/// Single sentence of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Integer id from the `id` attribute
    pub id: SegmentId,

    /// Text payload, empty when the segment has no text
    pub text: String,

    /// Index of the enclosing `<p>` within the section, if any
    pub paragraph: Option<usize>,
}

impl Segment {
    pub fn new(id: SegmentId, text: impl Into<String>) -> Self {
        Segment {
            id,
            text: text.into(),
            paragraph: None,
        }
    }

    /// Segment that belongs to paragraph `paragraph` of its section
    pub fn in_paragraph(id: SegmentId, text: impl Into<String>, paragraph: usize) -> Self {
        Segment {
            id,
            text: text.into(),
            paragraph: Some(paragraph),
        }
    }
}

/// Source, reference or hypothesis block of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,

    /// Language tag from the `lang` attribute
    pub language: Option<String>,

    /// Translator (references) or system (hypotheses)
    pub label: Option<String>,

    /// Segments in document order
    pub segments: Vec<Segment>,
}

impl Section {
    pub fn new(kind: SectionKind, language: Option<&str>, label: Option<&str>) -> Self {
        Section {
            kind,
            language: language.map(str::to_string),
            label: label.map(str::to_string),
            segments: Vec::new(),
        }
    }

    /// Builder-style helper that appends a segment
    pub fn with_segment(mut self, id: SegmentId, text: &str) -> Self {
        self.segments.push(Segment::new(id, text));
        self
    }

    /// Number of segments in document order
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Mapping from segment id to text, ordered by id.
    ///
    /// Fails when two segments share an id.
    pub fn segment_index(&self) -> Result<BTreeMap<SegmentId, &str>, CorpusError> {
        let mut index = BTreeMap::new();
        for segment in &self.segments {
            if index.insert(segment.id, segment.text.as_str()).is_some() {
                return Err(CorpusError::Structure(format!(
                    "duplicate segment id {} in {} section",
                    segment.id, self.kind
                )));
            }
        }
        Ok(index)
    }

    /// True when the ids are exactly 1..=N in document order
    pub fn has_sequential_ids(&self) -> bool {
        self.segments
            .iter()
            .enumerate()
            .all(|(position, segment)| segment.id == position as SegmentId + 1)
    }
}

/// A `<collection>` grouping of documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
}

/// A `<doc>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,

    /// Original language of the document, if declared
    pub origlang: Option<String>,

    /// Domain attribute, if declared
    pub domain: Option<String>,

    /// Value of the `testsuite` attribute; its presence marks a test suite
    pub testsuite: Option<String>,

    /// Index into `Corpus::collections` of the enclosing collection
    pub collection: Option<usize>,

    pub source: Section,
    pub references: Vec<Section>,
    pub hypotheses: Vec<Section>,
}

impl Document {
    /// Create a document from its source section.
    ///
    /// Fails if `source` is not a source section.
    pub fn new(id: &str, source: Section) -> Result<Self, CorpusError> {
        if source.kind != SectionKind::Source {
            return Err(CorpusError::Structure(format!(
                "document {} was given a {} section as its source",
                id, source.kind
            )));
        }

        Ok(Document {
            id: id.to_string(),
            origlang: None,
            domain: None,
            testsuite: None,
            collection: None,
            source,
            references: Vec::new(),
            hypotheses: Vec::new(),
        })
    }

    pub fn is_testsuite(&self) -> bool {
        self.testsuite.is_some()
    }

    /// Sections of one kind, in document order
    pub fn sections(&self, kind: SectionKind) -> &[Section] {
        match kind {
            SectionKind::Source => std::slice::from_ref(&self.source),
            SectionKind::Reference => &self.references,
            SectionKind::Hypothesis => &self.hypotheses,
        }
    }

    /// Attach a reference or hypothesis section
    pub fn push_section(&mut self, section: Section) -> Result<(), CorpusError> {
        match section.kind {
            SectionKind::Source => {
                return Err(CorpusError::Structure(format!(
                    "document {} already has a source section",
                    self.id
                )));
            }
            SectionKind::Reference => self.references.push(section),
            SectionKind::Hypothesis => self.hypotheses.push(section),
        }
        Ok(())
    }
}

/// Which documents take part in an alignment pass
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Skip documents carrying the `testsuite` marker
    pub exclude_test_suites: bool,

    /// Keep only documents inside these collections; empty keeps all
    pub collections: Vec<String>,
}

impl DocumentFilter {
    pub fn new(exclude_test_suites: bool, collections: Vec<String>) -> Self {
        DocumentFilter {
            exclude_test_suites,
            collections,
        }
    }
}

/// Full corpus held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Id of the root element, if any
    pub id: Option<String>,

    pub collections: Vec<Collection>,

    /// Documents in corpus order
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(id: Option<&str>) -> Self {
        Corpus {
            id: id.map(str::to_string),
            collections: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Register a collection and return its index
    pub fn add_collection(&mut self, id: &str) -> usize {
        self.collections.push(Collection { id: id.to_string() });
        self.collections.len() - 1
    }

    /// Append a document, optionally inside the collection at `collection`
    pub fn add_document(&mut self, mut document: Document, collection: Option<usize>) -> Result<usize, CorpusError> {
        if let Some(index) = collection {
            if index >= self.collections.len() {
                return Err(CorpusError::Structure(format!(
                    "document {} refers to unknown collection #{}",
                    document.id, index
                )));
            }
        }
        document.collection = collection;
        self.documents.push(document);
        Ok(self.documents.len() - 1)
    }

    /// Id of the collection enclosing `document`
    pub fn collection_of(&self, document: &Document) -> Option<&str> {
        document
            .collection
            .and_then(|index| self.collections.get(index))
            .map(|collection| collection.id.as_str())
    }

    /// Documents that pass `filter`, in corpus order
    pub fn retained_documents<'a>(&'a self, filter: &'a DocumentFilter) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents.iter().filter(move |document| {
            if filter.exclude_test_suites && document.is_testsuite() {
                return false;
            }
            if filter.collections.is_empty() {
                return true;
            }
            match self.collection_of(document) {
                Some(id) => filter.collections.iter().any(|wanted| wanted == id),
                None => false,
            }
        })
    }

    /// All sections of one kind across the corpus, in corpus order
    pub fn sections(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.documents
            .iter()
            .flat_map(move |document| document.sections(kind).iter())
    }

    /// Total number of source segments across all documents
    pub fn source_segment_count(&self) -> usize {
        self.documents.iter().map(|document| document.source.len()).sum()
    }

    /// Attach a new section built from `texts` to the document at `document`.
    ///
    /// Segments are numbered from 1 in the order given.
    pub fn append_section<I, S>(
        &mut self,
        document: usize,
        kind: SectionKind,
        language: Option<&str>,
        label: Option<&str>,
        texts: I,
    ) -> Result<(), CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let count = self.documents.len();
        let target = self.documents.get_mut(document).ok_or_else(|| {
            CorpusError::Structure(format!(
                "document #{} does not exist (corpus has {} documents)",
                document, count
            ))
        })?;

        let mut section = Section::new(kind, language, label);
        section.segments = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| Segment::new(position as SegmentId + 1, text))
            .collect();

        target.push_section(section)
    }
}
