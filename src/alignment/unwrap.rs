/*!
 * Unwrap engine: corpus to aligned text streams.
 *
 * Source segments drive the iteration. For every source segment, in
 * ascending id order, each reference and hypothesis stream receives the
 * segment with the same id from its section, or the missing-translation
 * placeholder.
 */

use indexmap::IndexMap;

use super::census::LanguageCensus;
use super::streams::{StreamKey, StreamPlan};
use crate::corpus::{Corpus, DocumentFilter, SectionKind};
use crate::errors::CorpusError;
use crate::observer::{AlignmentEvent, AlignmentObserver};

/// Placeholder written where a stream has no segment for a source id
pub const DEFAULT_MISSING_MESSAGE: &str = "NO TRANSLATION AVAILABLE";

/// How to unwrap a corpus
#[derive(Debug, Clone)]
pub struct UnwrapOptions {
    /// Text emitted for segments a stream does not cover
    pub missing_message: String,

    /// Emit an empty line on every stream between documents
    pub document_boundaries: bool,

    /// Which documents to extract
    pub filter: DocumentFilter,
}

impl Default for UnwrapOptions {
    fn default() -> Self {
        UnwrapOptions {
            missing_message: DEFAULT_MISSING_MESSAGE.to_string(),
            document_boundaries: false,
            filter: DocumentFilter::default(),
        }
    }
}

/// Aligned text streams extracted from a corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unwrapped {
    pub source_language: String,
    pub source: Vec<String>,

    /// Language of the reference sections, if they declare one
    pub reference_language: Option<String>,
    /// One stream per translator; empty when the corpus has no references
    pub references: IndexMap<StreamKey, Vec<String>>,

    /// Language of the hypothesis sections, if they declare one
    pub hypothesis_language: Option<String>,
    /// One stream per system; empty when the corpus has no hypotheses
    pub hypotheses: IndexMap<StreamKey, Vec<String>>,

    /// Documents retained by the filter
    pub documents: usize,
    /// Source segments emitted, boundary lines excluded
    pub sentences: usize,
}

impl Unwrapped {
    /// Pick the reference stream to write.
    ///
    /// With no name, the only stream is returned; several streams are an
    /// error. `Ok(None)` means the corpus has no references.
    pub fn select_reference(&self, translator: Option<&str>) -> Result<Option<&[String]>, CorpusError> {
        select_stream(&self.references, SectionKind::Reference, translator)
    }

    /// Pick the hypothesis stream to write, with the same rules as
    /// `select_reference`
    pub fn select_hypothesis(&self, system: Option<&str>) -> Result<Option<&[String]>, CorpusError> {
        select_stream(&self.hypotheses, SectionKind::Hypothesis, system)
    }
}

fn select_stream<'a>(
    streams: &'a IndexMap<StreamKey, Vec<String>>,
    kind: SectionKind,
    name: Option<&str>,
) -> Result<Option<&'a [String]>, CorpusError> {
    match name {
        Some(name) => streams
            .iter()
            .find(|(key, _)| key.matches(name))
            .map(|(_, lines)| Some(lines.as_slice()))
            .ok_or_else(|| CorpusError::UnknownStream {
                kind,
                name: name.to_string(),
            }),
        None if streams.len() > 1 => Err(CorpusError::AmbiguousStream {
            kind,
            candidates: streams.keys().map(StreamKey::to_string).collect(),
        }),
        None => Ok(streams.values().next().map(Vec::as_slice)),
    }
}

/// Extract aligned streams from `corpus`.
///
/// Fails before producing anything if the language rules are violated or a
/// section repeats a segment id.
pub fn unwrap(
    corpus: &Corpus,
    options: &UnwrapOptions,
    observer: &mut dyn AlignmentObserver,
) -> Result<Unwrapped, CorpusError> {
    let languages = LanguageCensus::collect(corpus).validate()?;

    let reference_plan = StreamPlan::reconcile(corpus, SectionKind::Reference);
    let hypothesis_plan = StreamPlan::reconcile(corpus, SectionKind::Hypothesis);
    for plan in [&reference_plan, &hypothesis_plan] {
        if plan.is_empty() {
            observer.observe(AlignmentEvent::NoSections(plan.kind()));
        } else if plan.is_implicit() {
            observer.observe(AlignmentEvent::ImplicitStream(plan.kind()));
        }
    }

    let missing = options.missing_message.as_str();
    let mut source = Vec::new();
    let mut references = vec![Vec::new(); reference_plan.keys().len()];
    let mut hypotheses = vec![Vec::new(); hypothesis_plan.keys().len()];
    let mut documents = 0;
    let mut sentences = 0;

    for document in corpus.retained_documents(&options.filter) {
        if options.document_boundaries && documents > 0 {
            source.push(String::new());
            for stream in references.iter_mut().chain(hypotheses.iter_mut()) {
                stream.push(String::new());
            }
        }
        documents += 1;

        let source_index = document.source.segment_index()?;
        let reference_lookups = reference_plan.resolve(document)?;
        let hypothesis_lookups = hypothesis_plan.resolve(document)?;

        for (id, text) in &source_index {
            source.push(text.to_string());
            sentences += 1;

            let aligned = references
                .iter_mut()
                .zip(&reference_lookups)
                .chain(hypotheses.iter_mut().zip(&hypothesis_lookups));
            for (stream, lookup) in aligned {
                stream.push(lookup.get(id).copied().unwrap_or(missing).to_string());
            }
        }
    }

    observer.observe(AlignmentEvent::Extracted {
        documents,
        sentences,
        language: languages.source.clone(),
    });

    Ok(Unwrapped {
        source_language: languages.source,
        source,
        reference_language: languages.reference,
        references: reference_plan.keys().iter().cloned().zip(references).collect(),
        hypothesis_language: languages.hypothesis,
        hypotheses: hypothesis_plan.keys().iter().cloned().zip(hypotheses).collect(),
        documents,
        sentences,
    })
}
