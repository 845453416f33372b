/*!
 * Wrap engine: flat hypothesis lines to a corpus.
 *
 * Lines are consumed positionally. Each document takes as many lines as its
 * source section has segments, and receives them as a new hypothesis
 * section numbered 1..N. The line count must match the total number of
 * source segments exactly.
 */

use crate::corpus::{Corpus, SectionKind};
use crate::errors::CorpusError;
use crate::observer::{AlignmentEvent, AlignmentObserver};

/// Add a hypothesis section from `lines` to every document of `corpus`.
///
/// Nothing is attached unless the whole stream fits, so on error the
/// corpus is dropped unchanged.
pub fn wrap<I, S>(
    corpus: Corpus,
    lines: I,
    language: &str,
    system: &str,
    observer: &mut dyn AlignmentObserver,
) -> Result<Corpus, CorpusError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let mut chunks = Vec::with_capacity(corpus.documents().len());
    let mut required = 0;
    let mut available = 0;

    for document in corpus.documents() {
        let wanted = document.source.len();
        required += wanted;

        let chunk: Vec<String> = lines
            .by_ref()
            .take(wanted)
            .map(|line| line.as_ref().trim().to_string())
            .collect();
        available += chunk.len();

        if chunk.len() < wanted {
            return Err(CorpusError::Underflow {
                document: document.id.clone(),
                required,
                available,
            });
        }
        chunks.push(chunk);
    }

    let remaining = lines.count();
    if remaining > 0 {
        return Err(CorpusError::Overflow { remaining });
    }

    for document in corpus.documents() {
        if !document.source.has_sequential_ids() {
            observer.observe(AlignmentEvent::NonSequentialSource {
                document: document.id.clone(),
            });
        }
    }

    let mut corpus = corpus;
    let documents = chunks.len();
    for (index, chunk) in chunks.into_iter().enumerate() {
        corpus.append_section(index, SectionKind::Hypothesis, Some(language), Some(system), chunk)?;
    }

    observer.observe(AlignmentEvent::Wrapped {
        documents,
        segments: available,
        system: system.to_string(),
    });

    Ok(corpus)
}
