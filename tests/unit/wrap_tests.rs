/*!
 * Tests for the wrap engine
 */

use wmtformat::alignment::{unwrap, wrap, StreamKey, UnwrapOptions};
use wmtformat::corpus::SectionKind;
use wmtformat::errors::CorpusError;
use wmtformat::observer::{AlignmentEvent, NullObserver, RecordingObserver};
use crate::common;

/// Test that lines are split over documents by source segment count
#[test]
fn test_wrap_withExactLineCount_shouldAddHypothesisPerDocument() {
    let corpus = common::source_only_corpus(&[2, 3]);
    let lines = ["h1", "h2", "h3", "h4", "h5"];
    let mut observer = RecordingObserver::default();

    let wrapped = wrap(corpus, lines, "de", "my-system", &mut observer).unwrap();

    let first = &wrapped.documents()[0].hypotheses;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].kind, SectionKind::Hypothesis);
    assert_eq!(first[0].label.as_deref(), Some("my-system"));
    assert_eq!(first[0].language.as_deref(), Some("de"));
    let texts: Vec<_> = first[0].segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["h1", "h2"]);

    let second = &wrapped.documents()[1].hypotheses[0];
    let ids: Vec<_> = second.segments.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(second.segments[0].text, "h3");

    assert_eq!(
        observer.events,
        vec![AlignmentEvent::Wrapped {
            documents: 2,
            segments: 5,
            system: "my-system".to_string(),
        }]
    );
}

/// Test that surrounding whitespace is stripped from each line
#[test]
fn test_wrap_withPaddedLines_shouldTrimText() {
    let corpus = common::source_only_corpus(&[2]);
    let lines = vec!["  padded \r".to_string(), "\tplain".to_string()];

    let wrapped = wrap(corpus, &lines, "de", "MT", &mut NullObserver).unwrap();

    let section = &wrapped.documents()[0].hypotheses[0];
    assert_eq!(section.segments[0].text, "padded");
    assert_eq!(section.segments[1].text, "plain");
}

/// Test that a short stream fails with an underflow naming the document
#[test]
fn test_wrap_withTooFewLines_shouldFailWithUnderflow() {
    let corpus = common::source_only_corpus(&[2, 3]);
    let result = wrap(corpus, ["a", "b", "c"], "de", "MT", &mut NullObserver);

    assert_eq!(
        result,
        Err(CorpusError::Underflow {
            document: "doc-2".to_string(),
            required: 5,
            available: 3,
        })
    );
}

/// Test that leftover lines fail with an overflow
#[test]
fn test_wrap_withTooManyLines_shouldFailWithOverflow() {
    let corpus = common::source_only_corpus(&[1, 1]);
    let result = wrap(corpus, ["a", "b", "c", "d"], "de", "MT", &mut NullObserver);
    assert_eq!(result, Err(CorpusError::Overflow { remaining: 2 }));
}

/// Test that a document without source segments receives an empty hypothesis section
#[test]
fn test_wrap_withEmptyDocument_shouldAttachEmptySection() {
    let corpus = common::source_only_corpus(&[1, 0, 1]);
    let wrapped = wrap(corpus, ["a", "b"], "de", "MT", &mut NullObserver).unwrap();

    assert!(wrapped.documents()[1].hypotheses[0].is_empty());
    assert_eq!(wrapped.documents()[2].hypotheses[0].segments[0].text, "b");
}

/// Test that non-sequential source ids are reported
#[test]
fn test_wrap_withNonSequentialSource_shouldReportDocument() {
    let corpus = common::corpus(vec![common::document(
        "gappy",
        common::section(SectionKind::Source, Some("en"), None, "s", &[1, 3]),
        vec![],
    )]);
    let mut observer = RecordingObserver::default();

    wrap(corpus, ["a", "b"], "de", "MT", &mut observer).unwrap();

    assert_eq!(
        observer.events[0],
        AlignmentEvent::NonSequentialSource {
            document: "gappy".to_string()
        }
    );
}

/// Test that wrapping the unwrapped source and unwrapping again reproduces it
#[test]
fn test_wrap_thenUnwrap_shouldReproduceSourceLines() {
    let corpus = common::source_only_corpus(&[3, 1, 2]);
    let source = unwrap(&corpus, &UnwrapOptions::default(), &mut NullObserver)
        .unwrap()
        .source;

    let wrapped = wrap(corpus, &source, "de", "echo", &mut NullObserver).unwrap();
    let unwrapped = unwrap(&wrapped, &UnwrapOptions::default(), &mut NullObserver).unwrap();

    assert_eq!(unwrapped.hypotheses[&StreamKey::named("echo")], source);
    assert_eq!(unwrapped.hypothesis_language.as_deref(), Some("de"));
}
