/*!
 * Tests for the WMT XML reader and writer
 */

use anyhow::Result;
use wmtformat::corpus::{xml, SectionKind};
use wmtformat::errors::CorpusError;
use crate::common;

/// Test that a full test set is read with collections, attributes and segments
#[test]
fn test_parse_corpus_withNewstest_shouldReadTree() -> Result<()> {
    let corpus = xml::parse_corpus(&common::read_resource("newstest-src.xml")?)?;

    assert_eq!(corpus.id.as_deref(), Some("newstest2021"));
    assert_eq!(corpus.collections().len(), 1);
    assert_eq!(corpus.documents().len(), 2);

    let first = &corpus.documents()[0];
    assert_eq!(first.id, "news-1");
    assert_eq!(first.origlang.as_deref(), Some("en"));
    assert_eq!(first.domain.as_deref(), Some("news"));
    assert_eq!(corpus.collection_of(first), Some("general"));
    assert_eq!(first.source.language.as_deref(), Some("en"));
    assert_eq!(first.source.len(), 3);
    assert_eq!(first.source.segments[2].text, "Residents welcomed the decision.");
    assert_eq!(first.references.len(), 1);
    assert_eq!(first.references[0].label, None);
    assert!(first.hypotheses.is_empty());

    Ok(())
}

/// Test that translator and system attributes become section labels
#[test]
fn test_parse_corpus_withLabels_shouldKeepTranslatorsAndSystems() -> Result<()> {
    let corpus = xml::parse_corpus(&common::read_resource("systems.xml")?)?;
    let first = &corpus.documents()[0];
    let systems: Vec<_> = first.hypotheses.iter().map(|h| h.label.as_deref()).collect();
    assert_eq!(systems, vec![Some("Online A"), Some("team/run-2")]);

    let suite = &corpus.documents()[1];
    assert_eq!(suite.testsuite.as_deref(), Some("robustness"));
    assert!(suite.is_testsuite());

    let corpus = xml::parse_corpus(&common::read_resource("translators.xml")?)?;
    let translators: Vec<_> = corpus.documents()[0]
        .references
        .iter()
        .map(|r| r.label.as_deref())
        .collect();
    assert_eq!(translators, vec![Some("A"), Some("B")]);
    Ok(())
}

/// Test that segments directly under a section are accepted
#[test]
fn test_parse_corpus_withoutParagraphs_shouldReadSegments() -> Result<()> {
    let input = r#"<dataset><doc id="d"><src lang="en"><seg id="2">b</seg><seg id="1">a</seg></src></doc></dataset>"#;
    let corpus = xml::parse_corpus(input)?;
    let source = &corpus.documents()[0].source;
    assert_eq!(source.segments[0].id, 2);
    assert_eq!(source.segments[0].paragraph, None);
    assert_eq!(source.segments[1].text, "a");
    Ok(())
}

/// Test that a bare document root is a one-document corpus
#[test]
fn test_parse_corpus_withDocRoot_shouldReadSingleDocument() -> Result<()> {
    let input = r#"<doc id="only"><src lang="en"><seg id="1">a</seg></src></doc>"#;
    let corpus = xml::parse_corpus(input)?;
    assert_eq!(corpus.documents().len(), 1);
    assert_eq!(corpus.documents()[0].id, "only");
    Ok(())
}

/// Test that an empty segment has empty text
#[test]
fn test_parse_corpus_withEmptySegment_shouldHaveEmptyText() -> Result<()> {
    let input = r#"<dataset><doc id="d"><src lang="en"><seg id="1"/></src></doc></dataset>"#;
    let corpus = xml::parse_corpus(input)?;
    assert_eq!(corpus.documents()[0].source.segments[0].text, "");
    Ok(())
}

/// Test that CDATA content is part of the segment text
#[test]
fn test_parse_corpus_withCData_shouldKeepText() -> Result<()> {
    let input = r#"<dataset><doc id="d"><src lang="en"><seg id="1"><![CDATA[a < b]]></seg><seg id="2">x <![CDATA[& y]]></seg></src></doc></dataset>"#;
    let corpus = xml::parse_corpus(input)?;
    let source = &corpus.documents()[0].source;
    assert_eq!(source.segments[0].text, "a < b");
    assert_eq!(source.segments[1].text, "x & y");
    Ok(())
}

/// Test that two source sections in one document are rejected
#[test]
fn test_parse_corpus_withTwoSources_shouldFail() {
    let input = r#"<dataset><doc id="d"><src lang="en"><seg id="1">a</seg></src><src lang="en"><seg id="1">b</seg></src></doc></dataset>"#;
    assert!(matches!(xml::parse_corpus(input), Err(CorpusError::Structure(_))));
}

/// Test that malformed XML is a parse error
#[test]
fn test_parse_corpus_withMalformedXml_shouldFail() {
    assert!(matches!(
        xml::parse_corpus("<dataset><doc id=\"d\"></dataset>"),
        Err(CorpusError::Parse(_))
    ));
}

/// Test that rendering appends new hypothesis sections and keeps the rest
#[test]
fn test_render_wrapped_withNewHypothesis_shouldAppendSection() -> Result<()> {
    let original = common::read_resource("newstest-src.xml")?;
    let mut corpus = xml::parse_corpus(&original)?;
    corpus.append_section(0, SectionKind::Hypothesis, Some("de"), Some("my system"), ["h1", "h2", "h3"])?;
    corpus.append_section(1, SectionKind::Hypothesis, Some("de"), Some("my system"), ["h4", "h5"])?;

    let rendered = xml::render_wrapped(&original, &corpus)?;
    let reparsed = xml::parse_corpus(&rendered)?;

    assert_eq!(reparsed.documents().len(), 2);
    for (before, after) in corpus.documents().iter().zip(reparsed.documents()) {
        assert_eq!(before.source.segments.len(), after.source.segments.len());
        assert_eq!(after.references.len(), 1);
        assert_eq!(after.hypotheses.len(), 1);
        let hypothesis = &after.hypotheses[0];
        assert_eq!(hypothesis.label.as_deref(), Some("my system"));
        assert_eq!(hypothesis.language.as_deref(), Some("de"));
        let texts: Vec<_> = hypothesis.segments.iter().map(|s| s.text.clone()).collect();
        let expected: Vec<_> = before.hypotheses[0].segments.iter().map(|s| s.text.clone()).collect();
        assert_eq!(texts, expected);
    }
    assert_eq!(reparsed.documents()[1].hypotheses[0].segments[1].id, 2);
    Ok(())
}

/// Test that rendering an unchanged corpus adds nothing
#[test]
fn test_render_wrapped_withUnchangedCorpus_shouldKeepSections() -> Result<()> {
    let original = common::read_resource("systems.xml")?;
    let corpus = xml::parse_corpus(&original)?;
    let reparsed = xml::parse_corpus(&xml::render_wrapped(&original, &corpus)?)?;

    assert_eq!(reparsed.documents().len(), corpus.documents().len());
    for (before, after) in corpus.documents().iter().zip(reparsed.documents()) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.testsuite, after.testsuite);
        assert_eq!(before.references.len(), after.references.len());
        assert_eq!(before.hypotheses.len(), after.hypotheses.len());
        let ids = |document: &wmtformat::corpus::Document| -> Vec<i64> {
            document.source.segments.iter().map(|s| s.id).collect()
        };
        assert_eq!(ids(before), ids(after));
    }
    Ok(())
}

/// Test that entities and surrounding whitespace survive a render exactly
#[test]
fn test_render_wrapped_withEntitiesAndSpaces_shouldKeepTextExactly() -> Result<()> {
    let original = r#"<dataset id="exact">
  <doc id="d1">
    <src lang="en">
      <p>
        <seg id="1">Tom &amp; Jerry &lt;3 &quot;hi&quot;</seg>
        <seg id="2">  spaced  </seg>
      </p>
    </src>
    <ref lang="de" translator="A">
      <p>
        <seg id="1">Tom &amp; Jerry</seg>
        <seg id="2"> Abstand </seg>
      </p>
    </ref>
  </doc>
</dataset>"#;
    let mut corpus = xml::parse_corpus(original)?;
    corpus.append_section(0, SectionKind::Hypothesis, Some("de"), Some("MT"), ["A & B <x>", "two \"quoted\""])?;

    let reparsed = xml::parse_corpus(&xml::render_wrapped(original, &corpus)?)?;
    let document = &reparsed.documents()[0];
    let texts = |section: &wmtformat::corpus::Section| -> Vec<String> {
        section.segments.iter().map(|s| s.text.clone()).collect()
    };

    assert_eq!(texts(&document.source), vec!["Tom & Jerry <3 \"hi\"", "  spaced  "]);
    assert_eq!(texts(&document.references[0]), vec!["Tom & Jerry", " Abstand "]);
    assert_eq!(texts(&document.hypotheses[0]), vec!["A & B <x>", "two \"quoted\""]);
    assert_eq!(reparsed.documents()[0].source, corpus.documents()[0].source);
    Ok(())
}
