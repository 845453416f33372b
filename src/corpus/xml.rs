/*!
 * WMT XML reader and writer.
 *
 * The reader accepts a root element (usually `<dataset>`) holding
 * `<collection>` and/or `<doc>` elements at any depth. Sections are found
 * anywhere below their document and segments anywhere below their section,
 * so `<src><p><seg id="1">..</seg></p></src>` and `<hyp><seg id="1">..`
 * both work.
 *
 * The writer does not regenerate the tree from the model. It re-reads the
 * original XML and appends the sections the model gained since parsing, so
 * everything else in the input survives a wrap untouched.
 */

use xmlem::{display, Document as XmlDocument, Element, Node};

use super::model::{Corpus, Document, Section, SectionKind, Segment, SegmentId};
use crate::errors::CorpusError;

/// Parse a WMT XML string into a corpus
pub fn parse_corpus(xml: &str) -> Result<Corpus, CorpusError> {
    let tree = read_tree(xml)?;
    let root = tree.root();

    let mut corpus = Corpus::new(root.attribute(&tree, "id"));
    if root.name(&tree) == "doc" {
        corpus.add_document(parse_document(&tree, &root)?, None)?;
    } else {
        walk_corpus(&tree, &root, None, &mut corpus)?;
    }

    Ok(corpus)
}

/// Render `corpus` as XML, using `original_xml` (the text `corpus` was
/// parsed from) as the template.
///
/// Sections beyond those present in the template are appended to their
/// `<doc>` element.
pub fn render_wrapped(original_xml: &str, corpus: &Corpus) -> Result<String, CorpusError> {
    let mut tree = read_tree(original_xml)?;
    let root = tree.root();

    let mut elements = Vec::new();
    if root.name(&tree) == "doc" {
        elements.push(root);
    } else {
        collect_document_elements(&tree, &root, &mut elements);
    }

    if elements.len() != corpus.documents().len() {
        return Err(CorpusError::Structure(format!(
            "template has {} documents but the corpus has {}",
            elements.len(),
            corpus.documents().len()
        )));
    }

    for (element, document) in elements.into_iter().zip(corpus.documents()) {
        let mut existing_references = 0;
        let mut existing_hypotheses = 0;
        for (kind, _) in find_sections(&tree, &element) {
            match kind {
                SectionKind::Reference => existing_references += 1,
                SectionKind::Hypothesis => existing_hypotheses += 1,
                SectionKind::Source => {}
            }
        }

        let added = document
            .references
            .iter()
            .skip(existing_references)
            .chain(document.hypotheses.iter().skip(existing_hypotheses));
        for section in added {
            append_section(&mut tree, &element, section);
        }
    }

    // Segment text is payload; only element structure gets indented
    let config = display::Config::default_pretty().indent_text_nodes(false);
    Ok(tree.to_string_pretty_with_config(&config))
}

fn read_tree(xml: &str) -> Result<XmlDocument, CorpusError> {
    xml.parse::<XmlDocument>()
        .map_err(|e| CorpusError::Parse(e.to_string()))
}

fn walk_corpus(
    tree: &XmlDocument,
    element: &Element,
    collection: Option<usize>,
    corpus: &mut Corpus,
) -> Result<(), CorpusError> {
    for child in element.children(tree) {
        match child.name(tree) {
            "collection" => {
                let id = child.attribute(tree, "id").unwrap_or_default();
                let index = corpus.add_collection(id);
                walk_corpus(tree, &child, Some(index), corpus)?;
            }
            "doc" => {
                corpus.add_document(parse_document(tree, &child)?, collection)?;
            }
            _ => walk_corpus(tree, &child, collection, corpus)?,
        }
    }
    Ok(())
}

fn collect_document_elements(tree: &XmlDocument, element: &Element, out: &mut Vec<Element>) {
    for child in element.children(tree) {
        if child.name(tree) == "doc" {
            out.push(child);
        } else {
            collect_document_elements(tree, &child, out);
        }
    }
}

fn parse_document(tree: &XmlDocument, element: &Element) -> Result<Document, CorpusError> {
    let id = element.attribute(tree, "id").unwrap_or_default();

    let mut source = None;
    let mut references = Vec::new();
    let mut hypotheses = Vec::new();

    for (kind, section_element) in find_sections(tree, element) {
        let section = parse_section(tree, &section_element, kind)?;
        match kind {
            SectionKind::Source if source.is_some() => {
                return Err(CorpusError::Structure(format!(
                    "document {} has more than one source section",
                    id
                )));
            }
            SectionKind::Source => source = Some(section),
            SectionKind::Reference => references.push(section),
            SectionKind::Hypothesis => hypotheses.push(section),
        }
    }

    let source = source.ok_or_else(|| {
        CorpusError::Structure(format!("document {} has no source section", id))
    })?;

    let mut document = Document::new(id, source)?;
    document.origlang = element.attribute(tree, "origlang").map(str::to_string);
    document.domain = element.attribute(tree, "domain").map(str::to_string);
    document.testsuite = element.attribute(tree, "testsuite").map(str::to_string);
    document.references = references;
    document.hypotheses = hypotheses;

    Ok(document)
}

/// Section elements below `element`, outermost first, in document order
fn find_sections(tree: &XmlDocument, element: &Element) -> Vec<(SectionKind, Element)> {
    let mut found = Vec::new();
    for child in element.children(tree) {
        match SectionKind::from_tag(child.name(tree)) {
            Some(kind) => found.push((kind, child)),
            None => found.extend(find_sections(tree, &child)),
        }
    }
    found
}

fn parse_section(tree: &XmlDocument, element: &Element, kind: SectionKind) -> Result<Section, CorpusError> {
    let label = kind
        .label_attribute()
        .and_then(|name| element.attribute(tree, name))
        .filter(|label| !label.is_empty());

    let mut section = Section::new(kind, element.attribute(tree, "lang"), label);
    let mut paragraphs = 0;
    collect_segments(tree, element, None, &mut paragraphs, &mut section.segments)?;

    Ok(section)
}

fn collect_segments(
    tree: &XmlDocument,
    element: &Element,
    paragraph: Option<usize>,
    paragraphs: &mut usize,
    out: &mut Vec<Segment>,
) -> Result<(), CorpusError> {
    for child in element.children(tree) {
        match child.name(tree) {
            "seg" => {
                let raw_id = child.attribute(tree, "id").unwrap_or_default();
                let id: SegmentId = raw_id.trim().parse().map_err(|_| {
                    CorpusError::Parse(format!("segment id '{}' is not an integer", raw_id))
                })?;
                out.push(Segment {
                    id,
                    text: element_text(tree, &child),
                    paragraph,
                });
            }
            "p" => {
                let index = *paragraphs;
                *paragraphs += 1;
                collect_segments(tree, &child, Some(index), paragraphs, out)?;
            }
            _ => collect_segments(tree, &child, paragraph, paragraphs, out)?,
        }
    }
    Ok(())
}

fn element_text(tree: &XmlDocument, element: &Element) -> String {
    let mut text = String::new();
    for node in element.child_nodes(tree) {
        match node {
            Node::Text(text_node) => text.push_str(text_node.as_str(tree)),
            Node::CDataSection(cdata) => text.push_str(cdata.as_str(tree)),
            _ => {}
        }
    }
    text
}

fn append_section(tree: &mut XmlDocument, document: &Element, section: &Section) {
    let tag = section.kind.tag();
    let label = section.kind.label_attribute().zip(section.label.as_deref());
    let language = section.language.as_deref();

    let section_element = match (label, language) {
        (Some((name, value)), Some(lang)) => {
            document.append_new_element(tree, (tag, [(name, value), ("lang", lang)]))
        }
        (Some((name, value)), None) => document.append_new_element(tree, (tag, [(name, value)])),
        (None, Some(lang)) => document.append_new_element(tree, (tag, [("lang", lang)])),
        (None, None) => document.append_new_element(tree, (tag, [] as [(&str, &str); 0])),
    };

    for segment in &section.segments {
        let id = segment.id.to_string();
        let seg = section_element.append_new_element(tree, ("seg", [("id", id.as_str())]));
        if !segment.text.is_empty() {
            seg.append_text(tree, &segment.text);
        }
    }
}
