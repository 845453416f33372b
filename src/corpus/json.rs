/*!
 * JSON projection of a corpus.
 *
 * Reshapes the tree into nested records: one record per document with its
 * source section and, when present, its reference sections. Segment text
 * is grouped into paragraphs.
 */

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{Corpus, Document, Section};

/// Root record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorpusRecord {
    pub id: Option<String>,
    pub docs: Vec<DocumentRecord>,
}

/// One `<doc>`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub origlang: Option<String>,
    pub src: SectionRecord,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<SectionRecord>>,
}

/// Source or reference section
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
    pub lang: Option<String>,
    pub paragraphs: Vec<Vec<String>>,
}

impl From<&Section> for SectionRecord {
    fn from(section: &Section) -> Self {
        let mut paragraphs: Vec<Vec<String>> = Vec::new();
        let mut current = None;

        for segment in &section.segments {
            // Segments outside any <p> share one paragraph
            let starts_new = paragraphs.is_empty() || segment.paragraph != current;
            if starts_new {
                paragraphs.push(Vec::new());
                current = segment.paragraph;
            }
            if let Some(paragraph) = paragraphs.last_mut() {
                paragraph.push(segment.text.clone());
            }
        }

        SectionRecord {
            translator: section.label.clone(),
            lang: section.language.clone(),
            paragraphs,
        }
    }
}

impl From<&Document> for DocumentRecord {
    fn from(document: &Document) -> Self {
        let references = if document.references.is_empty() {
            None
        } else {
            Some(document.references.iter().map(SectionRecord::from).collect())
        };

        DocumentRecord {
            id: document.id.clone(),
            origlang: document.origlang.clone(),
            src: SectionRecord::from(&document.source),
            references,
        }
    }
}

/// Project `corpus` into its record form
pub fn to_record(corpus: &Corpus) -> CorpusRecord {
    CorpusRecord {
        id: corpus.id.clone(),
        docs: corpus.documents().iter().map(DocumentRecord::from).collect(),
    }
}

/// Serialize `corpus` as JSON text
pub fn to_json_string(corpus: &Corpus, pretty: bool) -> Result<String> {
    let record = to_record(corpus);
    let json = if pretty {
        serde_json::to_string_pretty(&record)
    } else {
        serde_json::to_string(&record)
    };
    json.context("Failed to serialize corpus to JSON")
}
