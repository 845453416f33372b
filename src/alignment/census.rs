/*!
 * Language census.
 *
 * A corpus carries one source language and at most one reference and one
 * hypothesis language. The census collects the distinct `lang` values per
 * section kind over the whole corpus, an absent attribute counting as a
 * value of its own; `validate` turns them into either the resolved
 * languages or the first violation found.
 */

use indexmap::IndexSet;

use crate::corpus::{Corpus, SectionKind};
use crate::errors::CorpusError;

/// How a section without a `lang` attribute is named in errors
pub const UNDECLARED_LANGUAGE: &str = "none";

/// Distinct `lang` values per section kind, in first-seen order.
///
/// `None` stands for sections that declare no language.
#[derive(Debug, Clone, Default)]
pub struct LanguageCensus {
    source: IndexSet<Option<String>>,
    reference: IndexSet<Option<String>>,
    hypothesis: IndexSet<Option<String>>,
}

/// Languages of a validated corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLanguages {
    pub source: String,
    pub reference: Option<String>,
    pub hypothesis: Option<String>,
}

impl LanguageCensus {
    /// Scan every section of `corpus`, ignoring document filters
    pub fn collect(corpus: &Corpus) -> Self {
        let mut census = LanguageCensus::default();
        for kind in [SectionKind::Source, SectionKind::Reference, SectionKind::Hypothesis] {
            let languages = census.languages_mut(kind);
            for section in corpus.sections(kind) {
                languages.insert(section.language.clone());
            }
        }
        census
    }

    pub fn languages(&self, kind: SectionKind) -> &IndexSet<Option<String>> {
        match kind {
            SectionKind::Source => &self.source,
            SectionKind::Reference => &self.reference,
            SectionKind::Hypothesis => &self.hypothesis,
        }
    }

    fn languages_mut(&mut self, kind: SectionKind) -> &mut IndexSet<Option<String>> {
        match kind {
            SectionKind::Source => &mut self.source,
            SectionKind::Reference => &mut self.reference,
            SectionKind::Hypothesis => &mut self.hypothesis,
        }
    }

    /// The declared language of `kind`, when its sections agree on one
    pub fn declared(&self, kind: SectionKind) -> Option<&str> {
        let languages = self.languages(kind);
        if languages.len() == 1 {
            languages.first().and_then(|language| language.as_deref())
        } else {
            None
        }
    }

    /// Check the one-language-per-kind rule
    pub fn validate(&self) -> Result<CorpusLanguages, CorpusError> {
        let source = self
            .single(SectionKind::Source)?
            .ok_or(CorpusError::MissingLanguage)?;

        Ok(CorpusLanguages {
            source,
            reference: self.single(SectionKind::Reference)?,
            hypothesis: self.single(SectionKind::Hypothesis)?,
        })
    }

    fn single(&self, kind: SectionKind) -> Result<Option<String>, CorpusError> {
        let languages = self.languages(kind);
        if languages.len() > 1 {
            return Err(CorpusError::AmbiguousLanguage {
                kind,
                languages: languages
                    .iter()
                    .map(|language| language.as_deref().unwrap_or(UNDECLARED_LANGUAGE).to_string())
                    .collect(),
            });
        }
        Ok(languages.first().cloned().flatten())
    }
}
