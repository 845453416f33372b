use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::alignment::{self, LanguageCensus, Unwrapped};
use crate::app_config::Config;
use crate::corpus::{json, xml, SectionKind};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::observer::LogObserver;

// @module: Application controller for corpus wrapping and unwrapping

/// What to extract in an unwrap run
#[derive(Debug, Clone, Default)]
pub struct UnwrapRequest {
    /// Corpus file; standard input when absent
    pub input: Option<PathBuf>,

    /// Translator whose references are written
    pub translator: Option<String>,

    /// System whose output is written
    pub system: Option<String>,

    /// Write every system instead of requiring a selection
    pub all_systems: bool,

    /// Collection allow-list; empty keeps every document
    pub collections: Vec<String>,
}

/// Files produced by an unwrap run
#[derive(Debug, Clone)]
pub struct UnwrapReport {
    pub written: Vec<PathBuf>,
    pub documents: usize,
    pub sentences: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and unwrap a corpus held in memory
    pub fn unwrap_corpus(&self, corpus_xml: &str, collections: Vec<String>) -> Result<Unwrapped> {
        let corpus = xml::parse_corpus(corpus_xml)?;
        let options = self.config.unwrap_options(collections);
        let unwrapped = alignment::unwrap(&corpus, &options, &mut LogObserver)?;
        Ok(unwrapped)
    }

    /// Unwrap a corpus file into one text file per stream
    pub fn run_unwrap(&self, request: &UnwrapRequest) -> Result<UnwrapReport> {
        let content = FileManager::read_input(request.input.as_deref())?;
        let unwrapped = self.unwrap_corpus(&content, request.collections.clone())?;
        let stem = self.config.output_stem.as_str();

        // Resolve every selection before writing anything
        let references = unwrapped.select_reference(request.translator.as_deref())?;
        match (&request.translator, references) {
            (Some(translator), Some(_)) => info!("Selecting references from translator {}", translator),
            (None, Some(_)) => info!("Selecting the only translation"),
            _ => {}
        }
        let hypotheses = self.selected_hypotheses(&unwrapped, request)?;

        let mut written = Vec::new();

        let source_path = FileManager::stream_output_path(stem, None, Some(unwrapped.source_language.as_str()));
        info!(
            "Extracting {} sentences to {}",
            language_utils::describe_language(&unwrapped.source_language),
            source_path.display()
        );
        FileManager::write_lines(&source_path, &unwrapped.source[..])?;
        written.push(source_path);

        if let Some(lines) = references {
            let language = unwrapped.reference_language.as_deref();
            let path = FileManager::stream_output_path(stem, None, language);
            info!(
                "Extracting {} sentences to {}",
                language.map(language_utils::describe_language).unwrap_or_else(|| "reference".to_string()),
                path.display()
            );
            FileManager::write_lines(&path, lines)?;
            written.push(path);
        }

        for (system, lines) in hypotheses {
            let path = FileManager::stream_output_path(
                stem,
                Some(system.as_str()),
                unwrapped.hypothesis_language.as_deref(),
            );
            info!("Extracting output from '{}' to {}", system, path.display());
            FileManager::write_lines(&path, lines)?;
            written.push(path);
        }

        Ok(UnwrapReport {
            written,
            documents: unwrapped.documents,
            sentences: unwrapped.sentences,
        })
    }

    fn selected_hypotheses<'a>(&self, unwrapped: &'a Unwrapped, request: &UnwrapRequest) -> Result<Vec<(String, &'a [String])>> {
        if request.system.is_none() && request.all_systems {
            return Ok(unwrapped
                .hypotheses
                .iter()
                .map(|(key, lines)| (key.to_string(), lines.as_slice()))
                .collect());
        }

        let selected = unwrapped.select_hypothesis(request.system.as_deref())?;
        Ok(match selected {
            Some(lines) => {
                let name = match &request.system {
                    Some(system) => system.clone(),
                    None => unwrapped
                        .hypotheses
                        .keys()
                        .next()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                };
                vec![(name, lines)]
            }
            None => Vec::new(),
        })
    }

    /// Wrap hypothesis lines into a corpus held in memory and return the XML
    pub fn wrap_corpus(&self, source_xml: &str, lines: &[String], language: Option<&str>) -> Result<String> {
        let corpus = xml::parse_corpus(source_xml)?;
        let language = Self::resolve_target_language(&LanguageCensus::collect(&corpus), language)?;
        let system = self.config.system_name.as_str();

        let wrapped = alignment::wrap(corpus, lines, &language, system, &mut LogObserver)?;
        let rendered = xml::render_wrapped(source_xml, &wrapped)?;
        Ok(rendered)
    }

    /// Wrap a hypothesis file into a copy of the source corpus file
    pub fn run_wrap(&self, source_file: &Path, hypothesis_file: &Path, language: Option<&str>, output: Option<&Path>) -> Result<()> {
        let source_xml = FileManager::read_to_string(source_file)?;
        let lines = FileManager::read_lines(hypothesis_file)?;

        let rendered = self
            .wrap_corpus(&source_xml, &lines, language)
            .with_context(|| format!("Failed to wrap {:?} into {:?}", hypothesis_file, source_file))?;

        FileManager::write_output(output, &rendered)?;
        if let Some(path) = output {
            info!("Success: {}", path.display());
        }
        Ok(())
    }

    /// Convert a corpus file to its JSON projection
    pub fn run_to_json(&self, input: Option<&Path>, output: Option<&Path>, pretty: bool) -> Result<()> {
        let content = FileManager::read_input(input)?;
        let corpus = xml::parse_corpus(&content)?;
        let rendered = json::to_json_string(&corpus, pretty)?;
        FileManager::write_output(output, &rendered)?;
        Ok(())
    }

    /// Language for the new hypothesis sections.
    ///
    /// An explicit language wins; otherwise the corpus reference language is
    /// used when there is exactly one.
    fn resolve_target_language(census: &LanguageCensus, requested: Option<&str>) -> Result<String> {
        let reference = census.declared(SectionKind::Reference);
        match (requested, reference) {
            (Some(language), Some(reference)) => {
                if !language_utils::language_codes_match(language, reference) && language != reference {
                    warn!(
                        "Hypothesis language {} differs from the reference language {}",
                        language, reference
                    );
                }
                Ok(language.to_string())
            }
            (Some(language), None) => Ok(language.to_string()),
            (None, Some(reference)) => Ok(reference.to_string()),
            (None, None) => Err(anyhow!(
                "Cannot infer the hypothesis language from the corpus; pass it with --lang"
            )),
        }
    }
}
