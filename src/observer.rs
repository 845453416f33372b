/*!
 * Observation hooks for the alignment engines.
 *
 * The engines never log directly. They report what they decided and what
 * they counted through an `AlignmentObserver` supplied by the caller.
 */

use log::{info, warn};

use crate::corpus::SectionKind;

/// Something worth reporting during unwrap or wrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentEvent {
    /// The corpus has no sections of this kind
    NoSections(SectionKind),

    /// Sections of this kind exist but none is labelled; the first one
    /// of each document is used
    ImplicitStream(SectionKind),

    /// Unwrap finished
    Extracted {
        documents: usize,
        sentences: usize,
        language: String,
    },

    /// A source section whose ids are not 1..N in order was wrapped
    /// positionally
    NonSequentialSource { document: String },

    /// Wrap finished
    Wrapped {
        documents: usize,
        segments: usize,
        system: String,
    },
}

/// Receiver of alignment events
pub trait AlignmentObserver {
    fn observe(&mut self, event: AlignmentEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AlignmentObserver for LogObserver {
    fn observe(&mut self, event: AlignmentEvent) {
        match event {
            AlignmentEvent::NoSections(SectionKind::Reference) => info!("No references found"),
            AlignmentEvent::NoSections(kind) => info!("No {} sections found", kind),
            AlignmentEvent::ImplicitStream(kind) => info!(
                "No {} identifiers found -- reading first {} for each document",
                kind.stream_noun(),
                kind
            ),
            AlignmentEvent::Extracted {
                documents,
                sentences,
                language,
            } => info!(
                "Extracted {} document(s) containing {} sentences in {}",
                documents, sentences, language
            ),
            AlignmentEvent::NonSequentialSource { document } => warn!(
                "Source segment ids of document {} are not 1..N in order; hypothesis lines are assigned by position",
                document
            ),
            AlignmentEvent::Wrapped {
                documents,
                segments,
                system,
            } => info!(
                "Wrapped {} segment(s) from '{}' into {} document(s)",
                segments, system, documents
            ),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl AlignmentObserver for NullObserver {
    fn observe(&mut self, _event: AlignmentEvent) {}
}

/// Keeps every event, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<AlignmentEvent>,
}

impl AlignmentObserver for RecordingObserver {
    fn observe(&mut self, event: AlignmentEvent) {
        self.events.push(event);
    }
}
