/*!
 * Tests for alignment observers
 */

use wmtformat::corpus::SectionKind;
use wmtformat::observer::{AlignmentEvent, AlignmentObserver, LogObserver, NullObserver, RecordingObserver};

fn emit_all(observer: &mut dyn AlignmentObserver) {
    observer.observe(AlignmentEvent::NoSections(SectionKind::Reference));
    observer.observe(AlignmentEvent::ImplicitStream(SectionKind::Hypothesis));
    observer.observe(AlignmentEvent::NonSequentialSource {
        document: "d1".to_string(),
    });
    observer.observe(AlignmentEvent::Extracted {
        documents: 1,
        sentences: 2,
        language: "en".to_string(),
    });
}

/// Test that the recording observer keeps events in order
#[test]
fn test_recording_observer_withEvents_shouldKeepOrder() {
    let mut observer = RecordingObserver::default();
    emit_all(&mut observer);

    assert_eq!(observer.events.len(), 4);
    assert_eq!(observer.events[0], AlignmentEvent::NoSections(SectionKind::Reference));
    assert!(matches!(observer.events[3], AlignmentEvent::Extracted { sentences: 2, .. }));
}

/// Test that the log and null observers accept every event
#[test]
fn test_log_and_null_observers_withEvents_shouldNotPanic() {
    emit_all(&mut LogObserver);
    emit_all(&mut NullObserver);
}
