//! Event contract tests for the scripted engine

use mantra_core::Language;
use mantra_voice::{EngineEvent, EngineFailure, ScriptedEngine, SpeechEngine, Utterance};

fn utterance(id: u64, text: &str) -> Utterance {
    Utterance {
        id,
        text: text.to_string(),
        voice: None,
        language: Language::English,
        rate: 150,
        pitch: 0.0,
        volume: 0.8,
    }
}

#[test]
fn test_speak_then_complete_emits_started_and_ended() {
    tokio_test::block_on(async {
        let engine = ScriptedEngine::new();
        let mut rx = engine.subscribe();

        engine.speak(utterance(7, "hello")).unwrap();
        assert_eq!(rx.recv().await.unwrap(), EngineEvent::Started { utterance: 7 });
        assert!(engine.is_speaking());

        engine.complete_current();
        assert_eq!(rx.recv().await.unwrap(), EngineEvent::Ended { utterance: 7 });
        assert!(!engine.is_speaking());
    });
}

#[test]
fn test_cancel_reports_interrupted() {
    tokio_test::block_on(async {
        let engine = ScriptedEngine::new();
        let mut rx = engine.subscribe();

        engine.speak(utterance(3, "cut short")).unwrap();
        let _ = rx.recv().await.unwrap();

        engine.cancel();
        assert_eq!(
            rx.recv().await.unwrap(),
            EngineEvent::Failed {
                utterance: 3,
                failure: EngineFailure::Interrupted,
            }
        );
        assert!(!engine.is_speaking());
    });
}

#[test]
fn test_cancel_without_utterance_is_silent() {
    let engine = ScriptedEngine::new();
    let mut rx = engine.subscribe();
    engine.cancel();
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_pause_suspends_is_speaking() {
    let engine = ScriptedEngine::new();
    engine.speak(utterance(1, "paused soon")).unwrap();
    engine.pause();
    assert!(!engine.is_speaking());
    engine.resume();
    assert!(engine.is_speaking());
}

#[test]
fn test_fail_current_reports_fatal() {
    tokio_test::block_on(async {
        let engine = ScriptedEngine::new();
        let mut rx = engine.subscribe();

        engine.speak(utterance(9, "doomed")).unwrap();
        let _ = rx.recv().await.unwrap();

        engine.fail_current("backend exploded");
        match rx.recv().await.unwrap() {
            EngineEvent::Failed {
                utterance: 9,
                failure: EngineFailure::Fatal(message),
            } => assert_eq!(message, "backend exploded"),
            other => panic!("expected fatal failure, got {:?}", other),
        }
    });
}

#[test]
fn test_voices_reported_as_configured() {
    let engine = ScriptedEngine::new().with_voices(vec![
        "en-US".to_string(),
        "es-ES".to_string(),
    ]);
    assert_eq!(engine.voices(), vec!["en-US", "es-ES"]);
}
