mod common;

use common::{EYE_SQUINT, feed, neutral, orchestrator};
use facekeys::error::{FrameError, Side};
use facekeys::keys::{Chord, Key, Modifier};
use facekeys::orchestrator::FrameOutcome;

fn chord_names(chords: &[Chord]) -> Vec<String> {
    chords.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_triple_scrunch_presses_enter_once() {
    let (mut orch, log) = orchestrator();
    let scrunch = neutral().scrunch();
    feed(
        &mut orch,
        &[scrunch.clone(), neutral(), scrunch.clone(), neutral(), scrunch],
    );
    assert_eq!(log.chords(), vec![Chord::key(Key::Enter)]);
    assert_eq!(orch.state().mouth.scrunch_count, 0);

    // settling afterwards adds nothing
    feed(&mut orch, &vec![neutral(); 10]);
    assert_eq!(log.chords().len(), 1);
}

#[test]
fn test_double_scrunch_presses_space_after_pause() {
    let (mut orch, log) = orchestrator();
    let scrunch = neutral().scrunch();
    feed(&mut orch, &[scrunch.clone(), neutral(), scrunch]);
    assert!(log.chords().is_empty());

    feed(&mut orch, &vec![neutral(); 7]);
    assert_eq!(log.chords(), vec![Chord::key(Key::Space)]);
}

#[test]
fn test_left_then_right_wink_cancels_pending_code() {
    let (mut orch, log) = orchestrator();
    feed(&mut orch, &[neutral().open_mouth(), neutral()]);
    assert_eq!(orch.morse_buffer(), ".");

    feed(&mut orch, &[neutral().wink_left(), neutral().wink_right()]);
    assert_eq!(orch.morse_buffer(), "");
    assert_eq!(log.chords(), vec![Chord::key(Key::Escape)]);

    // nothing is left to flush
    feed(&mut orch, &[neutral().scrunch()]);
    assert_eq!(log.chords(), vec![Chord::key(Key::Escape)]);
}

#[test]
fn test_right_then_left_wink_cancels_without_escape() {
    let (mut orch, log) = orchestrator();
    feed(&mut orch, &[neutral().open_mouth(), neutral()]);
    feed(&mut orch, &[neutral().wink_right(), neutral(), neutral().wink_left()]);
    assert_eq!(orch.morse_buffer(), "");
    assert!(log.chords().is_empty());
}

#[test]
fn test_double_brow_raise_repeats_last_chord() {
    let (mut orch, log) = orchestrator();
    feed(
        &mut orch,
        &[neutral().open_mouth(), neutral(), neutral().scrunch().wink_right()],
    );
    let typed = Chord::new(&[Modifier::Shift], Key::Char('e'));
    assert_eq!(log.chords(), vec![typed.clone()]);

    let outcomes = feed(
        &mut orch,
        &[neutral().raised_brows(), neutral(), neutral().raised_brows()],
    );
    assert_eq!(
        outcomes[2],
        FrameOutcome::Processed {
            dispatched: vec![typed.clone()]
        }
    );
    assert_eq!(log.chords(), vec![typed.clone(), typed]);
    assert_eq!(orch.state().brows.raise_count, 0);
}

#[test]
fn test_raised_brows_hold_control() {
    let (mut orch, _log) = orchestrator();
    feed(&mut orch, &[neutral().raised_brows()]);
    assert!(orch.modifiers().control);
    feed(&mut orch, &[neutral()]);
    assert!(!orch.modifiers().control);
}

#[test]
fn test_one_sided_brow_scrolls_or_moves_caret() {
    let (mut orch, log) = orchestrator();
    feed(&mut orch, &[neutral().brows(0.04, 0.04), neutral().brows(0.08, 0.04)]);
    assert_eq!(chord_names(&log.chords()), vec!["up arrow", "down arrow"]);

    log.clear();
    feed(
        &mut orch,
        &[
            neutral().pursed().brows(0.04, 0.04),
            neutral().pursed().brows(0.08, 0.04),
        ],
    );
    assert_eq!(chord_names(&log.chords()), vec!["left arrow", "right arrow"]);
}

#[test]
fn test_duckface_double_blink_is_backspace() {
    let (mut orch, log) = orchestrator();
    let pursed = neutral().pursed();
    feed(
        &mut orch,
        &[pursed.clone(), pursed.clone().blink(), pursed.clone(), pursed.blink()],
    );
    assert_eq!(log.chords(), vec![Chord::key(Key::Backspace)]);
}

#[test]
fn test_held_squint_zooms_out() {
    let (mut orch, log) = orchestrator();
    feed(&mut orch, &vec![neutral().eyes(EYE_SQUINT, EYE_SQUINT); 7]);
    assert_eq!(chord_names(&log.chords()), vec!["command+-"]);
}

#[test]
fn test_head_turn_changes_nothing() {
    let (mut orch, log) = orchestrator();
    feed(&mut orch, &[neutral().open_mouth(), neutral().wink_left().open_mouth()]);
    let state = orch.state().clone();
    let modifiers = orch.modifiers();
    let buffer = orch.morse_buffer().to_string();

    let outcomes = feed(&mut orch, &[neutral().turned_head().blink().scrunch()]);
    assert_eq!(
        outcomes,
        vec![FrameOutcome::Skipped(FrameError::HeadTurned(Side::Right))]
    );
    assert_eq!(orch.state(), &state);
    assert_eq!(orch.modifiers(), modifiers);
    assert_eq!(orch.morse_buffer(), buffer);
    assert!(log.chords().is_empty());
    assert_eq!(orch.stats().head_turned, 1);
}

#[test]
fn test_missing_face_changes_nothing() {
    let (mut orch, _log) = orchestrator();
    feed(&mut orch, &[neutral().open_mouth()]);
    let state = orch.state().clone();
    assert_eq!(orch.process(None), FrameOutcome::Skipped(FrameError::NoFaceDetected));
    assert_eq!(orch.state(), &state);
}
