//! Session integration tests.
//!
//! These tests drive a full `Memorama` session through the controller:
//! clicks, the reveal pause, judgments, and the win signal.

use memorama::interaction::{RecordingAnimator, RecordingPresenter};
use memorama::{
    CardId, CardIdentity, ClickOutcome, GameConfig, IgnoreReason, Judgement, MatchPhase, Memorama,
    MemoramaBuilder, SessionEvent,
};

type Session = Memorama<RecordingAnimator, RecordingPresenter>;

fn session(total_pairs: u32, seed: u64) -> Session {
    let mut game = MemoramaBuilder::new()
        .config(GameConfig::default().with_total_pairs(total_pairs))
        .build_with(seed, RecordingAnimator::new(), RecordingPresenter::new())
        .unwrap();
    game.place_all();
    game
}

fn card(pair: u32, counterpart: bool) -> CardId {
    CardId::for_card(pair, counterpart)
}

fn is_face_up(game: &Session, id: CardId) -> bool {
    game.state().card(id).unwrap().face_up
}

// =============================================================================
// Match / Mismatch
// =============================================================================

/// Two cards of the same pair stay up and count as found.
#[test]
fn test_match_scenario() {
    let mut game = session(6, 42);

    assert_eq!(game.click_card(card(2, false)), ClickOutcome::FirstFlipped(card(2, false)));
    assert_eq!(game.click_card(card(2, true)), ClickOutcome::SecondFlipped(card(2, true)));
    assert_eq!(game.state().pairs_found(), 0);

    let judgements = game.advance(1000);
    assert_eq!(judgements.len(), 1);
    assert!(matches!(judgements[0], Judgement::Matched { pair_index: 2, won: false, .. }));

    assert_eq!(game.state().pairs_found(), 1);
    assert!(is_face_up(&game, card(2, false)));
    assert!(is_face_up(&game, card(2, true)));
    assert!(game.state().pending().is_empty());
    assert_eq!(game.phase(), MatchPhase::Idle);
}

/// Two cards of different pairs turn back after the pause.
#[test]
fn test_mismatch_scenario() {
    let mut game = session(6, 42);

    game.click_card(card(0, false));
    game.click_card(card(4, true));
    game.advance(1000);

    assert_eq!(game.state().pairs_found(), 0);
    assert!(!is_face_up(&game, card(0, false)));
    assert!(!is_face_up(&game, card(4, true)));
    assert!(game.state().pending().is_empty());

    // Each card: one tween up, one tween back.
    assert_eq!(game.animator().for_card(card(0, false)).count(), 2);
    assert_eq!(game.animator().for_card(card(4, true)).count(), 2);
}

/// Cards flipped back can be clicked again in the next round.
#[test]
fn test_mismatched_cards_are_clickable_again() {
    let mut game = session(3, 1);

    game.click_card(card(0, false));
    game.click_card(card(1, false));
    game.advance(1000);

    assert_eq!(game.click_card(card(0, false)), ClickOutcome::FirstFlipped(card(0, false)));
    assert_eq!(game.click_card(card(0, true)), ClickOutcome::SecondFlipped(card(0, true)));
    game.advance(1000);
    assert_eq!(game.state().pairs_found(), 1);
}

// =============================================================================
// Reveal Pause
// =============================================================================

/// Nothing is judged before the reveal delay elapses.
#[test]
fn test_no_judgment_before_delay() {
    let mut game = session(6, 42);
    game.click_card(card(1, false));
    game.click_card(card(3, false));

    assert!(game.advance(999).is_empty());
    assert_eq!(game.phase(), MatchPhase::Evaluating);
    assert!(is_face_up(&game, card(1, false)));
    assert!(is_face_up(&game, card(3, false)));

    assert_eq!(game.advance(1).len(), 1);
    assert_eq!(game.phase(), MatchPhase::Idle);
}

/// The reveal delay comes from configuration.
#[test]
fn test_custom_reveal_delay() {
    let mut game = MemoramaBuilder::new()
        .config(GameConfig::default().with_reveal_delay_ms(250))
        .build(3)
        .unwrap();
    game.place_all();

    game.click_card(card(0, false));
    game.click_card(card(0, true));
    assert!(game.advance(249).is_empty());
    assert_eq!(game.advance(1).len(), 1);
}

/// Judgment fires once even if the clock jumps far ahead.
#[test]
fn test_judgment_fires_once() {
    let mut game = session(6, 42);
    game.click_card(card(0, false));
    game.click_card(card(1, false));

    assert_eq!(game.advance(60_000).len(), 1);
    assert!(game.advance(60_000).is_empty());
}

// =============================================================================
// Ignored Clicks
// =============================================================================

/// A third click while two cards await judgment changes nothing.
#[test]
fn test_third_click_has_no_effect() {
    let mut game = session(6, 42);
    game.click_card(card(0, false));
    game.click_card(card(1, false));
    let flips_before = game.animator().commands.len();

    let outcome = game.click_card(card(2, false));
    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::EvaluationPending));
    assert_eq!(game.state().pending(), &[card(0, false), card(1, false)]);
    assert_eq!(game.state().pairs_found(), 0);
    assert!(!is_face_up(&game, card(2, false)));
    assert_eq!(game.animator().commands.len(), flips_before);

    // Still exactly one judgment.
    assert_eq!(game.advance(1000).len(), 1);
}

/// Clicking a face-up card changes nothing.
#[test]
fn test_face_up_click_has_no_effect() {
    let mut game = session(6, 42);
    game.click_card(card(5, true));

    let outcome = game.click_card(card(5, true));
    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp));
    assert_eq!(game.state().pending(), &[card(5, true)]);
    assert!(is_face_up(&game, card(5, true)));
    assert_eq!(game.animator().commands.len(), 1);
}

/// Ignored clicks still land in the history.
#[test]
fn test_ignored_clicks_are_recorded() {
    let mut game = session(2, 9);
    game.click_card(card(0, false));
    game.click_card(card(0, false));

    let history = game.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].outcome, ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp));
}

// =============================================================================
// Win Condition
// =============================================================================

/// Matching all six pairs wins exactly once, on the sixth match.
#[test]
fn test_full_game_wins_once() {
    let mut game = session(6, 42);

    for pair in 0..6 {
        game.click_card(card(pair, false));
        game.click_card(card(pair, true));
        game.advance(1000);

        if pair < 5 {
            assert!(game.presenter().wins.is_empty(), "won early at pair {pair}");
            assert!(!game.is_won());
        }
    }

    assert_eq!(game.state().pairs_found(), 6);
    assert!(game.is_won());
    assert_eq!(game.phase(), MatchPhase::Won);
    assert_eq!(game.presenter().wins, vec![6]);

    let won_events = game
        .events()
        .iter()
        .filter(|e| matches!(e, SessionEvent::Won { .. }))
        .count();
    assert_eq!(won_events, 1);

    // Every card stays face-up.
    assert!(game.state().cards().all(|c| c.face_up));
}

/// Mismatches along the way do not disturb the win.
#[test]
fn test_win_with_mistakes() {
    let mut game = session(3, 5);

    game.click_card(card(0, false));
    game.click_card(card(2, true));
    game.settle();

    for pair in [2, 0, 1] {
        game.click_card(card(pair, true));
        game.click_card(card(pair, false));
        game.settle();
    }

    assert!(game.is_won());
    assert_eq!(game.presenter().wins, vec![3]);
}

/// Clicks after winning are ignored.
#[test]
fn test_clicks_after_win_are_ignored() {
    let mut game = session(1, 0);
    game.click_card(card(0, false));
    game.click_card(card(0, true));
    game.settle();

    assert_eq!(
        game.click_card(card(0, false)),
        ClickOutcome::Ignored(IgnoreReason::SessionWon)
    );
    assert_eq!(game.presenter().wins.len(), 1);
}

// =============================================================================
// Events
// =============================================================================

/// A round emits flip, schedule, and judgment events in order.
#[test]
fn test_round_event_sequence() {
    let mut game = session(2, 3);
    game.drain_events();

    game.click_card(card(0, false));
    game.click_card(card(1, true));
    game.advance(1000);

    let events = game.drain_events();
    let names: Vec<_> = events.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "card_flipped",
            "card_flipped",
            "evaluation_scheduled",
            "card_flipped",
            "card_flipped",
            "pair_mismatched",
        ]
    );
    assert_eq!(
        events[2],
        SessionEvent::EvaluationScheduled {
            first: card(0, false),
            second: card(1, true),
            due_ms: 1000,
        }
    );
    assert!(game.events().is_empty());
}

/// Placement events carry the grid position.
#[test]
fn test_placement_events() {
    let mut game = MemoramaBuilder::new().build(11).unwrap();
    let id = game.card_loaded(CardIdentity::counterpart(3)).unwrap();

    let expected = game.grid().layout(3, true);
    assert_eq!(
        game.events().last(),
        Some(&SessionEvent::CardPlaced {
            card: id,
            identity: CardIdentity::counterpart(3),
            position: expected,
        })
    );
}
