use ternion_engine::cards::{Card, Rank, Suit};
use ternion_engine::rules::{Action, LegalActions};
use ternion_engine::state::{GameState, Street};

fn base_state() -> GameState {
    GameState {
        street: Street::Preflop,
        hole: [
            Card { suit: Suit::Spades, rank: Rank::Ace },
            Card { suit: Suit::Hearts, rank: Rank::Seven },
        ],
        board: vec![],
        pot: 3,
        to_call: 1,
        min_raise: 2,
        max_raise: 100,
        stack: 99,
        committed: 1,
        opponent_stack: 98,
        opponent_committed: 2,
        opponent_id: 1,
        discard_used: false,
        opponent_discarded: false,
    }
}

#[test]
fn check_excluded_while_facing_a_bet() {
    let legal = LegalActions::from_state(&base_state());
    assert!(!legal.check);
    assert!(legal.call);
    assert!(legal.fold);
}

#[test]
fn check_offered_when_nothing_to_call() {
    let mut s = base_state();
    s.to_call = 0;
    let legal = LegalActions::from_state(&s);
    assert!(legal.check);
    assert!(!legal.call);
}

#[test]
fn raise_excluded_without_chips_beyond_call() {
    let mut s = base_state();
    s.stack = s.to_call;
    let legal = LegalActions::from_state(&s);
    assert!(legal.raise.is_none());
    // but the set is still non-empty
    assert!(legal.fold || legal.check || legal.call);
}

#[test]
fn raise_bounds_capped_by_stack() {
    let mut s = base_state();
    s.stack = 11;
    s.to_call = 1;
    let legal = LegalActions::from_state(&s);
    let bounds = legal.raise.unwrap();
    assert_eq!(bounds.max, 10);
    assert_eq!(bounds.min, 2);
    assert!(legal.permits(Action::Raise(10)));
    assert!(!legal.permits(Action::Raise(11)));
    assert!(!legal.permits(Action::Raise(1)));
}

#[test]
fn short_all_in_below_table_minimum_still_offered() {
    let mut s = base_state();
    s.stack = 2; // 1 beyond the call, below min_raise of 2
    let legal = LegalActions::from_state(&s);
    let bounds = legal.raise.unwrap();
    assert_eq!(bounds.min, 1);
    assert_eq!(bounds.max, 1);
}

#[test]
fn discard_window_is_preflop_and_flop_once_per_hand() {
    let mut s = base_state();
    assert!(LegalActions::from_state(&s).discard);

    s.street = Street::Flop;
    assert!(LegalActions::from_state(&s).discard);

    s.street = Street::Turn;
    assert!(!LegalActions::from_state(&s).discard);

    s.street = Street::Flop;
    s.discard_used = true;
    assert!(!LegalActions::from_state(&s).discard);
}

#[test]
fn legal_set_never_empty_across_streets_and_stacks() {
    for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
        for to_call in [0u32, 1, 50, 200] {
            for stack in [0u32, 1, 10, 100] {
                let mut s = base_state();
                s.street = street;
                s.to_call = to_call;
                s.stack = stack;
                let legal = LegalActions::from_state(&s);
                assert!(
                    legal.fold || legal.check,
                    "no fold or check with to_call={} stack={}",
                    to_call,
                    stack
                );
            }
        }
    }
}
