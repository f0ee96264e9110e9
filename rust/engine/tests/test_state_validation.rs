use ternion_engine::cards::{Card, Rank, Suit};
use ternion_engine::errors::StateError;
use ternion_engine::state::{GameState, Street};

fn card(rank: Rank, suit: Suit) -> Card {
    Card { suit, rank }
}

fn snapshot(street: Street, board: Vec<Card>) -> GameState {
    GameState {
        street,
        hole: [
            card(Rank::Ace, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
        ],
        board,
        pot: 10,
        to_call: 0,
        min_raise: 2,
        max_raise: 100,
        stack: 95,
        committed: 5,
        opponent_stack: 95,
        opponent_committed: 5,
        opponent_id: 0,
        discard_used: false,
        opponent_discarded: false,
    }
}

#[test]
fn clean_snapshot_validates() {
    let s = snapshot(
        Street::Flop,
        vec![
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
        ],
    );
    assert!(s.validate().is_ok());
}

#[test]
fn duplicate_between_hole_and_board_is_rejected() {
    let s = snapshot(Street::Flop, vec![
        card(Rank::Ace, Suit::Spades), // same as hole[0]
        card(Rank::Five, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
    ]);
    assert_eq!(
        s.validate().unwrap_err(),
        StateError::DuplicateCard(card(Rank::Ace, Suit::Spades))
    );
}

#[test]
fn board_larger_than_street_allows_is_rejected() {
    let s = snapshot(Street::Preflop, vec![card(Rank::Two, Suit::Hearts)]);
    assert!(matches!(
        s.validate().unwrap_err(),
        StateError::BoardOverflow { got: 1, max: 0, .. }
    ));
}

#[test]
fn pot_odds_zero_when_check_is_free() {
    let s = snapshot(Street::Preflop, vec![]);
    assert_eq!(s.pot_odds(), 0.0);
}

#[test]
fn pot_odds_matches_definition() {
    let mut s = snapshot(Street::Preflop, vec![]);
    s.pot = 100;
    s.to_call = 20;
    assert!((s.pot_odds() - 20.0 / 120.0).abs() < 1e-6);
}

#[test]
fn street_board_counts() {
    assert_eq!(Street::Preflop.board_cards(), 0);
    assert_eq!(Street::Flop.board_cards(), 3);
    assert_eq!(Street::Turn.board_cards(), 4);
    assert_eq!(Street::River.board_cards(), 5);
}
