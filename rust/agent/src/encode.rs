use ternion_engine::cards::{Card, DECK_SIZE};
use ternion_engine::state::GameState;

/// Scalar features ahead of the card one-hots.
pub const SCALAR_FEATURES: usize = 12;
/// First one-hot position for hole cards.
pub const HOLE_OFFSET: usize = SCALAR_FEATURES;
/// First one-hot position for board cards.
pub const BOARD_OFFSET: usize = HOLE_OFFSET + DECK_SIZE;
/// Fixed length of the encoded feature vector, independent of street.
pub const FEATURE_LEN: usize = SCALAR_FEATURES + 2 * DECK_SIZE;

// Normalization scales from the table rules: bets cap at 100, the pot at 200.
const BET_SCALE: f32 = 100.0;
const POT_SCALE: f32 = 200.0;
const SPR_CAP: f32 = 10.0;

/// Fixed-shape numeric view of a game state, the policy model's only input.
/// Cards occupy one-hot positions by [`Card::index`], so distinct cards
/// never alias and the encoding is exactly invertible for the card regions.
#[derive(Debug, Clone)]
pub struct Features {
    values: [f32; FEATURE_LEN],
}

impl Features {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Encode a snapshot plus the derived signals the model consumes alongside
/// it. Deterministic and total: defined for every reachable state, including
/// an empty board and the turn right after a discard.
pub fn encode(
    state: &GameState,
    hand_strength: f32,
    aggression: f32,
    fold_frequency: f32,
) -> Features {
    let mut values = [0.0f32; FEATURE_LEN];

    values[0] = f32::from(state.street.index()) / 3.0;
    values[1] = state.pot as f32 / POT_SCALE;
    values[2] = state.to_call as f32 / BET_SCALE;
    values[3] = state.pot_odds();
    values[4] = (state.stack as f32 / state.pot.max(1) as f32).min(SPR_CAP) / SPR_CAP;
    values[5] = state.min_raise as f32 / BET_SCALE;
    values[6] = state.max_raise as f32 / BET_SCALE;
    values[7] = hand_strength;
    values[8] = aggression;
    values[9] = fold_frequency;
    values[10] = if state.discard_used { 1.0 } else { 0.0 };
    values[11] = if state.opponent_discarded { 1.0 } else { 0.0 };

    for card in state.hole {
        values[HOLE_OFFSET + card.index() as usize] = 1.0;
    }
    for card in &state.board {
        values[BOARD_OFFSET + card.index() as usize] = 1.0;
    }

    Features { values }
}

/// Recover the hole cards from the one-hot region, ordered by deck index.
pub fn decode_hole(features: &Features) -> Vec<Card> {
    decode_region(features, HOLE_OFFSET)
}

/// Recover the board cards from the one-hot region, ordered by deck index.
pub fn decode_board(features: &Features) -> Vec<Card> {
    decode_region(features, BOARD_OFFSET)
}

fn decode_region(features: &Features, offset: usize) -> Vec<Card> {
    (0..DECK_SIZE)
        .filter(|i| features.values[offset + i] > 0.5)
        .filter_map(|i| Card::from_index(i as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ternion_engine::cards::{Rank, Suit};
    use ternion_engine::state::Street;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank }
    }

    fn state(street: Street, board: Vec<Card>) -> GameState {
        GameState {
            street,
            hole: [
                card(Rank::Ace, Suit::Spades),
                card(Rank::Seven, Suit::Diamonds),
            ],
            board,
            pot: 100,
            to_call: 20,
            min_raise: 2,
            max_raise: 80,
            stack: 50,
            committed: 10,
            opponent_stack: 40,
            opponent_committed: 30,
            opponent_id: 1,
            discard_used: true,
            opponent_discarded: false,
        }
    }

    #[test]
    fn shape_is_fixed_regardless_of_street() {
        let preflop = encode(&state(Street::Preflop, vec![]), 0.5, 0.5, 0.0);
        let river = encode(
            &state(
                Street::River,
                vec![
                    card(Rank::Two, Suit::Hearts),
                    card(Rank::Three, Suit::Hearts),
                    card(Rank::Four, Suit::Hearts),
                    card(Rank::Five, Suit::Spades),
                    card(Rank::Nine, Suit::Diamonds),
                ],
            ),
            0.5,
            0.5,
            0.0,
        );
        assert_eq!(preflop.as_slice().len(), FEATURE_LEN);
        assert_eq!(river.as_slice().len(), FEATURE_LEN);
    }

    #[test]
    fn card_regions_round_trip_exactly() {
        let board = vec![
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
        ];
        let s = state(Street::Flop, board.clone());
        let f = encode(&s, 0.42, 0.5, 0.1);

        let mut hole: Vec<Card> = s.hole.to_vec();
        hole.sort_by_key(|c| c.index());
        assert_eq!(decode_hole(&f), hole);

        let mut sorted_board = board;
        sorted_board.sort_by_key(|c| c.index());
        assert_eq!(decode_board(&f), sorted_board);
    }

    #[test]
    fn empty_board_encodes_with_empty_board_region() {
        let f = encode(&state(Street::Preflop, vec![]), 0.9, 0.5, 0.0);
        assert!(decode_board(&f).is_empty());
        assert_eq!(decode_hole(&f).len(), 2);
    }

    #[test]
    fn scalar_features_are_normalized() {
        let s = state(Street::Flop, vec![card(Rank::Two, Suit::Hearts)]);
        let f = encode(&s, 0.42, 0.7, 0.3);
        let v = f.as_slice();
        assert!((v[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((v[1] - 0.5).abs() < 1e-6); // pot 100 / 200
        assert!((v[2] - 0.2).abs() < 1e-6); // to_call 20 / 100
        assert!((v[3] - 20.0 / 120.0).abs() < 1e-6);
        assert_eq!(v[7], 0.42);
        assert_eq!(v[8], 0.7);
        assert_eq!(v[9], 0.3);
        assert_eq!(v[10], 1.0);
        assert_eq!(v[11], 0.0);
    }

    #[test]
    fn distinct_cards_never_alias() {
        // every card index maps to a unique one-hot slot
        let mut seen = std::collections::HashSet::new();
        for i in 0..DECK_SIZE as u8 {
            let c = Card::from_index(i).unwrap();
            assert!(seen.insert(c.index()));
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }
}
