use ternion_engine::cards::{Card, Rank};
use ternion_engine::hand::evaluate_hand;

/// Pick which hole card (0 or 1) to discard once the discard option has been
/// taken. The weaker card goes: preflop by rank with a strong bias toward
/// keeping an Ace, postflop by which card makes the better hand with the
/// board, with flush potential as the tiebreak.
pub fn choose_discard(hole: [Card; 2], board: &[Card]) -> usize {
    if board.is_empty() {
        return preflop_choice(hole);
    }

    let keep0 = evaluate_hand(&with_board(hole[0], board));
    let keep1 = evaluate_hand(&with_board(hole[1], board));
    match (keep0, keep1) {
        (Ok(a), Ok(b)) if a != b => {
            if a > b {
                1
            } else {
                0
            }
        }
        _ => {
            // same made hand either way: keep the better flush draw
            let matches0 = board.iter().filter(|c| c.suit == hole[0].suit).count();
            let matches1 = board.iter().filter(|c| c.suit == hole[1].suit).count();
            if matches0 != matches1 {
                if matches0 > matches1 {
                    1
                } else {
                    0
                }
            } else {
                preflop_choice(hole)
            }
        }
    }
}

fn preflop_choice(hole: [Card; 2]) -> usize {
    let v0 = hole[0].rank.value();
    let v1 = hole[1].rank.value();
    if v0 == v1 {
        return 0;
    }
    if hole[0].rank == Rank::Ace {
        return 1;
    }
    if hole[1].rank == Rank::Ace {
        return 0;
    }
    if v0 < v1 {
        0
    } else {
        1
    }
}

fn with_board(card: Card, board: &[Card]) -> Vec<Card> {
    let mut v = Vec::with_capacity(1 + board.len());
    v.push(card);
    v.extend_from_slice(board);
    v
}
