use ternion_engine::cards::{Card, Rank};

/// Preflop strength of a two-card holding on [0, 1], tuned to the 9-rank
/// deck. With the board empty the evaluator's category signal is too coarse
/// (every non-pair is just "high card"), so this table grades holdings the
/// way the postflop score bands do: pocket aces at 0.95 down to low offsuit
/// rags around 0.20.
pub fn preflop_strength(hole: [Card; 2]) -> f32 {
    let v0 = hole[0].rank.value();
    let v1 = hole[1].rank.value();
    let (high, low) = if v0 >= v1 { (v0, v1) } else { (v1, v0) };
    let suited = hole[0].suit == hole[1].suit;

    // Pairs
    if v0 == v1 {
        return match high {
            10 => 0.95,                                // AA
            7..=9 => 0.85 + f32::from(high - 7) * 0.03, // 77-99
            4..=6 => 0.65 + f32::from(high - 4) * 0.05, // 44-66
            _ => 0.50 + f32::from(high - 2) * 0.05,     // 22-33
        };
    }

    let suited_bonus = |base: f32, bonus: f32| if suited { base + bonus } else { base };

    // Ace-high holdings
    if high == Rank::Ace.value() {
        return if low >= 9 {
            suited_bonus(0.65, 0.10)
        } else if low >= 7 {
            suited_bonus(0.55, 0.15)
        } else {
            suited_bonus(0.40, 0.15)
        };
    }

    // Connected high cards
    if high - low == 1 && high >= 8 {
        return suited_bonus(0.35, 0.15);
    }

    if high >= 8 {
        return suited_bonus(0.30, 0.10);
    }

    suited_bonus(0.20, 0.10)
}
