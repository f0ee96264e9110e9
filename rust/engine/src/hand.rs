use crate::cards::{Card, FLUSH_LEN, STRAIGHT_LEN, SUIT_COUNT};
use crate::errors::HandError;

/// Hand categories reachable in the 27-card deck. With only three suits a
/// rank appears at most three times, so four of a kind does not exist and a
/// full house is the second-best category behind the straight flush.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    StraightFlush = 7,
}

/// Comparable strength of an evaluated hand. The derived ordering compares
/// category first, then kickers high-to-low, which gives the total order the
/// rest of the pipeline relies on.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct HandStrength {
    pub category: Category,
    // kickers: rank values ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Scalar strength on [0, 1] with the per-category bands the heuristics
    /// are tuned against: straight flush 0.99, full house 0.90-0.98, flush
    /// 0.80-0.89, straight 0.70-0.79, trips 0.60-0.69, two pair 0.45-0.59,
    /// pair 0.30-0.44, high card 0.10-0.24.
    pub fn score(&self) -> f32 {
        let k0 = unit(self.kickers[0]);
        match self.category {
            Category::StraightFlush => 0.99,
            Category::FullHouse => 0.90 + k0 * 0.08,
            Category::Flush => 0.80 + k0 * 0.09,
            Category::Straight => 0.70 + k0 * 0.09,
            Category::ThreeOfAKind => 0.60 + k0 * 0.09,
            Category::TwoPair => 0.45 + k0 * 0.10 + unit(self.kickers[1]) * 0.04,
            Category::OnePair => (0.30 + k0 * 0.12 + unit(self.kickers[1]) * 0.03).min(0.44),
            Category::HighCard => 0.10 + k0 * 0.14,
        }
    }
}

/// Normalize a rank value (2..=10) onto [0, 1].
fn unit(value: u8) -> f32 {
    f32::from(value.saturating_sub(2)) / 8.0
}

/// Rank any 2-7 cards drawn from the 27-card universe.
///
/// Straight and flush thresholds come from the deck-shape constants rather
/// than 52-card assumptions. Pure function of its input.
///
/// # Errors
///
/// [`HandError::TooFewCards`] below 2 cards, [`HandError::TooManyCards`]
/// above 7, [`HandError::DuplicateCard`] if any card repeats.
///
/// ```
/// use ternion_engine::cards::{Card, Rank, Suit};
/// use ternion_engine::hand::{evaluate_hand, Category};
///
/// // 6-7-8-9-A is a straight here: with no tens or faces, Ace follows Nine.
/// let cards = [
///     Card { suit: Suit::Hearts, rank: Rank::Six },
///     Card { suit: Suit::Spades, rank: Rank::Seven },
///     Card { suit: Suit::Diamonds, rank: Rank::Eight },
///     Card { suit: Suit::Hearts, rank: Rank::Nine },
///     Card { suit: Suit::Spades, rank: Rank::Ace },
/// ];
/// let strength = evaluate_hand(&cards).unwrap();
/// assert_eq!(strength.category, Category::Straight);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandStrength, HandError> {
    if cards.len() < 2 {
        return Err(HandError::TooFewCards { got: cards.len() });
    }
    if cards.len() > 7 {
        return Err(HandError::TooManyCards { got: cards.len() });
    }
    let mut seen = [false; crate::cards::DECK_SIZE];
    for &c in cards {
        let i = c.index() as usize;
        if seen[i] {
            return Err(HandError::DuplicateCard(c));
        }
        seen[i] = true;
    }

    // Count ranks (by value 2..=10) and suits
    let mut rank_counts = [0u8; 11];
    let mut suit_counts = [0u8; SUIT_COUNT];
    let mut by_suit: [Vec<u8>; SUIT_COUNT] = [vec![], vec![], vec![]];
    for &c in cards {
        let v = c.rank.value();
        rank_counts[v as usize] += 1;
        let s = c.suit.offset() as usize;
        suit_counts[s] += 1;
        by_suit[s].push(v);
    }

    let flush_suit = suit_counts
        .iter()
        .position(|&count| count as usize >= FLUSH_LEN);

    // Straight flush
    if let Some(s) = flush_suit {
        by_suit[s].sort_unstable();
        if let Some(high) = straight_high(&by_suit[s]) {
            return Ok(HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            });
        }
    }

    // Full house (two sets of trips collapse into trips + pair)
    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return Ok(HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        });
    }

    // Flush
    if let Some(s) = flush_suit {
        let mut values = by_suit[s].clone();
        values.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&values[..FLUSH_LEN]);
        return Ok(HandStrength {
            category: Category::Flush,
            kickers: k,
        });
    }

    // Straight
    let mut uniq: Vec<u8> = (2..=10u8)
        .filter(|&v| rank_counts[v as usize] > 0)
        .collect();
    uniq.sort_unstable();
    if let Some(high) = straight_high(&uniq) {
        return Ok(HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        });
    }

    // Trips / pairs / high card
    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let mut rest: Vec<u8> = pairs.iter().chain(singles.iter()).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [t, 0, 0, 0, 0];
        k[1] = rest.first().copied().unwrap_or(0);
        k[2] = rest.get(1).copied().unwrap_or(0);
        return Ok(HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        });
    }
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        // best remaining card, third pair included
        let mut rest: Vec<u8> = pairs[2..].iter().chain(singles.iter()).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [high, low, 0, 0, 0];
        k[2] = rest.first().copied().unwrap_or(0);
        return Ok(HandStrength {
            category: Category::TwoPair,
            kickers: k,
        });
    }
    if let Some(&p) = pairs.first() {
        let mut k = [p, 0, 0, 0, 0];
        for (i, &v) in singles.iter().take(3).enumerate() {
            k[i + 1] = v;
        }
        return Ok(HandStrength {
            category: Category::OnePair,
            kickers: k,
        });
    }

    let mut k = [0u8; 5];
    for (i, &v) in singles.iter().take(5).enumerate() {
        k[i] = v;
    }
    Ok(HandStrength {
        category: Category::HighCard,
        kickers: k,
    })
}

/// Highest card of the best straight in a sorted ascending value list, if
/// any run reaches [`STRAIGHT_LEN`]. The Ace (10) also counts as 1 for the
/// A-2-3-4-5 wheel, reported as 5-high.
fn straight_high(sorted_values: &[u8]) -> Option<u8> {
    if sorted_values.is_empty() {
        return None;
    }
    let mut v = sorted_values.to_vec();
    v.dedup();
    if v.binary_search(&10).is_ok() {
        v.insert(0, 1);
    }
    let mut run = 1usize;
    let mut best_high = 0u8;
    for i in 1..v.len() {
        if v[i] == v[i - 1] + 1 {
            run += 1;
            if run >= STRAIGHT_LEN {
                best_high = v[i];
            }
        } else {
            run = 1;
        }
    }
    if best_high == 0 {
        None
    } else {
        Some(best_high)
    }
}

fn detect_full_house(rank_counts: &[u8; 11]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for v in (2..=10u8).rev() {
        match rank_counts[v as usize] {
            3 => trips.push(v),
            2 => pairs.push(v),
            _ => {}
        }
    }
    match (trips.first(), trips.get(1), pairs.first()) {
        (Some(&t), Some(&p2), Some(&p)) => Some((t, p.max(p2))),
        (Some(&t), Some(&p2), None) => Some((t, p2)),
        (Some(&t), None, Some(&p)) => Some((t, p)),
        _ => None,
    }
}

/// Rank values holding trips, pairs, and singles, each ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 11]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for v in (2..=10u8).rev() {
        match rank_counts[v as usize] {
            3 => trips.push(v),
            2 => pairs.push(v),
            1 => singles.push(v),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
