use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of suits in the reduced deck.
pub const SUIT_COUNT: usize = 3;
/// Number of ranks in the reduced deck.
pub const RANK_COUNT: usize = 9;
/// Total cards in play: 3 suits x 9 ranks.
pub const DECK_SIZE: usize = SUIT_COUNT * RANK_COUNT;
/// Cards of one suit required for a flush.
pub const FLUSH_LEN: usize = 5;
/// Consecutive ranks required for a straight.
pub const STRAIGHT_LEN: usize = 5;

/// One of the three suits in the reduced 27-card deck.
/// Clubs do not exist in this variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Rank of a card in the reduced deck: Two through Nine plus Ace.
/// Tens and face cards are absent, so Ace (value 10) sits directly
/// above Nine and the whole value line 2..=10 is consecutive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Ace (value 10; also plays low in the A-2-3-4-5 wheel)
    Ace = 10,
}

impl Rank {
    /// Numeric value used for ordering and straight detection (2..=10).
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Dense offset 0..=8 within the rank set (Ace last).
    pub fn offset(self) -> u8 {
        match self {
            Rank::Ace => 8,
            r => r.value() - 2,
        }
    }

    pub fn from_offset(offset: u8) -> Option<Rank> {
        match offset {
            0 => Some(Rank::Two),
            1 => Some(Rank::Three),
            2 => Some(Rank::Four),
            3 => Some(Rank::Five),
            4 => Some(Rank::Six),
            5 => Some(Rank::Seven),
            6 => Some(Rank::Eight),
            7 => Some(Rank::Nine),
            8 => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl Suit {
    /// Dense offset 0..=2 (diamonds, hearts, spades).
    pub fn offset(self) -> u8 {
        match self {
            Suit::Diamonds => 0,
            Suit::Hearts => 1,
            Suit::Spades => 2,
        }
    }

    pub fn from_offset(offset: u8) -> Option<Suit> {
        match offset {
            0 => Some(Suit::Diamonds),
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A single playing card from the 27-card universe.
/// Immutable once dealt; identity is the (suit, rank) pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Nine, or Ace)
    pub rank: Rank,
}

impl Card {
    /// Canonical deck index 0..27: `suit * 9 + rank_offset`.
    /// This index doubles as the one-hot position in encoded feature vectors.
    pub fn index(self) -> u8 {
        self.suit.offset() * RANK_COUNT as u8 + self.rank.offset()
    }

    /// Inverse of [`Card::index`].
    ///
    /// ```
    /// use ternion_engine::cards::Card;
    /// for i in 0..27 {
    ///     assert_eq!(Card::from_index(i).unwrap().index(), i);
    /// }
    /// assert!(Card::from_index(27).is_none());
    /// ```
    pub fn from_index(index: u8) -> Option<Card> {
        if index as usize >= DECK_SIZE {
            return None;
        }
        let suit = Suit::from_offset(index / RANK_COUNT as u8)?;
        let rank = Rank::from_offset(index % RANK_COUNT as u8)?;
        Some(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = match self.rank {
            Rank::Ace => 'A',
            r => (b'0' + r.value()) as char,
        };
        let s = match self.suit {
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{}{}", r, s)
    }
}

pub fn all_suits() -> [Suit; SUIT_COUNT] {
    [Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; RANK_COUNT] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
