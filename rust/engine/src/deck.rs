use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::cards::{Card, full_deck};

/// The 27-card stub from the dealer's point of view. Shuffles are
/// deterministic per seed so any hand can be replayed exactly; `reshuffle`
/// between hands reuses the same RNG stream, so one seed fixes a whole
/// match.
#[derive(Debug)]
pub struct Deck {
    stub: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// A freshly shuffled deck driven by the given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            stub: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.reshuffle();
        deck
    }

    /// Restore all 27 cards and shuffle; called between hands.
    pub fn reshuffle(&mut self) {
        self.stub = full_deck();
        self.stub.shuffle(&mut self.rng);
    }

    /// Deal the top card, if any remain.
    pub fn deal(&mut self) -> Option<Card> {
        self.stub.pop()
    }

    /// Deal both hole cards for one player.
    pub fn deal_hole(&mut self) -> Option<[Card; 2]> {
        Some([self.deal()?, self.deal()?])
    }

    /// Burn one card, then deal the three flop cards.
    pub fn deal_flop(&mut self) -> Option<[Card; 3]> {
        self.burn();
        Some([self.deal()?, self.deal()?, self.deal()?])
    }

    /// Burn one card, then deal a single street card (turn or river).
    pub fn deal_street(&mut self) -> Option<Card> {
        self.burn();
        self.deal()
    }

    /// Replacement for a discarded hole card. The discarded card does not
    /// return to the stub this hand.
    pub fn draw_replacement(&mut self) -> Option<Card> {
        self.deal()
    }

    pub fn burn(&mut self) {
        let _ = self.deal();
    }

    pub fn remaining(&self) -> usize {
        self.stub.len()
    }
}
