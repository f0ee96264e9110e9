//! # ternion-engine: 27-Card Discard Hold'em Rules Core
//!
//! Deck model, hand evaluation, and betting legality for a reduced-deck
//! Texas Hold'em variant: 9 ranks (2-9 and Ace) across 3 suits (diamonds,
//! hearts, spades), with a one-per-hand option to discard a hole card during
//! the Preflop/Flop window.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and the 27-card deck shape constants
//! - [`deck`] - Deterministic deck shuffling with seeded ChaCha20 RNG
//! - [`hand`] - Hand evaluation parameterized to the reduced deck
//! - [`rules`] - Action legality and betting validation
//! - [`state`] - Read-only per-turn game-state snapshot
//! - [`errors`] - Error types for evaluation, state, and betting
//!
//! ## Quick Start
//!
//! ```rust
//! use ternion_engine::cards::{Card, Rank, Suit};
//! use ternion_engine::hand::evaluate_hand;
//!
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Spades, rank: Rank::Ace },
//!     Card { suit: Suit::Diamonds, rank: Rank::Ace },
//!     Card { suit: Suit::Hearts, rank: Rank::Nine },
//!     Card { suit: Suit::Spades, rank: Rank::Nine },
//! ];
//!
//! let strength = evaluate_hand(&cards).unwrap();
//! println!("Hand category: {:?}", strength.category);
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use ternion_engine::deck::Deck;
//!
//! // Same seed produces the same shuffle
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod rules;
pub mod state;
