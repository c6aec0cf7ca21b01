use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered pile of distinct cards: either the full 52-card deck or what is
/// left of it once the known cards are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_odds::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&r| Suit::ALL.iter().map(move |&s| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// Copy of this deck without any of the `known` cards, original order preserved.
    ///
    /// ```
    /// use poker_odds::cards::parse_cards;
    /// use poker_odds::deck::Deck;
    ///
    /// let known = parse_cards("AS AH KD QD JD").unwrap();
    /// let residual = Deck::standard().residual(&known);
    /// assert_eq!(residual.len(), 47);
    /// assert!(known.iter().all(|c| !residual.contains(*c)));
    /// ```
    pub fn residual(&self, known: &[Card]) -> Self {
        let cards = self.cards.iter().copied().filter(|c| !known.contains(c)).collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Uniform in-place shuffle (Fisher-Yates) with the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }
}
