use crate::cards::{Card, Rank};

/// Occurrence count of every rank in a hand.
///
/// Example: AAAKQ counts Ace = 3, King = 1, Queen = 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    /// Indexed by rank value (2-14); slots 0 and 1 stay empty.
    counts: [u8; 15],
}

impl RankGroups {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for card in cards {
            counts[card.rank().value() as usize] += 1;
        }
        Self { counts }
    }

    /// How many times `rank` appears.
    pub fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.value() as usize]
    }

    /// True if some rank appears exactly `n` times.
    pub fn has_count(&self, n: u8) -> bool {
        Rank::ALL.iter().any(|&r| self.count(r) == n)
    }

    /// Ranks appearing exactly twice, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        Rank::ALL.iter().rev().copied().filter(|&r| self.count(r) == 2).collect()
    }
}
