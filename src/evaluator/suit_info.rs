use super::MADE_HAND_LEN;
use crate::cards::Card;

/// Whether every card of the hand shares one suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
}

impl SuitInfo {
    /// Detect a flush across the whole hand; hands shorter than five cards never flush.
    pub fn detect(cards: &[Card]) -> Self {
        match cards.first() {
            Some(first)
                if cards.len() >= MADE_HAND_LEN && cards.iter().all(|c| c.suit() == first.suit()) =>
            {
                SuitInfo { is_flush: true }
            }
            _ => SuitInfo { is_flush: false },
        }
    }
}
