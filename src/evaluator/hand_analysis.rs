use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Pre-computed analysis of a whole hand of any size.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
        Self {
            rank_groups: RankGroups::from_cards(cards),
            suit_info: SuitInfo::detect(cards),
            straight_info: StraightInfo::detect(&ranks),
        }
    }
}
