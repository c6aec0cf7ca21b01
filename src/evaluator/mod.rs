pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{format_cards, Card};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest hand that can hold a straight or a flush.
pub const MADE_HAND_LEN: usize = 5;

/// Poker hand category from weakest to strongest.
///
/// Two hands are compared by category alone: there are no kickers, so two
/// flushes always tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(n: u8) -> Option<Category> {
        Category::ALL.get(n as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How straights and flushes are looked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvalMode {
    /// Straights and flushes must use every card given. Seven cards only
    /// make a flush when all seven share a suit.
    #[default]
    WholeSet,
    /// Apply the whole-set rules to every five-card subset and keep the best.
    BestFive,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalModeParseError {
    #[error("invalid evaluation mode: '{0}' (expected whole-set or best-five)")]
    Invalid(String),
}

impl FromStr for EvalMode {
    type Err = EvalModeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "whole-set" | "whole" => Ok(EvalMode::WholeSet),
            "best-five" | "best" => Ok(EvalMode::BestFive),
            _ => Err(EvalModeParseError::Invalid(s.to_string())),
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalMode::WholeSet => f.write_str("whole-set"),
            EvalMode::BestFive => f.write_str("best-five"),
        }
    }
}

/// Categorise a hand of distinct cards, treating it as one unit.
///
/// Straights and flushes are only recognised when every card takes part, so
/// a seven-card hand holding a five-card run is not a straight.
///
/// ```
/// use poker_odds::cards::parse_cards;
/// use poker_odds::evaluator::{evaluate, Category};
///
/// let royal = parse_cards("AS KS QS JS TS").unwrap();
/// assert_eq!(evaluate(&royal), Category::RoyalFlush);
///
/// let seven = parse_cards("2C 3D 5H 7S 9C 4D 6H").unwrap();
/// assert_eq!(evaluate(&seven), Category::HighCard);
/// ```
pub fn evaluate(cards: &[Card]) -> Category {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    let category = DETECTORS
        .iter()
        .find(|d| d.detect(&analysis))
        .map_or(Category::HighCard, |d| d.category());

    tracing::trace!(hand = %format_cards(cards), %category, "evaluated hand");
    category
}

/// Best category over every five-card subset of `cards`.
/// Hands of five cards or fewer are evaluated as they are.
pub fn evaluate_best_five(cards: &[Card]) -> Category {
    use combinations::Combinations;

    if cards.len() <= MADE_HAND_LEN {
        return evaluate(cards);
    }
    let mut best = Category::HighCard;
    for indices in Combinations::new(cards.len(), MADE_HAND_LEN) {
        let five: Vec<Card> = indices.iter().map(|&i| cards[i]).collect();
        best = best.max(evaluate(&five));
        if best == Category::RoyalFlush {
            break;
        }
    }
    best
}

/// Evaluate `cards` with the chosen mode.
pub fn evaluate_with(mode: EvalMode, cards: &[Card]) -> Category {
    match mode {
        EvalMode::WholeSet => evaluate(cards),
        EvalMode::BestFive => evaluate_best_five(cards),
    }
}
