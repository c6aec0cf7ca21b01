use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Number of community cards on a complete board.
pub const BOARD_SIZE: usize = 5;

/// Caller-side input errors. All of them are detected before any trial runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("expected exactly two hole cards, got {0}")]
    InvalidHandSize(usize),
    #[error("{street} needs {expected} community cards, got {got}")]
    InvalidStreetCards { street: Street, expected: usize, got: usize },
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("unknown card identifier: {0}")]
    UnknownCardIdentifier(String),
}

/// Betting stage, identified by how many community cards are already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    /// Community cards already revealed on this street.
    pub const fn known_community(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Community cards a trial still has to deal to complete the board.
    pub const fn to_deal(self) -> usize {
        BOARD_SIZE - self.known_community()
    }

    /// The street a board of `len` known cards belongs to, if any.
    pub fn from_board_len(len: usize) -> Option<Street> {
        Street::ALL.iter().copied().find(|s| s.known_community() == len)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Street::PreFlop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StreetParseError {
    #[error("invalid street: '{0}' (expected pre-flop, flop, turn or river)")]
    Invalid(String),
}

impl FromStr for Street {
    type Err = StreetParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "preflop" => Ok(Street::PreFlop),
            "flop" | "postflop" => Ok(Street::Flop),
            "turn" | "postturn" => Ok(Street::Turn),
            "river" | "postriver" => Ok(Street::River),
            _ => Err(StreetParseError::Invalid(s.to_string())),
        }
    }
}

/// A player's two private hole cards.
///
/// ```
/// use poker_odds::cards::{Card, Rank, Suit};
/// use poker_odds::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, InputError> {
        if a == b {
            return Err(InputError::DuplicateCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, InputError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(InputError::InvalidHandSize(slice.len())),
        }
    }
}

impl FromStr for HoleCards {
    type Err = InputError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| InputError::UnknownCardIdentifier(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Validated state of a request: hero's hole cards plus the community cards
/// revealed so far on `street`. Every card is distinct.
///
/// ```
/// use poker_odds::cards::parse_cards;
/// use poker_odds::hand::{KnownCards, Street};
///
/// let hero = parse_cards("AS AH").unwrap();
/// let flop = parse_cards("KD QD JD").unwrap();
/// let known = KnownCards::try_new(Street::Flop, &hero, &flop).unwrap();
/// assert_eq!(known.all().len(), 5);
/// assert!(KnownCards::try_new(Street::Turn, &hero, &flop).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownCards {
    street: Street,
    hole: HoleCards,
    board: Vec<Card>,
}

impl KnownCards {
    pub fn try_new(street: Street, hole: &[Card], board: &[Card]) -> Result<Self, InputError> {
        let hole = HoleCards::from_slice(hole)?;
        let expected = street.known_community();
        if board.len() != expected {
            return Err(InputError::InvalidStreetCards { street, expected, got: board.len() });
        }
        let mut seen: HashSet<Card> = hole.as_array().into_iter().collect();
        if let Some(dup) = board.iter().find(|&&c| !seen.insert(c)) {
            return Err(InputError::DuplicateCard(*dup));
        }
        Ok(Self { street, hole, board: board.to_vec() })
    }

    /// Same as [`KnownCards::try_new`] with the street taken from the board length.
    pub fn infer(hole: &[Card], board: &[Card]) -> Result<Self, InputError> {
        let street = Street::from_board_len(board.len()).ok_or(InputError::InvalidStreetCards {
            street: Street::River,
            expected: BOARD_SIZE,
            got: board.len(),
        })?;
        Self::try_new(street, hole, board)
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn hole(&self) -> HoleCards {
        self.hole
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Hole cards followed by the known board.
    pub fn all(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(2 + self.board.len());
        cards.extend(self.hole.as_array());
        cards.extend_from_slice(&self.board);
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).expect("valid cards")
    }

    #[test]
    fn street_counts() {
        let known: Vec<usize> = Street::ALL.iter().map(|s| s.known_community()).collect();
        let deal: Vec<usize> = Street::ALL.iter().map(|s| s.to_deal()).collect();
        assert_eq!(known, vec![0, 3, 4, 5]);
        assert_eq!(deal, vec![5, 2, 1, 0]);
        assert_eq!(Street::from_board_len(4), Some(Street::Turn));
        assert_eq!(Street::from_board_len(2), None);
    }

    #[test]
    fn street_parsing() {
        assert_eq!("pre-flop".parse::<Street>().unwrap(), Street::PreFlop);
        assert_eq!("Preflop".parse::<Street>().unwrap(), Street::PreFlop);
        assert_eq!("post_turn".parse::<Street>().unwrap(), Street::Turn);
        assert!("showdown".parse::<Street>().is_err());
    }

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(HoleCards::try_new(a, a), Err(InputError::DuplicateCard(a)));
    }

    #[test]
    fn hole_cards_need_exactly_two() {
        assert_eq!(
            HoleCards::from_slice(&cards("AS KS QS")),
            Err(InputError::InvalidHandSize(3))
        );
        assert_eq!(HoleCards::from_slice(&[]), Err(InputError::InvalidHandSize(0)));
    }

    #[test]
    fn known_cards_check_street_shape() {
        let err = KnownCards::try_new(Street::Flop, &cards("AS AH"), &cards("KD QD")).unwrap_err();
        assert_eq!(err, InputError::InvalidStreetCards { street: Street::Flop, expected: 3, got: 2 });
    }

    #[test]
    fn known_cards_catch_overlap_with_board() {
        let err = KnownCards::try_new(Street::Flop, &cards("AS AH"), &cards("KD AS 2C")).unwrap_err();
        assert_eq!(err, InputError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn known_cards_catch_duplicates_within_board() {
        let err =
            KnownCards::try_new(Street::Turn, &cards("AS AH"), &cards("KD 2C 3C 2C")).unwrap_err();
        assert_eq!(err, InputError::DuplicateCard(Card::new(Rank::Two, Suit::Clubs)));
    }

    #[test]
    fn infer_uses_board_length() {
        let k = KnownCards::infer(&cards("AS AH"), &cards("KD QD JD TD")).unwrap();
        assert_eq!(k.street(), Street::Turn);
        assert_eq!(k.all().len(), 6);
        assert!(matches!(
            KnownCards::infer(&cards("AS AH"), &cards("KD")),
            Err(InputError::InvalidStreetCards { got: 1, .. })
        ));
    }

    #[test]
    fn parsing_interfaces_work() {
        let hole: HoleCards = "AS KD".parse().unwrap();
        assert_eq!(hole.as_array(), [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::King, Suit::Diamonds)]);
        assert!(matches!("AS XX".parse::<HoleCards>(), Err(InputError::UnknownCardIdentifier(_))));
    }
}
