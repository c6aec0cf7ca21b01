//! Boundary between a transport (CLI, HTTP handler, ...) and the engine.
//!
//! Mirrors the JSON body the odds endpoints accept:
//! `{"cards": ["AS","AH"], "flop": ["KD","QD","JD"], "turn": "TD", "river": "2C"}`.

use crate::cards::Card;
use crate::hand::{InputError, KnownCards, Street, BOARD_SIZE};
use crate::simulator::{Odds, SimulationError, Simulator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An odds request in card-identifier form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsRequest {
    /// Hero's hole cards.
    pub cards: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flop: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub river: Option<String>,
    /// Street being asked about; when absent it follows from the fields present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<Street>,
}

impl OddsRequest {
    pub fn new<S: Into<String>>(cards: impl IntoIterator<Item = S>) -> Self {
        Self { cards: cards.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Split a flat list of known community cards into flop/turn/river fields.
    /// A list longer than a full board is kept whole, in order, under `flop`
    /// so [`OddsRequest::known_cards`] can reject it as given.
    ///
    /// ```
    /// use poker_odds::hand::Street;
    /// use poker_odds::request::OddsRequest;
    ///
    /// let req = OddsRequest::new(["AS", "AH"]).with_board(["KD", "QD", "JD", "TD"]);
    /// assert_eq!(req.turn.as_deref(), Some("TD"));
    /// assert_eq!(req.known_cards().unwrap().street(), Street::Turn);
    /// ```
    pub fn with_board<S: Into<String>>(mut self, board: impl IntoIterator<Item = S>) -> Self {
        let mut board: Vec<String> = board.into_iter().map(Into::into).collect();
        if board.len() > BOARD_SIZE {
            self.flop = Some(board);
            self.turn = None;
            self.river = None;
            return self;
        }
        self.river = if board.len() > 4 { Some(board.remove(4)) } else { None };
        self.turn = if board.len() > 3 { Some(board.remove(3)) } else { None };
        self.flop = if board.is_empty() { None } else { Some(board) };
        self
    }

    pub fn with_street(mut self, street: Street) -> Self {
        self.street = Some(street);
        self
    }

    /// Street named by the request, or the deepest one its fields reach.
    pub fn street(&self) -> Street {
        self.street.unwrap_or(if self.river.is_some() {
            Street::River
        } else if self.turn.is_some() {
            Street::Turn
        } else if self.flop.is_some() {
            Street::Flop
        } else {
            Street::PreFlop
        })
    }

    fn board_ids(&self) -> Vec<&str> {
        self.flop
            .iter()
            .flatten()
            .chain(self.turn.iter())
            .chain(self.river.iter())
            .map(String::as_str)
            .collect()
    }

    /// Parse and validate every card. Nothing is simulated until this succeeds.
    pub fn known_cards(&self) -> Result<KnownCards, InputError> {
        let ids = self.board_ids();
        if ids.len() > BOARD_SIZE {
            return Err(InputError::InvalidStreetCards {
                street: self.street(),
                expected: self.street().known_community(),
                got: ids.len(),
            });
        }
        let hole = parse_ids(self.cards.iter().map(String::as_str))?;
        let board = parse_ids(ids)?;
        KnownCards::try_new(self.street(), &hole, &board)
    }

    /// Validate, then run the simulation and return the percentages.
    pub fn evaluate(&self, simulator: &Simulator) -> Result<Odds, SimulationError> {
        let known = self.known_cards()?;
        simulator.run(&known)
    }
}

fn parse_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<Vec<Card>, InputError> {
    ids.into_iter()
        .map(|id| Card::from_str(id).map_err(|_| InputError::UnknownCardIdentifier(id.to_string())))
        .collect()
}
