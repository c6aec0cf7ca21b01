//! Monte Carlo equity against two random opponents.
//!
//! A trial shuffles the residual deck (52 cards minus everything known),
//! completes the board from its front, deals two hole cards to each opponent
//! from the cards that follow, and compares the three seven-card categories.
//! [`Simulator`] repeats that for a fixed budget and tallies the outcomes.

use crate::cards::{format_cards, Card};
use crate::config::SimulationConfig;
use crate::deck::Deck;
use crate::evaluator::{evaluate_with, Category, EvalMode};
use crate::hand::{HoleCards, InputError, KnownCards, Street, BOARD_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of random opponents in every trial.
pub const OPPONENTS: usize = 2;

const HOLE_CARDS: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("residual deck holds {available} cards but a trial needs {needed}")]
    DeckExhausted { needed: usize, available: usize },
    #[error("trial budget must be at least one")]
    ZeroTrials,
}

/// Result of a single trial, from hero's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Hero wins by beating both opponents outright and loses to either one
    /// that beats it, even when it beats the other. Everything else ties.
    ///
    /// ```
    /// use poker_odds::evaluator::Category;
    /// use poker_odds::simulator::Outcome;
    ///
    /// let hero = Category::Pair;
    /// assert_eq!(Outcome::classify(hero, [Category::HighCard, Category::HighCard]), Outcome::Win);
    /// assert_eq!(Outcome::classify(hero, [Category::HighCard, Category::Pair]), Outcome::Tie);
    /// assert_eq!(Outcome::classify(hero, [Category::HighCard, Category::Flush]), Outcome::Loss);
    /// ```
    pub fn classify(hero: Category, opponents: [Category; OPPONENTS]) -> Self {
        if opponents.iter().all(|&o| hero > o) {
            Outcome::Win
        } else if opponents.iter().any(|&o| hero < o) {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }
}

/// Win/loss/tie counters for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub win: u64,
    pub lose: u64,
    pub tie: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Loss => self.lose += 1,
            Outcome::Tie => self.tie += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.win + self.lose + self.tie
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally { win: self.win + other.win, lose: self.lose + other.lose, tie: self.tie + other.tie }
    }

    /// Each count as a percentage of the total.
    pub fn odds(&self) -> Odds {
        let total = self.total();
        if total == 0 {
            return Odds { win: 0.0, lose: 0.0, tie: 0.0 };
        }
        let pct = |n: u64| n as f64 / total as f64 * 100.0;
        Odds { win: pct(self.win), lose: pct(self.lose), tie: pct(self.tie) }
    }
}

/// Outcome percentages, serialized as `{"win":..,"lose":..,"tie":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub win: f64,
    pub lose: f64,
    pub tie: f64,
}

/// The random part of one trial: the completed board and both opponents' hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub board: Vec<Card>,
    pub opponents: [[Card; HOLE_CARDS]; OPPONENTS],
}

impl Deal {
    /// Hero's, opponent 1's and opponent 2's seven-card hands.
    pub fn hands(&self, hero: HoleCards) -> [Vec<Card>; 1 + OPPONENTS] {
        let with_board = |hole: [Card; HOLE_CARDS]| {
            let mut hand = Vec::with_capacity(HOLE_CARDS + BOARD_SIZE);
            hand.extend(hole);
            hand.extend_from_slice(&self.board);
            hand
        };
        [with_board(hero.as_array()), with_board(self.opponents[0]), with_board(self.opponents[1])]
    }

    pub fn showdown(&self, hero: HoleCards, mode: EvalMode) -> Outcome {
        let [mine, first, second] = self.hands(hero);
        let outcome = Outcome::classify(
            evaluate_with(mode, &mine),
            [evaluate_with(mode, &first), evaluate_with(mode, &second)],
        );
        if outcome != Outcome::Win {
            tracing::trace!(
                ?outcome,
                hero = %format_cards(&mine),
                opponent1 = %format_cards(&first),
                opponent2 = %format_cards(&second),
                "hero did not win trial"
            );
        }
        outcome
    }
}

/// Shuffle `residual` in place and cut the trial's cards from its front:
/// first the missing board cards, then two cards per opponent.
///
/// `residual` must hold exactly the cards not in `known`.
pub fn deal<R: Rng + ?Sized>(
    known: &KnownCards,
    residual: &mut Deck,
    rng: &mut R,
) -> Result<Deal, SimulationError> {
    let to_deal = known.street().to_deal();
    let needed = to_deal + OPPONENTS * HOLE_CARDS;
    if residual.len() < needed {
        return Err(SimulationError::DeckExhausted { needed, available: residual.len() });
    }
    residual.shuffle_with(rng);

    let front = &residual.as_slice()[..needed];
    let (fill, holes) = front.split_at(to_deal);
    let mut board = Vec::with_capacity(BOARD_SIZE);
    board.extend_from_slice(known.board());
    board.extend_from_slice(fill);
    Ok(Deal { board, opponents: [[holes[0], holes[1]], [holes[2], holes[3]]] })
}

/// One trial from scratch: build the residual deck from `deck`, deal and compare.
pub fn simulate_trial<R: Rng + ?Sized>(
    known: &KnownCards,
    deck: &Deck,
    mode: EvalMode,
    rng: &mut R,
) -> Result<Outcome, SimulationError> {
    let mut residual = deck.residual(&known.all());
    Ok(deal(known, &mut residual, rng)?.showdown(known.hole(), mode))
}

/// One trial with no community cards known.
pub fn simulate_pre_flop<R: Rng + ?Sized>(
    hero: &HoleCards,
    deck: &Deck,
    rng: &mut R,
) -> Result<Outcome, SimulationError> {
    let known = KnownCards::try_new(Street::PreFlop, &hero.as_array(), &[])?;
    simulate_trial(&known, deck, EvalMode::WholeSet, rng)
}

/// One trial after the flop.
pub fn simulate_post_flop<R: Rng + ?Sized>(
    hero: &HoleCards,
    flop: &[Card; 3],
    deck: &Deck,
    rng: &mut R,
) -> Result<Outcome, SimulationError> {
    let known = KnownCards::try_new(Street::Flop, &hero.as_array(), flop)?;
    simulate_trial(&known, deck, EvalMode::WholeSet, rng)
}

/// One trial after the turn.
pub fn simulate_post_turn<R: Rng + ?Sized>(
    hero: &HoleCards,
    flop: &[Card; 3],
    turn: Card,
    deck: &Deck,
    rng: &mut R,
) -> Result<Outcome, SimulationError> {
    let board = [flop[0], flop[1], flop[2], turn];
    let known = KnownCards::try_new(Street::Turn, &hero.as_array(), &board)?;
    simulate_trial(&known, deck, EvalMode::WholeSet, rng)
}

/// One trial after the river; only the opponents' cards are random.
pub fn simulate_post_river<R: Rng + ?Sized>(
    hero: &HoleCards,
    flop: &[Card; 3],
    turn: Card,
    river: Card,
    deck: &Deck,
    rng: &mut R,
) -> Result<Outcome, SimulationError> {
    let board = [flop[0], flop[1], flop[2], turn, river];
    let known = KnownCards::try_new(Street::River, &hero.as_array(), &board)?;
    simulate_trial(&known, deck, EvalMode::WholeSet, rng)
}

/// Runs a whole request: a fixed budget of trials split across workers.
///
/// ```
/// use poker_odds::cards::parse_cards;
/// use poker_odds::config::SimulationConfig;
/// use poker_odds::hand::KnownCards;
/// use poker_odds::simulator::Simulator;
///
/// let hero = parse_cards("AS AH").unwrap();
/// let known = KnownCards::infer(&hero, &[]).unwrap();
/// let sim = Simulator::new(SimulationConfig::default().with_trials(2_000).with_seed(1));
/// let tally = sim.run_counts(&known).unwrap();
/// assert_eq!(tally.total(), 2_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Raw win/lose/tie counts; they always sum to the configured budget.
    pub fn run_counts(&self, known: &KnownCards) -> Result<Tally, SimulationError> {
        self.config.validate()?;
        let template = Deck::standard().residual(&known.all());
        let chunks = self.config.chunks();
        tracing::debug!(
            street = %known.street(),
            hero = %format_cards(&known.hole().as_array()),
            board = %format_cards(known.board()),
            trials = self.config.trials,
            workers = self.config.workers,
            chunks = chunks.len(),
            mode = %self.config.mode,
            "starting simulation"
        );

        let tally = run_chunks(known, &template, &self.config, &chunks)?;
        debug_assert_eq!(tally.total(), self.config.trials);
        tracing::debug!(win = tally.win, lose = tally.lose, tie = tally.tie, "simulation finished");
        Ok(tally)
    }

    /// Percentages of the budget won, lost and tied.
    pub fn run(&self, known: &KnownCards) -> Result<Odds, SimulationError> {
        Ok(self.run_counts(known)?.odds())
    }
}

/// Independent generator per chunk. Seeded runs give chunk `i` stream `i`
/// of the same key, so results depend neither on thread scheduling nor on
/// how many threads run the chunks.
fn chunk_rng(seed: Option<u64>, chunk: usize) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(chunk as u64);
            rng
        }
        None => ChaCha8Rng::from_os_rng(),
    }
}

fn run_chunk(
    known: &KnownCards,
    template: &Deck,
    mode: EvalMode,
    trials: u64,
    mut rng: ChaCha8Rng,
) -> Result<Tally, SimulationError> {
    let mut residual = template.clone();
    let mut tally = Tally::default();
    for _ in 0..trials {
        tally.record(deal(known, &mut residual, &mut rng)?.showdown(known.hole(), mode));
    }
    Ok(tally)
}

#[cfg(feature = "parallel")]
fn run_chunks(
    known: &KnownCards,
    template: &Deck,
    config: &SimulationConfig,
    chunks: &[u64],
) -> Result<Tally, SimulationError> {
    use rayon::prelude::*;

    let run = || {
        chunks
            .par_iter()
            .enumerate()
            .map(|(i, &n)| run_chunk(known, template, config.mode, n, chunk_rng(config.seed, i)))
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
    };

    match rayon::ThreadPoolBuilder::new().num_threads(config.workers).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(error = %e, "could not build a worker pool, using the global one");
            run()
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn run_chunks(
    known: &KnownCards,
    template: &Deck,
    config: &SimulationConfig,
    chunks: &[u64],
) -> Result<Tally, SimulationError> {
    chunks.iter().enumerate().try_fold(Tally::default(), |acc, (i, &n)| {
        let tally = run_chunk(known, template, config.mode, n, chunk_rng(config.seed, i))?;
        Ok(acc.merge(tally))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::DECK_SIZE;
    use std::collections::HashSet;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).expect("valid cards")
    }

    fn known(street: Street, hero: &str, board: &str) -> KnownCards {
        KnownCards::try_new(street, &cards(hero), &cards(board)).expect("valid known cards")
    }

    #[test]
    fn classify_checks_win_before_loss() {
        use Category::*;
        assert_eq!(Outcome::classify(Flush, [Pair, Straight]), Outcome::Win);
        assert_eq!(Outcome::classify(Pair, [HighCard, TwoPair]), Outcome::Loss);
        assert_eq!(Outcome::classify(Pair, [TwoPair, HighCard]), Outcome::Loss);
        assert_eq!(Outcome::classify(Pair, [Pair, HighCard]), Outcome::Tie);
        assert_eq!(Outcome::classify(Pair, [Pair, Pair]), Outcome::Tie);
    }

    #[test]
    fn tally_odds_are_percentages_of_total() {
        let tally = Tally { win: 1, lose: 1, tie: 2 };
        let odds = tally.odds();
        assert_eq!((odds.win, odds.lose, odds.tie), (25.0, 25.0, 50.0));
        assert_eq!(Tally::default().odds().win, 0.0);
        assert_eq!(tally.merge(tally).total(), 8);
    }

    #[test]
    fn deal_partitions_the_front_of_the_residual_deck() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for (street, board) in [
            (Street::PreFlop, ""),
            (Street::Flop, "KD QD 2C"),
            (Street::Turn, "KD QD 2C 7H"),
            (Street::River, "KD QD 2C 7H 9S"),
        ] {
            let k = known(street, "AS AH", board);
            let known_set: HashSet<Card> = k.all().into_iter().collect();
            let mut residual = Deck::standard().residual(&k.all());
            assert_eq!(residual.len(), DECK_SIZE - 2 - street.known_community());

            for _ in 0..200 {
                let d = deal(&k, &mut residual, &mut rng).unwrap();
                assert_eq!(d.board.len(), BOARD_SIZE);
                assert_eq!(&d.board[..street.known_community()], k.board());

                let drawn: Vec<Card> = d.board[street.known_community()..]
                    .iter()
                    .copied()
                    .chain(d.opponents.iter().flatten().copied())
                    .collect();
                assert_eq!(drawn.len(), street.to_deal() + 4);
                assert_eq!(drawn.iter().collect::<HashSet<_>>().len(), drawn.len());
                assert!(drawn.iter().all(|c| !known_set.contains(c)));
                assert_eq!(&residual.as_slice()[..drawn.len()], drawn.as_slice());
            }
        }
    }

    #[test]
    fn hands_are_hole_cards_plus_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let k = known(Street::Flop, "AS AH", "KD QD 2C");
        let mut residual = Deck::standard().residual(&k.all());
        let d = deal(&k, &mut residual, &mut rng).unwrap();
        let [hero, first, second] = d.hands(k.hole());
        assert_eq!(&hero[..2], &cards("AS AH")[..]);
        assert_eq!(&first[..2], &d.opponents[0][..]);
        assert_eq!(&second[..2], &d.opponents[1][..]);
        for hand in [&hero, &first, &second] {
            assert_eq!(hand.len(), 7);
            assert_eq!(&hand[2..], d.board.as_slice());
        }
    }

    #[test]
    fn street_entry_points_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let deck = Deck::standard();
        let hero: HoleCards = "AS KS".parse().unwrap();
        let flop = [cards("QS")[0], cards("JS")[0], cards("2D")[0]];
        let turn = cards("7C")[0];
        let river = cards("8H")[0];
        assert!(simulate_pre_flop(&hero, &deck, &mut rng).is_ok());
        assert!(simulate_post_flop(&hero, &flop, &deck, &mut rng).is_ok());
        assert!(simulate_post_turn(&hero, &flop, turn, &deck, &mut rng).is_ok());
        assert!(simulate_post_river(&hero, &flop, turn, river, &deck, &mut rng).is_ok());
    }

    #[test]
    fn entry_points_reject_overlapping_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let hero: HoleCards = "AS KS".parse().unwrap();
        let flop = [cards("AS")[0], cards("JS")[0], cards("2D")[0]];
        let err = simulate_post_flop(&hero, &flop, &Deck::standard(), &mut rng).unwrap_err();
        assert_eq!(err, SimulationError::Input(InputError::DuplicateCard(cards("AS")[0])));
    }

    #[test]
    fn short_deck_is_an_internal_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // keep only kings and aces
        let low: Vec<Card> = Deck::standard().as_slice()[..44].to_vec();
        let deck = Deck::standard().residual(&low);
        let hero: HoleCards = "AS AH".parse().unwrap();
        let err = simulate_pre_flop(&hero, &deck, &mut rng).unwrap_err();
        assert_eq!(err, SimulationError::DeckExhausted { needed: 9, available: 6 });
    }

    #[test]
    fn unbeatable_river_always_wins() {
        // seven suited cards in a row up to the ace: nobody else can reach this
        let k = known(Street::River, "AS KS", "QS JS TS 9S 8S");
        let sim = Simulator::new(SimulationConfig::default().with_trials(500).with_seed(9));
        assert_eq!(sim.run_counts(&k).unwrap(), Tally { win: 500, lose: 0, tie: 0 });
    }

    #[test]
    fn quads_on_board_always_tie() {
        let k = known(Street::River, "2C 7D", "AC AD AH AS KC");
        let sim = Simulator::new(SimulationConfig::default().with_trials(500).with_seed(9));
        assert_eq!(sim.run_counts(&k).unwrap(), Tally { win: 0, lose: 0, tie: 500 });
    }

    #[test]
    fn zero_budget_fails_before_any_trial() {
        let k = known(Street::PreFlop, "AS AH", "");
        let sim = Simulator::new(SimulationConfig::default().with_trials(0));
        assert_eq!(sim.run(&k).unwrap_err(), SimulationError::ZeroTrials);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let k = known(Street::Flop, "TH 9H", "8H 2C KD");
        let cfg = SimulationConfig::default().with_trials(3_000).with_seed(42).with_workers(3);
        let a = Simulator::new(cfg).run_counts(&k).unwrap();
        let b = Simulator::new(cfg).run_counts(&k).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total(), 3_000);
    }
}
