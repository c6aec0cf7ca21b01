use poker_odds::cards::{parse_cards, Card};
use poker_odds::deck::{Deck, DECK_SIZE};
use poker_odds::hand::{KnownCards, Street};
use poker_odds::simulator::deal;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

fn known(street: Street, hero: &str, board: &str) -> KnownCards {
    KnownCards::try_new(street, &parse_cards(hero).unwrap(), &parse_cards(board).unwrap()).unwrap()
}

#[test]
fn residual_size_matches_street() {
    for (street, board) in [
        (Street::PreFlop, ""),
        (Street::Flop, "2C 3C 4C"),
        (Street::Turn, "2C 3C 4C 5C"),
        (Street::River, "2C 3C 4C 5C 6C"),
    ] {
        let k = known(street, "AS KD", board);
        let residual = Deck::standard().residual(&k.all());
        assert_eq!(residual.len(), DECK_SIZE - (2 + street.known_community()));
    }
    let sizes: Vec<usize> = [
        known(Street::PreFlop, "AS KD", ""),
        known(Street::Flop, "AS KD", "2C 3C 4C"),
        known(Street::Turn, "AS KD", "2C 3C 4C 5C"),
        known(Street::River, "AS KD", "2C 3C 4C 5C 6C"),
    ]
    .iter()
    .map(|k| Deck::standard().residual(&k.all()).len())
    .collect();
    assert_eq!(sizes, vec![50, 47, 46, 45]);
}

#[test]
fn drawn_cards_never_include_known_cards() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let k = known(Street::Turn, "AS KD", "QH JC TD 9S");
    let known_set: HashSet<Card> = k.all().into_iter().collect();
    let mut residual = Deck::standard().residual(&k.all());
    for _ in 0..5_000 {
        let d = deal(&k, &mut residual, &mut rng).unwrap();
        let drawn = d.board[4..].iter().chain(d.opponents.iter().flatten());
        for card in drawn {
            assert!(!known_set.contains(card), "dealt known card {card}");
        }
    }
}

/// Chi-square statistic of observed counts against a uniform expectation.
fn chi_square(counts: &[u64], expected: f64) -> f64 {
    counts.iter().map(|&o| (o as f64 - expected).powi(2) / expected).sum()
}

#[test]
fn shuffle_puts_every_card_in_every_position_uniformly() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let base = Deck::standard().residual(&parse_cards("AS KD QH JC TD 9S 8H").unwrap());
    let n = base.len();
    assert_eq!(n, 45);

    let index: HashMap<Card, usize> = base.as_slice().iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let rounds = 1_000 * n as u64;
    // counts[position][card]
    let mut counts = vec![vec![0u64; n]; n];
    let mut deck = base.clone();
    for _ in 0..rounds {
        deck.shuffle_with(&mut rng);
        for (pos, card) in deck.as_slice().iter().enumerate() {
            counts[pos][index[card]] += 1;
        }
    }

    // 44 degrees of freedom: mean 44, sd ~9.4. 110 is ~7 sd out, so a correct
    // shuffle essentially never trips it while a sort-by-random-comparator one does.
    let expected = rounds as f64 / n as f64;
    for (pos, row) in counts.iter().enumerate() {
        let stat = chi_square(row, expected);
        assert!(stat < 110.0, "position {pos}: chi-square {stat:.1}");
    }
}
