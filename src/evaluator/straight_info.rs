use super::MADE_HAND_LEN;
use crate::cards::Rank;

/// Whether the whole hand forms one unbroken run of ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    /// Highest rank of the run; an Ace played low does not count.
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    const NONE: StraightInfo = StraightInfo { is_straight: false, top_rank: None };

    /// Detect a straight over every rank given, in any order.
    ///
    /// Every card has to take part: a 7-card hand is only a straight when all
    /// seven ranks are consecutive. The Ace may also play low, directly below
    /// the Two (A-2-3-4-5).
    pub fn detect(ranks: &[Rank]) -> Self {
        if ranks.len() < MADE_HAND_LEN {
            return Self::NONE;
        }
        let mut sorted = ranks.to_vec();
        sorted.sort_unstable();

        let consecutive = |xs: &[Rank]| xs.windows(2).all(|w| w[1].value() == w[0].value() + 1);

        if consecutive(sorted.as_slice()) {
            return StraightInfo { is_straight: true, top_rank: sorted.last().copied() };
        }

        // Ace-low: lift the Ace below the Two, the rest must climb from Two
        let Some((last, rest)) = sorted.split_last() else {
            return Self::NONE;
        };
        if *last == Rank::Ace && rest.first() == Some(&Rank::Two) && consecutive(rest) {
            return StraightInfo { is_straight: true, top_rank: rest.last().copied() };
        }

        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_straight() {
        let info = StraightInfo::detect(&[Rank::King, Rank::Queen, Rank::Jack, Rank::Ten, Rank::Nine]);
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::King));
    }

    #[test]
    fn test_ace_high_straight() {
        let info = StraightInfo::detect(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]);
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::Ace));
    }

    #[test]
    fn test_ace_low() {
        let info = StraightInfo::detect(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::Five));
    }

    #[test]
    fn test_seven_card_runs() {
        let seven = [
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
        ];
        assert!(StraightInfo::detect(&seven).is_straight);

        let ace_low = [
            Rank::Seven,
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
        ];
        let info = StraightInfo::detect(&ace_low);
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::Seven));
    }

    #[test]
    fn test_run_inside_a_larger_hand_is_not_a_straight() {
        let ranks = [
            Rank::Two,
            Rank::Three,
            Rank::Five,
            Rank::Seven,
            Rank::Nine,
            Rank::Four,
            Rank::Six,
        ];
        assert!(!StraightInfo::detect(&ranks).is_straight);
    }

    #[test]
    fn test_not_straight_pair() {
        let info = StraightInfo::detect(&[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]);
        assert!(!info.is_straight);
        assert_eq!(info.top_rank, None);
    }

    #[test]
    fn test_short_hands_are_never_straights() {
        assert!(!StraightInfo::detect(&[Rank::Two, Rank::Three, Rank::Four]).is_straight);
        assert!(!StraightInfo::detect(&[Rank::Ace]).is_straight);
    }
}
