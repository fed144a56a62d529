use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Card, CardError, Category, InvalidCategoryError};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HandError {
    #[display("card {_0} appears more than once in the hand")]
    DuplicateCard(#[error(not(source))] Card),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HandParseError {
    #[display("expected {expected} comma-separated fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[display("field #{index} is not a number: {value:?}")]
    NotANumber { index: usize, value: String },
    #[display("invalid card at position {index}: {source}")]
    Card { index: usize, source: CardError },
    #[display("{_0}")]
    Category(InvalidCategoryError),
    #[display("{_0}")]
    Hand(HandError),
}

/// A five-card evaluation sample with its ground-truth category.
///
/// Card order is preserved exactly as supplied: the VM addresses cards by
/// their index 0..5.
///
/// # Canonical Encoding
///
/// Hands are exchanged as a single line of eleven integers:
///
/// ```text
/// rank1,suit1,rank2,suit2,rank3,suit3,rank4,suit4,rank5,suit5,category
/// ```
///
/// ```
/// use pokerga_engine::Hand;
///
/// let hand: Hand = "5,1,7,3,7,4,8,4,9,2,6".parse().unwrap();
/// assert_eq!(hand.cards()[0].rank(), 5);
/// assert_eq!(hand.category().value(), 6);
/// assert_eq!(hand.to_string(), "5,1,7,3,7,4,8,4,9,2,6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHand", into = "RawHand")]
pub struct Hand {
    cards: [Card; Hand::LEN],
    category: Category,
}

impl Hand {
    /// Number of cards in every hand.
    pub const LEN: usize = 5;

    const FIELD_COUNT: usize = Self::LEN * 2 + 1;

    pub fn new(cards: [Card; Self::LEN], category: Category) -> Result<Self, HandError> {
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(HandError::DuplicateCard(*card));
            }
        }
        Ok(Self { cards, category })
    }

    #[must_use]
    pub fn cards(&self) -> &[Card; Self::LEN] {
        &self.cards
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the card at `index`, wrapping indices beyond the hand size.
    #[must_use]
    pub fn card_wrapping(&self, index: usize) -> &Card {
        &self.cards[index % Self::LEN]
    }

    /// Counts the cards of the given rank.
    #[must_use]
    pub fn count_rank(&self, rank: u8) -> usize {
        self.cards.iter().filter(|c| c.rank() == rank).count()
    }

    /// Counts the cards whose suit has the given dataset number.
    #[must_use]
    pub fn count_suit(&self, suit: u8) -> usize {
        self.cards
            .iter()
            .filter(|c| c.suit().number() == suit)
            .count()
    }
}

impl FromStr for Hand {
    type Err = HandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.trim().split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() != Self::FIELD_COUNT {
            return Err(HandParseError::FieldCount {
                expected: Self::FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let mut numbers = [0u8; Self::FIELD_COUNT];
        for (index, (field, number)) in fields.iter().zip(&mut numbers).enumerate() {
            *number = field.parse().map_err(|_| HandParseError::NotANumber {
                index,
                value: (*field).to_owned(),
            })?;
        }

        let [c0, c1, c2, c3, c4] = [0, 1, 2, 3, 4].map(|index| {
            Card::from_numbers(numbers[index * 2], numbers[index * 2 + 1])
                .map_err(|source| HandParseError::Card { index, source })
        });
        let cards = [c0?, c1?, c2?, c3?, c4?];
        let category = Category::new(numbers[Self::LEN * 2]).map_err(HandParseError::Category)?;

        Hand::new(cards, category).map_err(HandParseError::Hand)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{},{},", card.rank(), card.suit().number())?;
        }
        write!(f, "{}", self.category.value())
    }
}

#[derive(Serialize, Deserialize)]
struct RawHand {
    cards: [Card; Hand::LEN],
    category: Category,
}

impl TryFrom<RawHand> for Hand {
    type Error = HandError;

    fn try_from(raw: RawHand) -> Result<Self, Self::Error> {
        Hand::new(raw.cards, raw.category)
    }
}

impl From<Hand> for RawHand {
    fn from(hand: Hand) -> Self {
        RawHand {
            cards: hand.cards,
            category: hand.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).unwrap()
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let cards = [
            card(5, Suit::Hearts),
            card(7, Suit::Diamonds),
            card(5, Suit::Hearts),
            card(8, Suit::Clubs),
            card(9, Suit::Spades),
        ];
        let category = Category::new(1).unwrap();
        assert_eq!(
            Hand::new(cards, category),
            Err(HandError::DuplicateCard(card(5, Suit::Hearts)))
        );
    }

    #[test]
    fn test_parse_and_counts() {
        let hand: Hand = "5,1,7,3,7,4,8,4,9,2,6".parse().unwrap();
        assert_eq!(hand.cards()[2], card(7, Suit::Clubs));
        assert_eq!(hand.count_rank(7), 2);
        assert_eq!(hand.count_rank(1), 0);
        assert_eq!(hand.count_suit(Suit::Clubs.number()), 2);
        assert_eq!(hand.card_wrapping(7), &hand.cards()[2]);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let hand: Hand = " 1,1, 10,1,11,1,12,1,13,1,9 \n".parse().unwrap();
        assert_eq!(hand.category().value(), 9);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1,1,2,2".parse::<Hand>(),
            Err(HandParseError::FieldCount {
                expected: 11,
                actual: 4
            })
        );
        assert!(matches!(
            "x,1,2,2,3,3,4,4,5,1,0".parse::<Hand>(),
            Err(HandParseError::NotANumber { index: 0, .. })
        ));
        assert!(matches!(
            "1,1,2,2,3,3,4,4,14,1,0".parse::<Hand>(),
            Err(HandParseError::Card { index: 4, .. })
        ));
        assert!(matches!(
            "1,1,2,2,3,3,4,4,5,1,10".parse::<Hand>(),
            Err(HandParseError::Category(_))
        ));
        assert!(matches!(
            "1,1,1,1,3,3,4,4,5,1,0".parse::<Hand>(),
            Err(HandParseError::Hand(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let hand: Hand = "5,1,7,3,7,4,8,4,9,2,6".parse().unwrap();
        let json = serde_json::to_string(&hand).unwrap();
        assert_eq!(serde_json::from_str::<Hand>(&json).unwrap(), hand);
    }
}
