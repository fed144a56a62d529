use std::fmt;

use serde::{Deserialize, Serialize};

/// Suit of a playing card.
///
/// The numeric values follow the encoding of the hand dataset (1 = hearts,
/// 2 = spades, 3 = diamonds, 4 = clubs) and are what the VM observes when it
/// reads a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Hearts = 1,
    Spades = 2,
    Diamonds = 3,
    Clubs = 4,
}

impl Suit {
    pub const LEN: usize = 4;

    pub const ALL: [Suit; Self::LEN] = [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs];

    /// Looks up a suit by its dataset number.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Diamonds),
            4 => Some(Suit::Clubs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CardError {
    #[display("invalid rank, must be in [1, 13] but was {_0}")]
    InvalidRank(#[error(not(source))] u8),
    #[display("invalid suit number, must be in [1, 4] but was {_0}")]
    InvalidSuit(#[error(not(source))] u8),
}

/// A single playing card.
///
/// Ranks run from 1 (ace) to 13 (king). Cards are validated on construction
/// and immutable afterwards.
///
/// # Example
///
/// ```
/// use pokerga_engine::{Card, Suit};
///
/// let card = Card::new(12, Suit::Hearts).unwrap();
/// assert_eq!(card.to_string(), "QH");
/// assert!(Card::new(14, Suit::Hearts).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard", into = "RawCard")]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 13;

    pub fn new(rank: u8, suit: Suit) -> Result<Self, CardError> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return Err(CardError::InvalidRank(rank));
        }
        Ok(Self { rank, suit })
    }

    /// Builds a card from the dataset's numeric `(rank, suit)` pair.
    pub fn from_numbers(rank: u8, suit: u8) -> Result<Self, CardError> {
        let suit = Suit::from_number(suit).ok_or(CardError::InvalidSuit(suit))?;
        Self::new(rank, suit)
    }

    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            1 => write!(f, "A")?,
            11 => write!(f, "J")?,
            12 => write!(f, "Q")?,
            13 => write!(f, "K")?,
            n => write!(f, "{n}")?,
        }
        write!(f, "{}", self.suit.as_char())
    }
}

#[derive(Serialize, Deserialize)]
struct RawCard {
    rank: u8,
    suit: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = CardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::from_numbers(raw.rank, raw.suit)
    }
}

impl From<Card> for RawCard {
    fn from(card: Card) -> Self {
        RawCard {
            rank: card.rank,
            suit: card.suit.number(),
        }
    }
}
