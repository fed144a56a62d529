use std::fmt;

use serde::{Deserialize, Serialize};

/// Ground-truth rank category of a hand, as labelled by the dataset.
///
/// The VM never computes this value; it is supplied alongside every hand and
/// organisms are scored by how often their verdict matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Category(u8);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid category, must be in [0, 9] but was {_0}")]
pub struct InvalidCategoryError(#[error(not(source))] pub u8);

impl Category {
    /// Number of distinct categories.
    pub const LEN: usize = 10;

    const NAMES: [&'static str; Self::LEN] = [
        "nothing",
        "one pair",
        "two pairs",
        "three of a kind",
        "straight",
        "flush",
        "full house",
        "four of a kind",
        "straight flush",
        "royal flush",
    ];

    pub fn new(index: u8) -> Result<Self, InvalidCategoryError> {
        if usize::from(index) < Self::LEN {
            Ok(Self(index))
        } else {
            Err(InvalidCategoryError(index))
        }
    }

    /// All categories in index order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Category> {
        (0..Self::LEN).map(|i| Category(i as u8))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }

    /// Returns `true` if a VM verdict names this category.
    #[must_use]
    pub fn matches(self, verdict: i8) -> bool {
        i16::from(verdict) == i16::from(self.0)
    }
}

impl TryFrom<u8> for Category {
    type Error = InvalidCategoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Category::new(value)
    }
}

impl From<Category> for u8 {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}
