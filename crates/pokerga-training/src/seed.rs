use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid seed: expected 32 hex digits, got {actual} characters")]
    InvalidLength { actual: usize },
    #[display("invalid seed: {value:?} is not a hex number")]
    InvalidDigit { value: String },
}

/// A 128-bit seed that makes a training run reproducible.
///
/// All randomness of a run (initial population, selection, crossover,
/// mutation and padding) is drawn from one [`Pcg32`] created by
/// [`rng`](Self::rng). Seeds are written as 32 hex digits.
///
/// ```
/// use pokerga_training::Seed;
/// use rand::Rng as _;
///
/// let seed: Seed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
///
/// let a: u32 = seed.rng().random();
/// let b: u32 = seed.rng().random();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 16]);

impl Seed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for Seed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::InvalidLength { actual: s.len() });
        }
        // from_str_radix would accept a leading sign
        let num = s
            .chars()
            .try_fold(0_u128, |acc, c| Some((acc << 4) | u128::from(c.to_digit(16)?)))
            .ok_or_else(|| SeedParseError::InvalidDigit {
                value: s.to_owned(),
            })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        Seed(seed)
    }
}
