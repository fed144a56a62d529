use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("chromosome contains a non-ASCII character at byte {position}")]
pub struct ChromosomeError {
    pub position: usize,
}

/// The bytecode program carried by an organism.
///
/// A chromosome is a string of hex digits, but its content is deliberately
/// not validated beyond being ASCII: any other character is skipped by the
/// interpreter, and out-of-table digits decode to no-ops. Restricting the
/// content to ASCII keeps every byte offset a character boundary, so genetic
/// operators can cut and splice chromosomes at arbitrary positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Chromosome(String);

impl Chromosome {
    /// Uppercase hex digits, the alphabet used when generating and mutating genes.
    pub const GENE_ALPHABET: &'static [u8; 16] = b"0123456789ABCDEF";

    pub fn new<S>(value: S) -> Result<Self, ChromosomeError>
    where
        S: Into<String>,
    {
        let value = value.into();
        if let Some(position) = value.bytes().position(|b| !b.is_ascii()) {
            return Err(ChromosomeError { position });
        }
        Ok(Self(value))
    }

    /// Builds a chromosome of uppercase hex digits from nibble values.
    ///
    /// Only the low four bits of each value are used.
    ///
    /// ```
    /// use pokerga_engine::Chromosome;
    ///
    /// let chromosome = Chromosome::from_nibbles([0x0, 0xA, 0x1F]);
    /// assert_eq!(chromosome.as_str(), "0AF");
    /// ```
    #[must_use]
    pub fn from_nibbles<I>(nibbles: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self(
            nibbles
                .into_iter()
                .map(|n| char::from(Self::GENE_ALPHABET[usize::from(n & 0xF)]))
                .collect(),
        )
    }

    /// Builds a chromosome from raw bytes, as produced by genetic operators.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ChromosomeError> {
        if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(ChromosomeError { position });
        }
        // ASCII is always valid UTF-8
        String::from_utf8(bytes)
            .map(Self)
            .map_err(|e| ChromosomeError {
                position: e.utf8_error().valid_up_to(),
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Chromosome {
    type Error = ChromosomeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Chromosome::new(value)
    }
}

impl From<Chromosome> for String {
    fn from(value: Chromosome) -> Self {
        value.0
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate solution: a unique name plus the chromosome it is judged by.
///
/// Organisms are immutable. Genetic operators never edit one in place; they
/// produce new chromosomes which are wrapped into brand-new organisms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organism {
    name: String,
    chromosome: Chromosome,
}

impl Organism {
    /// Number of chromosome characters shown by [`Display`](fmt::Display).
    const PREVIEW_LEN: usize = 16;

    #[must_use]
    pub fn new(name: String, chromosome: Chromosome) -> Self {
        Self { name, chromosome }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genes = self.chromosome.as_str();
        if genes.len() <= Self::PREVIEW_LEN {
            write!(f, "Organism[{}] {genes}", self.name)
        } else {
            write!(
                f,
                "Organism[{}] {}[...]",
                self.name,
                &genes[..Self::PREVIEW_LEN]
            )
        }
    }
}
