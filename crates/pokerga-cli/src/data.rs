use std::{
    fs::File,
    io::{self, BufRead as _, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, ensure};
use pokerga_engine::{Hand, HandParseError};
use pokerga_evaluator::HandSource;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum HandReadError {
    #[display("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[display("{}:{line}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        source: HandParseError,
    },
}

/// Reads hands from a CSV file, one canonical hand encoding per line.
///
/// Blank lines are skipped. The file is re-read on every call to
/// [`HandSource::read_hands`], and reading stops after `max_hands` hands
/// (`0` reads the whole file).
#[derive(Debug, Clone)]
pub struct HandReader {
    path: PathBuf,
    max_hands: usize,
}

impl HandReader {
    pub fn open<P>(path: P, max_hands: usize) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let metadata = path
            .metadata()
            .with_context(|| format!("Failed to access hand file: {}", path.display()))?;
        ensure!(
            metadata.is_file(),
            "Hand file is not a regular file: {}",
            path.display()
        );
        Ok(Self {
            path: path.to_owned(),
            max_hands,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    fn read_all(&self) -> Result<Vec<Hand>, HandReadError> {
        let mut hands = vec![];
        self.read_hands(&mut |hand| hands.push(hand))?;
        Ok(hands)
    }

    fn io_error(&self, source: io::Error) -> HandReadError {
        HandReadError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HandSource for HandReader {
    type Error = HandReadError;

    fn read_hands(&self, sink: &mut dyn FnMut(Hand)) -> Result<(), Self::Error> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut count = 0;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            if self.max_hands > 0 && count >= self.max_hands {
                break;
            }
            let line = line.map_err(|e| self.io_error(e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let hand = line.parse().map_err(|source| HandReadError::Parse {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
            sink(hand);
            count += 1;
        }
        tracing::trace!(count, path = %self.path.display(), "hands read");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_hands(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const DATA: &str = "\
1,1,2,2,3,3,4,4,6,1,0

1,1,1,2,3,3,4,4,6,1,1
  10,1,11,1,12,1,13,1,1,1,9  
";

    #[test]
    fn test_reads_and_skips_blank_lines() {
        let file = write_hands(DATA);
        let hands = HandReader::open(file.path(), 0).unwrap().read_all().unwrap();
        let categories = hands
            .iter()
            .map(|h| h.category().value())
            .collect::<Vec<_>>();
        assert_eq!(categories, [0, 1, 9]);
    }

    #[test]
    fn test_max_hands() {
        let file = write_hands(DATA);
        let reader = HandReader::open(file.path(), 2).unwrap();
        assert_eq!(reader.read_all().unwrap().len(), 2);
        // re-readable
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_reports_line_of_bad_hand() {
        let file = write_hands("1,1,2,2,3,3,4,4,6,1,0\n1,1,1,1,3,3,4,4,6,1,1\n");
        let err = HandReader::open(file.path(), 0)
            .unwrap()
            .read_all()
            .unwrap_err();
        match err {
            HandReadError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HandReader::open(dir.path().join("missing.csv"), 0).is_err());
        assert!(HandReader::open(dir.path(), 0).is_err());
    }
}
