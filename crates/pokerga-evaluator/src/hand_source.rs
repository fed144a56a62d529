//! The contract between the evaluation pipeline and hand datasets.

use std::convert::Infallible;

use pokerga_engine::Hand;

/// A re-readable supply of evaluation hands.
///
/// The pipeline reads the full source once per generation. Hands are pushed
/// into `sink` one at a time as they are produced, so a source never has to
/// hold the whole dataset in memory. Truncating a dataset (for example to a
/// maximum number of hands) is the source's business, not the pipeline's.
pub trait HandSource {
    type Error;

    /// Feeds every hand of the dataset to `sink`, in dataset order.
    fn read_hands(&self, sink: &mut dyn FnMut(Hand)) -> Result<(), Self::Error>;
}

impl HandSource for [Hand] {
    type Error = Infallible;

    fn read_hands(&self, sink: &mut dyn FnMut(Hand)) -> Result<(), Self::Error> {
        for hand in self {
            sink(hand.clone());
        }
        Ok(())
    }
}

impl HandSource for Vec<Hand> {
    type Error = Infallible;

    fn read_hands(&self, sink: &mut dyn FnMut(Hand)) -> Result<(), Self::Error> {
        self.as_slice().read_hands(sink)
    }
}

impl<S> HandSource for &S
where
    S: HandSource + ?Sized,
{
    type Error = S::Error;

    fn read_hands(&self, sink: &mut dyn FnMut(Hand)) -> Result<(), Self::Error> {
        (**self).read_hands(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_preserves_order() {
        let hands = ["1,1,2,2,3,3,4,4,6,1,0", "5,1,5,2,9,3,10,4,12,1,1"]
            .map(|line| line.parse::<Hand>().unwrap())
            .to_vec();
        let mut seen = vec![];
        hands.read_hands(&mut |hand| seen.push(hand)).unwrap();
        assert_eq!(seen, hands);

        // re-readable
        let mut count = 0;
        (&hands).read_hands(&mut |_| count += 1).unwrap();
        assert_eq!(count, 2);
    }
}
