use pokerga_evaluator::ScoredResult;

use super::Filter;

/// Drops results whose correctness vector equals that of the result right
/// before them in the ranking.
///
/// Organisms with identical per-category hit counts are very likely
/// behavioral clones. Of a run of such neighbors only the first, best-ranked
/// one is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateEliminator;

impl Filter for DuplicateEliminator {
    fn filter<'a>(&self, results: Vec<&'a ScoredResult>) -> Vec<&'a ScoredResult> {
        let mut kept = Vec::with_capacity(results.len());
        let mut previous: Option<&ScoredResult> = None;
        for result in results {
            if previous.is_none_or(|p| p.correct() != result.correct()) {
                kept.push(result);
            }
            previous = Some(result);
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::test_support::scored;

    #[test]
    fn test_keeps_first_of_each_run() {
        let results = [
            scored(0, &[3, 1]),
            scored(1, &[3, 1]),
            scored(2, &[3, 1]),
            scored(3, &[2, 2]),
            scored(4, &[3, 1]),
            scored(5, &[0, 0]),
        ];
        let kept = DuplicateEliminator
            .filter(results.iter().collect())
            .into_iter()
            .map(|r| r.organism().name())
            .collect::<Vec<_>>();
        assert_eq!(kept, ["00000000", "00000003", "00000004", "00000005"]);
    }

    #[test]
    fn test_empty() {
        assert!(DuplicateEliminator.filter(vec![]).is_empty());
    }
}
