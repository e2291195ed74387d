use std::collections::BTreeMap;

/// The options a user picked during one attempt, keyed by question index.
///
/// Indexes never selected read back as unanswered, so an empty map is a
/// valid input to scoring for a set of any size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    answers: BTreeMap<usize, usize>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    pub fn select(&mut self, question: usize, option: usize) {
        self.answers.insert(question, option);
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.answers.contains_key(&question)
    }

    /// Number of questions that have a selection.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

impl FromIterator<(usize, usize)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(usize, usize); N]> for AnswerMap {
    fn from(pairs: [(usize, usize); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Positional form: slot `i` holds the choice for question `i`.
impl From<Vec<Option<usize>>> for AnswerMap {
    fn from(answers: Vec<Option<usize>>) -> Self {
        answers
            .into_iter()
            .enumerate()
            .filter_map(|(question, option)| option.map(|option| (question, option)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites() {
        let mut map = AnswerMap::new();
        map.select(3, 1);
        assert_eq!(map.get(3), Some(1));
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(10), None);

        map.select(3, 0);
        assert_eq!(map.get(3), Some(0));
        assert_eq!(map.answered_count(), 1);
    }

    #[test]
    fn test_sparse_keys_stay_small() {
        let map = AnswerMap::from([(usize::MAX, 0), (1 << 40, 2)]);
        assert_eq!(map.answered_count(), 2);
        assert_eq!(map.get(usize::MAX), Some(0));
        assert!(!map.is_answered(0));
    }

    #[test]
    fn test_from_positional_list() {
        let map = AnswerMap::from(vec![Some(1), None, Some(0)]);
        assert_eq!(map.answered_count(), 2);
        assert_eq!(map.get(2), Some(0));
        assert!(!map.is_answered(1));
    }
}
