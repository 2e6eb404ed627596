//! The quiz evaluator shared by every topic page.

use std::collections::BTreeSet;

/// A quiz definition: the candidate statements and the author's correct
/// subset. `single_choice` quizzes render as a radio list but evaluate the
/// same way over one-element sets.
#[derive(Clone, Debug)]
pub struct Quiz {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: BTreeSet<String>,
    pub single_choice: bool,
}

impl Quiz {
    pub fn single(prompt: &str, options: &[&str], correct: &str) -> Self {
        Quiz {
            prompt: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct: BTreeSet::from([correct.to_string()]),
            single_choice: true,
        }
    }

    pub fn multi(prompt: &str, options: &[&str], correct: &[&str]) -> Self {
        Quiz {
            prompt: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct: correct.iter().map(|s| s.to_string()).collect(),
            single_choice: false,
        }
    }
}

/// Verdict of one submission. No partial credit: a superset or subset of
/// the correct set is incorrect, with the differences itemized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
    pub is_correct: bool,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// Exact-set comparison of a submission against the correct set.
pub fn evaluate(selected: &BTreeSet<String>, correct: &BTreeSet<String>) -> QuizResult {
    let missing: Vec<String> = correct.difference(selected).cloned().collect();
    let extra: Vec<String> = selected.difference(correct).cloned().collect();
    QuizResult {
        is_correct: missing.is_empty() && extra.is_empty(),
        missing,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_is_correct() {
        let r = evaluate(&set(&["a", "b"]), &set(&["b", "a"]));
        assert!(r.is_correct);
        assert!(r.missing.is_empty());
        assert!(r.extra.is_empty());
    }

    #[test]
    fn subset_is_incorrect_with_missing_itemized() {
        let r = evaluate(&set(&["a"]), &set(&["a", "b"]));
        assert!(!r.is_correct);
        assert_eq!(r.missing, vec!["b".to_string()]);
        assert!(r.extra.is_empty());
    }

    #[test]
    fn superset_is_incorrect_with_extra_itemized() {
        let r = evaluate(&set(&["a", "b", "c"]), &set(&["a", "b"]));
        assert!(!r.is_correct);
        assert!(r.missing.is_empty());
        assert_eq!(r.extra, vec!["c".to_string()]);
    }

    #[test]
    fn disjoint_selection_itemizes_both_sides() {
        let r = evaluate(&set(&["c"]), &set(&["a", "b"]));
        assert!(!r.is_correct);
        assert_eq!(r.missing, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(r.extra, vec!["c".to_string()]);
    }

    #[test]
    fn empty_selection_against_empty_correct_set() {
        let r = evaluate(&set(&[]), &set(&[]));
        assert!(r.is_correct);
    }
}
