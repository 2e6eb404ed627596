//! The quiz evaluator contract: exact set equality, itemized differences,
//! no partial credit.

use std::collections::BTreeSet;

use sqltutor::quiz::{evaluate, Quiz};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn correctness_is_exact_set_equality() {
    let correct = set(&["A view is a virtual table.", "Views can enhance security."]);
    assert!(evaluate(&correct, &correct).is_correct);
    assert!(!evaluate(&set(&["A view is a virtual table."]), &correct).is_correct);
    assert!(
        !evaluate(
            &set(&[
                "A view is a virtual table.",
                "Views can enhance security.",
                "Views always improve query performance.",
            ]),
            &correct
        )
        .is_correct
    );
}

#[test]
fn differences_are_itemized_both_ways() {
    let correct = set(&["COMMIT makes changes permanent.", "SAVEPOINT allows rolling back to intermediate states."]);
    let selected = set(&["COMMIT makes changes permanent.", "Read Uncommitted is the highest isolation level."]);
    let result = evaluate(&selected, &correct);
    assert!(!result.is_correct);
    assert_eq!(
        result.missing,
        vec!["SAVEPOINT allows rolling back to intermediate states.".to_string()]
    );
    assert_eq!(
        result.extra,
        vec!["Read Uncommitted is the highest isolation level.".to_string()]
    );
}

#[test]
fn missing_and_extra_are_empty_iff_correct() {
    let correct = set(&["2NF"]);
    for selection in [set(&[]), set(&["1NF"]), set(&["2NF", "3NF"]), set(&["2NF"])] {
        let result = evaluate(&selection, &correct);
        assert_eq!(
            result.is_correct,
            result.missing.is_empty() && result.extra.is_empty()
        );
        assert_eq!(result.is_correct, selection == correct);
    }
}

#[test]
fn single_choice_quizzes_evaluate_over_one_element_sets() {
    let quiz = Quiz::single(
        "Which SQL clause is used to filter rows based on conditions?",
        &["SELECT", "WHERE", "DISTINCT", "LIMIT"],
        "WHERE",
    );
    assert!(quiz.single_choice);
    assert!(evaluate(&set(&["WHERE"]), &quiz.correct).is_correct);
    let wrong = evaluate(&set(&["SELECT"]), &quiz.correct);
    assert!(!wrong.is_correct);
    assert_eq!(wrong.missing, vec!["WHERE".to_string()]);
    assert_eq!(wrong.extra, vec!["SELECT".to_string()]);
}
