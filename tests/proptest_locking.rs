/// Property-based tests for the locking discipline of a replacement pass.
use locksub::{Pass, Rule, RuleOutcome, RuleTable, replace, replace_traced};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    "[ab ]{0,24}"
}

fn rule_strategy() -> impl Strategy<Value = (String, String)> {
    ("[ab]{1,3}", "[abXY]{0,4}")
}

fn rules_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(rule_strategy(), 1..8)
}

fn build(pairs: &[(String, String)]) -> Vec<Rule> {
    pairs
        .iter()
        .map(|(p, r)| Rule::literal(p, r).unwrap())
        .collect()
}

/// Snapshot of every locked position with the character it denotes.
fn locked(pass: &Pass) -> Vec<(usize, char)> {
    pass.locks()
        .iter()
        .map(|p| (p, pass.char_at(p).unwrap()))
        .collect()
}

proptest! {
    /// Locked characters survive every later rule unchanged, at positions
    /// shifted by exactly the length delta of edits made before them.
    #[test]
    fn locked_text_is_never_rewritten(input in text_strategy(), pairs in rules_strategy()) {
        let mut pass = Pass::new(&input);
        for rule in build(&pairs) {
            let before = locked(&pass);
            let outcome = pass.apply(&rule);
            let after = locked(&pass);

            let remapped: Vec<(usize, char)> = match outcome {
                RuleOutcome::Applied { start, matched_len, .. } => {
                    let delta = outcome.length_delta();
                    before
                        .iter()
                        .map(|&(p, c)| {
                            prop_assert!(p < start || p >= start + matched_len);
                            let moved = if p < start { p } else { p.checked_add_signed(delta).unwrap() };
                            Ok((moved, c))
                        })
                        .collect::<Result<_, TestCaseError>>()?
                }
                _ => before.clone(),
            };
            for entry in &remapped {
                prop_assert!(after.contains(entry), "lost {:?}", entry);
            }
        }
    }

    /// Every locked position lies inside the current text.
    #[test]
    fn locks_stay_in_bounds(input in text_strategy(), pairs in rules_strategy()) {
        let mut pass = Pass::new(&input);
        for rule in build(&pairs) {
            pass.apply(&rule);
            prop_assert!(pass.locks().iter().all(|p| p < pass.len_chars()));
        }
    }

    /// Rules that do not fire leave the text and the locks alone.
    #[test]
    fn skipped_rules_change_nothing(input in text_strategy(), pairs in rules_strategy()) {
        let mut pass = Pass::new(&input);
        for rule in build(&pairs) {
            let text_before = pass.to_string();
            let locks_before = pass.locks().clone();
            if !pass.apply(&rule).is_applied() {
                prop_assert_eq!(pass.to_string(), text_before);
                prop_assert_eq!(pass.locks(), &locks_before);
            }
        }
    }

    /// Applied rules lock exactly their replacement text.
    #[test]
    fn applied_rules_lock_their_replacement(input in text_strategy(), pairs in rules_strategy()) {
        let mut pass = Pass::new(&input);
        for rule in build(&pairs) {
            if let RuleOutcome::Applied { start, replacement_len, .. } = pass.apply(&rule) {
                let inserted: String = (start..start + replacement_len)
                    .map(|p| pass.char_at(p).unwrap())
                    .collect();
                prop_assert_eq!(inserted.as_str(), rule.replacement());
                prop_assert!((start..start + replacement_len).all(|p| pass.locks().contains(p)));
            }
        }
    }

    /// The traced and untraced entry points agree.
    #[test]
    fn traced_matches_plain(input in text_strategy(), pairs in rules_strategy()) {
        let rules = RuleTable::new(build(&pairs));
        let traced = replace_traced(&input, &rules);
        prop_assert_eq!(traced.outcomes.len(), rules.len());
        prop_assert_eq!(traced.output, replace(&input, &rules));
    }
}
