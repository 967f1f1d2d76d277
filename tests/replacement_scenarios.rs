use std::io::Write;

use locksub::reference::{REFERENCE_EXPECTED, REFERENCE_INPUT};
use locksub::{Rule, RuleOutcome, RuleTable, load_rules, parse_rules, reference, replace, replace_traced};

fn table(pairs: &[(&str, &str)]) -> RuleTable {
    RuleTable::from_pairs(pairs.iter().copied()).unwrap()
}

#[test]
fn non_overlapping_rules_each_replace_one_token() {
    let rules = table(&[
        ("John", "Freddy"),
        ("dog", "cat"),
        ("whenever", "sometimes, when"),
        ("raining", "snowing"),
        ("his", "many"),
    ]);
    let traced = replace_traced("John walks his brown dog whenever it's raining", &rules);
    assert_eq!(
        traced.output,
        "Freddy walks many brown cat sometimes, when it's snowing"
    );
    assert!(traced.outcomes.iter().all(RuleOutcome::is_applied));
}

#[test]
fn rule_matching_earlier_output_is_skipped() {
    let rules = table(&[("John", "Freddy"), ("John walks", "Freddy runs")]);
    assert_eq!(replace("John walks", &rules), "Freddy walks");
}

#[test]
fn reference_scenario() {
    let rules = reference::rules().unwrap();
    assert_eq!(replace(REFERENCE_INPUT, &rules), REFERENCE_EXPECTED);
}

#[test]
fn reference_scenario_from_a_rule_file() {
    let text = "\
! the reference rules, one per line
/John/Freddy/
/John walks/Freddy runs/
/brown dog/gray dog/
/dog/cat/
/- not -/(not)/
/(//
/)//
/whenever/sometimes, when/
/raining/snowing/
/his/many/
";
    let rules = parse_rules(text).unwrap();
    assert_eq!(rules.len(), 10);
    assert_eq!(replace(REFERENCE_INPUT, &rules), REFERENCE_EXPECTED);
}

#[test]
fn rule_file_on_disk() {
    let path = std::env::temp_dir().join(format!("locksub-rules-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "|cat|dog|").unwrap();
    writeln!(file, "`,\"dog\",\" house\"`kennel`").unwrap();
    drop(file);

    let rules = load_rules(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    // "cat" becomes a locked "dog"; the structured rule's first match is
    // that locked "dog", so it is skipped
    let traced = replace_traced("cat house dog house", &rules);
    assert_eq!(traced.output, "dog house dog house");
    assert_eq!(traced.outcomes[1], RuleOutcome::Locked { start: 0, len: 3 });
}

#[test]
fn swapping_overlapping_rules_changes_the_result() {
    let input = "cat house dog house";
    let cat_first = table(&[("cat", "dog"), ("dog house", "kennel")]);
    let kennel_first = table(&[("dog house", "kennel"), ("cat", "dog")]);

    assert_eq!(replace(input, &cat_first), "dog house dog house");
    assert_eq!(replace(input, &kennel_first), "dog house kennel");
}

#[test]
fn structured_and_literal_rules_mix() {
    let rules = RuleTable::new(vec![
        Rule::structured("+N", "many").unwrap(),
        Rule::literal("dogs", "cats").unwrap(),
        Rule::structured("'MANY'", "few").unwrap(),
    ]);
    let traced = replace_traced("John has 12 dogs", &rules);
    assert_eq!(traced.output, "John has many cats");
    assert_eq!(traced.outcomes[2], RuleOutcome::Locked { start: 9, len: 4 });
}

#[test]
fn final_locks_cover_exactly_the_inserted_text() {
    let rules = table(&[("a", "XY"), ("c", "Z")]);
    let traced = replace_traced("abc", &rules);
    assert_eq!(traced.output, "XYbZ");
    assert_eq!(traced.locks.iter().collect::<Vec<_>>(), [0, 1, 3]);
}
