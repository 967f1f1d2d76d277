//! The reference scenario: a rule table whose rules overlap each other's
//! output, together with an input and the output a correct engine produces.
//!
//! Replacing every occurrence of each rule in turn gets this wrong in
//! several ways: "John walks" never fires but "dog" rewrites the "gray dog"
//! produced by "brown dog", and "(" and ")" delete the parentheses that
//! "- not -" just inserted.

use phf::{OrderedMap, phf_ordered_map};

use crate::rule::{RuleError, RuleTable};

/// Reference rules in application order.
pub static REFERENCE_RULES: OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "John" => "Freddy",
    "John walks" => "Freddy runs",
    "brown dog" => "gray dog",
    "dog" => "cat",
    "- not -" => "(not)",
    "(" => "",
    ")" => "",
    "whenever" => "sometimes, when",
    "raining" => "snowing",
    "his" => "many",
};

pub const REFERENCE_INPUT: &str = "John walks his brown dog whenever it's - not - raining";

pub const REFERENCE_EXPECTED: &str = "Freddy walks many gray dog sometimes, when it's (not) snowing";

/// The reference rules as a table of literal rules.
pub fn rules() -> Result<RuleTable, RuleError> {
    RuleTable::from_pairs(
        REFERENCE_RULES
            .entries()
            .map(|(pattern, replacement)| (*pattern, *replacement)),
    )
}
