//! Single-pass, rule-ordered text substitution with locked segments.
//!
//! Every rule fires at most once, on the first match of its pattern, and
//! never on text that an earlier rule produced.
//!
//! # Example
//!
//! ```rust
//! use locksub::{RuleTable, replace};
//!
//! let rules = RuleTable::from_pairs([
//!     ("John", "Freddy"),
//!     ("John walks", "Freddy runs"),
//!     ("brown dog", "gray dog"),
//!     ("dog", "cat"),
//! ])
//! .unwrap();
//!
//! // "dog" would otherwise rewrite the "gray dog" produced by "brown dog"
//! assert_eq!(
//!     replace("John walks his brown dog", &rules),
//!     "Freddy walks his gray dog"
//! );
//! ```

mod engine;
mod locks;
mod matcher;
mod outcome;
pub mod pattern;
pub mod reference;
mod report;
mod rule;
pub mod rule_file;

pub use engine::{Pass, Replacement, replace, replace_traced};
pub use locks::LockSet;
pub use matcher::{Literal, Match, Matcher};
pub use outcome::RuleOutcome;
pub use report::Report;
pub use rule::{Rule, RuleError, RuleTable};
pub use rule_file::{load_rules, parse_rules};
