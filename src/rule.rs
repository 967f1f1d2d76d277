//! Replacement rules and the ordered table that holds them.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::matcher::{Literal, Match, Matcher};
use crate::pattern::{self, PatternDef, PatternError};

/// Errors raised while building rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

/// How a rule finds its pattern in the working text.
#[derive(Clone)]
enum Needle {
    Literal(Literal),
    Structured(Arc<PatternDef>),
    Custom(Arc<dyn Matcher + Send + Sync>),
}

impl Needle {
    fn as_matcher(&self) -> &dyn Matcher {
        match self {
            Needle::Literal(literal) => literal,
            Needle::Structured(def) => def.as_ref(),
            Needle::Custom(matcher) => matcher.as_ref(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Needle::Literal(_) => "literal",
            Needle::Structured(_) => "structured",
            Needle::Custom(_) => "custom",
        }
    }
}

/// A single pattern → replacement rule.
///
/// The pattern is compiled when the rule is built, so a bad pattern fails
/// here rather than half way through a replacement pass.
#[derive(Clone)]
pub struct Rule {
    pattern: String,
    replacement: String,
    needle: Needle,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .field("kind", &self.needle.kind())
            .finish()
    }
}

impl Rule {
    /// A rule matching `pattern` as exact text.
    pub fn literal(pattern: &str, replacement: &str) -> Result<Self, RuleError> {
        require_pattern(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            needle: Needle::Literal(Literal::new(pattern)),
        })
    }

    /// A rule matching `pattern` in the structured pattern language.
    ///
    /// Only the middle context of the pattern is replaced. Patterns whose
    /// middle context is empty are rejected, as they could only ever match
    /// the empty span.
    pub fn structured(pattern: &str, replacement: &str) -> Result<Self, RuleError> {
        require_pattern(pattern)?;
        let def = pattern::parse(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if def.middle.is_empty_pattern() {
            return Err(RuleError::InvalidRule(format!(
                "pattern {pattern:?} has an empty middle context"
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            needle: Needle::Structured(Arc::new(def)),
        })
    }

    /// A rule driven by a caller-supplied matching engine.
    ///
    /// `pattern` is kept for display and diagnostics only.
    pub fn custom(
        pattern: &str,
        replacement: &str,
        matcher: Arc<dyn Matcher + Send + Sync>,
    ) -> Result<Self, RuleError> {
        require_pattern(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            needle: Needle::Custom(matcher),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Find the first match of this rule's pattern at or after `from`.
    pub fn find(&self, haystack: &[char], from: usize) -> Option<Match> {
        self.needle.as_matcher().find(haystack, from)
    }
}

fn require_pattern(pattern: &str) -> Result<(), RuleError> {
    if pattern.is_empty() {
        return Err(RuleError::InvalidRule("pattern is empty".to_string()));
    }
    Ok(())
}

/// Rules in application order.
///
/// The table never reorders its rules; insertion order is the order in
/// which a replacement pass tries them.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build a table of literal rules, failing on the first invalid one.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(pattern, replacement)| Rule::literal(pattern, replacement))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Append a rule; it will be tried after every rule already present.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
