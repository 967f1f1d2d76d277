//! Loading rule tables from text.
//!
//! One rule per line, written like a search-and-replace command's trailing
//! parameters: a delimiter, the pattern, the delimiter again, the
//! replacement, and a closing delimiter.
//!
//! ```text
//! ! lines starting with '!' are comments
//! /John/Freddy/
//! "brown dog"gray dog"
//! `"walks ",+A`many`
//! ```
//!
//! Any ASCII punctuation character except `!` can be the delimiter. A
//! backtick selects the structured pattern syntax; every other delimiter
//! matches the pattern as literal text.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::rule::{Rule, RuleTable};

const STRUCTURED_DELIM: char = '`';
const COMMENT: char = '!';

/// Read and parse a rule file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let table = parse_rules(&text).with_context(|| format!("In rule file {}", path.display()))?;
    debug!(path = %path.display(), rules = table.len(), "loaded rules");
    Ok(table)
}

/// Parse rule text into a table, keeping the order of the lines.
pub fn parse_rules(text: &str) -> Result<RuleTable> {
    let mut table = RuleTable::default();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let rule = parse_line(line).with_context(|| format!("Line {}", index + 1))?;
        table.push(rule);
    }
    Ok(table)
}

fn parse_line(line: &str) -> Result<Rule> {
    let mut chars = line.chars().peekable();
    let delim = match chars.next() {
        Some(c) if c.is_ascii_punctuation() && c != COMMENT => c,
        Some(c) => bail!("Syntax error: {c:?} is not a valid rule delimiter."),
        None => bail!("Syntax error: empty rule."),
    };
    let pattern = delimited(&mut chars, delim)?;
    let replacement = delimited(&mut chars, delim)?;
    if let Some(extra) = chars.find(|c| !c.is_whitespace()) {
        bail!("Syntax error: unexpected {extra:?} after the closing delimiter.");
    }

    let rule = if delim == STRUCTURED_DELIM {
        Rule::structured(&pattern, &replacement)?
    } else {
        Rule::literal(&pattern, &replacement)?
    };
    Ok(rule)
}

/// Collect characters up to (and consuming) the next `delim`.
fn delimited(chars: &mut Peekable<Chars<'_>>, delim: char) -> Result<String> {
    let mut content = String::new();
    loop {
        match chars.next() {
            Some(c) if c == delim => return Ok(content),
            Some(c) => content.push(c),
            None => bail!("Syntax error: missing closing {delim:?}."),
        }
    }
}
