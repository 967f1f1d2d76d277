//! Recursive descent parser for structured pattern strings.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use super::ast::*;

/// Errors that can occur while parsing a structured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unexpected character in pattern: {0:?}")]
    UnexpectedChar(char),
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    #[error("invalid number in pattern")]
    InvalidNumber,
    #[error("unclosed group '(' in pattern")]
    UnclosedGroup,
    #[error("unclosed string literal in pattern")]
    UnclosedString,
    #[error("unclosed custom character set")]
    UnclosedCustomSet,
    #[error("invalid quantifier range [n,m]")]
    InvalidQuantifierRange,
    #[error("too many context separators (at most left,middle,right)")]
    TooManyContexts,
}

/// Parse a structured pattern string into a [`PatternDef`].
pub fn parse(input: &str) -> Result<PatternDef, PatternError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
    };
    let def = parser.parse_pattern_def()?;
    parser.skip_space();
    match parser.chars.next() {
        None => Ok(def),
        Some(',') => Err(PatternError::TooManyContexts),
        Some(c) => Err(PatternError::UnexpectedChar(c)),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn parse_pattern_def(&mut self) -> Result<PatternDef, PatternError> {
        let mut parts = vec![self.parse_compound()?];
        while parts.len() < 3 {
            self.skip_space();
            if !self.eat(',') {
                break;
            }
            parts.push(self.parse_compound()?);
        }

        let mut parts = parts.into_iter();
        let first = parts.next().unwrap_or_else(Compound::empty);
        Ok(match (parts.next(), parts.next()) {
            (None, _) => PatternDef {
                left: Compound::empty(),
                middle: first,
                right: Compound::empty(),
            },
            (Some(middle), right) => PatternDef {
                left: first,
                middle,
                right: right.unwrap_or_else(Compound::empty),
            },
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, PatternError> {
        let mut alternatives = vec![self.parse_sequence()?];
        loop {
            self.skip_space();
            if !self.eat('|') {
                break;
            }
            alternatives.push(self.parse_sequence()?);
        }
        // A lone empty sequence is the canonical empty compound, so ",A"
        // yields an empty left context.
        if alternatives.len() == 1 && alternatives[0].items.is_empty() {
            return Ok(Compound::empty());
        }
        Ok(Compound { alternatives })
    }

    fn parse_sequence(&mut self) -> Result<Sequence, PatternError> {
        let mut items = Vec::new();
        while let Some(item) = self.parse_item()? {
            items.push(item);
        }
        Ok(Sequence { items })
    }

    /// Parse one item (optional quantifier + element).
    ///
    /// Returns `None` at sequence terminators: `|`, `,`, `)`, end-of-input.
    fn parse_item(&mut self) -> Result<Option<Item>, PatternError> {
        self.skip_space();
        if self.at_terminator() {
            return Ok(None);
        }

        let quantifier = self.parse_quantifier()?;
        self.skip_space();
        if self.at_terminator() {
            return match quantifier {
                Some(_) => Err(PatternError::UnexpectedEnd),
                None => Ok(None),
            };
        }

        let element = self.parse_element()?;
        Ok(Some(Item {
            quantifier: quantifier.unwrap_or(Quantifier::Once),
            element,
        }))
    }

    fn parse_quantifier(&mut self) -> Result<Option<Quantifier>, PatternError> {
        let quantifier = match self.chars.peek() {
            Some('*') => {
                self.chars.next();
                Quantifier::ZeroOrMore
            }
            Some('+') => {
                self.chars.next();
                Quantifier::OneOrMore
            }
            Some('[') => {
                self.chars.next();
                self.parse_bracket_quantifier()?
            }
            Some(c) if c.is_ascii_digit() => Quantifier::Exactly(self.parse_number()?),
            _ => return Ok(None),
        };
        Ok(Some(quantifier))
    }

    /// Parse `[n]`, `[n,]`, `[,m]`, `[n,m]` or `[,]` after the opening `[`.
    fn parse_bracket_quantifier(&mut self) -> Result<Quantifier, PatternError> {
        let lower = self.parse_optional_number()?;
        if self.eat(']') {
            return lower
                .map(Quantifier::Exactly)
                .ok_or(PatternError::InvalidQuantifierRange);
        }
        if !self.eat(',') {
            return Err(PatternError::InvalidQuantifierRange);
        }
        let upper = self.parse_optional_number()?;
        if !self.eat(']') {
            return Err(PatternError::InvalidQuantifierRange);
        }

        match (lower, upper) {
            (None, None) => Ok(Quantifier::ZeroOrMore),
            (Some(n), None) => Ok(Quantifier::AtLeast(n)),
            (None, Some(m)) => Ok(Quantifier::Between(0, m)),
            (Some(n), Some(m)) if n <= m => Ok(Quantifier::Between(n, m)),
            _ => Err(PatternError::InvalidQuantifierRange),
        }
    }

    fn parse_optional_number(&mut self) -> Result<Option<usize>, PatternError> {
        match self.chars.peek() {
            Some(c) if c.is_ascii_digit() => self.parse_number().map(Some),
            _ => Ok(None),
        }
    }

    fn parse_number(&mut self) -> Result<usize, PatternError> {
        let mut digits = String::new();
        while let Some(c) = self.chars.next_if(char::is_ascii_digit) {
            digits.push(c);
        }
        digits.parse().map_err(|_| PatternError::InvalidNumber)
    }

    fn parse_element(&mut self) -> Result<Element, PatternError> {
        let Some(&c) = self.chars.peek() else {
            return Err(PatternError::UnexpectedEnd);
        };
        match c {
            '(' => {
                self.chars.next();
                let compound = self.parse_compound()?;
                if !self.eat(')') {
                    return Err(PatternError::UnclosedGroup);
                }
                Ok(Element::Group(Box::new(compound)))
            }
            '\'' | '"' => {
                let (text, case_fold) = self.parse_string()?;
                Ok(Element::Literal { text, case_fold })
            }
            '<' => {
                self.chars.next();
                Ok(Element::Anchor(Anchor::Start))
            }
            '>' => {
                self.chars.next();
                Ok(Element::Anchor(Anchor::End))
            }
            '-' => {
                self.chars.next();
                Ok(Element::CharSet(CharSet {
                    negated: true,
                    kind: self.parse_charset_kind()?,
                }))
            }
            c if is_charset_letter(c) => Ok(Element::CharSet(CharSet {
                negated: false,
                kind: self.parse_charset_kind()?,
            })),
            c => Err(PatternError::UnexpectedChar(c)),
        }
    }

    fn parse_charset_kind(&mut self) -> Result<CharSetKind, PatternError> {
        let c = self.chars.next().ok_or(PatternError::UnexpectedEnd)?;
        match c.to_ascii_uppercase() {
            'A' => Ok(CharSetKind::Alpha),
            'U' => Ok(CharSetKind::Upper),
            'L' => Ok(CharSetKind::Lower),
            'N' => Ok(CharSetKind::Numeric),
            'S' => Ok(CharSetKind::Space),
            'P' => Ok(CharSetKind::Punct),
            'C' => Ok(CharSetKind::Printable),
            'D' => Ok(CharSetKind::Custom(self.parse_custom_set()?)),
            _ => Err(PatternError::UnexpectedChar(c)),
        }
    }

    /// Parse the body of a custom set `D<dlm>...<dlm>` (after the `D`).
    ///
    /// `x..y` denotes an inclusive range; every other character is a single.
    fn parse_custom_set(&mut self) -> Result<Vec<CharClass>, PatternError> {
        let dlm = self.chars.next().ok_or(PatternError::UnexpectedEnd)?;
        let mut body = Vec::new();
        loop {
            match self.chars.next() {
                None => return Err(PatternError::UnclosedCustomSet),
                Some(c) if c == dlm => break,
                Some(c) => body.push(c),
            }
        }

        let mut classes = Vec::new();
        let mut i = 0;
        while i < body.len() {
            if body.get(i + 1) == Some(&'.') && body.get(i + 2) == Some(&'.') {
                let hi = *body.get(i + 3).ok_or(PatternError::UnclosedCustomSet)?;
                classes.push(CharClass::Range(body[i], hi));
                i += 4;
            } else {
                classes.push(CharClass::Single(body[i]));
                i += 1;
            }
        }
        Ok(classes)
    }

    /// Parse a `'...'` or `"..."` string literal.
    ///
    /// Returns `(text, case_fold)` where `case_fold = true` for single quotes.
    fn parse_string(&mut self) -> Result<(String, bool), PatternError> {
        let delim = self.chars.next().ok_or(PatternError::UnexpectedEnd)?;
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == delim => return Ok((text, delim == '\'')),
                Some(c) => text.push(c),
                None => return Err(PatternError::UnclosedString),
            }
        }
    }

    fn at_terminator(&mut self) -> bool {
        matches!(self.chars.peek(), None | Some('|' | ')' | ','))
    }

    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if_eq(&expected).is_some()
    }

    fn skip_space(&mut self) {
        while self.chars.next_if(|c| matches!(c, ' ' | '\t')).is_some() {}
    }
}

/// True for characters that can begin a named charset.
fn is_charset_letter(c: char) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        'A' | 'U' | 'L' | 'N' | 'S' | 'P' | 'C' | 'D'
    )
}
