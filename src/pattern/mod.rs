//! Structured pattern language.
//!
//! Rules loaded with the structured syntax use these patterns instead of
//! plain literal text. Patterns have three context regions:
//! `left,middle,right`. Only the middle region is replaced.
//!
//! # Pattern syntax
//!
//! | Token         | Meaning                                       |
//! |---------------|-----------------------------------------------|
//! | `A`           | One alphabetic character                      |
//! | `U`           | One uppercase letter                          |
//! | `L`           | One lowercase letter                          |
//! | `N`           | One ASCII digit                               |
//! | `S`           | One space character                           |
//! | `P`           | One punctuation character                     |
//! | `C`           | One printable character (0x20–0x7E)           |
//! | `D/…/`        | Custom character set                          |
//! | `-X`          | Negated character set                         |
//! | `"text"`      | Literal (exact case)                          |
//! | `'text'`      | Literal (case-folded)                         |
//! | `(…)`         | Grouping                                      |
//! | `X\|Y`        | Alternation                                   |
//! | `*X`          | Zero or more                                  |
//! | `+X`          | One or more                                   |
//! | `nX`, `[n]X`  | Exactly n                                     |
//! | `[n,]X`       | At least n                                    |
//! | `[n,m]X`      | Between n and m                               |
//! | `<`           | Beginning of text                             |
//! | `>`           | End of text                                   |
//! | `A,B`         | Context separator (left=A, middle=B)          |
//! | `A,B,C`       | Full context (left=A, middle=B, right=C)      |

pub mod ast;
mod char_class;
pub mod matcher;
pub mod parser;

pub use ast::PatternDef;
pub use matcher::find_forward;
pub use parser::{PatternError, parse};
