//! Expected-versus-actual comparison report.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

/// The outcome of checking one replacement against the text it should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: String,
    pub expected: String,
    pub actual: String,
}

impl Report {
    pub fn new(label: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }

    /// Write the report, with the verdict coloured when `color` is set.
    pub fn render(&self, out: &mut impl Write, color: bool) -> io::Result<()> {
        let (verdict, tint) = if self.passed() {
            ("It works", Color::Green)
        } else {
            ("String replacement doesn't work", Color::Red)
        };

        queue!(out, Print(format!("{} : ", self.label)))?;
        if color {
            queue!(out, SetForegroundColor(tint), Print(verdict), ResetColor)?;
        } else {
            queue!(out, Print(verdict))?;
        }
        queue!(
            out,
            Print("\n"),
            Print(format!("Expected : {}\n", self.expected)),
            Print(format!("Actual   : {}\n", self.actual)),
        )?;
        out.flush()
    }
}
