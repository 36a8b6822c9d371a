// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Choice input for the interactive review
//!
//! The session consumes discrete [`Key`] events from a [`ChoiceSource`].
//! The shipped source reads one choice per line from any `BufRead`, which
//! keeps scripted sessions and piped input working the same way.

use std::io::{self, BufRead};

/// One discrete choice made by the reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Accept the commit
    Accept,
    /// Skip the commit, or pick no sub-category
    Enter,
    /// End the session
    Exit,
    /// Go back one step
    Back,
    /// Show the whole category tree
    View,
    /// Show the commit again
    Message,
    /// Numeric category index
    Digit(usize),
    /// Anything else
    Other(String),
}

impl Key {
    /// Interpret one line of input
    ///
    /// A single space accepts, like the space bar; an empty line is Enter.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let raw = line.trim_end_matches(['\r', '\n']);
        if raw == " " {
            return Self::Accept;
        }
        let choice = raw.trim().to_lowercase();
        match choice.as_str() {
            "" | "s" => Self::Enter,
            "a" => Self::Accept,
            "x" | "q" => Self::Exit,
            "b" => Self::Back,
            "v" => Self::View,
            "m" => Self::Message,
            _ => choice
                .parse()
                .map_or_else(|_| Self::Other(raw.trim().to_string()), Self::Digit),
        }
    }
}

/// Source of reviewer choices
pub trait ChoiceSource {
    /// Wait for the next choice
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying input fails.
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Line-oriented choice reader; end of input means [`Key::Exit`]
pub struct LineInput<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> LineInput<R> {
    /// Read choices from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> ChoiceSource for LineInput<R> {
    fn next_key(&mut self) -> io::Result<Key> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(Key::Exit);
        }
        Ok(Key::from_line(&self.buf))
    }
}
