// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading Hamaker-Arts coefficients.

use thiserror::Error;


/// Errors from parsing a native (C++ header) Hamaker-Arts coefficient source.
#[derive(Error, Debug)]
pub enum CoeffParseError {
    #[error("Couldn't find the {0} declaration in the coefficient source")]
    MissingDeclaration(&'static str),

    #[error("Line {line}: Found a second {decl} declaration (the first is on line {first_line})")]
    DuplicateDeclaration {
        decl: &'static str,
        line: usize,
        first_line: usize,
    },

    #[error("Line {line}: Expected '{expected}' in the {decl} declaration, but found '{found}'")]
    UnexpectedToken {
        decl: &'static str,
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Line {line}: The {decl} declaration is not terminated")]
    Unterminated { decl: &'static str, line: usize },

    #[error("Line {line}: Couldn't parse '{string}' as a float")]
    ParseFloat { line: usize, string: String },

    #[error("Line {line}: Couldn't parse '{string}' as a non-negative integer")]
    ParseInt { line: usize, string: String },

    #[error("Line {line}: Malformed complex literal: {reason}")]
    MalformedComplex { line: usize, reason: &'static str },

    #[error("The coefficient shape declaration must have 3 dimensions, but it has {0}")]
    ShapeRank(usize),

    #[error("The coefficient shape {shape:?} (times 2 polarisations) needs {expected} coefficients, but {got} were found")]
    ShapeMismatch {
        shape: [usize; 3],
        expected: usize,
        got: usize,
    },

    #[error("The coefficient array declares {declared} elements, but {got} were found")]
    CountMismatch { declared: usize, got: usize },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors from building a list of frequency channels.
#[derive(Error, Debug, PartialEq)]
pub enum ChannelSetError {
    #[error("A channel set must have at least one channel")]
    Empty,

    #[error("Channel frequencies must increase monotonically, but channel {index} ({freq} Hz) doesn't")]
    NotIncreasing { index: usize, freq: f64 },
}
