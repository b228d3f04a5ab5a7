// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of Hamaker-Arts coefficients from the C++ headers used by the
//! LOFAR element-response code.
//!
//! The source is first split into tokens (numbers, identifiers and single
//! punctuation characters; whitespace and comments are dropped). Four
//! independent rules then each look for their own declaration anywhere in the
//! token stream, so the order of the declarations doesn't matter:
//!
//! ```text
//! const double default_lba_freq_center = 55e6;
//! const double default_lba_freq_range = 45e6;
//! const unsigned int default_lba_coeff_shape[3] = {2, 5, 5};
//! const std::complex<double> default_lba_coeff[100] = {
//!     std::complex<double>(0.9994601362, -0.0000000000), ...
//! };
//! ```

use std::path::Path;

use log::{debug, trace};
use marlu::c64;
use ndarray::Array4;
use regex::Regex;

use super::{CoeffParseError, CoefficientRecord};
use crate::constants::NR_POLS;

lazy_static::lazy_static! {
    static ref TOKEN: Regex = Regex::new(
        r"(?x)
        (?P<space>\s+)
        | (?P<comment>//[^\n]*|/\*(?s:.*?)\*/)
        | (?P<number>(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)
        | (?P<ident>[A-Za-z_][A-Za-z0-9_]*)
        | (?P<punct>\S)
        "
    )
    .unwrap();

    static ref FREQ_CENTER: Regex = Regex::new(r"^\w*[lh]ba_freq_center$").unwrap();

    static ref FREQ_RANGE: Regex = Regex::new(r"^\w*[lh]ba_freq_range$").unwrap();

    static ref COEFF_SHAPE: Regex = Regex::new(r"^default_[lh]ba_coeff_shape$").unwrap();

    static ref COEFF_ARRAY: Regex = Regex::new(r"^(?P<version>\w+)(?P<band>[lh]ba)_coeff$").unwrap();
}

const FREQ_CENTER_DECL: &str = "frequency-center";
const FREQ_RANGE_DECL: &str = "frequency-range";
const COEFF_SHAPE_DECL: &str = "coefficient-shape";
const COEFF_ARRAY_DECL: &str = "coefficient-array";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Number,
    Ident,
    Punct,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    line: usize,
}

impl Token<'_> {
    fn is_punct(&self, c: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == c
    }
}

/// Split the source into tokens, discarding whitespace and comments.
fn tokenise(source: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut line = 1;
    for caps in TOKEN.captures_iter(source) {
        let (kind, m) = if let Some(m) = caps.name("number") {
            (TokenKind::Number, m)
        } else if let Some(m) = caps.name("ident") {
            (TokenKind::Ident, m)
        } else if let Some(m) = caps.name("punct") {
            (TokenKind::Punct, m)
        } else {
            // Whitespace or a comment.
            line += caps[0].matches('\n').count();
            continue;
        };
        tokens.push(Token {
            kind,
            text: m.as_str(),
            line,
        });
    }
    trace!("Tokenised coefficient source into {} tokens", tokens.len());
    tokens
}

/// A position in the token stream belonging to a single declaration.
struct Cursor<'a, 'b> {
    tokens: &'b [Token<'a>],
    pos: usize,
    decl: &'static str,
}

impl<'a, 'b> Cursor<'a, 'b> {
    fn new(tokens: &'b [Token<'a>], pos: usize, decl: &'static str) -> Self {
        Self { tokens, pos, decl }
    }

    /// The line of the current token (or of the last token, if we've run out).
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn next(&mut self) -> Result<Token<'a>, CoeffParseError> {
        match self.tokens.get(self.pos) {
            Some(t) => {
                self.pos += 1;
                Ok(*t)
            }
            None => Err(CoeffParseError::Unterminated {
                decl: self.decl,
                line: self.line(),
            }),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn expect_punct(&mut self, expected: &'static str) -> Result<(), CoeffParseError> {
        let t = self.next()?;
        if t.is_punct(expected) {
            Ok(())
        } else {
            Err(CoeffParseError::UnexpectedToken {
                decl: self.decl,
                line: t.line,
                expected,
                found: t.text.to_string(),
            })
        }
    }

    /// A number with an optional leading sign, e.g. `-1.5e-3`.
    fn parse_f64(&mut self) -> Result<f64, CoeffParseError> {
        let mut t = self.next()?;
        let negative = t.is_punct("-");
        if negative || t.is_punct("+") {
            t = self.next()?;
        }
        if t.kind != TokenKind::Number {
            return Err(CoeffParseError::ParseFloat {
                line: t.line,
                string: t.text.to_string(),
            });
        }
        let value: f64 = t.text.parse().map_err(|_| CoeffParseError::ParseFloat {
            line: t.line,
            string: t.text.to_string(),
        })?;
        Ok(if negative { -value } else { value })
    }

    fn parse_usize(&mut self) -> Result<usize, CoeffParseError> {
        let t = self.next()?;
        t.text.parse().map_err(|_| CoeffParseError::ParseInt {
            line: t.line,
            string: t.text.to_string(),
        })
    }
}

/// Find the single declaration whose name matches `re` and is directly
/// followed by `follower`. Returns the index of the name token.
fn find_declaration(
    tokens: &[Token],
    re: &Regex,
    follower: &str,
    decl: &'static str,
) -> Result<usize, CoeffParseError> {
    let mut found: Option<usize> = None;
    for (i, pair) in tokens.windows(2).enumerate() {
        if pair[0].kind == TokenKind::Ident && re.is_match(pair[0].text) && pair[1].is_punct(follower)
        {
            if let Some(first) = found {
                return Err(CoeffParseError::DuplicateDeclaration {
                    decl,
                    line: pair[0].line,
                    first_line: tokens[first].line,
                });
            }
            found = Some(i);
        }
    }
    let i = found.ok_or(CoeffParseError::MissingDeclaration(decl))?;
    debug!(
        "Found the {decl} declaration '{}' on line {}",
        tokens[i].text, tokens[i].line
    );
    Ok(i)
}

/// `<name> = <number>;`
fn parse_scalar(tokens: &[Token], re: &Regex, decl: &'static str) -> Result<f64, CoeffParseError> {
    let i = find_declaration(tokens, re, "=", decl)?;
    let mut cursor = Cursor::new(tokens, i + 2, decl);
    let value = cursor.parse_f64()?;
    cursor.expect_punct(";")?;
    Ok(value)
}

/// `default_[lh]ba_coeff_shape[3] = {d1, d2, d3};`
fn parse_shape(tokens: &[Token]) -> Result<[usize; 3], CoeffParseError> {
    let i = find_declaration(tokens, &COEFF_SHAPE, "[", COEFF_SHAPE_DECL)?;
    let mut cursor = Cursor::new(tokens, i + 2, COEFF_SHAPE_DECL);
    let rank = cursor.parse_usize()?;
    cursor.expect_punct("]")?;
    cursor.expect_punct("=")?;
    cursor.expect_punct("{")?;

    let mut dims = vec![];
    loop {
        dims.push(cursor.parse_usize()?);
        let t = cursor.next()?;
        if t.is_punct("}") {
            break;
        } else if !t.is_punct(",") {
            return Err(CoeffParseError::UnexpectedToken {
                decl: COEFF_SHAPE_DECL,
                line: t.line,
                expected: ", or }",
                found: t.text.to_string(),
            });
        }
    }
    if rank != 3 {
        return Err(CoeffParseError::ShapeRank(rank));
    }
    if dims.len() != 3 {
        return Err(CoeffParseError::ShapeRank(dims.len()));
    }
    Ok([dims[0], dims[1], dims[2]])
}

/// What the coefficient-array rule extracts.
struct CoeffArray {
    version: String,
    band: String,
    num_elements: usize,
    coeffs: Vec<c64>,
}

/// `<version>[lh]ba_coeff[<n>] = { std::complex<double>(re, im), ... };`
fn parse_coeff_array(tokens: &[Token]) -> Result<CoeffArray, CoeffParseError> {
    let i = find_declaration(tokens, &COEFF_ARRAY, "[", COEFF_ARRAY_DECL)?;
    let caps = COEFF_ARRAY
        .captures(tokens[i].text)
        .ok_or(CoeffParseError::MissingDeclaration(COEFF_ARRAY_DECL))?;
    let version = caps["version"].to_string();
    let band = caps["band"].to_string();

    let mut cursor = Cursor::new(tokens, i + 2, COEFF_ARRAY_DECL);
    let num_elements = cursor.parse_usize()?;
    cursor.expect_punct("]")?;
    cursor.expect_punct("=")?;
    cursor.expect_punct("{")?;

    let mut coeffs = Vec::with_capacity(num_elements);
    loop {
        // An empty list, or a trailing comma before the closing brace.
        if cursor.peek().map(|t| t.is_punct("}")).unwrap_or(false) {
            cursor.next()?;
            break;
        }
        coeffs.push(parse_complex(&mut cursor)?);

        let t = cursor.next()?;
        if t.is_punct("}") {
            break;
        } else if !t.is_punct(",") {
            return Err(CoeffParseError::UnexpectedToken {
                decl: COEFF_ARRAY_DECL,
                line: t.line,
                expected: ", or }",
                found: t.text.to_string(),
            });
        }
    }

    Ok(CoeffArray {
        version,
        band,
        num_elements,
        coeffs,
    })
}

/// `std::complex<double>(re, im)`. The type name before the parenthesis must
/// mention `complex`; the two arguments must each be a (signed) number.
fn parse_complex(cursor: &mut Cursor) -> Result<c64, CoeffParseError> {
    let line = cursor.line();
    let mut saw_complex = false;
    loop {
        let t = cursor.next()?;
        if t.is_punct("(") {
            break;
        }
        if t.kind == TokenKind::Ident && t.text == "complex" {
            saw_complex = true;
        }
        if t.is_punct(",") || t.is_punct("}") || t.is_punct(";") {
            return Err(CoeffParseError::MalformedComplex {
                line: t.line,
                reason: "expected a parenthesised (real, imaginary) pair",
            });
        }
    }
    if !saw_complex {
        return Err(CoeffParseError::MalformedComplex {
            line,
            reason: "the literal isn't a std::complex",
        });
    }

    let re = cursor.parse_f64()?;
    expect_complex_separator(cursor, ",")?;
    let im = cursor.parse_f64()?;
    expect_complex_separator(cursor, ")")?;
    Ok(c64::new(re, im))
}

fn expect_complex_separator(cursor: &mut Cursor, separator: &str) -> Result<(), CoeffParseError> {
    let t = cursor.next()?;
    if t.is_punct(separator) {
        Ok(())
    } else {
        Err(CoeffParseError::MalformedComplex {
            line: t.line,
            reason: "expected exactly two arguments, each a single (signed) number",
        })
    }
}

/// Parse the contents of a native Hamaker-Arts coefficient source into a
/// [`CoefficientRecord`]. The flat coefficients are reshaped into (harmonic,
/// theta power, frequency power, polarisation); the last dimension is always
/// [`NR_POLS`] and is not part of the shape declaration.
pub fn parse_coefficients(source: &str) -> Result<CoefficientRecord, CoeffParseError> {
    let tokens = tokenise(source);

    let freq_center = parse_scalar(&tokens, &FREQ_CENTER, FREQ_CENTER_DECL)?;
    let freq_range = parse_scalar(&tokens, &FREQ_RANGE, FREQ_RANGE_DECL)?;
    let shape = parse_shape(&tokens)?;
    let CoeffArray {
        version,
        band,
        num_elements,
        coeffs,
    } = parse_coeff_array(&tokens)?;

    if num_elements != coeffs.len() {
        return Err(CoeffParseError::CountMismatch {
            declared: num_elements,
            got: coeffs.len(),
        });
    }
    let got = coeffs.len();
    // An overflowing shape can't match any number of coefficients.
    let expected = shape
        .iter()
        .try_fold(NR_POLS, |acc, &d| acc.checked_mul(d))
        .unwrap_or(usize::MAX);
    if expected != got {
        return Err(CoeffParseError::ShapeMismatch {
            shape,
            expected,
            got,
        });
    }
    let coeffs = Array4::from_shape_vec((shape[0], shape[1], shape[2], NR_POLS), coeffs)
        .map_err(|_| CoeffParseError::ShapeMismatch {
            shape,
            expected,
            got,
        })?;
    debug!(
        "Parsed {version}{band} coefficients with shape {:?}, centre {freq_center} Hz, range {freq_range} Hz",
        coeffs.dim()
    );

    Ok(CoefficientRecord {
        freq_center,
        freq_range,
        coeffs,
        version,
        band,
        num_elements,
    })
}

/// Read a native Hamaker-Arts coefficient file and parse it with
/// [`parse_coefficients`].
pub fn read_coefficient_file<P: AsRef<Path>>(
    file: P,
) -> Result<CoefficientRecord, CoeffParseError> {
    let source = std::fs::read_to_string(file)?;
    parse_coefficients(&source)
}
