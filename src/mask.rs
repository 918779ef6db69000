// This file is part of umaskexec, a file mode creation mask launcher.
// Copyright (C) 2026 umaskexec developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Decoding and encoding the file mode creation mask
//!
//! A mask operand is written in one of two notations:
//!
//! - **Octal**: one or more digits from `0` to `7`, most significant group
//!   first, with a value not exceeding `0o777`. The value is the bitwise OR
//!   of the permission bits to be turned off when creating a file.
//! - **Symbolic**: a comma-separated sequence of clauses such as
//!   `u=rwx,g+r-w,o=`, applied in order to the current mask. See
//!   [`symbol`] for the data model and the [crate documentation](crate)
//!   for the grammar.
//!
//! [`parse`] tries the octal notation first and falls back to the symbolic
//! notation, returning an [`Operand`] that [`Operand::apply`] turns into
//! the mask to commit. Parsing never touches the system; a failed parse therefore
//! cannot disturb the process mask.

use crate::system::{Mode, RawMode};
use thiserror::Error;

pub mod eval;
pub mod format;
pub mod symbol;

/// Parsed representation of a mask operand
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Operand {
    /// Absolute mask given in octal notation
    Octal(RawMode),
    /// Sequence of symbolic clauses applied to the current mask
    Symbolic(Vec<symbol::Clause>),
}

impl Operand {
    /// Computes the mask this operand produces.
    ///
    /// An octal operand is absolute and ignores `current`. A symbolic
    /// operand starts from `current` and applies its clauses in order, so
    /// it is relative unless every clause target is overridden with `=`.
    #[must_use]
    pub fn apply(&self, current: Mode) -> Mode {
        match self {
            Operand::Octal(mask) => Mode(*mask),
            Operand::Symbolic(clauses) => {
                // The evaluation works on the negation of the mask.
                let granted = eval::new_mask(!current.0 & 0o777, clauses);
                Mode(!granted & 0o777)
            }
        }
    }
}

/// Error parsing the octal notation
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ParseOctalError {
    /// The input is empty.
    #[error("empty mask string")]
    Empty,
    /// There is a character other than an octal digit.
    #[error("invalid octal digit: {0:?}")]
    InvalidDigit(char),
    /// The value exceeds `0o777`.
    #[error("mask value out of range")]
    Overflow,
}

/// Parses the octal notation of the file mode creation mask.
///
/// The input must consist of one or more octal digits and the accumulated
/// value must not exceed `0o777`.
pub fn parse_octal(s: &str) -> Result<RawMode, ParseOctalError> {
    if s.is_empty() {
        return Err(ParseOctalError::Empty);
    }
    let mut mask: RawMode = 0;
    for c in s.chars() {
        let digit = c.to_digit(8).ok_or(ParseOctalError::InvalidDigit(c))?;
        mask = mask << 3 | digit as RawMode;
        if mask > 0o777 {
            return Err(ParseOctalError::Overflow);
        }
    }
    Ok(mask)
}

/// Error parsing a mask operand in either notation
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ParseOperandError {
    /// The operand does not match the octal notation.
    #[error(transparent)]
    Octal(#[from] ParseOctalError),
    /// The operand does not match the symbolic notation.
    #[error(transparent)]
    Symbolic(#[from] symbol::ParseClausesError),
}

/// Parses a mask operand.
///
/// The octal notation is tried first; if it does not match, the symbolic
/// notation is tried. When both fail, the returned error is the one from
/// the notation the operand resembles: an operand starting with a digit can
/// only have been meant as octal, and any other operand can only have been
/// meant as symbolic.
pub fn parse(s: &str) -> Result<Operand, ParseOperandError> {
    let octal_error = match parse_octal(s) {
        Ok(mask) => return Ok(Operand::Octal(mask)),
        Err(e) => e,
    };
    match symbol::parse_clauses(s) {
        Ok(clauses) => Ok(Operand::Symbolic(clauses)),
        Err(symbolic_error) => {
            if s.starts_with(|c: char| c.is_ascii_digit()) {
                Err(octal_error.into())
            } else {
                Err(symbolic_error.into())
            }
        }
    }
}


#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn octal_operand() {
        assert_eq!(parse("027"), Ok(Operand::Octal(0o027)));
    }

    #[test]
    fn symbolic_operand() {
        assert_matches!(parse("u=rwx"), Ok(Operand::Symbolic(clauses)) => {
            assert_eq!(clauses.len(), 1);
        });
    }

    #[test]
    fn operand_matching_neither_notation() {
        // An operand starting with a digit reports the octal error.
        assert_eq!(
            parse("1000"),
            Err(ParseOperandError::Octal(ParseOctalError::Overflow))
        );
        assert_eq!(
            parse("8"),
            Err(ParseOperandError::Octal(ParseOctalError::InvalidDigit('8')))
        );

        // Any other operand reports the symbolic error.
        assert_eq!(
            parse("u=q"),
            Err(ParseOperandError::Symbolic(
                symbol::ParseClausesError::InvalidChar('q')
            ))
        );
        assert_matches!(parse(""), Err(ParseOperandError::Symbolic(_)));
    }
}
