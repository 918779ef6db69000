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

//! Symbolic notation
//!
//! This module defines data structures for representing the symbolic
//! notation of the file mode creation mask and provides the parser from
//! text to clauses.
//!
//! For the syntax of the notation, see the [crate documentation](crate).

use crate::system::RawMode;
use thiserror::Error;

/// Error [parsing clauses](parse_clauses)
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ParseClausesError {
    /// There is an invalid character in the input.
    #[error("invalid character: {0:?}")]
    InvalidChar(char),
    /// A clause is invalid.
    #[error(transparent)]
    BadClause(#[from] ParseClauseError),
}

/// Parses a whole symbolic notation of the file mode creation mask, which is
/// a sequence of clauses separated by commas.
///
/// If successful, this function returns a vector of clauses. Otherwise, it
/// returns an error indicating the reason for the failure. Note that an
/// empty input is an error, as is a trailing comma.
pub fn parse_clauses(mut s: &str) -> Result<Vec<Clause>, ParseClausesError> {
    let mut clauses = vec![Clause::parse(&mut s)?];
    while !s.is_empty() {
        if !s.starts_with(',') {
            return Err(ParseClausesError::InvalidChar(s.chars().next().unwrap()));
        }
        s = &s[1..];
        clauses.push(Clause::parse(&mut s)?);
    }
    Ok(clauses)
}

/// Clause in the symbolic notation of the file mode creation mask
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause {
    /// Selection of entities the permissions apply to
    pub who: Who,
    /// Actions
    pub actions: Vec<Action>,
}

/// Error parsing a clause
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error(transparent)]
pub enum ParseClauseError {
    /// There is no valid action.
    BadAction(#[from] ParseOperatorError),
}

impl Clause {
    /// Parses a clause from a string.
    ///
    /// This function parses a clause from a string and returns the parsed
    /// clause if successful. The argument is updated to the remaining
    /// unparsed part of the string. A clause contains one or more actions;
    /// parsing stops at the first character that does not start another
    /// action.
    ///
    /// In case of an error, the argument is left in an unspecified state.
    pub fn parse(s: &mut &str) -> Result<Self, ParseClauseError> {
        let who = Who::parse(s);
        let mut actions = Vec::new();
        loop {
            match Action::parse(s) {
                Ok(action) => actions.push(action),
                Err(ParseOperatorError) if !actions.is_empty() => {
                    return Ok(Self { who, actions })
                }
                Err(e) => return Err(ParseClauseError::BadAction(e)),
            }
        }
    }
}

/// Selection of entities the permissions apply to
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Who {
    /// Permission bit mask represented by the who symbols
    pub mask: RawMode,
}

impl std::fmt::Debug for Who {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Who {{ mask: {:#05o} }}", self.mask)
    }
}

impl Who {
    /// Parses a who sequence from a string.
    ///
    /// This function parses a who sequence from a string and returns the
    /// parsed who sequence. The argument is updated to the remaining
    /// unparsed part of the string. An empty sequence is equivalent to `a`.
    pub fn parse(s: &mut &str) -> Self {
        let mut mask = 0;
        loop {
            let mut chars = s.chars();
            match chars.next() {
                Some('u') => mask |= 0o700,
                Some('g') => mask |= 0o070,
                Some('o') => mask |= 0o007,
                Some('a') => mask |= 0o777,
                _ => break,
            }
            *s = chars.as_str();
        }
        if mask == 0 {
            mask = 0o777;
        }
        Self { mask }
    }
}

/// Action in a clause
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Action {
    /// Operator
    pub operator: Operator,
    /// Permission bit mask represented by a combination of `r`, `w`, and `x`
    pub permission: RawMode,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Action {{ operator: {:?}, permission: {:#05o} }}",
            self.operator, self.permission,
        )
    }
}

impl Action {
    /// Parses an action from a string.
    ///
    /// This function parses an action from a string and returns the parsed
    /// action if successful. The argument is updated to the remaining
    /// unparsed part of the string. The permission symbols may be empty, so
    /// an action fails to parse only when no operator is found.
    pub fn parse(s: &mut &str) -> Result<Self, ParseOperatorError> {
        let operator = Operator::parse(s)?;
        let permission = parse_permission(s);
        Ok(Self {
            operator,
            permission,
        })
    }
}

/// Operator of an [`Action`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// Grant the permissions (**`+`**)
    Add,
    /// Deny the permissions (**`-`**)
    Remove,
    /// Grant exactly the permissions, denying the rest (**`=`**)
    Set,
}

/// Error parsing an operator
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub struct ParseOperatorError;

impl std::fmt::Display for ParseOperatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("no operator")
    }
}

impl Operator {
    /// Parses an operator from a string.
    ///
    /// This function parses an operator from a string and returns the parsed
    /// operator if successful. The argument is updated to the remaining
    /// unparsed part of the string.
    ///
    /// In case of an error, the argument is left in an unspecified state.
    pub fn parse(s: &mut &str) -> Result<Self, ParseOperatorError> {
        let mut chars = s.chars();
        let operator = match chars.next() {
            Some('+') => Self::Add,
            Some('-') => Self::Remove,
            Some('=') => Self::Set,
            _ => return Err(ParseOperatorError),
        };
        *s = chars.as_str();
        Ok(operator)
    }
}

/// Parses a possibly empty sequence of permission symbols from a string.
///
/// The argument is updated to the remaining unparsed part of the string.
fn parse_permission(s: &mut &str) -> RawMode {
    let mut mask = 0;
    loop {
        let mut chars = s.chars();
        match chars.next() {
            Some('r') => mask |= 0o444,
            Some('w') => mask |= 0o222,
            Some('x') => mask |= 0o111,
            _ => break,
        }
        *s = chars.as_str();
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_single_clause() {
        let result = parse_clauses("u=");
        assert_eq!(
            result,
            Ok(vec![Clause {
                who: Who { mask: 0o700 },
                actions: vec![Action {
                    operator: Operator::Set,
                    permission: 0,
                }],
            }])
        );
    }

    #[test]
    fn parsing_multiple_clauses() {
        let result = parse_clauses("u+r,g-w,o=");
        assert_eq!(
            result,
            Ok(vec![
                Clause {
                    who: Who { mask: 0o700 },
                    actions: vec![Action {
                        operator: Operator::Add,
                        permission: 0o444,
                    }],
                },
                Clause {
                    who: Who { mask: 0o070 },
                    actions: vec![Action {
                        operator: Operator::Remove,
                        permission: 0o222,
                    }],
                },
                Clause {
                    who: Who { mask: 0o007 },
                    actions: vec![Action {
                        operator: Operator::Set,
                        permission: 0,
                    }],
                },
            ])
        );
    }

    #[test]
    fn parsing_empty_input() {
        let result = parse_clauses("");
        assert_eq!(
            result,
            Err(ParseClausesError::BadClause(ParseClauseError::BadAction(
                ParseOperatorError
            )))
        );
    }

    #[test]
    fn parsing_clause_without_operator() {
        let result = parse_clauses("u+r,g-w,o");
        assert_eq!(
            result,
            Err(ParseClausesError::BadClause(ParseClauseError::BadAction(
                ParseOperatorError
            )))
        );
    }

    #[test]
    fn parsing_trailing_comma() {
        let result = parse_clauses("u+r,");
        assert_eq!(
            result,
            Err(ParseClausesError::BadClause(ParseClauseError::BadAction(
                ParseOperatorError
            )))
        );
    }

    #[test]
    fn parsing_ill_separated_clauses() {
        let result = parse_clauses("u+r,g-w;o=");
        assert_eq!(result, Err(ParseClausesError::InvalidChar(';')));
    }

    #[test]
    fn parsing_invalid_permission_symbol() {
        let result = parse_clauses("u=q");
        assert_eq!(result, Err(ParseClausesError::InvalidChar('q')));
    }
}




#[cfg(test)]
mod operator_tests {
    use super::*;

    #[test]
    fn parsing_plus() {
        let mut s = "+r";
        let result = Operator::parse(&mut s);
        assert_eq!(result, Ok(Operator::Add));
        assert_eq!(s, "r");
    }

    #[test]
    fn parsing_minus() {
        let mut s = "-w";
        let result = Operator::parse(&mut s);
        assert_eq!(result, Ok(Operator::Remove));
        assert_eq!(s, "w");
    }

    #[test]
    fn parsing_equal() {
        let mut s = "=x";
        let result = Operator::parse(&mut s);
        assert_eq!(result, Ok(Operator::Set));
        assert_eq!(s, "x");
    }

    #[test]
    fn parsing_non_operator() {
        let mut s = "";
        let result = Operator::parse(&mut s);
        assert_eq!(result, Err(ParseOperatorError));

        let mut s = "x";
        let result = Operator::parse(&mut s);
        assert_eq!(result, Err(ParseOperatorError));
    }
}

#[cfg(test)]
mod permission_tests {
    use super::*;

    #[test]
    fn parsing_empty() {
        let mut s = "";
        assert_eq!(parse_permission(&mut s), 0);
        assert_eq!(s, "");

        let mut s = ",";
        assert_eq!(parse_permission(&mut s), 0);
        assert_eq!(s, ",");
    }

    #[test]
    fn parsing_single_symbols() {
        let mut s = "r";
        assert_eq!(parse_permission(&mut s), 0o444);
        let mut s = "w";
        assert_eq!(parse_permission(&mut s), 0o222);
        let mut s = "x";
        assert_eq!(parse_permission(&mut s), 0o111);
    }

    #[test]
    fn parsing_combinations() {
        let mut s = "rw";
        assert_eq!(parse_permission(&mut s), 0o666);
        assert_eq!(s, "");

        let mut s = "xr";
        assert_eq!(parse_permission(&mut s), 0o555);
        assert_eq!(s, "");

        let mut s = "xwr-u";
        assert_eq!(parse_permission(&mut s), 0o777);
        assert_eq!(s, "-u");
    }
}
