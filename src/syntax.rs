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

//! Parsing command-line arguments
//!
//! The argument grammar is position-dependent: only the first argument may
//! be an option, at most one option is consumed, and everything after the
//! mask operand belongs to the command verbatim, even if it looks like an
//! option. A general-purpose option parser would reorder or reparse those
//! arguments, so this module implements the grammar directly.

use thiserror::Error;

/// Interpretation of the command-line arguments
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Invocation {
    /// Print the help text (`--help`, `-h`)
    Help,
    /// Print the version text (`--version`, `-V`)
    Version,
    /// Show the current file mode creation mask
    Show {
        /// Whether to render the mask in symbolic notation (`--symbolic`, `-S`)
        symbolic: bool,
    },
    /// Set the file mode creation mask, then show it or run a command
    Set {
        /// The mask operand, not yet decoded
        mask: String,
        /// Whether to render the mask in symbolic notation (`--symbolic`, `-S`)
        symbolic: bool,
        /// Command to replace the process with, empty if none was given
        command: Vec<String>,
    },
}

/// Error for an unrecognized option
///
/// The contained string is the offending argument, including its leading
/// hyphen.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error("bad option: {0}")]
pub struct BadOptionError(pub String);

/// Parses command-line arguments, excluding the program name.
///
/// `Help` and `Version` take effect as soon as they are recognized;
/// arguments after them are accepted and discarded.
pub fn parse<I>(args: I) -> Result<Invocation, BadOptionError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut symbolic = false;

    let mut next = args.next();
    if let Some(first) = &next {
        if let Some(option) = first.strip_prefix('-') {
            match option {
                "-help" | "h" => return Ok(Invocation::Help),
                "-version" | "V" => return Ok(Invocation::Version),
                "-symbolic" | "S" => symbolic = true,
                // "--" only marks the end of options.
                "-" => {}
                _ => return Err(BadOptionError(first.clone())),
            }
            next = args.next();
        }
    }

    let Some(mask) = next else {
        return Ok(Invocation::Show { symbolic });
    };
    Ok(Invocation::Set {
        mask,
        symbolic,
        command: args.collect(),
    })
}
